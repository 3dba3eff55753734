//! HTTP transport for the Hyperwallet REST API
//!
//! Thin wrapper over [`reqwest::Client`] providing the `doGet`/`doPost`/
//! `doPut` primitives the endpoint façade dispatches to. Authentication is
//! HTTP Basic; all bodies are JSON. No retries and no local recovery:
//! transport and API failures propagate to the caller unchanged.

use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// All endpoint paths are relative to this prefix on the server.
const API_BASE_PATH: &str = "rest/v3";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Query parameters passed through to the API verbatim.
pub type QueryParams = std::collections::BTreeMap<String, String>;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        // Byte 200 may fall inside a multibyte character; cut on the
        // nearest char boundary at or below it.
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..cut],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Error envelope returned by the Hyperwallet API on non-success statuses:
/// `{"errors": [{"code": ..., "message": ..., ...}]}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client wrapper for Hyperwallet API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpClient {
    /// Create a new HTTP client from a validated configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hyperwallet-rust/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = format!(
            "{}/{}",
            config.server().as_str().trim_end_matches('/'),
            API_BASE_PATH
        );

        Ok(Self {
            client,
            base_url,
            username: config.username().to_string(),
            password: config.password().to_string(),
        })
    }

    /// Absolute URL for a resource path. Segments are inserted verbatim.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Make a GET request against the API.
    pub async fn do_get(&self, path: &str, params: Option<&QueryParams>) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("GET {}", url);

        let mut request = self.authenticated(self.client.get(&url));
        if let Some(params) = params {
            request = request.query(params);
        }

        self.execute(request).await
    }

    /// Make a POST request with a JSON body against the API.
    pub async fn do_post(
        &self,
        path: &str,
        body: &Value,
        headers: Option<HeaderMap>,
    ) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let mut request = self.authenticated(self.client.post(&url)).json(body);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        self.execute(request).await
    }

    /// Make a PUT request with a JSON body against the API.
    pub async fn do_put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("PUT {}", url);

        let request = self.authenticated(self.client.put(&url)).json(body);

        self.execute(request).await
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(api_error(status, &body));
        }

        // Handle empty response
        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Build an [`Error::Api`] from a non-success response, extracting the
/// first entry of the error envelope when the body carries one.
fn api_error(status: StatusCode, body: &str) -> Error {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let first = envelope.errors.into_iter().next();

    let (code, message) = match first {
        Some(detail) => (detail.code, detail.message),
        None => (None, None),
    };

    Error::Api {
        status,
        code,
        message,
    }
}
