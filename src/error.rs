//! Error types for the Hyperwallet client
//!
//! Every fallible operation in this crate returns [`Result`]. Argument
//! validation fails before any network call is made; transport and API
//! failures are surfaced as-is, without retries or recovery.

use reqwest::StatusCode;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the Hyperwallet client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument (credential, token, or payload) was missing or
    /// empty. Raised before any request is sent.
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// An argument was present but malformed.
    #[error("{name} is invalid: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    /// The configured server URL could not be parsed.
    #[error("invalid server URL: {0}")]
    InvalidServerUrl(#[from] url::ParseError),

    /// A network-level failure (connection, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API returned a non-success HTTP status. `code` and `message`
    /// carry the first entry of the Hyperwallet error envelope when the
    /// response body contained one.
    #[error("API request failed: {status}")]
    Api {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
    },

    /// The response body was not valid JSON.
    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
