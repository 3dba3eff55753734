//! Client configuration
//!
//! Credentials and server selection for a [`crate::Client`]. A `Config` is
//! immutable once constructed; hold several with different credentials to
//! talk to several programs at once.

use url::Url;

use crate::error::{Error, Result};

/// Default server: the Hyperwallet sandbox environment.
pub const DEFAULT_SERVER: &str = "https://api.sandbox.hyperwallet.com";

/// API credentials and server URL.
#[derive(Debug, Clone)]
pub struct Config {
    username: String,
    password: String,
    program_token: String,
    server: Url,
}

impl Config {
    /// Create a configuration against the sandbox server.
    ///
    /// All three credentials must be non-empty.
    pub fn new(username: &str, password: &str, program_token: &str) -> Result<Self> {
        Self::with_server(username, password, program_token, DEFAULT_SERVER)
    }

    /// Create a configuration against an explicit server URL
    /// (e.g. the production environment).
    pub fn with_server(
        username: &str,
        password: &str,
        program_token: &str,
        server: &str,
    ) -> Result<Self> {
        if username.is_empty() {
            return Err(Error::MissingArgument("username"));
        }
        if password.is_empty() {
            return Err(Error::MissingArgument("password"));
        }
        if program_token.is_empty() {
            return Err(Error::MissingArgument("programToken"));
        }

        let server = Url::parse(server)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            program_token: program_token.to_string(),
            server,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Token of the program this client operates on. Injected into
    /// create requests that omit `programToken`.
    pub fn program_token(&self) -> &str {
        &self.program_token
    }

    pub fn server(&self) -> &Url {
        &self.server
    }
}
