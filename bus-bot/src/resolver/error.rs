//! Resolver client error types.

use std::fmt;

/// Errors from the language-model HTTP client.
#[derive(Debug)]
pub enum ResolverError {
    /// HTTP request failed (network error, connection refused, etc.)
    Http(reqwest::Error),

    /// The request did not complete within the configured timeout
    Timeout,

    /// Response body was not the expected JSON
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// The model returned no text; `reason` is the block or finish reason
    /// when the API gave one
    EmptyResponse { reason: Option<String> },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Client or mock not configured correctly
    NotConfigured(String),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::Http(e) => write!(f, "HTTP error: {e}"),
            ResolverError::Timeout => write!(f, "request to language model timed out"),
            ResolverError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            ResolverError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ResolverError::EmptyResponse { reason } => {
                write!(f, "language model returned no text")?;
                if let Some(reason) = reason {
                    write!(f, " ({reason})")?;
                }
                Ok(())
            }
            ResolverError::RateLimited => write!(f, "rate limited by language model API"),
            ResolverError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            ResolverError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for ResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolverError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ResolverError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResolverError::Timeout
        } else {
            ResolverError::Http(err)
        }
    }
}
