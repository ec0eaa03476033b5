//! Intent resolution: free text in, structured [`Intent`] out.
//!
//! The real resolver is a language model behind an HTTP API. Its replies are
//! treated as untrusted text: the first JSON object is extracted, loosely
//! shaped fields are coerced, and anything unusable becomes an
//! [`IntentError`]. Transport failures are kept apart as [`ResolverError`]
//! so they can be logged distinctly, though users see the same reply.

mod backend;
mod client;
mod error;
mod extract;
mod mock;
mod prompt;
mod types;

use std::future::Future;

use crate::domain::{Intent, IntentError};

pub use backend::ResolverBackend;
pub use client::{GeminiClient, ResolverConfig};
pub use error::ResolverError;
pub use extract::{extract_json_object, parse_intent};
pub use mock::MockResolver;
pub use prompt::build_prompt;

/// Context about the schedule that helps the model interpret a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleHints {
    /// Name of the origin endpoint (where "Vuelta" trips go).
    pub origin: String,
    /// Name of the destination endpoint (where "Ida" trips go).
    pub destination: String,
    /// Known line names.
    pub lines: Vec<String>,
}

impl ScheduleHints {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }
}

/// Why a message could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The resolver could not be reached or answered with an error
    #[error("resolver unavailable: {0}")]
    Transport(#[from] ResolverError),

    /// The resolver answered, but not with a usable intent
    #[error("unusable intent: {0}")]
    Intent(#[from] IntentError),
}

/// Turns a user message into an intent.
///
/// Implementations must be safe to call concurrently.
pub trait IntentResolver {
    fn resolve(
        &self,
        message: &str,
        hints: &ScheduleHints,
    ) -> impl Future<Output = Result<Intent, ResolveError>> + Send;
}
