//! Mock resolver for testing without API access.
//!
//! Serves canned model replies keyed by user message and runs them through
//! the same intent extraction as the real client.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Intent;

use super::error::ResolverError;
use super::extract::parse_intent;
use super::{IntentResolver, ResolveError, ScheduleHints};

/// Resolver that answers from a fixed table of model replies.
///
/// Useful for development and tests without language model credentials.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    /// Model reply text, keyed by trimmed user message.
    replies: HashMap<String, String>,
    /// Reply for messages not in the table.
    fallback: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load replies from a JSON file mapping messages to model text.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ResolverError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ResolverError::NotConfigured(format!("failed to read {}: {e}", path.display()))
        })?;
        let replies: HashMap<String, String> =
            serde_json::from_str(&json).map_err(|e| ResolverError::Json {
                message: e.to_string(),
                body: None,
            })?;

        Ok(Self {
            replies: replies
                .into_iter()
                .map(|(k, v)| (k.trim().to_string(), v))
                .collect(),
            ..Self::default()
        })
    }

    /// Answer `message` with the model text `reply`.
    pub fn with_reply(mut self, message: &str, reply: impl Into<String>) -> Self {
        self.replies.insert(message.trim().to_string(), reply.into());
        self
    }

    /// Answer every unknown message with `reply`.
    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    /// Number of resolve calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IntentResolver for MockResolver {
    async fn resolve(&self, message: &str, _hints: &ScheduleHints) -> Result<Intent, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = self
            .replies
            .get(message.trim())
            .or(self.fallback.as_ref())
            .ok_or_else(|| ResolverError::Api {
                status: 404,
                message: format!("no mock reply for {message:?}"),
            })?;

        Ok(parse_intent(reply)?)
    }
}
