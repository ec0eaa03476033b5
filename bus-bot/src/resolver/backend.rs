//! Runtime choice between the real and the mock resolver.

use crate::domain::Intent;

use super::client::GeminiClient;
use super::mock::MockResolver;
use super::{IntentResolver, ResolveError, ScheduleHints};

/// The resolver selected at startup.
#[derive(Debug, Clone)]
pub enum ResolverBackend {
    Gemini(GeminiClient),
    Mock(MockResolver),
}

impl IntentResolver for ResolverBackend {
    async fn resolve(&self, message: &str, hints: &ScheduleHints) -> Result<Intent, ResolveError> {
        match self {
            ResolverBackend::Gemini(client) => client.resolve(message, hints).await,
            ResolverBackend::Mock(mock) => mock.resolve(message, hints).await,
        }
    }
}

impl From<GeminiClient> for ResolverBackend {
    fn from(client: GeminiClient) -> Self {
        ResolverBackend::Gemini(client)
    }
}

impl From<MockResolver> for ResolverBackend {
    fn from(mock: MockResolver) -> Self {
        ResolverBackend::Mock(mock)
    }
}
