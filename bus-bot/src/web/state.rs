//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedResolver;
use crate::chat::Conversation;
use crate::resolver::ResolverBackend;

/// The conversation handler as wired up in `main`.
pub type BotConversation = Conversation<CachedResolver<ResolverBackend>>;

/// Shared application state.
///
/// Built once at startup; every request sees the same schedule, resolver and
/// cache.
#[derive(Clone)]
pub struct AppState {
    pub conversation: Arc<BotConversation>,
}

impl AppState {
    pub fn new(conversation: BotConversation) -> Self {
        Self {
            conversation: Arc::new(conversation),
        }
    }
}
