//! Message handling: one incoming message in, exactly one reply out.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::Intent;
use crate::query::{QueryConfig, QueryEngine, QueryOutcome};
use crate::resolver::{IntentResolver, ResolveError, ScheduleHints};
use crate::schedule::ScheduleStore;

use super::clock::{Clock, SystemClock};
use super::command::Command;
use super::format::format_schedule;
use super::reply::Reply;

/// Orchestrates resolver, query engine and formatting for each message.
///
/// Holds no per-user state, so one instance serves every conversation.
pub struct Conversation<R, C = SystemClock> {
    store: Arc<ScheduleStore>,
    resolver: R,
    clock: C,
    hints: ScheduleHints,
    query: QueryConfig,
}

impl<R: IntentResolver> Conversation<R, SystemClock> {
    /// A conversation reading the wall clock.
    pub fn new(store: Arc<ScheduleStore>, resolver: R, hints: ScheduleHints) -> Self {
        Self::with_clock(store, resolver, hints, SystemClock)
    }
}

impl<R: IntentResolver, C: Clock> Conversation<R, C> {
    pub fn with_clock(store: Arc<ScheduleStore>, resolver: R, hints: ScheduleHints, clock: C) -> Self {
        Self {
            store,
            resolver,
            clock,
            hints,
            query: QueryConfig::default(),
        }
    }

    pub fn with_query_config(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn hints(&self) -> &ScheduleHints {
        &self.hints
    }

    /// Answer one message.
    pub async fn handle(&self, text: &str) -> Reply {
        if let Some(command) = Command::parse(text) {
            info!(chars = text.chars().count(), ?command, "answered command with help");
            return Reply::Help;
        }

        let text = text.trim();
        if text.is_empty() {
            info!(chars = 0, "blank message");
            return Reply::NotUnderstood;
        }

        match self.resolver.resolve(text, &self.hints).await {
            Ok(intent) => self.answer(&intent),
            Err(ResolveError::Intent(e)) => {
                info!(chars = text.chars().count(), error = %e, "could not interpret message");
                Reply::NotUnderstood
            }
            Err(ResolveError::Transport(e)) => {
                warn!(chars = text.chars().count(), error = %e, "intent resolver failed");
                Reply::NotUnderstood
            }
        }
    }

    /// Run the query engine for an already-resolved intent.
    pub fn answer(&self, intent: &Intent) -> Reply {
        let now = self.clock.now();
        let engine = QueryEngine::new(&self.store, &self.query);

        match engine.run(intent, now) {
            QueryOutcome::Found(matches) => {
                info!(?intent, trips = matches.len(), "answered with schedule");
                Reply::Schedule(format_schedule(intent.direction, &matches, &self.hints))
            }
            QueryOutcome::Empty(reason) => {
                info!(?intent, %reason, "no matching trips");
                Reply::NoMatches
            }
        }
    }
}

impl<R, C> Conversation<R, C>
where
    R: IntentResolver + Send + Sync + 'static,
    C: Clock + 'static,
{
    /// Answer one message on its own task.
    ///
    /// A panic anywhere in handling becomes [`Reply::InternalError`] instead
    /// of dropping the message unanswered.
    pub async fn handle_isolated(self: &Arc<Self>, text: String) -> Reply {
        let conversation = Arc::clone(self);
        match tokio::spawn(async move { conversation.handle(&text).await }).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "message handling failed");
                Reply::InternalError
            }
        }
    }
}
