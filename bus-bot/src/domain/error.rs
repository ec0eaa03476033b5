//! Domain error types.
//!
//! Intent errors describe why a resolver reply could not be turned into an
//! actionable [`Intent`](super::Intent). They all surface to the user as the
//! same "didn't understand" reply, but are logged individually.

use super::InvalidDirection;

/// Reasons a resolver reply is not a usable intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    /// No `{...}` block anywhere in the reply
    #[error("no JSON object found in resolver reply")]
    NoJsonObject,

    /// The extracted block is not valid JSON of the expected shape
    #[error("invalid intent JSON: {0}")]
    Json(String),

    /// The resolver flagged the request as unclear
    #[error("resolver could not interpret the request: {0}")]
    Unclear(String),

    /// A direction outside the two known endpoints
    #[error(transparent)]
    Direction(#[from] InvalidDirection),

    /// Neither a direction nor a line was given
    #[error("intent names neither a direction nor a line")]
    NotActionable,
}
