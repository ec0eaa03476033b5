//! Web layer for the bus schedule assistant.
//!
//! A chat page plus a small JSON API: one message in, one reply out.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, BotConversation};
pub use templates::*;
