//! The conversation layer: commands, orchestration and reply formatting.

mod clock;
mod command;
mod format;
mod handler;
mod reply;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::Command;
pub use format::format_schedule;
pub use handler::Conversation;
pub use reply::{Reply, ReplyKind};
