//! Domain types for the bus schedule assistant.
//!
//! Trips, directions and intents. Parsing happens at construction, so code
//! that receives these types can trust their validity.

mod direction;
mod error;
mod intent;
mod time;
mod trip;

pub use direction::{Action, Direction, InvalidDirection, TimeRelation};
pub use error::IntentError;
pub use intent::{Intent, TimeOfDay};
pub use time::{TimeError, format_hhmm, on_day, parse_hhmm, parse_hhmmss};
pub use trip::TripRecord;
