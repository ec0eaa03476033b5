//! Schedule Store: the immutable table of bus trips.
//!
//! The table is read once at startup from a CSV export of the timetable and
//! shared read-only for the lifetime of the process. A missing or unreadable
//! source yields an empty store rather than a startup failure.

mod error;
mod loader;
mod store;

pub use error::ScheduleError;
pub use loader::{ScheduleRow, read_schedule};
pub use store::ScheduleStore;
