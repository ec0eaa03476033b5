//! Schedule query engine.
//!
//! Answers: "given this intent, which trips should the user see, and in what
//! order?" The engine is a pure function of the schedule, the intent and the
//! current instant. It never fails: anything it cannot answer comes back as
//! an explicit empty outcome with a reason.

mod config;
mod engine;
mod outcome;


pub use config::QueryConfig;
pub use engine::QueryEngine;
pub use outcome::{EmptyReason, MatchSet, QueryOutcome};
