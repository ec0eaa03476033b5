//! Bus schedule assistant.
//!
//! A chat service that answers questions like "I want to get to the faculty
//! by 15:00" from a fixed timetable. A language model turns the message into
//! a structured intent; a deterministic query engine picks the trips.

pub mod cache;
pub mod chat;
pub mod config;
pub mod domain;
pub mod query;
pub mod resolver;
pub mod schedule;
pub mod web;
