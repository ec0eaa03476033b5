//! Structured user intent.
//!
//! An [`Intent`] is what the resolver makes of a free-text message. It is
//! strongly typed: the loosely shaped resolver output is normalised before an
//! `Intent` is ever built (see `resolver::parse_intent`).

use super::{Action, Direction, TimeRelation};

/// The time a user asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOfDay {
    /// "ahora": the next departures from the current instant.
    Now,
    /// A literal clock time, kept raw. The query engine parses it and treats
    /// a malformed value as "no matches".
    At(String),
}

impl TimeOfDay {
    /// Interpret a resolver `hora` value.
    pub fn from_raw(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ahora") || trimmed.eq_ignore_ascii_case("now") {
            TimeOfDay::Now
        } else {
            TimeOfDay::At(trimmed.to_string())
        }
    }
}

/// A structured schedule question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    pub direction: Option<Direction>,
    pub time_of_day: Option<TimeOfDay>,
    pub action: Option<Action>,
    /// Case-insensitive substring of a line name.
    pub line_filter: Option<String>,
    /// Only meaningful alongside a literal time.
    pub time_relation: Option<TimeRelation>,
    /// Positive cap on the number of trips returned.
    pub requested_count: Option<usize>,
    /// Return every match, overriding `requested_count`.
    pub full_listing: bool,
}

impl Intent {
    /// An intent for trips in one direction.
    pub fn toward(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    /// An intent for trips of one line.
    pub fn for_line(line: impl Into<String>) -> Self {
        Self {
            line_filter: Some(line.into()),
            ..Self::default()
        }
    }

    /// Ask about the next departures from now.
    pub fn now(mut self) -> Self {
        self.time_of_day = Some(TimeOfDay::Now);
        self
    }

    /// Ask about a literal time with a relation.
    pub fn at(mut self, time: impl Into<String>, relation: TimeRelation) -> Self {
        self.time_of_day = Some(TimeOfDay::At(time.into()));
        self.time_relation = Some(relation);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.requested_count = Some(count);
        self
    }

    pub fn with_full_listing(mut self) -> Self {
        self.full_listing = true;
        self
    }

    /// An intent is actionable when it names a direction or a line.
    pub fn is_actionable(&self) -> bool {
        self.direction.is_some() || self.line_filter.is_some()
    }
}
