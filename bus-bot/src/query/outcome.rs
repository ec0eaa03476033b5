//! Query results.

use std::fmt;

use crate::domain::{TimeError, TripRecord};

/// Ordered trips selected by a query. Borrowed from the schedule store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet<'a> {
    trips: Vec<&'a TripRecord>,
}

impl<'a> MatchSet<'a> {
    pub fn new(trips: Vec<&'a TripRecord>) -> Self {
        Self { trips }
    }

    pub fn trips(&self) -> &[&'a TripRecord] {
        &self.trips
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        self.trips.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Why a query selected nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The schedule store has no trips
    EmptySchedule,
    /// No line filter and no direction
    MissingDirection,
    /// Neither "now" nor a literal time
    MissingTime,
    /// The literal time did not parse
    InvalidTime(TimeError),
    /// A literal time without a recognised relation
    UnsupportedRelation,
    /// The query was well formed but no trip qualified
    NothingQualified,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::EmptySchedule => write!(f, "schedule is empty"),
            EmptyReason::MissingDirection => write!(f, "no direction or line given"),
            EmptyReason::MissingTime => write!(f, "no time given"),
            EmptyReason::InvalidTime(e) => write!(f, "{e}"),
            EmptyReason::UnsupportedRelation => {
                write!(f, "time given without a recognised relation")
            }
            EmptyReason::NothingQualified => write!(f, "no trip qualified"),
        }
    }
}

/// Outcome of a query: matching trips, or an explicit reason for none.
///
/// `Found` never holds an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome<'a> {
    Found(MatchSet<'a>),
    Empty(EmptyReason),
}

impl<'a> QueryOutcome<'a> {
    /// Wrap selected trips, mapping an empty selection to `NothingQualified`.
    pub fn from_trips(trips: Vec<&'a TripRecord>) -> Self {
        if trips.is_empty() {
            QueryOutcome::Empty(EmptyReason::NothingQualified)
        } else {
            QueryOutcome::Found(MatchSet::new(trips))
        }
    }

    /// The matching trips; empty when nothing matched.
    pub fn trips(&self) -> &[&'a TripRecord] {
        match self {
            QueryOutcome::Found(set) => set.trips(),
            QueryOutcome::Empty(_) => &[],
        }
    }

    pub fn into_match_set(self) -> MatchSet<'a> {
        match self {
            QueryOutcome::Found(set) => set,
            QueryOutcome::Empty(_) => MatchSet::default(),
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            QueryOutcome::Found(_) => None,
            QueryOutcome::Empty(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, parse_hhmm};
    use chrono::NaiveTime;

    #[test]
    fn empty_selection_is_nothing_qualified() {
        let outcome = QueryOutcome::from_trips(vec![]);
        assert_eq!(outcome.empty_reason(), Some(&EmptyReason::NothingQualified));
        assert!(outcome.trips().is_empty());
        assert!(outcome.into_match_set().is_empty());
    }

    #[test]
    fn found_keeps_order() {
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let a = TripRecord::new("A", Direction::Outbound, t, t);
        let b = TripRecord::new("B", Direction::Outbound, t, t);

        let outcome = QueryOutcome::from_trips(vec![&b, &a]);
        assert_eq!(outcome.empty_reason(), None);

        let lines: Vec<&str> = outcome
            .into_match_set()
            .iter()
            .map(|t| t.line.as_str())
            .collect();
        assert_eq!(lines, vec!["B", "A"]);
    }

    #[test]
    fn reason_display() {
        assert_eq!(EmptyReason::EmptySchedule.to_string(), "schedule is empty");
        let err = parse_hhmm("25:00").unwrap_err();
        assert_eq!(
            EmptyReason::InvalidTime(err).to_string(),
            "invalid time \"25:00\": hour must be 0-23"
        );
    }
}
