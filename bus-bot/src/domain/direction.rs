//! Enumerated intent vocabulary: direction of travel, action, time relation.
//!
//! The schedule and the resolver both speak Spanish ("Ida", "Vuelta",
//! "cerca", ...). These types accept those words case-insensitively and
//! nothing else.

use std::fmt;

/// Error returned when parsing an unknown direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0:?} (expected Ida or Vuelta)")]
pub struct InvalidDirection(String);

/// Direction of a trip between the two endpoints of the service.
///
/// # Examples
///
/// ```
/// use bus_bot::domain::Direction;
///
/// assert_eq!(Direction::parse("ida").unwrap(), Direction::Outbound);
/// assert_eq!(Direction::parse(" VUELTA ").unwrap(), Direction::Return);
/// assert!(Direction::parse("norte").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the destination ("Ida").
    Outbound,
    /// Toward the origin ("Vuelta").
    Return,
}

impl Direction {
    /// Parse a direction name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ida") {
            Ok(Direction::Outbound)
        } else if trimmed.eq_ignore_ascii_case("vuelta") {
            Ok(Direction::Return)
        } else {
            Err(InvalidDirection(s.to_string()))
        }
    }

    /// The schedule's name for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outbound => "Ida",
            Direction::Return => "Vuelta",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user wants to do at the requested time.
///
/// Informational only: it never changes which trips are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// "llegar"
    Arrive,
    /// "salir"
    Depart,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("llegar") {
            Some(Action::Arrive)
        } else if trimmed.eq_ignore_ascii_case("salir") {
            Some(Action::Depart)
        } else {
            None
        }
    }
}

/// How a requested time bounds the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRelation {
    /// Closest arrival at-or-before plus closest arrival after ("cerca").
    Near,
    /// Arrive strictly before the time ("antes_de").
    Before,
    /// Arrive at or after the time ("despues_de").
    After,
}

impl TimeRelation {
    /// Parse a resolver relation keyword. Unknown keywords yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cerca" => Some(TimeRelation::Near),
            "antes_de" => Some(TimeRelation::Before),
            "despues_de" | "después_de" => Some(TimeRelation::After),
            _ => None,
        }
    }
}
