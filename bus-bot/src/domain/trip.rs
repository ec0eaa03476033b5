//! Scheduled bus trips.

use chrono::NaiveTime;

use super::Direction;

/// One scheduled bus run.
///
/// Times carry no date. Arrival is not checked against departure, so a trip
/// crossing midnight keeps its nominal clock times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    /// Line name as written in the schedule (e.g. "Ruta 60").
    pub line: String,
    pub direction: Direction,
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
}

impl TripRecord {
    pub fn new(
        line: impl Into<String>,
        direction: Direction,
        departure: NaiveTime,
        arrival: NaiveTime,
    ) -> Self {
        Self {
            line: line.into(),
            direction,
            departure,
            arrival,
        }
    }

    /// Whether the line name contains `needle`, ignoring case.
    ///
    /// `needle` must already be lower-cased.
    pub fn line_contains(&self, needle: &str) -> bool {
        self.line.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(line: &str) -> TripRecord {
        let t = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        TripRecord::new(line, Direction::Outbound, t, t)
    }

    #[test]
    fn line_substring_ignores_case() {
        assert!(trip("Ruta 60").line_contains("60"));
        assert!(trip("Ruta 60").line_contains("ruta 6"));
        assert!(trip("RUTA 60").line_contains("ruta"));
        assert!(!trip("Ruta 12").line_contains("60"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(trip("Ruta 12").line_contains(""));
    }
}
