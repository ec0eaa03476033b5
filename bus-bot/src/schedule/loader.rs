//! CSV schedule loader.
//!
//! Expects a header row containing at least `Línea`, `Dirección`, `Salida`
//! and `Llegada`. Header names are trimmed; column order and extra columns
//! do not matter.

use std::io::Read;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::domain::{Direction, TripRecord, parse_hhmmss};

use super::error::ScheduleError;

/// One raw schedule row, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "Línea")]
    pub line: String,
    #[serde(rename = "Dirección")]
    pub direction: String,
    #[serde(rename = "Salida")]
    pub departure: String,
    #[serde(rename = "Llegada")]
    pub arrival: String,
}

impl ScheduleRow {
    /// Validate the row into a trip. `row` is the 1-based file line, for errors.
    fn into_trip(self, row: usize) -> Result<TripRecord, ScheduleError> {
        let invalid = |message: String| ScheduleError::InvalidRow { row, message };

        let direction = Direction::parse(&self.direction).map_err(|e| invalid(e.to_string()))?;
        let departure = parse_hhmmss(&self.departure).map_err(|e| invalid(e.to_string()))?;
        let arrival = parse_hhmmss(&self.arrival).map_err(|e| invalid(e.to_string()))?;

        Ok(TripRecord::new(
            self.line.trim(),
            direction,
            departure,
            arrival,
        ))
    }
}

/// Read every trip from a CSV source.
///
/// Fails on the first malformed row: a half-loaded timetable would give
/// confidently wrong answers.
pub fn read_schedule<R: Read>(reader: R) -> Result<Vec<TripRecord>, ScheduleError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

    let mut trips = Vec::new();
    for (idx, result) in rdr.deserialize::<ScheduleRow>().enumerate() {
        let row: ScheduleRow = result?;
        // Line 1 is the header.
        trips.push(row.into_trip(idx + 2)?);
    }
    Ok(trips)
}
