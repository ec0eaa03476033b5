//! The in-memory schedule table.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{error, info};

use crate::domain::TripRecord;

use super::error::ScheduleError;
use super::loader::read_schedule;

/// Immutable collection of every scheduled trip.
///
/// Built once at startup and shared behind an `Arc`; there is no way to
/// mutate it after construction.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    trips: Vec<TripRecord>,
}

impl ScheduleStore {
    pub fn new(trips: Vec<TripRecord>) -> Self {
        Self { trips }
    }

    /// A store with no trips. Every query against it finds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the schedule from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ScheduleError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ScheduleError::Io(e),
        })?;
        Ok(Self::new(read_schedule(file)?))
    }

    /// Load the schedule, falling back to an empty store on any error.
    ///
    /// The error is logged; the service keeps running and answers every
    /// question with "no matches".
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(store) => {
                info!(
                    path = %path.display(),
                    trips = store.len(),
                    "loaded schedule"
                );
                store
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "schedule unavailable, using empty table");
                Self::empty()
            }
        }
    }

    /// All trips, in source order.
    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Distinct line names, in first-seen order.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = Vec::new();
        for trip in &self.trips {
            if !lines.contains(&trip.line.as_str()) {
                lines.push(&trip.line);
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use chrono::NaiveTime;
    use std::io::Write;
    use tempfile::tempdir;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Horarios.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Línea,Dirección,Salida,Llegada").unwrap();
        writeln!(file, "Ruta 60,Ida,14:50:00,15:20:00").unwrap();
        writeln!(file, "Ruta 60,Vuelta,18:00:00,18:30:00").unwrap();
        drop(file);

        let store = ScheduleStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.trips()[1].direction, Direction::Return);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = ScheduleStore::load(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ScheduleError::NotFound { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_empty() {
        let dir = tempdir().unwrap();
        let store = ScheduleStore::load_or_empty(dir.path().join("nope.csv"));
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_file_falls_back_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Horarios.csv");
        std::fs::write(&path, "Línea,Salida\nRuta 60,14:50:00\n").unwrap();

        assert!(ScheduleStore::load_or_empty(&path).is_empty());
    }

    #[test]
    fn distinct_lines_in_order() {
        let store = ScheduleStore::new(vec![
            TripRecord::new("Ruta 60", Direction::Outbound, t(8, 0), t(8, 30)),
            TripRecord::new("Ruta 12", Direction::Outbound, t(9, 0), t(9, 30)),
            TripRecord::new("Ruta 60", Direction::Return, t(10, 0), t(10, 30)),
        ]);

        assert_eq!(store.lines(), vec!["Ruta 60", "Ruta 12"]);
    }

    #[test]
    fn bundled_schedule_loads() {
        let store =
            ScheduleStore::load(concat!(env!("CARGO_MANIFEST_DIR"), "/Horarios.csv")).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.lines(), vec!["Ruta 60", "Ruta 12"]);
    }
}
