//! Rendering trip listings as chat text.

use std::fmt::Write;

use crate::domain::{Direction, format_hhmm};
use crate::query::MatchSet;
use crate::resolver::ScheduleHints;

/// Render matches as a Markdown listing with a direction-specific header.
pub fn format_schedule(
    direction: Option<Direction>,
    matches: &MatchSet<'_>,
    endpoints: &ScheduleHints,
) -> String {
    let mut out = match direction {
        Some(Direction::Outbound) => format!(
            "Acá están los horarios que encontré: {} -> {}\n\n",
            endpoints.origin, endpoints.destination
        ),
        Some(Direction::Return) => format!(
            "Acá están los horarios que encontré: {} -> {}\n\n",
            endpoints.destination, endpoints.origin
        ),
        None => "Aquí están los horarios que encontré:\n\n".to_string(),
    };

    for trip in matches.iter() {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "🚍 Línea **{}**\n   ➡️ Sale a las `{}`\n   ➡️ Llega a las `{}`\n\n",
            trip.line,
            format_hhmm(trip.departure),
            format_hhmm(trip.arrival)
        );
    }

    out
}
