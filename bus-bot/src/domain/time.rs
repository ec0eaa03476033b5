//! Time-of-day handling for the bus schedule.
//!
//! Schedule rows carry "HH:MM:SS" departure and arrival times, and the
//! resolver hands over requested times as "HH:MM". Neither has a date: every
//! time is placed on "today" before it is compared with the current instant.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parse a requested time in "HH:MM" format.
///
/// A single-digit hour ("9:05") is accepted; minutes must have two digits.
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use bus_bot::domain::parse_hhmm;
///
/// assert!(parse_hhmm("15:00").is_ok());
/// assert!(parse_hhmm("9:05").is_ok());
///
/// assert!(parse_hhmm("1500").is_err());
/// assert!(parse_hhmm("15:0").is_err());
/// assert!(parse_hhmm("24:00").is_err());
/// assert!(parse_hhmm("15:00:00").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    let input = s.trim();
    let mut parts = input.split(':');
    let (Some(h), Some(m), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TimeError::new(s, "expected HH:MM format"));
    };
    build_time(s, h, m, "00")
}

/// Parse a schedule time in "HH:MM:SS" format.
///
/// As with [`parse_hhmm`], the hour may have a single digit.
pub fn parse_hhmmss(s: &str) -> Result<NaiveTime, TimeError> {
    let input = s.trim();
    let mut parts = input.split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimeError::new(s, "expected HH:MM:SS format"));
    };
    build_time(s, h, m, sec)
}

fn build_time(input: &str, h: &str, m: &str, sec: &str) -> Result<NaiveTime, TimeError> {
    let hour = match h.len() {
        1 | 2 => parse_digits(h.as_bytes()),
        _ => None,
    }
    .ok_or_else(|| TimeError::new(input, "invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new(input, "hour must be 0-23"));
    }

    let minute = parse_two_digits(m.as_bytes())
        .ok_or_else(|| TimeError::new(input, "invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new(input, "minute must be 0-59"));
    }

    let second = parse_two_digits(sec.as_bytes())
        .ok_or_else(|| TimeError::new(input, "invalid second digits"))?;
    if second > 59 {
        return Err(TimeError::new(input, "second must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| TimeError::new(input, "invalid time"))
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    parse_digits(bytes)
}

fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let d = (b as char).to_digit(10)?;
        Some(acc * 10 + d)
    })
}

/// Place a time of day on a given date, yielding a comparable instant.
pub fn on_day(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Render a time of day as "HH:MM", dropping seconds.
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
