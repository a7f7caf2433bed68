use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

use crate::utils::date::{end_of_day_due, local_to_utc, rollover_datetime};

const UTC_SUFFIX: char = 'Z';
const TIME_SEPARATOR: char = 'T';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Invalid date format: {0:?}")]
    UnrecognizedFormat(String),
    #[error("Date outside the supported range: {0:?}")]
    OutOfRange(String),
}

/// Convert a Canvas due-date token into an absolute instant.
///
/// Accepted shapes, tried in order:
/// - `YYYYMMDDTHHMMSS` with optional `Z`
/// - `YYYYMMDDTHHMM` with optional `Z` (seconds are zero)
/// - `YYYYMMDD`, due at 23:59:00 local time
///
/// With `Z` the fields are UTC, without it they are local wall-clock time.
/// Fields past their range roll over (`20250230` is March 2nd), and a local
/// time skipped by DST moves forward, so every token of these shapes yields
/// an instant.
pub fn normalize_due_date(token: &str) -> Result<DateTime<Utc>, DateParseError> {
    let (body, is_utc) = match token.strip_suffix(UTC_SUFFIX) {
        Some(body) => (body, true),
        None => (token, false),
    };

    if let Some((date_part, time_part)) = body.split_once(TIME_SEPARATOR) {
        let (Some((year, month, day)), Some((hour, minute, second))) =
            (parse_ymd(date_part), parse_hms(time_part))
        else {
            return Err(DateParseError::UnrecognizedFormat(token.to_string()));
        };
        let naive = rollover_datetime(year, month, day, hour, minute, second)
            .ok_or_else(|| DateParseError::OutOfRange(token.to_string()))?;

        if is_utc {
            return Ok(Utc.from_utc_datetime(&naive));
        }
        return Ok(local_to_utc(&naive));
    }

    if !is_utc {
        if let Some((year, month, day)) = parse_ymd(body) {
            let naive = rollover_datetime(year, month, day, 0, 0, 0)
                .and_then(|start| end_of_day_due(start.date()))
                .ok_or_else(|| DateParseError::OutOfRange(token.to_string()))?;
            return Ok(local_to_utc(&naive));
        }
    }

    Err(DateParseError::UnrecognizedFormat(token.to_string()))
}

/// Lenient form of [`normalize_due_date`]: failures are logged and become `None`.
pub fn parse_due_date(token: &str) -> Option<DateTime<Utc>> {
    match normalize_due_date(token) {
        Ok(due) => Some(due),
        Err(err) => {
            log::error!("Skipping due date: {}", err);
            None
        }
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// Months stay 1-based here; `rollover_datetime` takes them that way.
fn parse_ymd(s: &str) -> Option<(i32, u32, u32)> {
    if s.len() != 8 || !all_digits(s) {
        return None;
    }

    Some((s[0..4].parse().ok()?, s[4..6].parse().ok()?, s[6..8].parse().ok()?))
}

fn parse_hms(s: &str) -> Option<(u32, u32, u32)> {
    if !all_digits(s) {
        return None;
    }

    match s.len() {
        6 => Some((s[0..2].parse().ok()?, s[2..4].parse().ok()?, s[4..6].parse().ok()?)),
        4 => Some((s[0..2].parse().ok()?, s[2..4].parse().ok()?, 0)),
        _ => None,
    }
}
