//! Text for the countdown and the sinks that display it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;

use super::models::{CountdownFrame, CountdownWarningState};

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

pub const DUE_NOW: &str = "DUE NOW!";

pub fn format_next_due(name: &str) -> String {
    format!("Next Due: {}", name)
}

/// `Time Left: 4d 3h 12m 9s`, or `DUE NOW!` once `due` is reached.
pub fn format_time_left(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = due.signed_duration_since(now).num_milliseconds();
    if remaining <= 0 {
        return DUE_NOW.to_string();
    }

    let days = remaining / MS_PER_DAY;
    let hours = (remaining % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (remaining % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (remaining % MS_PER_MINUTE) / MS_PER_SECOND;

    format!("Time Left: {}d {}h {}m {}s", days, hours, minutes, seconds)
}

/// Receives a frame every tick.
pub trait CountdownSink {
    fn render(&mut self, frame: &CountdownFrame) -> Result<()>;
}

/// Redraws a single terminal line per tick, printing the heading whenever it changes.
pub struct TerminalSink<W: Write> {
    out: W,
    last_heading: Option<String>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_heading: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CountdownSink for TerminalSink<W> {
    fn render(&mut self, frame: &CountdownFrame) -> Result<()> {
        if self.last_heading.as_deref() != Some(frame.heading.as_str()) {
            if self.last_heading.is_some() {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{}", frame.heading)?;
            self.last_heading = Some(frame.heading.clone());
        }

        let marker = match frame.state {
            CountdownWarningState::Due | CountdownWarningState::Critical => "!! ",
            CountdownWarningState::Imminent => "! ",
            _ => "",
        };
        // \x1b[K clears what is left of a longer previous line
        write!(self.out, "\r{}{}\x1b[K", marker, frame.time_left)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_time_left() {
        let due = now()
            + Duration::days(4)
            + Duration::hours(3)
            + Duration::minutes(12)
            + Duration::seconds(9)
            + Duration::milliseconds(999);
        assert_eq!(format_time_left(due, now()), "Time Left: 4d 3h 12m 9s");
    }

    #[test]
    fn test_format_time_left_under_a_second() {
        let due = now() + Duration::milliseconds(400);
        assert_eq!(format_time_left(due, now()), "Time Left: 0d 0h 0m 0s");
    }

    #[test]
    fn test_format_time_left_due() {
        assert_eq!(format_time_left(now(), now()), DUE_NOW);
        assert_eq!(format_time_left(now() - Duration::hours(2), now()), DUE_NOW);
    }

    #[test]
    fn test_format_next_due() {
        assert_eq!(format_next_due("Lab 4"), "Next Due: Lab 4");
    }

    #[test]
    fn test_terminal_sink_prints_heading_once() {
        let mut sink = TerminalSink::new(Vec::new());
        let frame = |time_left: &str| CountdownFrame {
            heading: "Next Due: Lab 4".to_string(),
            time_left: time_left.to_string(),
            state: CountdownWarningState::Normal,
        };

        sink.render(&frame("Time Left: 0d 0h 0m 2s")).unwrap();
        sink.render(&frame("Time Left: 0d 0h 0m 1s")).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output.matches("Next Due: Lab 4").count(), 1);
        assert!(output.ends_with("\rTime Left: 0d 0h 0m 1s\x1b[K"));
    }
}
