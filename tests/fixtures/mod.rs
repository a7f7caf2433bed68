// Test fixtures - reusable test data
// Canvas-shaped calendar feeds and reference instants

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

/// Reference instants
pub mod dates {
    use super::*;

    /// Mar 1, 2025 00:00 UTC, before every due date in the sample feed
    pub fn before_all() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    /// Mar 20, 2025 00:00 UTC, after the timestamped homework, before the project
    pub fn between() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap()
    }

    /// Jun 1, 2025, after everything
    pub fn after_all() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }
}

/// Calendar text builders
pub mod feeds {
    pub const HEADER: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:icalendar-ruby\r\nCALSCALE:GREGORIAN\r\nMETHOD:PUBLISH\r\nX-WR-CALNAME:Student Calendar (Canvas)\r\n";
    pub const FOOTER: &str = "END:VCALENDAR\r\n";

    /// An all-day assignment: `DTSTART;VALUE=DATE;VALUE=DATE:<date>` followed by `CLASS:`
    pub fn date_only_assignment(id: u32, summary: &str, date: &str) -> String {
        format!(
            "BEGIN:VEVENT\r\nDTSTAMP:20250301T120000Z\r\n\
             DTSTART;VALUE=DATE;VALUE=DATE:{date}\r\nCLASS:PUBLIC\r\n\
             DESCRIPTION:Read the handout\r\n\
             SEQUENCE:0\r\n\
             SUMMARY:{summary}\r\n\
             URL;VALUE=URI:https://canvas.oregonstate.edu/calendar?include_contexts=course_1&month=03&year=2025#assignment_{id}\r\n\
             UID:event-assignment-{id}\r\n\
             END:VEVENT\r\n"
        )
    }

    /// A timed assignment: `DTSTART:<stamp>` followed by `DTEND:`
    pub fn timed_assignment(id: u32, summary: &str, stamp: &str) -> String {
        format!(
            "BEGIN:VEVENT\r\nDTSTAMP:20250301T120000Z\r\n\
             DTSTART:{stamp}\r\nDTEND:{stamp}\r\nCLASS:PUBLIC\r\n\
             SEQUENCE:0\r\n\
             SUMMARY:{summary}\r\n\
             URL;VALUE=URI:https://canvas.oregonstate.edu/calendar#assignment_{id}\r\n\
             UID:event-assignment-{id}\r\n\
             END:VEVENT\r\n"
        )
    }

    /// An assignment event with no start field at all
    pub fn undated_assignment(id: u32, summary: &str) -> String {
        format!(
            "BEGIN:VEVENT\r\nCLASS:PUBLIC\r\nSUMMARY:{summary}\r\n\
             URL;VALUE=URI:https://canvas.oregonstate.edu/calendar#assignment_{id}\r\n\
             UID:event-assignment-{id}\r\nEND:VEVENT\r\n"
        )
    }

    /// A regular calendar event (office hours, lectures)
    pub fn calendar_event(id: u32, summary: &str, stamp: &str) -> String {
        format!(
            "BEGIN:VEVENT\r\nDTSTART:{stamp}\r\nDTEND:{stamp}\r\nCLASS:PUBLIC\r\n\
             SUMMARY:{summary}\r\n\
             URL;VALUE=URI:https://canvas.oregonstate.edu/calendar#calendar_event_{id}\r\n\
             UID:event-calendar-event-{id}\r\nEND:VEVENT\r\n"
        )
    }

    pub fn calendar(events: &[String]) -> String {
        let mut text = String::from(HEADER);
        for event in events {
            text.push_str(event);
        }
        text.push_str(FOOTER);
        text
    }

    /// Two assignments and one lecture: a date-only project due Mar 22 and a
    /// homework due Mar 17 18:30 UTC.
    pub fn sample() -> String {
        calendar(&[
            date_only_assignment(1001, "Project 1 [CS 161 (001) W2025]", "20250322"),
            calendar_event(2001, "Lecture 12 [CS 161 (001) W2025]", "20250318T160000Z"),
            timed_assignment(1002, "Homework 3 [MTH 251 (010) W2025]", "20250317T183000Z"),
        ])
    }
}
