//! Picks the assignment the countdown should track.

use chrono::{DateTime, Utc};

use crate::models::assignment::{AssignmentMap, NearestAssignment};
use crate::services::icalendar::parse_due_date;

/// The assignment with the earliest due time that is not before `now`.
///
/// Entries without a due date, or with one that does not parse, are skipped.
/// Something due exactly at `now` still counts. On equal due times the entry
/// met first in the map wins.
pub fn select_nearest(assignments: &AssignmentMap, now: DateTime<Utc>) -> Option<NearestAssignment> {
    let mut nearest: Option<(&str, DateTime<Utc>)> = None;

    for (name, record) in assignments.iter() {
        if !record.has_due_date() {
            continue;
        }
        let Some(due) = record.raw_due_date.as_deref().and_then(parse_due_date) else {
            continue;
        };
        if due < now {
            continue;
        }

        if nearest.map_or(true, |(_, best)| due < best) {
            nearest = Some((name, due));
        }
    }

    nearest.map(|(name, due)| NearestAssignment::new(name, due))
}

/// [`select_nearest`] evaluated at the current instant.
pub fn next_due(assignments: &AssignmentMap) -> Option<NearestAssignment> {
    select_nearest(assignments, Utc::now())
}
