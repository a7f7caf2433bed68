use crate::models::assignment::{AssignmentMap, AssignmentRecord};

const EVENT_BEGIN: &str = "BEGIN:VEVENT";
const ASSIGNMENT_UID: &str = "UID:event-assignment-";
const SUMMARY: &str = "SUMMARY:";
const URL_REFERENCE: &str = "URL;";
const DTSTART_DATE: &str = "DTSTART;";
const VALUE_DATE: &str = "VALUE=DATE:";
const CLASS: &str = "CLASS:";
const DTSTART_TIMESTAMP: &str = "DTSTART:";
const DTEND: &str = "DTEND:";

const CLASS_OPEN: char = '[';
const CLASS_CLOSE: char = ']';
const TRAILER_OPEN: &str = " (";

const LINE_NOISE: &[&str] = &["\r", "\n"];
const NAME_NOISE: &[&str] = &["\r", "\n", "\\"];

/// Turn a Canvas calendar export into assignment name → record.
///
/// Only `UID:event-assignment-` events are kept. A fragment without a
/// `SUMMARY:` is skipped; a fragment without a start field is kept with no
/// due date. Nothing here fails: missing pieces just come back empty.
pub(super) fn from_str(ics_content: Option<&str>) -> AssignmentMap {
    let mut assignments = AssignmentMap::new();
    let Some(ics_content) = ics_content else {
        return assignments;
    };

    // The text before the first marker is the calendar header; it never
    // carries an assignment UID so the filter below drops it.
    for fragment in ics_content.split(EVENT_BEGIN) {
        if !fragment.contains(ASSIGNMENT_UID) {
            continue;
        }

        let Some(raw_title) = field(fragment, SUMMARY, URL_REFERENCE) else {
            log::debug!("Skipping assignment event without a SUMMARY field");
            continue;
        };

        let (class_label, name) = split_title(raw_title);
        let record = AssignmentRecord::new(class_label, raw_due_date(fragment));

        if assignments.insert(name.clone(), record).is_some() {
            log::debug!("Assignment {:?} appears more than once; keeping the later entry", name);
        }
    }

    assignments
}

/// Text after the first `marker`, cut at the next `marker` and then at `boundary`.
fn field<'a>(fragment: &'a str, marker: &str, boundary: &str) -> Option<&'a str> {
    let (_, rest) = fragment.split_once(marker)?;
    let rest = rest.split(marker).next().unwrap_or(rest);
    Some(rest.split(boundary).next().unwrap_or(rest))
}

fn raw_due_date(fragment: &str) -> Option<String> {
    let token = if fragment.contains(DTSTART_DATE) {
        field(fragment, VALUE_DATE, CLASS)?
    } else if fragment.contains(DTSTART_TIMESTAMP) {
        field(fragment, DTSTART_TIMESTAMP, DTEND)?
    } else {
        return None;
    };

    Some(clean(token, LINE_NOISE))
}

/// Split `Homework 1 [CS 161 (001)]` into (`CS 161`, `Homework 1`).
///
/// Uses the last `[` and the last ` (` in the title. The class label is what
/// lies between them, the name is everything before the space preceding `[`.
/// A missing delimiter falls back to clamped indices, so an odd title gives an
/// odd label instead of an error. A closing `]` left on the label is dropped.
pub(super) fn split_title(raw_title: &str) -> (String, String) {
    let open = raw_title.rfind(CLASS_OPEN);
    let trailer = raw_title.rfind(TRAILER_OPEN);

    let label_start = open.map_or(0, |idx| idx + CLASS_OPEN.len_utf8());
    let label_end = trailer.unwrap_or(0);
    let (from, to) = if label_start <= label_end {
        (label_start, label_end)
    } else {
        (label_end, label_start)
    };
    let class_label = clean(&raw_title[from..to], LINE_NOISE);
    let class_label = class_label
        .strip_suffix(CLASS_CLOSE)
        .map(|label| label.trim_end().to_string())
        .unwrap_or(class_label);

    let name_end = open.map_or(0, |idx| previous_char_boundary(raw_title, idx));
    let name = clean(&raw_title[..name_end], NAME_NOISE);

    (class_label, name)
}

fn previous_char_boundary(text: &str, idx: usize) -> usize {
    text[..idx]
        .char_indices()
        .next_back()
        .map_or(0, |(boundary, _)| boundary)
}

/// Remove every separator in `noise`, trimming whitespace on both sides of
/// each removal. Folded ICS lines (`\r\n ` continuations) collapse back into
/// one piece this way.
fn clean(text: &str, noise: &[&str]) -> String {
    noise.iter().fold(text.to_string(), |acc, separator| {
        acc.split(separator).map(str::trim).collect::<Vec<_>>().concat()
    })
}
