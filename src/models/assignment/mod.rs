//! Assignment records pulled out of a Canvas calendar feed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// What the feed says about one assignment, before any date handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Course code taken from the trailing `[...]` of the summary, e.g. `CS 161`.
    pub class_label: String,
    /// Due-date token exactly as it appeared in the feed (`20250322`,
    /// `20250317T183000Z`, ...). `None` when the event carried no start field.
    pub raw_due_date: Option<String>,
}

impl AssignmentRecord {
    pub fn new(class_label: impl Into<String>, raw_due_date: Option<String>) -> Self {
        Self {
            class_label: class_label.into(),
            raw_due_date,
        }
    }

    pub fn has_due_date(&self) -> bool {
        self.raw_due_date
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

/// Assignment name to record, in the order names first appeared.
///
/// Inserting a name that is already present replaces its record (last write
/// wins) while the entry keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    entries: Vec<(String, AssignmentRecord)>,
    index: HashMap<String, usize>,
}

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the record that was replaced, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        record: AssignmentRecord,
    ) -> Option<AssignmentRecord> {
        let name = name.into();
        if let Some(&slot) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.entries[slot].1, record));
        }

        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, record));
        None
    }

    pub fn get(&self, name: &str) -> Option<&AssignmentRecord> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssignmentRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for AssignmentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, record) in self.iter() {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

/// The assignment the countdown should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearestAssignment {
    pub name: String,
    #[serde(serialize_with = "serialize_iso8601")]
    pub due: DateTime<Utc>,
}

impl NearestAssignment {
    pub fn new(name: impl Into<String>, due: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            due,
        }
    }

    /// `2025-03-17T18:30:00.000Z`: millisecond precision, always UTC.
    pub fn due_iso8601(&self) -> String {
        to_iso8601(&self.due)
    }
}

fn to_iso8601(due: &DateTime<Utc>) -> String {
    due.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso8601<S: Serializer>(due: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso8601(due))
}
