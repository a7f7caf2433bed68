//! Canvas calendar feed parsing: assignment extraction and due-date normalization.

pub mod date;
mod extract;
mod service;

pub use date::{normalize_due_date, parse_due_date, DateParseError};
pub use service::AssignmentService;

use crate::models::assignment::AssignmentMap;

/// Extract assignment records from raw feed text. `None` and `""` give an empty map.
pub fn extract_assignments(ics_content: Option<&str>) -> AssignmentMap {
    extract::from_str(ics_content)
}
