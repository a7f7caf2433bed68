use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::models::assignment::{AssignmentMap, NearestAssignment};
use crate::models::feed_source::FeedSource;
use crate::services::deadline::select_nearest;
use crate::services::feed::{fetch_and_extract, FeedFetch};

/// Runs the feed → assignments → nearest deadline pipeline.
pub struct AssignmentService;

impl AssignmentService {
    pub fn new() -> Self {
        Self
    }

    /// Extract assignments from feed text
    pub fn extract(&self, ics_content: Option<&str>) -> AssignmentMap {
        super::extract_assignments(ics_content)
    }

    /// Nearest assignment due at or after `now`
    pub fn nearest(&self, assignments: &AssignmentMap, now: DateTime<Utc>) -> Option<NearestAssignment> {
        select_nearest(assignments, now)
    }

    /// Extract and select in one go
    pub fn nearest_in(&self, ics_content: Option<&str>, now: DateTime<Utc>) -> Option<NearestAssignment> {
        self.nearest(&self.extract(ics_content), now)
    }

    /// Extract assignments from a saved .ics file
    pub fn load_from_file(&self, path: &Path) -> Result<AssignmentMap> {
        let content =
            fs::read_to_string(path).context(format!("Failed to read .ics file: {:?}", path))?;
        Ok(self.extract(Some(&content)))
    }

    /// Fetch the user's feed and extract it; a failed fetch gives an empty map.
    pub fn load_from_feed(&self, fetcher: &dyn FeedFetch, source: &FeedSource) -> AssignmentMap {
        let assignments = fetch_and_extract(fetcher, &source.ics_url());
        log::info!("Loaded {} assignments from calendar feed", assignments.len());
        assignments
    }

    /// Re-read the feed and pick the nearest assignment again.
    ///
    /// A failed fetch keeps `current` as long as it is not yet past due, so a
    /// network error during a refresh does not end a running countdown.
    pub fn refresh_nearest(
        &self,
        fetcher: &dyn FeedFetch,
        source: &FeedSource,
        current: Option<NearestAssignment>,
        now: DateTime<Utc>,
    ) -> Option<NearestAssignment> {
        match fetcher.fetch_ics(&source.ics_url()) {
            Ok(content) => self.nearest_in(Some(&content), now),
            Err(err) => {
                log::warn!("Calendar refresh failed, keeping current deadline: {:#}", err);
                current.filter(|nearest| nearest.due >= now)
            }
        }
    }
}

impl Default for AssignmentService {
    fn default() -> Self {
        Self::new()
    }
}
