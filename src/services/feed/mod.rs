//! Calendar feed acquisition.
//!
//! A failed fetch is not an error for the rest of the pipeline: it is logged
//! and treated as a feed with no assignments.

pub mod fetcher;

use anyhow::Result;

use crate::models::assignment::AssignmentMap;
use crate::services::icalendar::extract_assignments;

pub use fetcher::IcsFetcher;

/// Anything that can hand back the text of an ICS feed.
#[cfg_attr(test, mockall::automock)]
pub trait FeedFetch {
    fn fetch_ics(&self, url: &str) -> Result<String>;
}

/// Fetch `url` and extract its assignments; fetch errors give an empty map.
pub fn fetch_and_extract(fetcher: &dyn FeedFetch, url: &str) -> AssignmentMap {
    let content = match fetcher.fetch_ics(url) {
        Ok(content) => Some(content),
        Err(err) => {
            log::error!("Error fetching ICS feed: {:#}", err);
            None
        }
    };

    extract_assignments(content.as_deref())
}
