use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CANVAS_BASE_URL: &str = "https://canvas.oregonstate.edu";

const ATOM_USERS_SEGMENT: &str = "users/";
const ATOM_SUFFIX: &str = ".atom";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedSourceError {
    #[error("Canvas feed id cannot be empty")]
    EmptyFeedId,
    #[error("Canvas base URL must use HTTPS: {0}")]
    InsecureBaseUrl(String),
}

/// Where a user's Canvas calendar feed lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub base_url: String,
    pub feed_id: String,
}

impl FeedSource {
    pub fn new(base_url: impl Into<String>, feed_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            feed_id: feed_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FeedSourceError> {
        if self.feed_id.trim().is_empty() {
            return Err(FeedSourceError::EmptyFeedId);
        }

        if !self.base_url.trim().starts_with("https://") {
            return Err(FeedSourceError::InsecureBaseUrl(self.base_url.clone()));
        }

        Ok(())
    }

    /// `<base>/feeds/calendars/<feed id>.ics`
    pub fn ics_url(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        format!(
            "{}/feeds/calendars/{}.ics",
            base,
            urlencoding::encode(self.feed_id.trim())
        )
    }
}

/// Pull the feed id out of the "User Atom Feed (All Courses)" link,
/// e.g. `https://canvas.example.edu/feeds/users/user_AbC123.atom` → `user_AbC123`.
/// The calendar feed uses the same id.
pub fn feed_id_from_atom_href(href: &str) -> Option<String> {
    let (_, rest) = href.split_once(ATOM_USERS_SEGMENT)?;
    let id = rest.split(ATOM_SUFFIX).next().unwrap_or_default().trim();

    if id.is_empty() {
        return None;
    }

    Some(id.to_string())
}
