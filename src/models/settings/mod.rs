// Settings module

use serde::{Deserialize, Serialize};

use crate::models::feed_source::{FeedSource, DEFAULT_CANVAS_BASE_URL};
use crate::services::countdown::WarningThresholds;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canvas instance, e.g. `https://canvas.oregonstate.edu`
    pub base_url: String,
    /// Calendar feed id, the `<id>` in `/feeds/calendars/<id>.ics`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_id: Option<String>,
    /// How often the live countdown re-reads the feed
    pub refresh_minutes: u32,
    pub fetch_timeout_secs: u64,
    pub max_retries: usize,
    pub warning_thresholds: WarningThresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CANVAS_BASE_URL.to_string(),
            feed_id: None,
            refresh_minutes: 30,
            fetch_timeout_secs: 20,
            max_retries: 2,
            warning_thresholds: WarningThresholds::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh_minutes == 0 {
            return Err("Refresh interval must be greater than 0 minutes".to_string());
        }

        if self.fetch_timeout_secs == 0 {
            return Err("Fetch timeout must be greater than 0 seconds".to_string());
        }

        if let Some(source) = self.feed_source() {
            source.validate().map_err(|err| err.to_string())?;
        }

        Ok(())
    }

    /// The configured feed, if a non-empty feed id is set.
    pub fn feed_source(&self) -> Option<FeedSource> {
        self.feed_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| FeedSource::new(self.base_url.clone(), id))
    }
}
