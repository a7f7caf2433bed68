use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;

use super::FeedFetch;
use crate::models::settings::Settings;

const CALENDAR_FEED_PATH: &str = "/feeds/calendars/";
const MAX_RESPONSE_BYTES: usize = 5 * 1024 * 1024;
const RETRY_DELAY_MS: u64 = 400;

/// Blocking HTTPS client for Canvas calendar feeds.
pub struct IcsFetcher {
    client: Client,
    max_response_bytes: usize,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl IcsFetcher {
    pub fn new(timeout: Duration, max_retries: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("canvas-countdown/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build ICS fetch HTTP client")?;

        Ok(Self {
            client,
            max_response_bytes: MAX_RESPONSE_BYTES,
            max_retries,
            retry_delay_ms: RETRY_DELAY_MS,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            Duration::from_secs(settings.fetch_timeout_secs),
            settings.max_retries,
        )
    }

    fn fetch_with_retries(&self, url: &str) -> Result<String> {
        if !url.starts_with("https://") {
            return Err(anyhow!("Calendar feed URL must use HTTPS"));
        }

        let redacted = redact_url(url);
        let attempts = self.max_retries + 1;
        let mut attempt = 1;
        loop {
            match self.fetch_once(url) {
                Ok(feed) => {
                    log::debug!("Fetched {} bytes from {}", feed.len(), redacted);
                    return Ok(feed);
                }
                Err(err) if attempt < attempts => {
                    log::warn!("Feed fetch {}/{} failed for {}: {}", attempt, attempts, redacted, err);
                    thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    attempt += 1;
                }
                Err(err) => {
                    return Err(err.context(format!(
                        "Gave up on {} after {} attempts",
                        redacted, attempts
                    )));
                }
            }
        }
    }

    fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .context("Could not reach the Canvas calendar feed")?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                return Err(anyhow!(
                    "Canvas rejected the calendar feed id (HTTP {})",
                    response.status()
                ));
            }
            status => return Err(anyhow!("Calendar feed request failed with HTTP {}", status)),
        }

        // Reject early on the advertised length, then again on what arrived.
        if let Some(advertised) = response.content_length() {
            ensure_within_cap(advertised as usize, self.max_response_bytes)?;
        }
        let body = response
            .bytes()
            .context("Calendar feed body was cut off")?;
        ensure_within_cap(body.len(), self.max_response_bytes)?;

        let feed = String::from_utf8(body.to_vec()).context("Calendar feed is not valid UTF-8")?;
        ensure_looks_like_ics(&feed)?;
        Ok(feed)
    }
}

impl FeedFetch for IcsFetcher {
    fn fetch_ics(&self, url: &str) -> Result<String> {
        self.fetch_with_retries(url)
    }
}

fn ensure_within_cap(len: usize, cap: usize) -> Result<()> {
    if len > cap {
        return Err(anyhow!("Calendar feed is too large ({} bytes, limit {})", len, cap));
    }
    Ok(())
}

/// HTML error and login pages can come back with a 200.
fn ensure_looks_like_ics(content: &str) -> Result<()> {
    if content.contains("BEGIN:VCALENDAR") || content.contains("BEGIN:VEVENT") {
        return Ok(());
    }

    Err(anyhow!("Response does not appear to be valid ICS content"))
}

/// The feed id is a bearer credential for the user's calendar; keep it out of logs.
pub(crate) fn redact_url(url: &str) -> String {
    if let Some(index) = url.find(CALENDAR_FEED_PATH) {
        let prefix_end = index + CALENDAR_FEED_PATH.len();
        return format!("{}***redacted***", &url[..prefix_end]);
    }

    "***redacted-url***".to_string()
}
