use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Urgency of the tracked deadline, in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CountdownWarningState {
    /// More than `approaching_hours` remaining
    Normal,
    /// Within `approaching_hours`
    Approaching,
    /// Within `imminent_hours`
    Imminent,
    /// Within `critical_minutes`
    Critical,
    /// Due time reached or passed
    Due,
}

impl Default for CountdownWarningState {
    fn default() -> Self {
        Self::Normal
    }
}

impl CountdownWarningState {
    pub fn from_remaining(remaining: Duration, thresholds: &WarningThresholds) -> Self {
        if remaining.num_milliseconds() <= 0 {
            Self::Due
        } else if remaining.num_minutes() < thresholds.critical_minutes as i64 {
            Self::Critical
        } else if remaining.num_hours() < thresholds.imminent_hours as i64 {
            Self::Imminent
        } else if remaining.num_hours() < thresholds.approaching_hours as i64 {
            Self::Approaching
        } else {
            Self::Normal
        }
    }
}

/// Thresholds for the warning states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningThresholds {
    /// Hours before the deadline to enter "approaching" (default: 24)
    pub approaching_hours: u32,
    /// Hours before the deadline to enter "imminent" (default: 1)
    pub imminent_hours: u32,
    /// Minutes before the deadline to enter "critical" (default: 5)
    pub critical_minutes: u32,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            approaching_hours: 24,
            imminent_hours: 1,
            critical_minutes: 5,
        }
    }
}

/// One rendered state of the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownFrame {
    pub heading: String,
    pub time_left: String,
    pub state: CountdownWarningState,
}
