use anyhow::Result;
use chrono::{DateTime, Utc};
use std::thread;
use std::time::Duration;

use super::models::{CountdownFrame, CountdownWarningState, WarningThresholds};
use super::render::{format_next_due, format_time_left, CountdownSink};
use crate::models::assignment::NearestAssignment;

/// Live countdown to one assignment.
///
/// The target is fixed for the life of the countdown; each tick only
/// recomputes the remaining time.
pub struct Countdown {
    target: NearestAssignment,
    thresholds: WarningThresholds,
    last_state: Option<CountdownWarningState>,
}

impl Countdown {
    pub fn new(target: NearestAssignment, thresholds: WarningThresholds) -> Self {
        Self {
            target,
            thresholds,
            last_state: None,
        }
    }

    pub fn target(&self) -> &NearestAssignment {
        &self.target
    }

    pub fn frame_at(&self, now: DateTime<Utc>) -> CountdownFrame {
        let remaining = self.target.due.signed_duration_since(now);
        CountdownFrame {
            heading: format_next_due(&self.target.name),
            time_left: format_time_left(self.target.due, now),
            state: CountdownWarningState::from_remaining(remaining, &self.thresholds),
        }
    }

    /// Render one frame for `now`, noting any rise in urgency.
    pub fn tick(&mut self, sink: &mut dyn CountdownSink, now: DateTime<Utc>) -> Result<CountdownFrame> {
        let frame = self.frame_at(now);

        let escalated = match self.last_state {
            None => frame.state != CountdownWarningState::Normal,
            Some(previous) => frame.state > previous,
        };
        if escalated {
            log::info!("{:?} is now {:?}", self.target.name, frame.state);
        }
        self.last_state = Some(frame.state);

        sink.render(&frame)?;
        Ok(frame)
    }

    /// Tick every `interval` until `ticks` frames have been rendered
    /// (forever when `None`).
    pub fn run(
        &mut self,
        sink: &mut dyn CountdownSink,
        ticks: Option<u64>,
        interval: Duration,
    ) -> Result<()> {
        let mut rendered = 0u64;
        loop {
            self.tick(sink, Utc::now())?;
            rendered += 1;

            if ticks.is_some_and(|limit| rendered >= limit) {
                return Ok(());
            }
            thread::sleep(interval);
        }
    }
}
