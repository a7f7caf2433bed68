mod models;
mod render;
mod service;

pub use models::{CountdownFrame, CountdownWarningState, WarningThresholds};
pub use render::{format_next_due, format_time_left, CountdownSink, TerminalSink, DUE_NOW};
pub use service::Countdown;
