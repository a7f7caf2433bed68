// Service module exports

pub mod countdown;
pub mod deadline;
pub mod feed;
pub mod icalendar;
pub mod settings;
