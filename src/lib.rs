// Canvas Countdown Library
// Feed parsing, deadline selection and countdown rendering, reusable from tests and the CLI

pub mod models;
pub mod services;
pub mod utils;
