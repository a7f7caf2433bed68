// Module exports for models

pub mod assignment;
pub mod feed_source;
pub mod settings;
