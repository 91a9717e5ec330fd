pub mod client;
pub mod config;
pub mod logging;
pub mod models;

pub use client::{ClientError, ShortenerClient};
pub use logging::{Level, LogRecord, LogSink, Logger, Origin};
pub use models::ShortenRequest;
