//! Structured logging facade
//!
//! A `Logger` stamps every record with a fixed origin and component and
//! forwards it to a pluggable `LogSink`.

pub mod facade;
pub mod record;
pub mod remote;
pub mod sink;

pub use facade::Logger;
pub use record::{into_context, Level, LogRecord, Origin};
pub use remote::HttpLogSink;
pub use sink::{LogError, LogSink, MemorySink, TracingSink};
