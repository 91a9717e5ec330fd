use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use super::record::{Level, LogRecord};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("log sink unavailable: {0}")]
    Unavailable(String),
    #[error("log collector returned HTTP {status}")]
    Rejected { status: u16 },
    #[error("failed to deliver log record")]
    Delivery(#[from] reqwest::Error),
}

/// Destination for structured log records.
///
/// A call settles once the sink has accepted (or rejected) the record;
/// buffering and delivery guarantees are up to the implementation.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn log(&self, record: LogRecord) -> Result<(), LogError>;
}

/// Sink that forwards records to the `tracing` subscriber
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

#[async_trait]
impl LogSink for TracingSink {
    async fn log(&self, record: LogRecord) -> Result<(), LogError> {
        let origin = record.origin.as_str();
        let component = record.component.as_str();
        let context = Value::Object(record.context).to_string();
        let message = record.message;

        // tracing has no fatal level
        match record.level {
            Level::Debug => tracing::debug!(origin, component, %context, "{}", message),
            Level::Info => tracing::info!(origin, component, %context, "{}", message),
            Level::Warn => tracing::warn!(origin, component, %context, "{}", message),
            Level::Error => tracing::error!(origin, component, %context, "{}", message),
            Level::Fatal => {
                tracing::error!(fatal = true, origin, component, %context, "{}", message)
            }
        }

        Ok(())
    }
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
    failure: Mutex<Option<String>>,
    /// 1-based call number that fails once, with its reason
    fail_on: Mutex<Option<(usize, String)>>,
    calls: Mutex<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records received so far, in arrival order
    pub async fn records(&self) -> Vec<LogRecord> {
        self.records.lock().await.clone()
    }

    /// Make every subsequent call fail with `LogError::Unavailable`
    pub async fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock().await = Some(reason.into());
    }

    /// Fail only the `call`-th log call (1-based, counting every attempt)
    pub async fn fail_on_call(&self, call: usize, reason: impl Into<String>) {
        *self.fail_on.lock().await = Some((call, reason.into()));
    }

    /// Number of log calls received, including rejected ones
    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }

    /// Accept records again after `fail_with`
    pub async fn recover(&self) {
        *self.failure.lock().await = None;
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn log(&self, record: LogRecord) -> Result<(), LogError> {
        let call = {
            let mut calls = self.calls.lock().await;
            *calls += 1;
            *calls
        };
        if let Some((fail_call, reason)) = self.fail_on.lock().await.as_ref() {
            if *fail_call == call {
                return Err(LogError::Unavailable(reason.clone()));
            }
        }
        if let Some(reason) = self.failure.lock().await.as_ref() {
            return Err(LogError::Unavailable(reason.clone()));
        }
        self.records.lock().await.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::record::{into_context, Origin};
    use serde_json::json;

    fn record(level: Level, message: &str) -> LogRecord {
        LogRecord {
            origin: Origin::Frontend,
            level,
            component: "frontend-app".to_string(),
            message: message.to_string(),
            context: into_context(json!({"k": "v"})),
        }
    }

    #[tokio::test]
    async fn test_memory_sink_keeps_arrival_order() {
        let sink = MemorySink::new();
        sink.log(record(Level::Info, "first")).await.unwrap();
        sink.log(record(Level::Fatal, "second")).await.unwrap();

        let records = sink.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].level, Level::Fatal);
    }

    #[tokio::test]
    async fn test_memory_sink_can_be_made_unavailable() {
        let sink = MemorySink::new();
        sink.fail_with("collector down").await;

        let err = sink.log(record(Level::Info, "dropped")).await.unwrap_err();
        assert!(matches!(err, LogError::Unavailable(ref reason) if reason == "collector down"));
        assert!(sink.records().await.is_empty());

        sink.recover().await;
        sink.log(record(Level::Info, "kept")).await.unwrap();
        assert_eq!(sink.records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_sink_fails_only_the_chosen_call() {
        let sink = MemorySink::new();
        sink.fail_on_call(2, "flaky").await;

        sink.log(record(Level::Info, "one")).await.unwrap();
        let err = sink.log(record(Level::Debug, "two")).await.unwrap_err();
        assert!(matches!(err, LogError::Unavailable(ref reason) if reason == "flaky"));
        sink.log(record(Level::Info, "three")).await.unwrap();

        assert_eq!(sink.calls().await, 3);
        let messages: Vec<String> = sink.records().await.into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn test_tracing_sink_accepts_every_level() {
        let sink = TracingSink;
        for level in [Level::Debug, Level::Info, Level::Warn, Level::Error, Level::Fatal] {
            assert!(sink.log(record(level, "message")).await.is_ok());
        }
    }
}
