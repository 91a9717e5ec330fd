use serde_json::Value;
use std::sync::Arc;

use super::record::{into_context, Level, LogRecord, Origin};
use super::remote::HttpLogSink;
use super::sink::{LogError, LogSink, TracingSink};
use crate::config::{Config, SinkKind};

/// Logger with a fixed origin and component.
///
/// Every level method builds exactly one record and waits for the sink to
/// settle before returning. Sink failures are returned to the caller.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    origin: Origin,
    component: String,
}

impl Logger {
    pub fn new(sink: Arc<dyn LogSink>, origin: Origin, component: impl Into<String>) -> Self {
        Self {
            sink,
            origin,
            component: component.into(),
        }
    }

    /// Logger tagged `backend` / `shortener-api`
    pub fn backend(sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink, Origin::Backend, Origin::Backend.default_component())
    }

    /// Logger tagged `frontend` / `frontend-app`
    pub fn frontend(sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink, Origin::Frontend, Origin::Frontend.default_component())
    }

    /// Logger with the sink, origin and component selected in `config`
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let logging = &config.logging;
        let sink: Arc<dyn LogSink> = match logging.sink {
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::Http => {
                let endpoint = logging
                    .endpoint
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("HTTP log sink requires an endpoint"))?;
                Arc::new(HttpLogSink::new(endpoint, &config.user_agent)?)
            }
        };
        Ok(Self::new(sink, logging.origin, logging.component.clone()))
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub async fn log(&self, level: Level, message: &str, context: Value) -> Result<(), LogError> {
        let record = LogRecord {
            origin: self.origin,
            level,
            component: self.component.clone(),
            message: message.to_string(),
            context: into_context(context),
        };
        self.sink.log(record).await
    }

    pub async fn debug(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Debug, message, context).await
    }

    pub async fn info(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Info, message, context).await
    }

    pub async fn warn(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Warn, message, context).await
    }

    pub async fn error(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Error, message, context).await
    }

    pub async fn fatal(&self, message: &str, context: Value) -> Result<(), LogError> {
        self.log(Level::Fatal, message, context).await
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("origin", &self.origin)
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}
