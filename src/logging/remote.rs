use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;

use super::record::LogRecord;
use super::sink::{LogError, LogSink};

/// Sink that POSTs each record to a remote log collector
#[derive(Clone)]
pub struct HttpLogSink {
    endpoint: String,
    client: Client,
}

#[derive(Serialize)]
struct CollectorPayload<'a> {
    #[serde(flatten)]
    record: &'a LogRecord,
    timestamp: String,
}

impl HttpLogSink {
    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client for log collector")?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogSink for HttpLogSink {
    async fn log(&self, record: LogRecord) -> Result<(), LogError> {
        let payload = CollectorPayload {
            record: &record,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
