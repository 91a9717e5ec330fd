//! Client for the remote URL shortener API.
//!
//! Each operation is a single round trip bracketed by awaited log calls:
//! the intent is logged before the request goes out and exactly one outcome
//! record is logged before control returns. Failures are logged and then
//! returned unchanged; nothing is retried.

use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ClientError;
use super::transport::{HttpMethod, HttpRequest, ReqwestTransport, Transport};
use crate::config::Config;
use crate::logging::{LogError, Logger};
use crate::models::ShortenRequest;

const SHORTEN_PATH: &str = "/shorten";
const STATS_PATH: &str = "/stats";

#[derive(Debug, Clone, Copy)]
enum Operation {
    Shorten,
    Statistics,
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Shorten => "shortenUrls",
            Operation::Statistics => "getStatistics",
        }
    }

    fn network_message(&self) -> &'static str {
        match self {
            Operation::Shorten => "Network connectivity issue during URL shortening",
            Operation::Statistics => "Network connectivity issue during statistics fetch",
        }
    }

    fn unexpected_message(&self) -> &'static str {
        match self {
            Operation::Shorten => "Unexpected error during URL shortening operation",
            Operation::Statistics => "Unexpected error during statistics fetch operation",
        }
    }
}

pub struct ShortenerClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    logger: Logger,
}

impl ShortenerClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, logger: Logger) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            logger,
        }
    }

    /// Client using a `reqwest` transport configured from `config`
    pub fn from_config(config: &Config, logger: Logger) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(&config.user_agent)?;
        Ok(Self::new(&config.api_base_url, Arc::new(transport), logger))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Shorten a batch of URLs in one request
    pub async fn shorten_urls(&self, urls: &[ShortenRequest]) -> Result<Value, ClientError> {
        let payload = serde_json::to_value(urls).map_err(ClientError::Encode)?;
        self.shorten_urls_raw(&payload).await
    }

    /// Shorten a batch given as raw JSON.
    ///
    /// The payload must be a non-empty JSON array; anything else fails with
    /// `ClientError::InvalidInput` without touching the transport.
    pub async fn shorten_urls_raw(&self, urls: &Value) -> Result<Value, ClientError> {
        let endpoint = self.endpoint(SHORTEN_PATH);
        self.logger
            .info(
                "URL shortening operation initiated",
                json!({
                    "urlCount": urls.as_array().map(Vec::len),
                    "operation": Operation::Shorten.name(),
                    "apiEndpoint": endpoint,
                }),
            )
            .await?;

        match self.try_shorten(urls, &endpoint).await {
            Ok(results) => Ok(results),
            Err(err) => {
                self.report_failure(&err, Operation::Shorten, &endpoint).await?;
                Err(err)
            }
        }
    }

    async fn try_shorten(&self, urls: &Value, endpoint: &str) -> Result<Value, ClientError> {
        let input_count = match urls.as_array() {
            Some(items) if !items.is_empty() => items.len(),
            _ => {
                self.logger
                    .warn(
                        "Invalid input data for URL shortening",
                        json!({
                            "inputType": json_type(urls),
                            "isArray": urls.is_array(),
                            "length": urls.as_array().map(Vec::len),
                        }),
                    )
                    .await?;
                return Err(ClientError::InvalidInput(
                    "URL data must be a non-empty array".to_string(),
                ));
            }
        };

        self.logger
            .debug(
                "Making API request to shorten URLs",
                json!({
                    "requestBody": urls,
                    "method": HttpMethod::Post.as_str(),
                    "contentType": "application/json",
                }),
            )
            .await?;

        let body = serde_json::to_string(urls).map_err(ClientError::Encode)?;
        let response = self
            .transport
            .send(HttpRequest {
                method: HttpMethod::Post,
                url: endpoint.to_string(),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: Some(body),
            })
            .await?;

        if !response.is_success() {
            let error_data = parse_body(&response.body)?;
            self.logger
                .error(
                    "URL shortening API request failed",
                    json!({
                        "httpStatus": response.status,
                        "statusText": response.status_text,
                        "errorResponse": error_data,
                        "requestData": urls,
                    }),
                )
                .await?;
            return Err(api_error(&error_data, response.status, "Failed to shorten URLs"));
        }

        let results = parse_body(&response.body)?;
        self.logger
            .info(
                "URLs shortened successfully",
                json!({
                    "inputUrlCount": input_count,
                    "resultCount": results.as_array().map(Vec::len),
                    "operation": Operation::Shorten.name(),
                    "success": true,
                }),
            )
            .await?;

        Ok(results)
    }

    /// Fetch usage statistics for all short links
    pub async fn get_statistics(&self) -> Result<Value, ClientError> {
        let endpoint = self.endpoint(STATS_PATH);
        self.logger
            .info(
                "Statistics retrieval operation initiated",
                json!({
                    "operation": Operation::Statistics.name(),
                    "apiEndpoint": endpoint,
                }),
            )
            .await?;

        match self.try_statistics(&endpoint).await {
            Ok(stats) => Ok(stats),
            Err(err) => {
                self.report_failure(&err, Operation::Statistics, &endpoint)
                    .await?;
                Err(err)
            }
        }
    }

    async fn try_statistics(&self, endpoint: &str) -> Result<Value, ClientError> {
        self.logger
            .debug(
                "Making API request to fetch statistics",
                json!({
                    "method": HttpMethod::Get.as_str(),
                    "endpoint": STATS_PATH,
                }),
            )
            .await?;

        let response = self
            .transport
            .send(HttpRequest {
                method: HttpMethod::Get,
                url: endpoint.to_string(),
                headers: Vec::new(),
                body: None,
            })
            .await?;

        if !response.is_success() {
            let error_data = parse_body(&response.body)?;
            self.logger
                .error(
                    "Statistics API request failed",
                    json!({
                        "httpStatus": response.status,
                        "statusText": response.status_text,
                        "errorResponse": error_data,
                    }),
                )
                .await?;
            return Err(api_error(
                &error_data,
                response.status,
                "Failed to fetch statistics",
            ));
        }

        let stats = parse_body(&response.body)?;
        let count = match stats.as_array() {
            Some(items) => json!(items.len()),
            None => json!("N/A"),
        };
        self.logger
            .info(
                "Statistics fetched successfully",
                json!({
                    "operation": Operation::Statistics.name(),
                    "statisticsCount": count,
                    "dataType": json_type(&stats),
                    "success": true,
                }),
            )
            .await?;

        Ok(stats)
    }

    async fn report_failure(
        &self,
        err: &ClientError,
        operation: Operation,
        endpoint: &str,
    ) -> Result<(), LogError> {
        if err.is_network() {
            self.logger
                .fatal(
                    operation.network_message(),
                    json!({
                        "operation": operation.name(),
                        "errorType": err.kind(),
                        "errorMessage": err.to_string(),
                        "apiUrl": endpoint,
                    }),
                )
                .await
        } else {
            self.logger
                .error(
                    operation.unexpected_message(),
                    json!({
                        "operation": operation.name(),
                        "errorType": err.kind(),
                        "errorMessage": err.to_string(),
                        "stack": err.trace(),
                    }),
                )
                .await
        }
    }
}

fn parse_body(body: &str) -> Result<Value, ClientError> {
    serde_json::from_str(body).map_err(ClientError::Decode)
}

/// Build the error for a non-success response, preferring the server's message
fn api_error(body: &Value, status: u16, fallback: &str) -> ClientError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}: {fallback}"));
    ClientError::ApiRequest { status, message }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
