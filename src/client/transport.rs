//! HTTP transport seam for the shortener client.
//!
//! Requests and responses are plain data so the client can be driven by any
//! transport. The transport, not the caller, decides whether a failure
//! happened before the server was reached.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Method};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, empty when unknown
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never reached the server (refused, DNS, unroutable, bad URL)
    #[error("failed to reach {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: BoxError,
    },
    /// The server was reached but the exchange did not complete
    #[error("request to {url} failed: {source}")]
    Exchange {
        url: String,
        #[source]
        source: BoxError,
    },
}

impl TransportError {
    /// Whether the request got as far as the remote server
    pub fn reached_server(&self) -> bool {
        matches!(self, TransportError::Exchange { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            TransportError::Unreachable { url, .. } | TransportError::Exchange { url, .. } => url,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP round trip. Non-2xx statuses are returned as responses.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a shared `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client for shortener API")?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url;
        let mut builder = self.client.request(request.method.into(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_send_error(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Exchange {
                url: url.clone(),
                source: Box::new(e),
            })?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn classify_send_error(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_connect() || err.is_builder() {
        TransportError::Unreachable {
            url: url.to_string(),
            source: Box::new(err),
        }
    } else {
        TransportError::Exchange {
            url: url.to_string(),
            source: Box::new(err),
        }
    }
}
