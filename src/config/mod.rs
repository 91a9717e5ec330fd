use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::logging::Origin;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub user_agent: String,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub origin: Origin,
    pub component: String,
    pub sink: SinkKind,
    /// Collector URL, only used by the HTTP sink
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Tracing,
    Http,
}

impl Config {
    pub fn default_user_agent() -> String {
        format!("shortener-client/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let user_agent = lookup("USER_AGENT").unwrap_or_else(Self::default_user_agent);

        let origin = match lookup("LOG_ORIGIN")
            .unwrap_or_else(|| "backend".to_string())
            .to_lowercase()
            .as_str()
        {
            "backend" => Origin::Backend,
            "frontend" => Origin::Frontend,
            other => {
                tracing::warn!(
                    "Unknown LOG_ORIGIN '{other}', falling back to 'backend'. Supported values: backend, frontend"
                );
                Origin::Backend
            }
        };

        let component = lookup("LOG_COMPONENT")
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| origin.default_component().to_string());

        let sink = match lookup("LOG_SINK")
            .unwrap_or_else(|| "tracing".to_string())
            .to_lowercase()
            .as_str()
        {
            "tracing" => SinkKind::Tracing,
            "http" => SinkKind::Http,
            other => {
                tracing::warn!(
                    "Unknown LOG_SINK '{other}', falling back to 'tracing'. Supported values: tracing, http"
                );
                SinkKind::Tracing
            }
        };

        let endpoint = if sink == SinkKind::Http {
            Some(lookup("LOG_ENDPOINT").context("LOG_ENDPOINT must be set when LOG_SINK=http")?)
        } else {
            lookup("LOG_ENDPOINT")
        };

        Ok(Config {
            api_base_url,
            user_agent,
            logging: LoggingConfig {
                origin,
                component,
                sink,
                endpoint,
            },
        })
    }
}
