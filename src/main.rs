use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shortener_client::config::Config;
use shortener_client::{Logger, ShortenRequest, ShortenerClient};

#[derive(Parser)]
#[command(name = "shortener")]
#[command(about = "Command-line client for the URL shortener API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten one or more URLs in a single request
    Shorten {
        /// URLs to shorten
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        urls: Vec<String>,
        /// Validity of each short link in minutes
        #[arg(long)]
        validity: Option<u64>,
        /// Preferred short code (single URL only)
        #[arg(long)]
        shortcode: Option<String>,
        /// JSON file holding an array of {originalUrl, validityMinutes?, shortcode?}
        #[arg(long, conflicts_with_all = ["validity", "shortcode"])]
        file: Option<PathBuf>,
    },
    /// Show statistics for all short links
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!("Using shortener API at {}", config.api_base_url);

    let logger = Logger::from_config(&config)?;
    let client = ShortenerClient::from_config(&config, logger)?;

    let output = match cli.command {
        Commands::Shorten {
            urls,
            validity,
            shortcode,
            file,
        } => match file {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let payload: Value = serde_json::from_str(&raw)
                    .with_context(|| format!("{} is not valid JSON", path.display()))?;
                client.shorten_urls_raw(&payload).await?
            }
            None => {
                if shortcode.is_some() && urls.len() != 1 {
                    bail!("--shortcode can only be used with a single URL");
                }
                let requests: Vec<ShortenRequest> = urls
                    .into_iter()
                    .map(|url| ShortenRequest {
                        original_url: url,
                        validity_minutes: validity,
                        shortcode: shortcode.clone(),
                    })
                    .collect();
                client.shorten_urls(&requests).await?
            }
        },
        Commands::Stats => client.get_statistics().await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
