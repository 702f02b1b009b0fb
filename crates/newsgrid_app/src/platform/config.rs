//! Command-line and environment configuration.
//!
//! Every option can be given as a flag; the API key and endpoint also fall
//! back to environment variables so the key never has to live in source.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use newsgrid_engine::{FetchSettings, DEFAULT_ENDPOINT};

/// Search a news API and browse the results as a card grid.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// API key sent as the `apiKey` query parameter
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Full URL of the article search endpoint
    #[arg(long, env = "NEWS_API_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Quiet period after the last keystroke before searching
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,

    /// Overall timeout for one search request
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Where to write the log; the terminal itself belongs to the UI
    #[arg(long, default_value = "./newsgrid.log")]
    pub log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing news API key: pass --api-key or set NEWS_API_KEY")]
    MissingApiKey,
    #[error("--request-timeout-secs must be greater than zero")]
    ZeroTimeout,
}

/// Configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub debounce: Duration,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        if cli.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let fetch = FetchSettings {
            endpoint: cli.endpoint,
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            ..FetchSettings::new(api_key)
        };

        Ok(Self {
            fetch,
            debounce: Duration::from_millis(cli.debounce_ms),
            log_file: cli.log_file,
            log_level: if cli.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        })
    }
}
