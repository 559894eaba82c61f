use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS,
};

/// Runtime configuration, read once at startup from `WEATHER_*` environment
/// variables and handed to each component. Loader code never consults the
/// environment directly.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    #[validate(length(min = 1))]
    pub database: String,

    #[validate(length(min = 1))]
    pub user: String,

    #[validate(length(min = 1))]
    pub password: String,

    pub log_file: PathBuf,

    pub data_dir: PathBuf,

    /// Rows per upsert statement. Bounded above so the widest statement
    /// (8 columns) stays under the wire protocol's 65535 bind parameters.
    #[serde(default = "default_batch_size")]
    #[validate(range(min = 1, max = 5000))]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl AppConfig {
    /// Read configuration from the environment. Callers apply any
    /// command-line overrides and then `validate()` before using it.
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::with_prefix("WEATHER").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Fixed-delay retry budget for the initial database connection. The delay
/// is constant across attempts; there is no backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}
