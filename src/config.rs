use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Settings for the news client
#[derive(Debug, Deserialize, Clone)]
pub struct NewsConfig {
    /// Base URL of the content API, without the `/search` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as the `api-key` query parameter
    #[serde(default)]
    pub api_key: String,
    /// Search term used when the caller does not supply one
    #[serde(default = "default_query")]
    pub query: String,
    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Largest response body accepted, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            query: default_query(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://content.guardianapis.com".to_string()
}

fn default_query() -> String {
    "conspiracy".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    15_000
}

fn default_read_timeout_ms() -> u64 {
    10_000
}

fn default_max_body_bytes() -> usize {
    crate::fetcher::DEFAULT_MAX_BODY_BYTES
}

impl NewsConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FORKSNEWS__ prefix
    /// 2. forks-news.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FORKSNEWS__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`NewsConfig::load`] for the lookup order.
pub fn load_config() -> Result<NewsConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("forks-news").required(false))
        .add_source(
            Environment::with_prefix("FORKSNEWS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
