//! UniFFI bindings for forks-news
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with blocking functions that manage their own tokio runtime,
//! so callers must invoke them from a background thread, never from the UI thread.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{ArticleRecord, FeedResult, FeedStatus, FetchError, NewsConfig, NewsError};

/// FFI-compatible article structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiArticle {
    pub title: String,
    pub url: String,
    pub section: String,
    /// Publication date as sent by the API (ISO-8601)
    pub publication_date: String,
    /// Publication time as seconds since the Unix epoch
    pub published_epoch_secs: i64,
    pub contributor: String,
    /// Thumbnail image URL, if the article has one
    pub thumbnail: Option<String>,
}

impl From<&ArticleRecord> for FfiArticle {
    fn from(article: &ArticleRecord) -> Self {
        FfiArticle {
            title: article.title().to_string(),
            url: article.url().to_string(),
            section: article.section().to_string(),
            publication_date: article.publication_date().to_string(),
            published_epoch_secs: article.published_at().timestamp(),
            contributor: article.contributor().to_string(),
            thumbnail: article.thumbnail().map(str::to_string),
        }
    }
}

/// FFI-compatible feed status
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiFeedStatus {
    /// Articles were loaded
    Loaded,
    /// Connected, but no articles came back
    Empty,
    /// No network; nothing was requested
    NoNetwork,
    /// The request URL was invalid
    InvalidUrl { message: String },
    /// Network failure or timeout
    IoFailure { message: String },
    /// The server answered with a non-200 status
    BadStatus { code: u16 },
    /// The response body exceeded the size cap
    TooLarge { limit: u64 },
    /// The response was not a search envelope
    MalformedResponse { message: String },
    /// Configuration or client setup error
    ConfigError { message: String },
}

impl fmt::Display for FfiFeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiFeedStatus::Loaded => write!(f, "Loaded"),
            FfiFeedStatus::Empty => write!(f, "No news found"),
            FfiFeedStatus::NoNetwork => write!(f, "No network available"),
            FfiFeedStatus::InvalidUrl { message } => write!(f, "Invalid URL: {}", message),
            FfiFeedStatus::IoFailure { message } => write!(f, "Network error: {}", message),
            FfiFeedStatus::BadStatus { code } => write!(f, "Server returned status {}", code),
            FfiFeedStatus::TooLarge { limit } => {
                write!(f, "Response larger than {} bytes", limit)
            }
            FfiFeedStatus::MalformedResponse { message } => {
                write!(f, "Malformed response: {}", message)
            }
            FfiFeedStatus::ConfigError { message } => write!(f, "Config error: {}", message),
        }
    }
}

impl From<&NewsError> for FfiFeedStatus {
    fn from(err: &NewsError) -> Self {
        match err {
            NewsError::Fetch(FetchError::InvalidUrl(msg)) => FfiFeedStatus::InvalidUrl {
                message: msg.clone(),
            },
            NewsError::Fetch(FetchError::IoFailure(e)) => FfiFeedStatus::IoFailure {
                message: e.to_string(),
            },
            NewsError::Fetch(FetchError::BadStatus(code)) => {
                FfiFeedStatus::BadStatus { code: *code }
            }
            NewsError::Fetch(FetchError::TooLarge { limit }) => FfiFeedStatus::TooLarge {
                limit: *limit as u64,
            },
            NewsError::Parse(e) => FfiFeedStatus::MalformedResponse {
                message: e.to_string(),
            },
            NewsError::Config(e) => FfiFeedStatus::ConfigError {
                message: e.to_string(),
            },
            NewsError::Client(e) => FfiFeedStatus::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

/// FFI-compatible feed: featured article first, then the related ones
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFeed {
    pub status: FfiFeedStatus,
    pub articles: Vec<FfiArticle>,
}

impl From<FeedResult> for FfiFeed {
    fn from(feed: FeedResult) -> Self {
        let status = match &feed.status {
            FeedStatus::Loaded => FfiFeedStatus::Loaded,
            FeedStatus::Empty => FfiFeedStatus::Empty,
            FeedStatus::NoNetwork => FfiFeedStatus::NoNetwork,
            FeedStatus::Failed(e) => e.into(),
        };
        FfiFeed {
            status,
            articles: feed.articles.iter().map(FfiArticle::from).collect(),
        }
    }
}

/// Configuration for a feed request
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiNewsConfig {
    /// API key for the content API
    pub api_key: String,
    /// Optional base URL (uses the Guardian endpoint if not specified)
    pub base_url: Option<String>,
    /// Optional connect timeout in milliseconds (15000 if not specified)
    pub connect_timeout_ms: Option<u64>,
    /// Optional read timeout in milliseconds (10000 if not specified)
    pub read_timeout_ms: Option<u64>,
    /// Result of the host's connectivity check
    pub network_available: bool,
}

impl From<&FfiNewsConfig> for NewsConfig {
    fn from(ffi: &FfiNewsConfig) -> Self {
        let defaults = NewsConfig::default();
        NewsConfig {
            api_key: ffi.api_key.clone(),
            base_url: ffi.base_url.clone().unwrap_or(defaults.base_url),
            connect_timeout_ms: ffi.connect_timeout_ms.unwrap_or(defaults.connect_timeout_ms),
            read_timeout_ms: ffi.read_timeout_ms.unwrap_or(defaults.read_timeout_ms),
            ..NewsConfig::default()
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiFeedStatus> {
    tokio::runtime::Runtime::new().map_err(|e| FfiFeedStatus::ConfigError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn failed_feed(status: FfiFeedStatus) -> FfiFeed {
    FfiFeed {
        status,
        articles: Vec::new(),
    }
}

/// Request one page of articles for `query`
///
/// # Arguments
/// * `config` - API key, endpoint, timeouts and the host's connectivity state
/// * `query` - Search term
///
/// # Returns
/// An `FfiFeed`; failures come back as a status with no articles, never as an error
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn request_articles(config: FfiNewsConfig, query: String) -> FfiFeed {
    if !config.network_available {
        return FeedResult::no_network().into();
    }

    let rt = match create_runtime() {
        Ok(rt) => rt,
        Err(status) => return failed_feed(status),
    };

    let news_config = NewsConfig::from(&config);
    rt.block_on(async {
        match crate::NewsClient::from_config(&news_config) {
            Ok(client) => FfiFeed::from(client.request_articles(&query).await),
            Err(e) => failed_feed((&e).into()),
        }
    })
}

/// Build the search URL for a query
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn build_search_url(base_url: String, query: String, api_key: String) -> String {
    crate::build_search_url(&base_url, &query, &api_key)
}

/// Relative age of a publication date, e.g. `"3 hours ago"`
///
/// # Arguments
/// * `publication_date` - ISO-8601 timestamp with offset
/// * `now_epoch_secs` - Current time as seconds since the Unix epoch
///
/// # Returns
/// `None` when either time cannot be interpreted
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn relative_age(publication_date: String, now_epoch_secs: i64) -> Option<String> {
    let published = DateTime::parse_from_rfc3339(&publication_date).ok()?;
    let now = DateTime::<Utc>::from_timestamp(now_epoch_secs, 0)?;
    Some(crate::relative_age(published.with_timezone(&Utc), now))
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
