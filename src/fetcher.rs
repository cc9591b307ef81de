use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

use crate::error::{FetchError, NewsError};
use crate::request::redact_api_key;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Source of raw search response bodies
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url` and return the body of a 200 response as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct NewsFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl NewsFetcher {
    /// Create a fetcher with explicit connect and read timeouts
    pub fn new(
        connect_timeout: Duration,
        read_timeout: Duration,
        max_body_bytes: usize,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .user_agent(concat!("forks-news/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NewsError::Client)?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }
}

/// Map a transport error, keeping URL problems apart from I/O failures
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        FetchError::InvalidUrl(err.to_string())
    } else {
        FetchError::IoFailure(err)
    }
}

#[async_trait]
impl Fetch for NewsFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        debug!("GET {}", redact_api_key(url));

        // The response owns the connection; every return below drops it.
        let mut response = self.client.get(parsed).send().await.map_err(classify)?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let limit = self.max_body_bytes;
        if let Some(length) = response.content_length() {
            if length > limit as u64 {
                return Err(FetchError::TooLarge { limit });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(classify)? {
            if body.len() + chunk.len() > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Read {} bytes", body.len());
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
