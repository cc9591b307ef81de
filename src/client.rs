use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::config::NewsConfig;
use crate::error::NewsError;
use crate::fetcher::{Fetch, NewsFetcher};
use crate::model::{ArticleRecord, FeedResult};
use crate::parser::NewsParser;
use crate::request::build_search_url;

/// Network availability as reported by the host platform
pub trait Connectivity: Send + Sync {
    fn is_network_available(&self) -> bool;
}

impl<F> Connectivity for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_network_available(&self) -> bool {
        self()
    }
}

/// Connectivity for hosts without a network check
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeOnline;

impl Connectivity for AssumeOnline {
    fn is_network_available(&self) -> bool {
        true
    }
}

/// Fetches and parses Guardian search results
pub struct NewsClient {
    base_url: String,
    api_key: String,
    fetcher: Arc<dyn Fetch>,
    connectivity: Arc<dyn Connectivity>,
}

impl NewsClient {
    /// Creates a new builder for a news client
    ///
    /// # Example
    /// ```
    /// use forks_news::NewsClient;
    ///
    /// let client = NewsClient::builder()
    ///     .api_key("test")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> NewsClientBuilder {
        NewsClientBuilder::default()
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &NewsConfig) -> Result<Self, NewsError> {
        Self::builder().config(config).build()
    }

    /// The search URL this client requests for `query`
    pub fn search_url(&self, query: &str) -> String {
        build_search_url(&self.base_url, query, &self.api_key)
    }

    /// Fetch and parse one page of results, propagating any failure
    pub async fn fetch_articles(&self, query: &str) -> Result<Vec<ArticleRecord>, NewsError> {
        let body = self.fetcher.fetch(&self.search_url(query)).await?;
        let articles = NewsParser::parse(Some(&body))?;
        Ok(articles)
    }

    /// Fetch articles for display.
    ///
    /// Never fails: problems are reported through [`FeedResult::status`] with
    /// an empty article list. No request is made while the network is down.
    pub async fn request_articles(&self, query: &str) -> FeedResult {
        if !self.connectivity.is_network_available() {
            info!("No network available, skipping request for '{}'", query);
            return FeedResult::no_network();
        }

        match self.fetch_articles(query).await {
            Ok(articles) => {
                info!("Loaded {} articles for '{}'", articles.len(), query);
                FeedResult::loaded(articles)
            }
            Err(e) => {
                warn!("Loading articles for '{}' failed: {}", query, e);
                FeedResult::failed(e)
            }
        }
    }
}

/// Builder for configuring a [`NewsClient`]
#[derive(Default)]
pub struct NewsClientBuilder {
    config: NewsConfig,
    fetcher: Option<Arc<dyn Fetch>>,
    connectivity: Option<Arc<dyn Connectivity>>,
}

impl NewsClientBuilder {
    /// Take every setting from a loaded [`NewsConfig`]
    pub fn config(mut self, config: &NewsConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Set the API base URL, e.g. `https://content.guardianapis.com`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.config.connect_timeout_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn read_timeout(mut self, duration: Duration) -> Self {
        self.config.read_timeout_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Cap on the response body size in bytes
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.config.max_body_bytes = limit;
        self
    }

    /// Replace the HTTP fetcher, e.g. with a stub in tests.
    ///
    /// Timeouts and the body cap are then up to the given fetcher.
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Consult `connectivity` before each request
    ///
    /// # Example
    /// ```
    /// use forks_news::NewsClient;
    ///
    /// let client = NewsClient::builder()
    ///     .connectivity(|| false)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn connectivity(mut self, connectivity: impl Connectivity + 'static) -> Self {
        self.connectivity = Some(Arc::new(connectivity));
        self
    }

    pub fn build(self) -> Result<NewsClient, NewsError> {
        let fetcher: Arc<dyn Fetch> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(NewsFetcher::new(
                self.config.connect_timeout(),
                self.config.read_timeout(),
                self.config.max_body_bytes,
            )?),
        };

        Ok(NewsClient {
            base_url: self.config.base_url,
            api_key: self.config.api_key,
            fetcher,
            connectivity: self
                .connectivity
                .unwrap_or_else(|| Arc::new(AssumeOnline) as Arc<dyn Connectivity>),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_uses_config() {
        let config = NewsConfig {
            base_url: "http://localhost:9999".to_string(),
            api_key: "KEY".to_string(),
            ..NewsConfig::default()
        };
        let client = NewsClient::from_config(&config).unwrap();
        assert_eq!(
            client.search_url("moon"),
            "http://localhost:9999/search?q=moon&show-fields=thumbnail&show-tags=contributor&api-key=KEY"
        );
    }

    #[test]
    fn test_builder_overrides_config() {
        let client = NewsClient::builder()
            .config(&NewsConfig::default())
            .base_url("http://127.0.0.1:1")
            .api_key("other")
            .build()
            .unwrap();
        assert!(client.search_url("x").starts_with("http://127.0.0.1:1/search?"));
        assert!(client.search_url("x").ends_with("api-key=other"));
    }

    #[test]
    fn test_builder_default_timeouts() {
        let builder = NewsClient::builder();
        assert_eq!(builder.config.connect_timeout(), Duration::from_secs(15));
        assert_eq!(builder.config.read_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_builder_timeout_overrides() {
        let builder = NewsClient::builder()
            .connect_timeout(Duration::from_millis(1500))
            .read_timeout(Duration::from_secs(3));
        assert_eq!(builder.config.connect_timeout_ms, 1500);
        assert_eq!(builder.config.read_timeout_ms, 3000);
    }

    #[test]
    fn test_builder_saturates_huge_timeouts() {
        let builder = NewsClient::builder()
            .connect_timeout(Duration::MAX)
            .read_timeout(Duration::MAX);
        assert_eq!(builder.config.connect_timeout_ms, u64::MAX);
        assert_eq!(builder.config.read_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_closure_connectivity() {
        let offline = || false;
        assert!(!offline.is_network_available());
        assert!(AssumeOnline.is_network_available());
    }
}
