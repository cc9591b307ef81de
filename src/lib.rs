pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod loader;
pub mod model;
pub mod parser;
pub mod request;
pub mod time;

// UniFFI bindings for iOS/Android
pub mod uniffi_bindings;

// Scaffolding must live at the crate root for the derives in uniffi_bindings
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

pub use client::{AssumeOnline, Connectivity, NewsClient, NewsClientBuilder};
pub use config::NewsConfig;
pub use error::{FetchError, NewsError, ParseError, RecordError};
pub use fetcher::{Fetch, NewsFetcher};
pub use loader::{LoadHandle, NewsLoader};
pub use model::{ArticleRecord, FeedResult, FeedStatus};
pub use parser::NewsParser;
pub use request::build_search_url;
pub use time::relative_age;

/// Fetch and parse one page of search results from `url`.
///
/// Uses the default 15 s connect and 10 s read timeouts.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), forks_news::NewsError> {
/// let url = forks_news::build_search_url("https://content.guardianapis.com", "conspiracy", "test");
/// let articles = forks_news::fetch_articles(&url).await?;
/// # Ok(())
/// # }
/// ```
pub async fn fetch_articles(url: &str) -> Result<Vec<ArticleRecord>, NewsError> {
    let defaults = NewsConfig::default();
    let fetcher = NewsFetcher::new(
        defaults.connect_timeout(),
        defaults.read_timeout(),
        defaults.max_body_bytes,
    )?;
    let body = fetcher.fetch(url).await?;
    Ok(NewsParser::parse(Some(&body))?)
}
