use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use url::Url;

use crate::error::{NewsError, RecordError};
use crate::time::{relative_age, short_timestamp};

/// Contributor shown when an article carries no contributor tag
pub const ANONYMOUS_CONTRIBUTOR: &str = "Anonymous";

/// Suffix appended when an article has more than one contributor tag
pub const MULTIPLE_CONTRIBUTORS_SUFFIX: &str = " et al.";

/// A single news article ready for display.
///
/// Records are validated on construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    title: String,
    url: String,
    section: String,
    publication_date: String,
    published_at: DateTime<FixedOffset>,
    contributor: String,
    thumbnail: Option<String>,
}

impl ArticleRecord {
    /// Validate and build a record.
    ///
    /// `publication_date` must be an ISO-8601 timestamp with an offset,
    /// e.g. `2021-04-01T16:18:13Z`.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        section: impl Into<String>,
        publication_date: impl Into<String>,
        contributor: impl Into<String>,
        thumbnail: Option<String>,
    ) -> Result<Self, RecordError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RecordError::EmptyTitle);
        }

        let url = url.into();
        match Url::parse(&url) {
            Ok(parsed) if parsed.has_host() => {}
            _ => return Err(RecordError::InvalidUrl(url)),
        }

        let publication_date = publication_date.into();
        let published_at = DateTime::parse_from_rfc3339(&publication_date).map_err(|source| {
            RecordError::InvalidTimestamp {
                value: publication_date.clone(),
                source,
            }
        })?;

        Ok(Self {
            title,
            url,
            section: section.into(),
            publication_date,
            published_at,
            contributor: contributor.into(),
            thumbnail,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// The publication date exactly as the API sent it
    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    pub fn published_at(&self) -> DateTime<FixedOffset> {
        self.published_at
    }

    pub fn contributor(&self) -> &str {
        &self.contributor
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    /// Age of the article relative to `now`, e.g. `"3 hours ago"`
    pub fn relative_age(&self, now: DateTime<Utc>) -> String {
        relative_age(self.published_at.with_timezone(&Utc), now)
    }

    /// Publication time as `M/dd HH:mm`, in the offset the API sent
    pub fn local_time(&self) -> String {
        short_timestamp(&self.published_at)
    }
}

/// Terminal state of a feed request, as the UI renders it
#[derive(Debug)]
pub enum FeedStatus {
    /// At least one article was loaded
    Loaded,
    /// The request succeeded but returned no usable articles
    Empty,
    /// No network was available, nothing was requested
    NoNetwork,
    /// The request or the response parsing failed
    Failed(NewsError),
}

/// Outcome of one feed request.
///
/// The article list is always complete: either the full new sequence or empty.
#[derive(Debug)]
pub struct FeedResult {
    pub articles: Vec<ArticleRecord>,
    pub status: FeedStatus,
}

impl FeedResult {
    /// Wrap a successfully parsed batch, picking `Loaded` or `Empty`
    pub fn loaded(articles: Vec<ArticleRecord>) -> Self {
        let status = if articles.is_empty() {
            FeedStatus::Empty
        } else {
            FeedStatus::Loaded
        };
        Self { articles, status }
    }

    pub fn no_network() -> Self {
        Self {
            articles: Vec::new(),
            status: FeedStatus::NoNetwork,
        }
    }

    pub fn failed(error: NewsError) -> Self {
        Self {
            articles: Vec::new(),
            status: FeedStatus::Failed(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, FeedStatus::Loaded | FeedStatus::Empty)
    }

    /// The article shown on the main card
    pub fn featured(&self) -> Option<&ArticleRecord> {
        self.articles.first()
    }

    /// Every article after the featured one
    pub fn related(&self) -> &[ArticleRecord] {
        self.articles.get(1..).unwrap_or(&[])
    }
}
