use thiserror::Error;

/// Errors that can occur while fetching a search response
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request URL could not be parsed or used
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Network-level failure: DNS, refused connection, timeout or a broken body stream
    #[error("Request failed: {0}")]
    IoFailure(#[source] reqwest::Error),

    /// The server answered with something other than 200 OK
    #[error("Unexpected response status: {0}")]
    BadStatus(u16),

    /// The response body is larger than the configured cap
    #[error("Response body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl FetchError {
    /// True when the failure was a connect or read timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::IoFailure(e) if e.is_timeout())
    }
}

/// Errors that invalidate a whole search response
#[derive(Error, Debug)]
pub enum ParseError {
    /// The JSON is invalid or lacks the `response.results` array
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::MalformedEnvelope(err.to_string())
    }
}

/// Reasons a single search result is rejected
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Malformed search result: {0}")]
    Malformed(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Article title is empty")]
    EmptyTitle,

    #[error("Invalid article URL '{0}'")]
    InvalidUrl(String),

    #[error("Invalid publication date '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Errors surfaced by the news client
#[derive(Error, Debug)]
pub enum NewsError {
    /// Failed to fetch the search response
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Failed to parse the search response
    #[error("Parse failed: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_message() {
        let err = FetchError::BadStatus(404);
        assert_eq!(err.to_string(), "Unexpected response status: 404");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_json_error_becomes_malformed_envelope() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ParseError = json_err.into();
        assert!(matches!(err, ParseError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_news_error_wraps_fetch_error() {
        let err: NewsError = FetchError::TooLarge { limit: 16 }.into();
        assert_eq!(
            err.to_string(),
            "Fetch failed: Response body exceeds 16 bytes"
        );
    }
}
