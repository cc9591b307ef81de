use url::form_urlencoded;

/// Path of the content search endpoint, relative to the API base URL
pub const SEARCH_PATH: &str = "/search";

/// Build the search URL for `query`.
///
/// Asks for thumbnail fields and contributor tags alongside each result.
/// The API key is not validated here; a bad key comes back as an HTTP error.
///
/// # Example
/// ```
/// use forks_news::build_search_url;
///
/// let url = build_search_url("https://content.guardianapis.com", "conspiracy", "test");
/// assert_eq!(
///     url,
///     "https://content.guardianapis.com/search?q=conspiracy&show-fields=thumbnail&show-tags=contributor&api-key=test"
/// );
/// ```
pub fn build_search_url(base_url: &str, query: &str, api_key: &str) -> String {
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .append_pair("show-fields", "thumbnail")
        .append_pair("show-tags", "contributor")
        .append_pair("api-key", api_key)
        .finish();

    format!(
        "{}{}?{}",
        base_url.trim_end_matches('/'),
        SEARCH_PATH,
        params
    )
}

/// Same URL with the API key masked, for log output
pub(crate) fn redact_api_key(url: &str) -> String {
    match url.split_once("api-key=") {
        Some((head, tail)) => {
            let rest = tail.find('&').map(|i| &tail[i..]).unwrap_or("");
            format!("{}api-key=***{}", head, rest)
        }
        None => url.to_string(),
    }
}
