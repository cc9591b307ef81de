use std::convert::TryFrom;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ParseError, RecordError};
use crate::model::{ArticleRecord, ANONYMOUS_CONTRIBUTOR, MULTIPLE_CONTRIBUTORS_SUFFIX};

/// Turns a Guardian search response body into article records
pub struct NewsParser;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "webTitle")]
    web_title: Option<String>,
    #[serde(rename = "sectionName")]
    section_name: Option<String>,
    #[serde(rename = "webPublicationDate")]
    web_publication_date: Option<String>,
    #[serde(rename = "webUrl")]
    web_url: Option<String>,
    // kept loose so an odd `fields` or `tags` shape never rejects the record
    #[serde(default)]
    fields: Value,
    #[serde(default)]
    tags: Value,
}

impl TryFrom<Value> for SearchResult {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl TryFrom<SearchResult> for ArticleRecord {
    type Error = RecordError;

    fn try_from(result: SearchResult) -> Result<Self, Self::Error> {
        let contributor = contributor_from(&result.tags);
        let thumbnail = result.fields["thumbnail"].as_str().map(str::to_string);

        ArticleRecord::new(
            result.web_title.ok_or(RecordError::MissingField("webTitle"))?,
            result.web_url.ok_or(RecordError::MissingField("webUrl"))?,
            result
                .section_name
                .ok_or(RecordError::MissingField("sectionName"))?,
            result
                .web_publication_date
                .ok_or(RecordError::MissingField("webPublicationDate"))?,
            contributor,
            thumbnail,
        )
    }
}

/// Contributor display name from the `tags` array.
///
/// Only the first two entries matter: the first names the contributor,
/// a second tag object adds " et al.".
fn contributor_from(tags: &Value) -> String {
    let tags = tags.as_array().map(Vec::as_slice).unwrap_or(&[]);

    match tags.first().and_then(|tag| tag["webTitle"].as_str()) {
        Some(name) => {
            let mut contributor = name.to_string();
            if tags.get(1).map_or(false, Value::is_object) {
                contributor.push_str(MULTIPLE_CONTRIBUTORS_SUFFIX);
            }
            contributor
        }
        None => ANONYMOUS_CONTRIBUTOR.to_string(),
    }
}

impl NewsParser {
    /// Parse a search response body.
    ///
    /// An absent or blank body yields an empty list. A body without a
    /// `response.results` array is a [`ParseError::MalformedEnvelope`].
    /// Individual results that fail validation are logged and skipped, the
    /// remaining records keep their source order.
    pub fn parse(body: Option<&str>) -> Result<Vec<ArticleRecord>, ParseError> {
        let body = match body {
            Some(body) if !body.trim().is_empty() => body,
            _ => return Ok(Vec::new()),
        };

        let envelope: SearchEnvelope = serde_json::from_str(body)?;
        let total = envelope.response.results.len();

        let articles: Vec<ArticleRecord> = envelope
            .response
            .results
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match Self::parse_result(value) {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!("Skipping search result {}: {}", index, e);
                    None
                }
            })
            .collect();

        debug!("Parsed {} of {} search results", articles.len(), total);
        Ok(articles)
    }

    /// Convert one element of `response.results` into a record
    pub fn parse_result(value: Value) -> Result<ArticleRecord, RecordError> {
        let result =
            SearchResult::try_from(value).map_err(|e| RecordError::Malformed(e.to_string()))?;
        ArticleRecord::try_from(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with_tags(tags: Value) -> Value {
        json!({
            "webTitle": "Moon landing deniers gather in Leeds",
            "sectionName": "UK news",
            "webPublicationDate": "2021-04-01T16:18:13Z",
            "webUrl": "https://www.theguardian.com/uk-news/2021/apr/01/moon",
            "fields": { "thumbnail": "https://media.guim.co.uk/moon.jpg" },
            "tags": tags
        })
    }

    #[test]
    fn test_contributor_without_tags() {
        assert_eq!(contributor_from(&Value::Null), "Anonymous");
        assert_eq!(contributor_from(&json!([])), "Anonymous");
    }

    #[test]
    fn test_contributor_single_tag() {
        let tags = json!([{ "webTitle": "Alex Hern" }]);
        assert_eq!(contributor_from(&tags), "Alex Hern");
    }

    #[test]
    fn test_contributor_checks_only_second_index() {
        let two = json!([{ "webTitle": "Alex Hern" }, { "webTitle": "Kari Paul" }]);
        assert_eq!(contributor_from(&two), "Alex Hern et al.");

        let five = json!([
            { "webTitle": "Alex Hern" },
            { "webTitle": "B" },
            { "webTitle": "C" },
            { "webTitle": "D" },
            { "webTitle": "E" }
        ]);
        assert_eq!(contributor_from(&five), "Alex Hern et al.");
    }

    #[test]
    fn test_contributor_second_entry_not_a_tag() {
        let tags = json!([{ "webTitle": "Ann Perkins" }, null]);
        assert_eq!(contributor_from(&tags), "Ann Perkins");

        let tags = json!([{ "webTitle": "Ann Perkins" }, "Kari Paul"]);
        assert_eq!(contributor_from(&tags), "Ann Perkins");
    }

    #[test]
    fn test_contributor_first_tag_without_title() {
        let tags = json!([{ "id": "profile/someone" }, { "webTitle": "Kari Paul" }]);
        assert_eq!(contributor_from(&tags), "Anonymous");
    }

    #[test]
    fn test_parse_result_full() {
        let record =
            NewsParser::parse_result(result_with_tags(json!([{ "webTitle": "Alex Hern" }])))
                .unwrap();
        assert_eq!(record.title(), "Moon landing deniers gather in Leeds");
        assert_eq!(record.section(), "UK news");
        assert_eq!(record.contributor(), "Alex Hern");
        assert_eq!(record.thumbnail(), Some("https://media.guim.co.uk/moon.jpg"));
    }

    #[test]
    fn test_parse_result_missing_fields_has_no_thumbnail() {
        let mut value = result_with_tags(json!([]));
        value.as_object_mut().unwrap().remove("fields");
        let record = NewsParser::parse_result(value).unwrap();
        assert_eq!(record.thumbnail(), None);

        let mut value = result_with_tags(json!([]));
        value["fields"] = json!({ "headline": "no thumbnail here" });
        let record = NewsParser::parse_result(value).unwrap();
        assert_eq!(record.thumbnail(), None);
    }

    #[test]
    fn test_parse_result_missing_title() {
        let mut value = result_with_tags(json!([]));
        value.as_object_mut().unwrap().remove("webTitle");
        let result = NewsParser::parse_result(value);
        assert!(matches!(result, Err(RecordError::MissingField("webTitle"))));
    }

    #[test]
    fn test_parse_empty_or_absent_body() {
        assert!(NewsParser::parse(None).unwrap().is_empty());
        assert!(NewsParser::parse(Some("")).unwrap().is_empty());
        assert!(NewsParser::parse(Some("  \n")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_envelope() {
        for body in [
            "{}",
            r#"{"response": {}}"#,
            r#"{"response": {"results": {}}}"#,
            r#"{"response": "ok"}"#,
            "[]",
            "not json",
        ] {
            let result = NewsParser::parse(Some(body));
            assert!(
                matches!(result, Err(ParseError::MalformedEnvelope(_))),
                "body {} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_parse_skips_bad_records_and_keeps_order() {
        let body = json!({
            "response": {
                "status": "ok",
                "results": [
                    result_with_tags(json!([{ "webTitle": "First" }])),
                    {
                        "webTitle": "Broken date",
                        "sectionName": "World news",
                        "webPublicationDate": "not a date",
                        "webUrl": "https://www.theguardian.com/world/broken"
                    },
                    "not even an object",
                    result_with_tags(json!([{ "webTitle": "Second" }]))
                ]
            }
        })
        .to_string();

        let articles = NewsParser::parse(Some(&body)).unwrap();
        let contributors: Vec<&str> = articles.iter().map(|a| a.contributor()).collect();
        assert_eq!(contributors, vec!["First", "Second"]);
    }
}
