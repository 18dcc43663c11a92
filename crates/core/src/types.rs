// crates/core/src/types.rs
//! Wire types shared between the pipeline and the HTTP surface.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::domain::extract_domain;
use crate::error::RecordError;
use crate::time::zoned_from_millis;

/// A raw browser-history record as the extension sends it.
///
/// Chrome's history API calls the visit time `lastVisitTime` (a float of
/// epoch milliseconds); the search payloads use `time`. Both are accepted.
/// A missing or non-numeric timestamp decodes to `None` so a single junk
/// record never rejects the whole batch — it surfaces later as
/// `RecordError::InvalidTimestamp` and the record is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageVisit {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(
        default,
        alias = "lastVisitTime",
        deserialize_with = "lenient_millis"
    )]
    pub time: Option<i64>,
}

impl PageVisit {
    /// Canonical domain of the visit; empty when the URL has no host.
    pub fn domain(&self) -> String {
        self.url.as_deref().map(extract_domain).unwrap_or_default()
    }

    /// Epoch milliseconds, or `InvalidTimestamp` when absent/non-numeric.
    pub fn timestamp_ms(&self) -> Result<i64, RecordError> {
        self.time.ok_or(RecordError::InvalidTimestamp)
    }

    /// The visit instant in Pacific time.
    pub fn zoned_time(&self) -> Result<DateTime<chrono_tz::Tz>, RecordError> {
        zoned_from_millis(self.timestamp_ms()?)
    }
}

/// Accept a number (integer or float), reject everything else as absent.
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(|f| f as i64))
}

/// Structured filter criteria produced by the natural-language parser.
///
/// Every field is optional; absence means "unconstrained". The shape
/// mirrors the parser contract: `type` carries the media type, `synonyms`
/// maps each keyword to 1-3 expansions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterCriteria {
    pub platform: Option<String>,
    pub time_range: Option<String>,
    pub from_date: Option<DateTime<FixedOffset>>,
    pub to_date: Option<DateTime<FixedOffset>>,
    pub ordinal: Option<i64>,
    pub keywords: Vec<String>,
    pub hashtags: Vec<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub synonyms: HashMap<String, Vec<String>>,
}

impl FilterCriteria {
    /// Candidate term set: keywords plus all synonym expansions, lowercased.
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        let mut push = |t: &str| {
            let lower = t.to_lowercase();
            if !lower.is_empty() && !terms.contains(&lower) {
                terms.push(lower);
            }
        };
        for kw in &self.keywords {
            push(kw);
        }
        for kw in &self.keywords {
            if let Some(expansions) = self.synonyms.get(kw) {
                for syn in expansions {
                    push(syn);
                }
            }
        }
        terms
    }
}

/// Ranked search result handed back to the extension.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageSummary {
    pub url: String,
    /// Title truncated to 60 characters.
    pub title: String,
    /// Page content truncated to 150 characters.
    pub summary: String,
    pub time: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_visit_accepts_last_visit_time_alias() {
        let page: PageVisit = serde_json::from_str(
            r#"{"url":"https://x.com","title":"t","lastVisitTime":1747942200123.7}"#,
        )
        .unwrap();
        assert_eq!(page.time, Some(1_747_942_200_123));
        assert_eq!(page.domain(), "x.com");
    }

    #[test]
    fn test_page_visit_accepts_time_field() {
        let page: PageVisit =
            serde_json::from_str(r#"{"url":"https://x.com","time":1000}"#).unwrap();
        assert_eq!(page.timestamp_ms(), Ok(1000));
    }

    #[test]
    fn test_non_numeric_timestamp_is_skippable_not_fatal() {
        let page: PageVisit =
            serde_json::from_str(r#"{"url":"https://x.com","time":"yesterday"}"#).unwrap();
        assert_eq!(page.timestamp_ms(), Err(RecordError::InvalidTimestamp));
    }

    #[test]
    fn test_missing_fields_default() {
        let page: PageVisit = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(page.url, None);
        assert_eq!(page.title, "");
        assert_eq!(page.content, "");
        assert_eq!(page.timestamp_ms(), Err(RecordError::InvalidTimestamp));
        assert_eq!(page.domain(), "");
    }

    #[test]
    fn test_filter_criteria_all_optional() {
        let criteria: FilterCriteria = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_filter_criteria_full_decode() {
        let criteria: FilterCriteria = serde_json::from_str(
            r##"{
                "platform": "tiktok",
                "time_range": "yesterday",
                "from_date": "2025-05-22T00:00:00-07:00",
                "to_date": "2025-05-23T00:00:00-07:00",
                "ordinal": null,
                "keywords": ["funny"],
                "hashtags": ["#fyp"],
                "type": "video",
                "synonyms": {"funny": ["humor", "comedy"]}
            }"##,
        )
        .unwrap();
        assert_eq!(criteria.platform.as_deref(), Some("tiktok"));
        assert_eq!(criteria.media_type.as_deref(), Some("video"));
        assert_eq!(
            criteria.from_date.unwrap().timestamp(),
            criteria.to_date.unwrap().timestamp() - 86_400
        );
    }

    #[test]
    fn test_terms_union_of_keywords_and_synonyms() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"keywords":["Workout"],"synonyms":{"Workout":["Exercise","training"]}}"#,
        )
        .unwrap();
        assert_eq!(criteria.terms(), vec!["workout", "exercise", "training"]);
    }

    #[test]
    fn test_terms_dedupes() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"keywords":["funny","FUNNY"],"synonyms":{"funny":["funny"]}}"#,
        )
        .unwrap();
        assert_eq!(criteria.terms(), vec!["funny"]);
    }
}
