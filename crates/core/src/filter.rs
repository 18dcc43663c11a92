// crates/core/src/filter.rs
//! Query filter: match normalized pages against parsed criteria and rank.

use std::cmp::Reverse;

use rapidfuzz::fuzz;

use crate::types::{FilterCriteria, PageSummary, PageVisit};

/// Maximum number of ranked results returned to the caller.
pub const MAX_RESULTS: usize = 10;

const TITLE_MAX_CHARS: usize = 60;
const SUMMARY_MAX_CHARS: usize = 150;

/// How candidate terms are matched against page text.
///
/// Both behaviors were observed in the deployed variants; which one is
/// active is a configuration switch, not a guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TermMatch {
    /// Plain lowercase substring containment.
    Substring,
    /// Partial-ratio similarity strictly above `threshold` (0-100 scale).
    Fuzzy { threshold: f64 },
}

/// Whether the upper date bound admits pages exactly at `to_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Inclusive,
    Exclusive,
}

/// Tunable matching behavior; defaults follow the primary observed variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    pub term_match: TermMatch,
    pub upper_bound: DateBound,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            term_match: TermMatch::Fuzzy { threshold: 80.0 },
            upper_bound: DateBound::Inclusive,
        }
    }
}

/// Does a single page satisfy the parsed criteria?
///
/// Checks, in order: platform substring, date range, candidate terms
/// (keywords ∪ synonyms), hashtags. Every absent criterion is
/// unconstrained.
pub fn matches_page(criteria: &FilterCriteria, page: &PageVisit, config: &FilterConfig) -> bool {
    let title = page.title.to_lowercase();
    let url = page.url.as_deref().unwrap_or_default().to_lowercase();
    let content = page.content.to_lowercase();
    let domain = page.domain();
    let combined = format!("{title} {url} {content} {domain}");

    if let Some(platform) = criteria.platform.as_deref() {
        let platform = platform.to_lowercase();
        if !platform.is_empty()
            && !domain.contains(&platform)
            && !title.contains(&platform)
            && !url.contains(&platform)
        {
            return false;
        }
    }

    if let (Some(from), Some(to)) = (criteria.from_date, criteria.to_date) {
        if let Ok(ms) = page.timestamp_ms() {
            let from_ms = from.timestamp_millis();
            let to_ms = to.timestamp_millis();
            let in_range = match config.upper_bound {
                DateBound::Inclusive => ms >= from_ms && ms <= to_ms,
                DateBound::Exclusive => ms >= from_ms && ms < to_ms,
            };
            if !in_range {
                return false;
            }
        }
    }

    let terms = criteria.terms();
    if !terms.is_empty() && !terms.iter().any(|t| term_hits(t, &combined, config)) {
        return false;
    }

    if !criteria.hashtags.is_empty() {
        let hit = criteria
            .hashtags
            .iter()
            .any(|tag| combined.contains(&tag.to_lowercase()));
        if !hit {
            return false;
        }
    }

    true
}

fn term_hits(term: &str, text: &str, config: &FilterConfig) -> bool {
    match config.term_match {
        TermMatch::Substring => text.contains(term),
        TermMatch::Fuzzy { threshold } => partial_ratio(term, text) > threshold,
    }
}

/// Best `ratio` of the needle against every needle-length window of the
/// haystack, 0-100 scale. The windowed scan gives partial-ratio
/// semantics: a good local match counts even when the surrounding text
/// is long.
fn partial_ratio(needle: &str, haystack: &str) -> f64 {
    let needle: Vec<char> = needle.chars().collect();
    let haystack: Vec<char> = haystack.chars().collect();
    if needle.is_empty() || haystack.len() <= needle.len() {
        return fuzz::ratio(needle.iter().copied(), haystack.iter().copied()) * 100.0;
    }
    haystack
        .windows(needle.len())
        .map(|window| fuzz::ratio(needle.iter().copied(), window.iter().copied()) * 100.0)
        .fold(0.0_f64, f64::max)
}

/// Filter, rank newest-first, cap at [`MAX_RESULTS`] and summarize.
///
/// The sort is stable: pages sharing a timestamp keep their relative
/// order from the input. Pages without a URL are skipped entirely.
pub fn filter_and_rank(
    criteria: &FilterCriteria,
    pages: &[PageVisit],
    config: &FilterConfig,
) -> Vec<PageSummary> {
    let mut survivors: Vec<&PageVisit> = pages
        .iter()
        .filter(|p| p.url.is_some())
        .filter(|p| matches_page(criteria, p, config))
        .collect();

    survivors.sort_by_key(|p| Reverse(p.time.unwrap_or(0)));

    survivors
        .into_iter()
        .take(MAX_RESULTS)
        .map(|p| PageSummary {
            url: p.url.clone().unwrap_or_default(),
            title: truncate_chars(&p.title, TITLE_MAX_CHARS),
            summary: truncate_chars(&p.content, SUMMARY_MAX_CHARS),
            time: p.time,
        })
        .collect()
}

/// Char-boundary-safe prefix truncation.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(url: &str, title: &str, content: &str, time: i64) -> PageVisit {
        PageVisit {
            url: Some(url.to_string()),
            title: title.to_string(),
            content: content.to_string(),
            time: Some(time),
        }
    }

    fn criteria_json(json: &str) -> FilterCriteria {
        serde_json::from_str(json).unwrap()
    }

    fn exact() -> FilterConfig {
        FilterConfig {
            term_match: TermMatch::Substring,
            upper_bound: DateBound::Inclusive,
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let p = page("https://x.com", "anything", "", 1);
        assert!(matches_page(&FilterCriteria::default(), &p, &FilterConfig::default()));
    }

    #[test]
    fn test_platform_check_rejects_other_platforms() {
        let criteria = criteria_json(r#"{"platform":"tiktok","keywords":["funny"]}"#);
        let yt = page("https://youtube.com/a", "funny cat", "...", 1000);
        let tt = page("https://tiktok.com/b", "funny dance", "...", 1001);

        assert!(!matches_page(&criteria, &yt, &exact()));
        assert!(matches_page(&criteria, &tt, &exact()));
    }

    #[test]
    fn test_platform_matches_in_title_too() {
        let criteria = criteria_json(r#"{"platform":"netflix"}"#);
        let p = page("https://someproxy.example", "Netflix — Home", "", 1);
        assert!(matches_page(&criteria, &p, &exact()));
    }

    #[test]
    fn test_date_range_boundaries_inclusive() {
        let criteria = criteria_json(
            r#"{"from_date":"2025-05-22T00:00:00-07:00","to_date":"2025-05-23T00:00:00-07:00"}"#,
        );
        let from_ms = criteria.from_date.unwrap().timestamp_millis();
        let to_ms = criteria.to_date.unwrap().timestamp_millis();
        let cfg = exact();

        assert!(matches_page(&criteria, &page("https://x.com", "", "", from_ms), &cfg));
        assert!(matches_page(&criteria, &page("https://x.com", "", "", to_ms), &cfg));
        assert!(!matches_page(&criteria, &page("https://x.com", "", "", from_ms - 1), &cfg));
        assert!(!matches_page(&criteria, &page("https://x.com", "", "", to_ms + 1), &cfg));
    }

    #[test]
    fn test_date_range_boundaries_exclusive_upper() {
        let criteria = criteria_json(
            r#"{"from_date":"2025-05-22T00:00:00-07:00","to_date":"2025-05-23T00:00:00-07:00"}"#,
        );
        let from_ms = criteria.from_date.unwrap().timestamp_millis();
        let to_ms = criteria.to_date.unwrap().timestamp_millis();
        let cfg = FilterConfig {
            term_match: TermMatch::Substring,
            upper_bound: DateBound::Exclusive,
        };

        assert!(matches_page(&criteria, &page("https://x.com", "", "", from_ms), &cfg));
        assert!(matches_page(&criteria, &page("https://x.com", "", "", to_ms - 1), &cfg));
        assert!(!matches_page(&criteria, &page("https://x.com", "", "", to_ms), &cfg));
    }

    #[test]
    fn test_date_range_ignored_without_timestamp() {
        let criteria = criteria_json(
            r#"{"from_date":"2025-05-22T00:00:00-07:00","to_date":"2025-05-23T00:00:00-07:00"}"#,
        );
        let p = PageVisit {
            url: Some("https://x.com".to_string()),
            title: String::new(),
            content: String::new(),
            time: None,
        };
        assert!(matches_page(&criteria, &p, &exact()));
    }

    #[test]
    fn test_synonyms_expand_term_set() {
        let criteria = criteria_json(
            r#"{"keywords":["workout"],"synonyms":{"workout":["exercise"]}}"#,
        );
        let p = page("https://youtube.com/v", "morning exercise routine", "", 1);
        assert!(matches_page(&criteria, &p, &exact()));
    }

    #[test]
    fn test_term_match_fuzzy_vs_substring() {
        // "funnny" is a near-miss (one stray letter): partial-ratio against
        // the "funny " window is ~83, above the 80 threshold; substring
        // containment fails outright.
        let criteria = criteria_json(r#"{"keywords":["funnny"]}"#);
        let p = page("https://tiktok.com/b", "funny dance", "", 1);

        assert!(!matches_page(&criteria, &p, &exact()));
        assert!(matches_page(&criteria, &p, &FilterConfig::default()));
    }

    #[test]
    fn test_fuzzy_scans_needle_length_windows() {
        // Exact needle buried in long text must score 100 even though a
        // whole-string comparison would fall far below the threshold.
        let criteria = criteria_json(r#"{"keywords":["metallurgy"]}"#);
        let p = page(
            "https://x.com",
            "a very long article about metallurgy and other topics entirely",
            "",
            1,
        );
        assert!(matches_page(&criteria, &p, &FilterConfig::default()));
    }

    #[test]
    fn test_fuzzy_threshold_is_strict() {
        let p = page("https://x.com", "completely unrelated metallurgy", "", 1);
        let criteria = criteria_json(r#"{"keywords":["quokka"]}"#);
        assert!(!matches_page(&criteria, &p, &FilterConfig::default()));
    }

    #[test]
    fn test_hashtag_check() {
        let criteria = criteria_json(r##"{"hashtags":["#fyp"]}"##);
        let hit = page("https://tiktok.com/a", "dance #fyp", "", 1);
        let miss = page("https://tiktok.com/b", "dance", "", 1);
        assert!(matches_page(&criteria, &hit, &exact()));
        assert!(!matches_page(&criteria, &miss, &exact()));
    }

    #[test]
    fn test_filter_and_rank_caps_and_sorts_descending() {
        let pages: Vec<PageVisit> = (0..25)
            .map(|i| page(&format!("https://x.com/{i}"), "t", "c", i))
            .collect();
        let out = filter_and_rank(&FilterCriteria::default(), &pages, &exact());

        assert_eq!(out.len(), MAX_RESULTS);
        let times: Vec<i64> = out.iter().map(|s| s.time.unwrap()).collect();
        assert_eq!(times, vec![24, 23, 22, 21, 20, 19, 18, 17, 16, 15]);
    }

    #[test]
    fn test_filter_and_rank_ties_keep_input_order() {
        let pages = vec![
            page("https://a.com", "first", "", 100),
            page("https://b.com", "second", "", 100),
            page("https://c.com", "third", "", 100),
        ];
        let out = filter_and_rank(&FilterCriteria::default(), &pages, &exact());
        let urls: Vec<&str> = out.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn test_filter_and_rank_truncates_title_and_summary() {
        let long_title = "t".repeat(80);
        let long_content = "c".repeat(200);
        let pages = vec![page("https://x.com", &long_title, &long_content, 1)];
        let out = filter_and_rank(&FilterCriteria::default(), &pages, &exact());

        assert_eq!(out[0].title.chars().count(), 60);
        assert_eq!(out[0].summary.chars().count(), 150);
    }

    #[test]
    fn test_filter_and_rank_skips_pages_without_url() {
        let mut pages = vec![page("https://x.com", "t", "", 1)];
        pages.push(PageVisit {
            url: None,
            title: "no url".to_string(),
            content: String::new(),
            time: Some(2),
        });
        let out = filter_and_rank(&FilterCriteria::default(), &pages, &exact());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].url, "https://x.com");
    }

    #[test]
    fn test_end_to_end_platform_and_keyword() {
        let pages = vec![
            page("https://youtube.com/a", "funny cat", "...", 1000),
            page("https://tiktok.com/b", "funny dance", "...", 1001),
        ];
        let criteria = criteria_json(r#"{"platform":"tiktok","keywords":["funny"]}"#);
        let out = filter_and_rank(&criteria, &pages, &FilterConfig::default());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].url, "https://tiktok.com/b");
    }
}
