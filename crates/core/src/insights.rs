// crates/core/src/insights.rs
//! Insights aggregator: domain frequencies, hourly heatmaps,
//! weekday/weekend splits, and adjacent-visit transition mining.

use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use ts_rs::TS;

use crate::time::{hour_of_day, is_weekend};
use crate::types::PageVisit;

/// Adjacent visits further apart than this are not a transition.
pub const TRANSITION_GAP_MS: i64 = 5 * 60 * 1000;

const TOP_DOMAINS: usize = 5;

/// A normalized visit: canonical domain plus Pacific-time instant.
///
/// Records with a missing URL, an empty domain, or an unusable timestamp
/// are dropped during normalization and never reach the aggregator.
#[derive(Debug, Clone)]
pub struct Visit {
    pub domain: String,
    pub time: DateTime<Tz>,
}

/// One bucket of a per-domain hourly histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct HourCount {
    pub hour: u32,
    pub count: u64,
}

/// A counted pair of chronologically-adjacent visits to different domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub count: u64,
}

/// Batch analytics over a whole history; field names match the frontend.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct InsightsReport {
    /// 5 most frequent domains with visit counts.
    pub top_domains: Vec<(String, u64)>,
    /// Sparse hour histograms for the top domains only (count > 0,
    /// ascending by hour).
    pub hourly_visits: HashMap<String, Vec<HourCount>>,
    pub weekday_top: Vec<(String, u64)>,
    pub weekend_top: Vec<(String, u64)>,
    /// 5 most common back-to-back domain switches within 5 minutes.
    pub common_sequences: Vec<Transition>,
}

/// Normalize raw pages into time-ascending visits, skipping unusable
/// records instead of failing the batch.
pub fn visits_from_pages(pages: &[PageVisit]) -> Vec<Visit> {
    let mut visits: Vec<Visit> = Vec::with_capacity(pages.len());
    let mut skipped = 0usize;

    for page in pages {
        let domain = page.domain();
        if domain.is_empty() {
            skipped += 1;
            continue;
        }
        match page.zoned_time() {
            Ok(time) => visits.push(Visit { domain, time }),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, total = pages.len(), "dropped unusable history records");
    }

    visits.sort_by_key(|v| v.time);
    visits
}

/// Compute the full insights report. Pure function of the visit sequence.
pub fn compute_insights(visits: &[Visit]) -> InsightsReport {
    let top_domains = ranked_counts(visits.iter().map(|v| v.domain.as_str()), TOP_DOMAINS);

    let mut hourly_visits = HashMap::new();
    for (domain, _) in &top_domains {
        let mut hours = [0u64; 24];
        for v in visits.iter().filter(|v| &v.domain == domain) {
            hours[hour_of_day(&v.time) as usize] += 1;
        }
        let buckets: Vec<HourCount> = hours
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(hour, &count)| HourCount {
                hour: hour as u32,
                count,
            })
            .collect();
        hourly_visits.insert(domain.clone(), buckets);
    }

    let weekday_top = ranked_counts(
        visits
            .iter()
            .filter(|v| !is_weekend(&v.time))
            .map(|v| v.domain.as_str()),
        TOP_DOMAINS,
    );
    let weekend_top = ranked_counts(
        visits
            .iter()
            .filter(|v| is_weekend(&v.time))
            .map(|v| v.domain.as_str()),
        TOP_DOMAINS,
    );

    let common_sequences = top_transitions(visits, TOP_DOMAINS);

    InsightsReport {
        top_domains,
        hourly_visits,
        weekday_top,
        weekend_top,
        common_sequences,
    }
}

/// Count occurrences and return the `limit` most frequent, ties broken by
/// first-encountered order (insertion order + stable sort).
pub(crate) fn ranked_counts<'a>(
    items: impl Iterator<Item = &'a str>,
    limit: usize,
) -> Vec<(String, u64)> {
    let mut counts: HashMap<&'a str, u64> = HashMap::new();
    let mut order: Vec<&'a str> = Vec::new();

    for item in items {
        let entry = counts.entry(item).or_insert(0);
        if *entry == 0 {
            order.push(item);
        }
        *entry += 1;
    }

    let mut ranked: Vec<(String, u64)> = order
        .into_iter()
        .map(|d| (d.to_string(), counts[d]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Mine adjacent-visit transitions from a time-ascending sequence.
///
/// A pair counts when the domains differ and the gap is at most
/// [`TRANSITION_GAP_MS`] (the boundary itself counts).
pub(crate) fn top_transitions(visits: &[Visit], limit: usize) -> Vec<Transition> {
    let mut counts: HashMap<(&str, &str), u64> = HashMap::new();
    let mut order: Vec<(&str, &str)> = Vec::new();

    for pair in visits.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.domain == b.domain {
            continue;
        }
        let gap_ms = b.time.timestamp_millis() - a.time.timestamp_millis();
        if gap_ms > TRANSITION_GAP_MS {
            continue;
        }
        let key = (a.domain.as_str(), b.domain.as_str());
        let entry = counts.entry(key).or_insert(0);
        if *entry == 0 {
            order.push(key);
        }
        *entry += 1;
    }

    let mut ranked: Vec<Transition> = order
        .into_iter()
        .map(|(from, to)| Transition {
            from: from.to_string(),
            to: to.to_string(),
            count: counts[&(from, to)],
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
