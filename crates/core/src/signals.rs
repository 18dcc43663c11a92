// crates/core/src/signals.rs
//! Recommendation signal builder: condenses a whole history into the
//! behavior summary handed to the external recommender, and post-filters
//! the recommender's reply.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::CategoryTable;
use crate::insights::{ranked_counts, top_transitions, Transition, Visit};
use crate::time::{hour_of_day, weekday_index};

const TOP_DOMAINS: usize = 10;
const TOP_TRANSITIONS: usize = 10;
const CATEGORY_LABEL_DOMAINS: usize = 30;

/// Visits at least this old with no recent activity flag a usage drop.
pub const USAGE_DROP_DAYS: i64 = 14;
/// Minimum historical visit count for a usage-drop candidate.
pub const USAGE_DROP_MIN_VISITS: u64 = 5;
/// Width of the "visited just now" context window.
pub const RECENT_WINDOW_MINUTES: i64 = 30;

/// Aggregated description of browsing behavior sent to the recommender.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct BehaviorSummary {
    /// 10 most frequent domains with counts.
    pub top_domains: Vec<(String, u64)>,
    /// Dense 24-bucket hour histogram per domain (all domains).
    pub hourly_visits: HashMap<String, Vec<u64>>,
    /// 10 most common back-to-back domain switches within 5 minutes.
    pub common_transitions: Vec<Transition>,
    /// Most recent visit per domain, RFC3339 in Pacific time.
    pub last_visit: HashMap<String, String>,
    /// Category labels for the 30 most frequent domains found in the
    /// static table.
    pub category_labels: HashMap<String, String>,
    /// Domains with ≥5 visits older than 14 days and none since.
    pub usage_drop: Vec<String>,
    /// Domains visited in the last 30 minutes, chronological, duplicates
    /// allowed.
    pub recent_domains: Vec<String>,
    pub current_hour: u32,
    /// ISO weekday, 0 = Monday .. 6 = Sunday.
    pub current_weekday: u32,
}

/// Reply contract of the external recommender: exactly the keys `add`
/// and `visitNow`. Anything else fails the strict decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct RecommenderReply {
    /// 3-5 domains worth bookmarking (before bookmark post-filtering).
    pub add: Vec<String>,
    /// 1-3 "open this now" suggestions with a one-line reason each.
    #[serde(rename = "visitNow")]
    pub visit_now: Vec<VisitSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct VisitSuggestion {
    pub domain: String,
    pub reason: String,
}

/// Build the behavior summary for a time-ascending visit sequence.
///
/// `now` is passed explicitly so windowed signals (usage drop, recent
/// domains, current time context) are testable.
pub fn build_behavior_summary(
    visits: &[Visit],
    categories: &CategoryTable,
    now: DateTime<Tz>,
) -> BehaviorSummary {
    let top_domains = ranked_counts(visits.iter().map(|v| v.domain.as_str()), TOP_DOMAINS);

    let mut hourly_visits: HashMap<String, Vec<u64>> = HashMap::new();
    let mut last_visit: HashMap<String, String> = HashMap::new();
    for v in visits {
        let hours = hourly_visits
            .entry(v.domain.clone())
            .or_insert_with(|| vec![0u64; 24]);
        hours[hour_of_day(&v.time) as usize] += 1;
        // Visits are time-ascending, so the last write wins.
        last_visit.insert(v.domain.clone(), v.time.to_rfc3339());
    }

    let common_transitions = top_transitions(visits, TOP_TRANSITIONS);

    let category_labels: HashMap<String, String> =
        ranked_counts(visits.iter().map(|v| v.domain.as_str()), CATEGORY_LABEL_DOMAINS)
            .into_iter()
            .filter_map(|(domain, _)| {
                categories
                    .get(&domain)
                    .map(|cat| (domain, cat.to_string()))
            })
            .collect();

    let usage_drop = usage_drop_domains(visits, now);

    let recent_cutoff = now - Duration::minutes(RECENT_WINDOW_MINUTES);
    let recent_domains: Vec<String> = visits
        .iter()
        .filter(|v| v.time >= recent_cutoff && v.time <= now)
        .map(|v| v.domain.clone())
        .collect();

    BehaviorSummary {
        top_domains,
        hourly_visits,
        common_transitions,
        last_visit,
        category_labels,
        usage_drop,
        recent_domains,
        current_hour: hour_of_day(&now),
        current_weekday: weekday_index(&now),
    }
}

/// Domains with an established habit that stopped: at least
/// [`USAGE_DROP_MIN_VISITS`] visits strictly older than `now − 14d` and
/// zero visits since. First-encountered order.
fn usage_drop_domains(visits: &[Visit], now: DateTime<Tz>) -> Vec<String> {
    let cutoff = now - Duration::days(USAGE_DROP_DAYS);

    let mut old_counts: HashMap<&str, u64> = HashMap::new();
    let mut recent: HashSet<&str> = HashSet::new();
    let mut order: Vec<&str> = Vec::new();

    for v in visits {
        if v.time < cutoff {
            let entry = old_counts.entry(v.domain.as_str()).or_insert(0);
            if *entry == 0 {
                order.push(v.domain.as_str());
            }
            *entry += 1;
        } else {
            recent.insert(v.domain.as_str());
        }
    }

    order
        .into_iter()
        .filter(|d| old_counts[d] >= USAGE_DROP_MIN_VISITS && !recent.contains(d))
        .map(str::to_string)
        .collect()
}

/// Drop already-bookmarked domains from the recommender's `add` list.
/// `visitNow` suggestions are left alone — revisiting a bookmark is fine.
pub fn strip_bookmarked(reply: RecommenderReply, bookmarked: &HashSet<String>) -> RecommenderReply {
    let add = reply
        .add
        .into_iter()
        .filter(|d| !bookmarked.contains(&d.to_lowercase()))
        .collect();
    RecommenderReply {
        add,
        visit_now: reply.visit_now,
    }
}
