// crates/core/src/lib.rs
//! Tabitha core: the deterministic history-processing pipeline.
//!
//! Raw browser-history records flow through domain/time normalization
//! into one of three consumers: the query filter (single query), the
//! insights aggregator (batch analytics), or the recommendation signal
//! builder (behavior summary for the external recommender).

pub mod category;
pub mod domain;
pub mod error;
pub mod filter;
pub mod insights;
pub mod llm;
pub mod signals;
pub mod time;
pub mod types;

pub use category::CategoryTable;
pub use domain::extract_domain;
pub use error::{CategoryError, RecordError};
pub use filter::{filter_and_rank, matches_page, DateBound, FilterConfig, TermMatch, MAX_RESULTS};
pub use insights::{compute_insights, visits_from_pages, InsightsReport, Transition, Visit};
pub use llm::{AnthropicProvider, LlmError, LlmProvider};
pub use signals::{build_behavior_summary, strip_bookmarked, BehaviorSummary, RecommenderReply};
pub use time::{now_pacific, zoned_from_millis, PACIFIC};
pub use types::{FilterCriteria, PageSummary, PageVisit};
