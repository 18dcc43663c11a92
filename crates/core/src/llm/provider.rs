// crates/core/src/llm/provider.rs
//! LlmProvider trait defining the collaborator interface.

use async_trait::async_trait;

use super::types::LlmError;
use crate::signals::{BehaviorSummary, RecommenderReply};
use crate::types::FilterCriteria;

/// The external natural-language collaborator.
///
/// Two operations, both strict: a free-text query becomes typed
/// `FilterCriteria`, a `BehaviorSummary` becomes a typed
/// `RecommenderReply`. A reply that does not decode is an error, never a
/// best-effort partial result.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Parse a natural-language history query into structured criteria.
    async fn parse_query(&self, query: &str) -> Result<FilterCriteria, LlmError>;

    /// Turn a behavior summary into bookmark/visit suggestions.
    async fn recommend(&self, summary: &BehaviorSummary) -> Result<RecommenderReply, LlmError>;

    /// Check whether the provider is reachable (API key set, endpoint up).
    async fn health_check(&self) -> Result<(), LlmError>;

    /// Provider name for logging/display (e.g. "anthropic-api").
    fn name(&self) -> &str;

    /// Model identifier (e.g. "claude-3-5-haiku-latest").
    fn model(&self) -> &str;
}
