// crates/core/src/llm/anthropic.rs
//! Anthropic Messages API provider — HTTP round-trips with strict,
//! fail-closed decoding of the model's reply.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::LlmProvider;
use super::types::LlmError;
use crate::signals::{BehaviorSummary, RecommenderReply};
use crate::time::now_pacific;
use crate::types::FilterCriteria;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// LLM provider backed by the Anthropic Messages API.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout_secs: u64,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set the per-request timeout in seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Point the provider at a different endpoint (tests use a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One blocking round-trip: send a prompt, return the reply text.
    ///
    /// A timeout is reported as `LlmError::Timeout` and treated by every
    /// caller exactly like a parse failure; there are no retries.
    async fn complete(&self, prompt: String) -> Result<String, LlmError> {
        let t0 = std::time::Instant::now();
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        tracing::info!(
            model = %self.model,
            timeout_secs = self.timeout_secs,
            "anthropic: sending request"
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!(
                        elapsed_ms = t0.elapsed().as_millis() as u64,
                        "anthropic: timed out"
                    );
                    LlmError::Timeout(self.timeout_secs)
                } else {
                    tracing::error!(error = %e, "anthropic: request failed");
                    LlmError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %snippet(&body, 500), "anthropic: non-success status");
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::ParseFailed(format!("invalid API envelope: {e}")))?;

        let text = parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.clone())
            .ok_or_else(|| LlmError::ParseFailed("reply has no text block".to_string()))?;

        tracing::info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            reply_len = text.len(),
            "anthropic: response received"
        );

        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn parse_query(&self, query: &str) -> Result<FilterCriteria, LlmError> {
        let prompt = build_parse_prompt(query, &now_pacific().to_rfc3339());
        let text = self.complete(prompt).await?;
        decode_criteria(&text)
    }

    async fn recommend(&self, summary: &BehaviorSummary) -> Result<RecommenderReply, LlmError> {
        let prompt = build_recommend_prompt(summary)
            .map_err(|e| LlmError::InvalidFormat(format!("summary not serializable: {e}")))?;
        let text = self.complete(prompt).await?;
        decode_recommendations(&text)
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::NotAvailable("no API key configured".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "anthropic-api"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Build the query-parsing prompt.
///
/// The current Pacific timestamp is embedded so relative phrases
/// ("yesterday", "last tuesday") resolve against real time instead of
/// the stale example dates the first draft hardcoded.
pub fn build_parse_prompt(query: &str, now_rfc3339: &str) -> String {
    format!(
        r#"You are a natural language assistant that parses vague browser search queries into structured filters. Output ONLY a JSON object, no other text.

The current Pacific time is {now_rfc3339}. Resolve all relative time phrases against it.

Fields:
- platform: one of youtube, tiktok, instagram, netflix, spotify, hulu (or null)
- time_range: the natural time phrase (e.g. "last tuesday") or null
- from_date: start of range as Pacific-time ISO timestamp, or null
- to_date: end of range as Pacific-time ISO timestamp, or null
- ordinal: rank (1 = first, 2 = second, -1 = last) or null
- keywords: list of search keywords
- hashtags: list of hashtags
- type: media type (e.g. "video", "song") or null
- synonyms: object mapping each keyword to a list of 1-3 synonyms

Example for "funny tiktok from yesterday":
{{"platform":"tiktok","time_range":"yesterday","from_date":"2025-05-22T00:00:00-07:00","to_date":"2025-05-23T00:00:00-07:00","ordinal":null,"keywords":["funny"],"hashtags":[],"type":"video","synonyms":{{"funny":["humor","comedy"]}}}}

Query: "{query}"
JSON:"#
    )
}

/// Build the recommendation prompt from a serialized behavior summary.
pub fn build_recommend_prompt(summary: &BehaviorSummary) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string_pretty(summary)?;
    Ok(format!(
        r#"You are a browsing assistant. Based on the behavior summary below, suggest sites. Output ONLY a JSON object with exactly two keys and nothing else:
- "add": 3-5 domains worth bookmarking (strings). Favor frequently-visited domains and domains in usage_drop the user may want back.
- "visitNow": 1-3 objects {{"domain": ..., "reason": ...}} fitting the current hour and weekday.

Behavior summary:
{payload}

JSON:"#
    ))
}

/// Strictly decode the model's reply text into `FilterCriteria`.
///
/// Fails closed: no bracket scraping, no partial salvage. Any text
/// around the JSON object is a parse failure.
pub fn decode_criteria(text: &str) -> Result<FilterCriteria, LlmError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        tracing::warn!(reply = %snippet(text, 200), "parser reply did not decode");
        LlmError::ParseFailed(e.to_string())
    })
}

/// Strictly decode the model's reply text into a `RecommenderReply`.
///
/// Enforces the contract's entry counts on the raw reply (3-5 `add`,
/// 1-3 `visitNow`); bookmark stripping may shrink `add` afterwards.
pub fn decode_recommendations(text: &str) -> Result<RecommenderReply, LlmError> {
    let reply: RecommenderReply = serde_json::from_str(text.trim()).map_err(|e| {
        tracing::warn!(reply = %snippet(text, 200), "recommender reply did not decode");
        LlmError::InvalidFormat(e.to_string())
    })?;
    if !(3..=5).contains(&reply.add.len()) {
        return Err(LlmError::InvalidFormat(format!(
            "expected 3-5 add entries, got {}",
            reply.add.len()
        )));
    }
    if !(1..=3).contains(&reply.visit_now.len()) {
        return Err(LlmError::InvalidFormat(format!(
            "expected 1-3 visitNow entries, got {}",
            reply.visit_now.len()
        )));
    }
    Ok(reply)
}

/// Char-boundary-safe log snippet.
fn snippet(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
