// crates/core/src/llm/types.rs
//! Error types for the LLM collaborator round-trips.

use thiserror::Error;

/// Errors from the natural-language parser / recommender collaborator.
///
/// Timeouts are ordinary failures here — callers treat them exactly like
/// a malformed reply. No variant is retried.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("request to LLM provider failed: {0}")]
    RequestFailed(String),

    #[error("LLM provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("failed to parse provider response: {0}")]
    ParseFailed(String),

    #[error("response did not match the expected shape: {0}")]
    InvalidFormat(String),

    #[error("provider not available: {0}")]
    NotAvailable(String),

    #[error("timeout after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_display() {
        assert_eq!(LlmError::Timeout(30).to_string(), "timeout after 30 seconds");

        let err = LlmError::Http {
            status: 401,
            body: "invalid x-api-key".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid x-api-key"));

        let err = LlmError::InvalidFormat("unknown field `note`".to_string());
        assert!(err.to_string().contains("unknown field"));
    }
}
