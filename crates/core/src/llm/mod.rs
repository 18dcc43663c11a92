// crates/core/src/llm/mod.rs
//! LLM collaborator integration: provider trait, Anthropic HTTP
//! implementation, prompt builders, and strict reply decoders.

pub mod anthropic;
pub mod provider;
pub mod types;

pub use anthropic::{
    build_parse_prompt, build_recommend_prompt, decode_criteria, decode_recommendations,
    AnthropicProvider,
};
pub use provider::LlmProvider;
pub use types::LlmError;
