// crates/server/src/config.rs
use std::path::PathBuf;

use tabitha_core::{DateBound, FilterConfig, TermMatch};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Server configuration resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub api_key: Option<String>,
    pub model: String,
    pub llm_timeout_secs: u64,
    pub categories_path: Option<PathBuf>,
    pub filter: FilterConfig,
}

impl ServerConfig {
    /// Read configuration from environment variables. Unset variables fall
    /// back to defaults; a malformed value is a startup error rather than a
    /// silent fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    // Resolution is separated from the process environment so tests can
    // pass a plain map instead of mutating global state.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("TABITHA_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("invalid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let api_key = var("ANTHROPIC_API_KEY");
        let model = var("TABITHA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let llm_timeout_secs = match var("TABITHA_LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("invalid TABITHA_LLM_TIMEOUT_SECS: {raw}"))?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        let categories_path = var("TABITHA_CATEGORIES").map(PathBuf::from);

        let term_match = match var("TABITHA_TERM_MATCH").as_deref() {
            None | Some("fuzzy") => {
                let threshold = match var("TABITHA_FUZZY_THRESHOLD") {
                    Some(raw) => raw
                        .parse::<f64>()
                        .map_err(|_| anyhow::anyhow!("invalid TABITHA_FUZZY_THRESHOLD: {raw}"))?,
                    None => 80.0,
                };
                TermMatch::Fuzzy { threshold }
            }
            Some("exact") => TermMatch::Substring,
            Some(other) => anyhow::bail!("invalid TABITHA_TERM_MATCH: {other}"),
        };

        let upper_bound = match var("TABITHA_DATE_UPPER").as_deref() {
            None | Some("inclusive") => DateBound::Inclusive,
            Some("exclusive") => DateBound::Exclusive,
            Some(other) => anyhow::bail!("invalid TABITHA_DATE_UPPER: {other}"),
        };

        Ok(Self {
            port,
            api_key,
            model,
            llm_timeout_secs,
            categories_path,
            filter: FilterConfig {
                term_match,
                upper_bound,
            },
        })
    }
}
