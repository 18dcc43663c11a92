// crates/core/src/category.rs
//! Static domain→category lookup table.
//!
//! Loaded once at process start and shared read-only; the builder uses it
//! to label the most-frequent domains in the behavior summary.

use std::collections::HashMap;
use std::path::Path;

use crate::error::CategoryError;

/// Immutable domain→category map. Never mutated after construction, so
/// concurrent readers need no synchronization.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    map: HashMap<String, String>,
}

impl CategoryTable {
    /// The builtin table used when no override file is configured.
    pub fn builtin() -> Self {
        let entries = [
            ("youtube.com", "video"),
            ("netflix.com", "video"),
            ("hulu.com", "video"),
            ("tiktok.com", "video"),
            ("twitch.tv", "video"),
            ("spotify.com", "music"),
            ("soundcloud.com", "music"),
            ("github.com", "developer"),
            ("stackoverflow.com", "developer"),
            ("docs.rs", "developer"),
            ("instagram.com", "social"),
            ("twitter.com", "social"),
            ("x.com", "social"),
            ("reddit.com", "social"),
            ("facebook.com", "social"),
            ("linkedin.com", "professional"),
            ("amazon.com", "shopping"),
            ("ebay.com", "shopping"),
            ("wikipedia.org", "reference"),
            ("nytimes.com", "news"),
            ("cnn.com", "news"),
            ("bbc.com", "news"),
            ("news.ycombinator.com", "news"),
            ("mail.google.com", "email"),
            ("outlook.com", "email"),
        ];
        Self {
            map: entries
                .iter()
                .map(|(d, c)| (d.to_string(), c.to_string()))
                .collect(),
        }
    }

    /// Load a replacement table from a JSON object file
    /// (`{"youtube.com": "video", ...}`).
    pub fn from_path(path: &Path) -> Result<Self, CategoryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CategoryError::io(path, e))?;
        let map: HashMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| CategoryError::malformed(path, e.to_string()))?;
        Ok(Self { map })
    }

    /// Builtin table, or the override file when one is configured.
    pub fn load(override_path: Option<&Path>) -> Result<Self, CategoryError> {
        match override_path {
            Some(path) => {
                let table = Self::from_path(path)?;
                tracing::info!(path = %path.display(), entries = table.len(), "loaded category table");
                Ok(table)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn get(&self, domain: &str) -> Option<&str> {
        self.map.get(domain).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
