// crates/server/src/state.rs
use std::sync::Arc;
use std::time::Instant;

use tabitha_core::{CategoryTable, FilterConfig, LlmProvider};

/// Shared application state, cheap to clone via Arc.
pub struct AppState {
    pub start_time: Instant,
    pub llm: Arc<dyn LlmProvider>,
    pub categories: CategoryTable,
    pub filter_config: FilterConfig,
}

impl AppState {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        categories: CategoryTable,
        filter_config: FilterConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            llm,
            categories,
            filter_config,
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
