use std::sync::Arc;

use crate::analysis::pipeline::AnalysisSettings;
use crate::config::Config;
use crate::llm_client::ModelInvoker;
use crate::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL-backed when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn AnalysisStore>,
    /// Pluggable model backend. Production: `LlmClient`.
    pub model: Arc<dyn ModelInvoker>,
    pub settings: AnalysisSettings,
    pub stats_retry_budget: u32,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AnalysisStore>,
        model: Arc<dyn ModelInvoker>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            model,
            settings: config.analysis_settings(),
            stats_retry_budget: config.stats_retry_budget,
        }
    }
}
