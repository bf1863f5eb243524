use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once in `main`; read-only afterwards.
    pub model: Arc<dyn ModelClient>,
    pub config: Config,
}
