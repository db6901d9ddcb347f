use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing here is mutated by requests.
#[derive(Clone)]
pub struct AppState {
    /// Built once in `main`. Tests swap in a canned generator.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
