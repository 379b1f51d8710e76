use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion provider. Default: ChatClient against an
    /// OpenAI-compatible endpoint. Swap for a stub in tests.
    pub provider: Arc<dyn CompletionProvider>,
    pub config: Config,
}
