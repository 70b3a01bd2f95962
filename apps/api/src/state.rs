use std::sync::Arc;

use crate::config::Config;
use crate::interview::store::SessionStore;
use crate::llm_client::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text-completion gateway. Production: `LlmClient`; tests script it.
    pub gateway: Arc<dyn CompletionGateway>,
    /// In-memory interview sessions, one lock per session.
    pub sessions: SessionStore,
    pub config: Config,
}
