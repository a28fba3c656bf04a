use crate::config::Config;
use crate::extraction::StructuredExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Structured extraction service — the only path to the model provider.
    pub extractor: StructuredExtractor,
    pub config: Config,
}
