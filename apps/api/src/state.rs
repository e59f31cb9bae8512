use std::sync::Arc;

use sqlx::PgPool;

use crate::cleaning::TextCleaner;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable resume cleaner. Default: LlmCleaner over the shared LLM client.
    pub cleaner: Arc<dyn TextCleaner>,
}
