pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume review API
        .route("/api/v1/resumes", post(handlers::handle_upload))
        .route("/api/v1/resumes/:id", get(handlers::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/process",
            post(handlers::handle_process),
        )
        .route(
            "/api/v1/resumes/:id/changes/:change_id",
            patch(handlers::handle_toggle_change),
        )
        .route(
            "/api/v1/resumes/:id/final",
            get(handlers::handle_final_text),
        )
        // Axum's default body cap is 2 MB; uploads are validated against
        // their own limit in the handler.
        .layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES + 1024))
        .with_state(state)
}
