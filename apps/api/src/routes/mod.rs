pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/api/v1/interviews", post(handlers::handle_start_interview))
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get_interview),
        )
        .route(
            "/api/v1/interviews/:id/messages",
            post(handlers::handle_candidate_message),
        )
        .route(
            "/api/v1/interviews/:id/transcript",
            get(handlers::handle_get_transcript),
        )
        .with_state(state)
}
