pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes", post(handlers::handle_upload_resume))
        .route("/api/v1/resumes/:id", get(handlers::handle_get_analysis))
        .route("/api/v1/compare", post(handlers::handle_compare))
        .with_state(state)
}
