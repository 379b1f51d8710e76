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
        // Analysis API
        .route("/api/v1/analyses", post(handlers::handle_analyze))
        .route("/api/v1/analyses/parse", post(handlers::handle_parse_raw))
        .route("/api/v1/contracts", get(handlers::handle_list_contracts))
        .with_state(state)
}
