use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers::predict::predict;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
