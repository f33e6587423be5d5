use std::sync::Arc;

use axum::routing::post;
use axum::{Router, routing::get};

use super::api::PredictClient;
use super::handlers::form::{estimate, home};

#[derive(Debug, Clone)]
pub struct ClientState {
    pub api: Arc<PredictClient>,
    pub service_name: String,
    pub default_api_url: String,
}

pub fn build_routes(state: ClientState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/estimate", post(estimate))
        .with_state(state)
}
