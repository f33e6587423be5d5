use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::pkg::server::state::AppState;

pub async fn livez() {
    tracing::debug!("service is live");
}

pub async fn healthz(State(state): State<AppState>) -> Json<Value> {
    tracing::debug!("service is healthy");
    Json(json!({"status": "ok", "model": state.model.name()}))
}
