use axum::{Json, extract::State};

use crate::pkg::{
    internal::{
        features::PredictionRequest,
        predict::{PredictResponse, predict as run_prediction},
    },
    server::state::AppState,
};

/// Always answers 200; a failed prediction is reported in the body so older
/// clients that only check the status keep working.
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<PredictionRequest>,
) -> Json<PredictResponse> {
    Json(run_prediction(state.model.as_ref(), &input).into())
}
