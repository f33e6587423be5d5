use serde::Serialize;
use thiserror::Error;

use super::{
    experience::ExperienceLevel,
    features::{FeatureRecord, PredictionRequest},
    model::{ModelError, SalaryModel},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_salary_usd: i64,
    pub normalized_experience: ExperienceLevel,
}

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("prediction {0} does not fit a salary")]
    OutOfRange(f64),
}

/// Wire shape of a `/predict` answer. Failures travel as data, not as HTTP errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success(Prediction),
    Failure { error: String, exception: String },
}

impl From<Result<Prediction, PredictionError>> for PredictResponse {
    fn from(result: Result<Prediction, PredictionError>) -> Self {
        match result {
            Ok(p) => PredictResponse::Success(p),
            Err(e) => PredictResponse::Failure {
                error: "Prediction failed".to_string(),
                exception: e.to_string(),
            },
        }
    }
}

pub fn predict(model: &dyn SalaryModel, req: &PredictionRequest) -> Result<Prediction, PredictionError> {
    let record = FeatureRecord::from_request(req);

    tracing::info!("RAW experience_level: {:?}", req.experience_level);
    tracing::info!("NORMALIZED experience_level: {}", record.experience_level());
    tracing::info!("MODEL INPUT: {:?}", &record);

    let salary = model.predict(&record).map_err(|e| {
        tracing::error!("prediction with model '{}' failed: {}", model.name(), e);
        e
    })?;

    Ok(Prediction {
        predicted_salary_usd: round_salary(salary)?,
        normalized_experience: record.experience_level(),
    })
}

/// Nearest integer, ties to even.
fn round_salary(salary: f64) -> Result<i64, PredictionError> {
    let rounded = salary.round_ties_even();
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(PredictionError::OutOfRange(salary));
    }
    Ok(rounded as i64)
}
