use std::sync::Arc;

use standard_error::{Interpolate, StandardError};

use crate::{
    conf::settings,
    pkg::internal::model::{SalaryModel, load_first},
    prelude::Result,
};

/// Everything a request handler may read. Built once at startup; the model is
/// never replaced afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn SalaryModel>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        let candidates = settings.model_paths();
        let model = load_first(&candidates).map_err(|e| {
            tracing::error!("{}", e);
            StandardError::new("ERR-MODEL-001").interpolate_err(e.to_string())
        })?;
        Ok(AppState::with_model(model))
    }

    pub fn with_model(model: Arc<dyn SalaryModel>) -> AppState {
        AppState { model }
    }
}
