use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use super::{ModelError, RidgePipeline, SalaryModel};

pub fn locate(candidates: &[PathBuf]) -> Result<&Path, ModelError> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .map(PathBuf::as_path)
        .ok_or_else(|| ModelError::NotFound {
            searched: candidates.to_vec(),
        })
}

/// Loads the first candidate that exists. Later candidates are never tried
/// once one is found, even if it fails to load.
pub fn load_first(candidates: &[PathBuf]) -> Result<Arc<dyn SalaryModel>, ModelError> {
    let path = locate(candidates)?;
    let model = RidgePipeline::load(path)?;
    tracing::info!("Loaded model '{}' from: {}", model.name, path.display());
    Ok(Arc::new(model))
}
