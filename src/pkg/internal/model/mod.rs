pub mod artifact;
pub mod loader;

use std::path::PathBuf;

use thiserror::Error;

use super::features::FeatureRecord;

pub use artifact::RidgePipeline;
pub use loader::load_first;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("no model file found, looked for: {}", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("could not read model file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse model file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("Found unknown category '{value}' in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },

    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A fitted regression model. Implementations are read-only after load and
/// shared across request handlers.
pub trait SalaryModel: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError>;
}
