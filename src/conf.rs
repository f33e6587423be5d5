use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: u16,
    //model
    pub model_dir: String,
    pub model_candidates: Vec<String>,
    //client
    pub ui_port: u16,
    pub salary_api_url: String,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "salarycast")?
            .set_default("listen_port", 8000)?
            .set_default("model_dir", "models")?
            .set_default(
                "model_candidates",
                vec!["final_model.json", "ridge_salary_pipeline.json"],
            )?
            .set_default("ui_port", 8501)?
            .set_default("salary_api_url", "http://localhost:8000/predict")?
            .set_default("request_timeout_secs", 30)?
            .add_source(
                Environment::default()
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("model_candidates"),
            )
            .build()?;
        let mut s: Settings = conf.try_deserialize()?;
        s.model_candidates.retain(|c| !c.trim().is_empty());
        if s.request_timeout_secs == 0 {
            s.request_timeout_secs = 30;
        }
        Ok(s)
    }

    /// Artifact locations in the order they are tried.
    pub fn model_paths(&self) -> Vec<PathBuf> {
        self.model_candidates
            .iter()
            .map(|name| PathBuf::from(&self.model_dir).join(name.trim()))
            .collect()
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
