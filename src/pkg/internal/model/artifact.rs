use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use super::{ModelError, SalaryModel};
use crate::pkg::internal::features::{FeatureRecord, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetTransform {
    #[default]
    Identity,
    Log1p,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    #[default]
    Ignore,
    Error,
}

/// Standard-scaled numeric input.
#[derive(Debug, Clone, Deserialize)]
pub struct NumericTerm {
    pub feature: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    pub coef: f64,
}

fn unit_scale() -> f64 {
    1.0
}

/// One-hot encoded input, one weight per category seen during fitting.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalTerm {
    pub feature: String,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
    pub weights: HashMap<String, f64>,
}

/// JSON export of a fitted scaler + one-hot encoder + ridge regression pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RidgePipeline {
    #[serde(default)]
    pub name: String,
    pub intercept: f64,
    #[serde(default)]
    pub target: TargetTransform,
    #[serde(default)]
    pub numeric: Vec<NumericTerm>,
    #[serde(default)]
    pub categorical: Vec<CategoricalTerm>,
}

impl RidgePipeline {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut pipeline: RidgePipeline =
            serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if pipeline.name.is_empty() {
            pipeline.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".into());
        }
        pipeline.validate()?;
        Ok(pipeline)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.intercept.is_finite() {
            return Err(ModelError::Invalid("intercept is not finite".into()));
        }
        for term in &self.numeric {
            if !NUMERIC_COLUMNS.contains(&term.feature.as_str()) {
                return Err(ModelError::Invalid(format!(
                    "'{}' is not a numeric feature",
                    term.feature
                )));
            }
            if !term.scale.is_finite() || term.scale == 0.0 {
                return Err(ModelError::Invalid(format!(
                    "scale for '{}' must be finite and non-zero",
                    term.feature
                )));
            }
            if !term.mean.is_finite() || !term.coef.is_finite() {
                return Err(ModelError::Invalid(format!(
                    "coefficients for '{}' must be finite",
                    term.feature
                )));
            }
        }
        for term in &self.categorical {
            if !CATEGORICAL_COLUMNS.contains(&term.feature.as_str()) {
                return Err(ModelError::Invalid(format!(
                    "'{}' is not a categorical feature",
                    term.feature
                )));
            }
            if let Some((category, _)) = term.weights.iter().find(|(_, w)| !w.is_finite()) {
                return Err(ModelError::Invalid(format!(
                    "weight for '{}={}' is not finite",
                    term.feature, category
                )));
            }
        }
        Ok(())
    }
}

impl SalaryModel for RidgePipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let mut y = self.intercept;
        for term in &self.numeric {
            // columns are checked in validate()
            let x = record
                .numeric(&term.feature)
                .ok_or_else(|| ModelError::Invalid(format!("missing column '{}'", term.feature)))?;
            y += term.coef * (x - term.mean) / term.scale;
        }
        for term in &self.categorical {
            let value = record
                .category(&term.feature)
                .ok_or_else(|| ModelError::Invalid(format!("missing column '{}'", term.feature)))?;
            match (term.weights.get(value), term.handle_unknown) {
                (Some(w), _) => y += w,
                (None, HandleUnknown::Ignore) => {}
                (None, HandleUnknown::Error) => {
                    return Err(ModelError::UnknownCategory {
                        column: term.feature.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }
        if self.target == TargetTransform::Log1p {
            y = y.exp_m1();
        }
        if !y.is_finite() {
            return Err(ModelError::NonFinite(y));
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::pkg::internal::features::PredictionRequest;

    fn record(job_title: &str, years: i64) -> FeatureRecord {
        FeatureRecord::from_request(&PredictionRequest {
            experience_level: Some("senior".into()),
            min_experience_years: years,
            job_title: Some(job_title.into()),
            posted_year: 2024,
            ..Default::default()
        })
    }

    fn pipeline(json: &str) -> RidgePipeline {
        let p: RidgePipeline = serde_json::from_str(json).unwrap();
        p.validate().unwrap();
        p
    }

    const PIPELINE: &str = r#"{
        "name": "test",
        "intercept": 100000.0,
        "numeric": [{"feature": "min_experience_years", "mean": 5.0, "scale": 2.0, "coef": 4000.0}],
        "categorical": [
            {"feature": "experience_level", "weights": {"Entry": -20000.0, "Senior": 15000.0}},
            {"feature": "job_title", "handle_unknown": "error", "weights": {"Data Scientist": 500.0}}
        ]
    }"#;

    #[test]
    fn linear_prediction() {
        let p = pipeline(PIPELINE);
        // 100000 + 4000 * (9 - 5) / 2 + 15000 + 500
        assert_eq!(p.predict(&record("Data Scientist", 9)).unwrap(), 123500.0);
    }

    #[test]
    fn unknown_category_errors_when_configured() {
        let p = pipeline(PIPELINE);
        let err = p.predict(&record("Astronaut", 9)).unwrap_err();
        assert!(matches!(err, ModelError::UnknownCategory { ref column, .. } if column == "job_title"));
        assert!(err.to_string().contains("Astronaut"));
    }

    #[test]
    fn unknown_category_ignored_by_default() {
        let p = pipeline(
            r#"{"intercept": 10.0, "categorical": [{"feature": "country", "weights": {"India": 1.0}}]}"#,
        );
        assert_eq!(p.predict(&record("Data Scientist", 0)).unwrap(), 10.0);
    }

    #[test]
    fn log_target_is_inverted() {
        let p = pipeline(r#"{"intercept": 11.0, "target": "log1p"}"#);
        let y = p.predict(&record("Data Scientist", 0)).unwrap();
        assert!((y - 11.0_f64.exp_m1()).abs() < 1e-6);
    }

    #[test]
    fn overflowing_prediction_is_an_error() {
        let p = pipeline(r#"{"intercept": 1000.0, "target": "log1p"}"#);
        assert!(matches!(p.predict(&record("Data Scientist", 0)), Err(ModelError::NonFinite(_))));
    }

    #[test]
    fn rejects_unknown_features_and_zero_scale() {
        let p: RidgePipeline =
            serde_json::from_str(r#"{"intercept": 1.0, "numeric": [{"feature": "salary", "coef": 1.0}]}"#).unwrap();
        assert!(matches!(p.validate(), Err(ModelError::Invalid(_))));

        let p: RidgePipeline = serde_json::from_str(
            r#"{"intercept": 1.0, "numeric": [{"feature": "posted_year", "scale": 0.0, "coef": 1.0}]}"#,
        )
        .unwrap();
        assert!(matches!(p.validate(), Err(ModelError::Invalid(_))));

        // a categorical column used as numeric
        let p: RidgePipeline =
            serde_json::from_str(r#"{"intercept": 1.0, "numeric": [{"feature": "country", "coef": 1.0}]}"#).unwrap();
        assert!(p.validate().is_err());
    }

    #[test]
    fn load_names_model_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ridge_salary_pipeline.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(br#"{"intercept": 42.0}"#).unwrap();

        let p = RidgePipeline::load(&path).unwrap();
        assert_eq!(p.name(), "ridge_salary_pipeline");
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(RidgePipeline::load(&path), Err(ModelError::Parse { .. })));
    }
}
