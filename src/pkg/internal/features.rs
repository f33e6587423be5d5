use serde::{Deserialize, Serialize};

use super::experience::ExperienceLevel;

pub const MIN_POSTED_YEAR: i32 = 2020;

/// Body of `POST /predict` as sent by clients. Anything here may be missing,
/// blank or out of range; [`FeatureRecord::from_request`] cleans it up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub experience_level: Option<String>,
    pub min_experience_years: i64,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub remote_type: Option<String>,
    pub posted_year: i32,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub company_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalField {
    EmploymentType,
    JobTitle,
    CompanySize,
    RemoteType,
    Industry,
    Country,
    CompanyType,
}

impl CategoricalField {
    pub fn default_value(&self) -> &'static str {
        match self {
            CategoricalField::EmploymentType => "Full-time",
            CategoricalField::JobTitle => "Data Scientist",
            CategoricalField::CompanySize => "Medium",
            CategoricalField::RemoteType => "Remote",
            CategoricalField::Industry => "Technology",
            CategoricalField::Country => "United States",
            CategoricalField::CompanyType => "MNC",
        }
    }

    pub fn resolve(&self, value: Option<&str>) -> String {
        resolve_category(value, self.default_value())
    }
}

/// Keeps unseen empty values away from the model's encoder.
pub fn resolve_category(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

pub const CATEGORICAL_COLUMNS: [&str; 8] = [
    "experience_level",
    "employment_type",
    "job_title",
    "company_size",
    "remote_type",
    "industry",
    "country",
    "company_type",
];

pub const NUMERIC_COLUMNS: [&str; 2] = ["min_experience_years", "posted_year"];

/// Fully populated model input. Only built through [`FeatureRecord::from_request`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    experience_level: ExperienceLevel,
    min_experience_years: u32,
    employment_type: String,
    job_title: String,
    company_size: String,
    remote_type: String,
    posted_year: i32,
    industry: String,
    country: String,
    company_type: String,
}

impl FeatureRecord {
    pub fn from_request(req: &PredictionRequest) -> Self {
        FeatureRecord {
            experience_level: ExperienceLevel::normalize(req.experience_level.as_deref()),
            min_experience_years: u32::try_from(req.min_experience_years.max(0)).unwrap_or(u32::MAX),
            employment_type: CategoricalField::EmploymentType.resolve(req.employment_type.as_deref()),
            job_title: CategoricalField::JobTitle.resolve(req.job_title.as_deref()),
            company_size: CategoricalField::CompanySize.resolve(req.company_size.as_deref()),
            remote_type: CategoricalField::RemoteType.resolve(req.remote_type.as_deref()),
            posted_year: req.posted_year.max(MIN_POSTED_YEAR),
            industry: CategoricalField::Industry.resolve(req.industry.as_deref()),
            country: CategoricalField::Country.resolve(req.country.as_deref()),
            company_type: CategoricalField::CompanyType.resolve(req.company_type.as_deref()),
        }
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    pub fn min_experience_years(&self) -> u32 {
        self.min_experience_years
    }

    pub fn posted_year(&self) -> i32 {
        self.posted_year
    }

    /// Looks up a categorical column by the name the model was fitted with.
    pub fn category(&self, column: &str) -> Option<&str> {
        let value = match column {
            "experience_level" => self.experience_level.as_str(),
            "employment_type" => &self.employment_type,
            "job_title" => &self.job_title,
            "company_size" => &self.company_size,
            "remote_type" => &self.remote_type,
            "industry" => &self.industry,
            "country" => &self.country,
            "company_type" => &self.company_type,
            _ => return None,
        };
        Some(value)
    }

    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "min_experience_years" => Some(f64::from(self.min_experience_years)),
            "posted_year" => Some(f64::from(self.posted_year)),
            _ => None,
        }
    }
}
