use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::pkg::{
    client::{
        api::{Estimate, format_usd},
        router::ClientState,
        uispec::{EstimateError, PredictForm, SalaryEstimate},
    },
    internal::features::PredictionRequest,
};

#[derive(Deserialize, Debug)]
pub struct EstimateInput {
    #[serde(default)]
    pub api_url: String,
    pub experience_level: String,
    pub min_experience_years: String,
    pub job_title: String,
    pub company_size: String,
    pub remote_type: String,
    pub country: String,
    pub industry: String,
    pub company_type: String,
    pub employment_type: String,
    pub posted_year: String,
}

/// Numeric widgets of the form, held to the same bounds the inputs advertise.
#[derive(Debug, Validate)]
pub struct FormNumbers {
    #[validate(range(min = 0, max = 20))]
    pub min_experience_years: i64,
    #[validate(range(min = 2018, max = 2030))]
    pub posted_year: i32,
}

impl EstimateInput {
    pub fn numbers(&self) -> Result<FormNumbers, String> {
        let min_experience_years = self
            .min_experience_years
            .trim()
            .parse()
            .map_err(|_| "Years of Experience must be a whole number".to_string())?;
        let posted_year = self
            .posted_year
            .trim()
            .parse()
            .map_err(|_| "Posted Year must be a whole number".to_string())?;
        let numbers = FormNumbers {
            min_experience_years,
            posted_year,
        };
        numbers.validate().map_err(|e| e.to_string())?;
        Ok(numbers)
    }

    pub fn into_request(self, numbers: FormNumbers) -> PredictionRequest {
        PredictionRequest {
            experience_level: Some(self.experience_level),
            min_experience_years: numbers.min_experience_years,
            employment_type: Some(self.employment_type),
            job_title: Some(self.job_title),
            company_size: Some(self.company_size),
            remote_type: Some(self.remote_type),
            posted_year: numbers.posted_year,
            industry: Some(self.industry),
            country: Some(self.country),
            company_type: Some(self.company_type),
        }
    }
}

fn render(template: impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("could not render template: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn home(State(state): State<ClientState>) -> Response {
    render(PredictForm {
        service_name: &state.service_name,
        api_url: &state.default_api_url,
        posted_year: Utc::now().year(),
    })
}

pub async fn estimate(State(state): State<ClientState>, Form(input): Form<EstimateInput>) -> Response {
    let url = match input.api_url.trim() {
        "" => state.default_api_url.clone(),
        url => url.to_string(),
    };
    let numbers = match input.numbers() {
        Ok(numbers) => numbers,
        Err(detail) => {
            return render(EstimateError {
                message: "Invalid input".into(),
                detail: Some(detail),
            });
        }
    };
    let req = input.into_request(numbers);
    match state.api.predict(&url, &req).await {
        Ok(Estimate::Salary {
            usd,
            normalized_experience,
        }) => render(SalaryEstimate {
            salary: format_usd(usd),
            normalized_experience,
        }),
        Ok(Estimate::Failed { error, exception }) => render(EstimateError {
            message: error,
            detail: Some(exception).filter(|e| !e.is_empty()),
        }),
        Ok(Estimate::Rejected { status, body }) => render(EstimateError {
            message: format!(
                "Prediction failed ({}). Please ensure the API is running and the URL is correct.",
                status.as_u16()
            ),
            detail: Some(body),
        }),
        Err(e) => {
            tracing::warn!("could not reach prediction service at {}: {}", &url, e);
            render(EstimateError {
                message: format!("Error connecting to API: {}", e),
                detail: None,
            })
        }
    }
}
