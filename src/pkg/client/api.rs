use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::pkg::internal::features::PredictionRequest;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// What the form shows after one round trip to the prediction service.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Salary {
        usd: i64,
        normalized_experience: Option<String>,
    },
    Failed {
        error: String,
        exception: String,
    },
    Rejected {
        status: StatusCode,
        body: String,
    },
}

#[derive(Deserialize)]
struct Answer {
    predicted_salary_usd: Option<f64>,
    normalized_experience: Option<String>,
    error: Option<String>,
    exception: Option<String>,
}

pub fn interpret(status: StatusCode, body: &str) -> Estimate {
    if status != StatusCode::OK {
        return Estimate::Rejected {
            status,
            body: body.to_string(),
        };
    }
    match serde_json::from_str::<Answer>(body) {
        Ok(Answer {
            predicted_salary_usd: Some(usd),
            normalized_experience,
            ..
        }) => Estimate::Salary {
            usd: usd.round() as i64,
            normalized_experience,
        },
        Ok(Answer {
            error: Some(error),
            exception,
            ..
        }) => Estimate::Failed {
            error,
            exception: exception.unwrap_or_default(),
        },
        _ => Estimate::Failed {
            error: "Unexpected response".into(),
            exception: body.to_string(),
        },
    }
}

#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::Client,
}

impl PredictClient {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(PredictClient { http })
    }

    /// One attempt, no retry. Timeouts and connection failures surface as
    /// [`ClientError::Transport`].
    pub async fn predict(&self, url: &str, req: &PredictionRequest) -> Result<Estimate, ClientError> {
        tracing::debug!("posting prediction request to {}", url);
        let res = self.http.post(url).json(req).send().await?;
        let status = res.status();
        let body = res.text().await?;
        tracing::debug!("prediction service answered {}: {}", status, &body);
        Ok(interpret(status, &body))
    }
}

pub fn format_usd(usd: i64) -> String {
    let digits = usd.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if usd < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pkg::{
        internal::model::{RidgePipeline, SalaryModel},
        server::{router::build_routes, state::AppState},
    };

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(1000), "$1,000");
        assert_eq!(format_usd(123456789), "$123,456,789");
        assert_eq!(format_usd(-45000), "-$45,000");
    }

    #[test]
    fn interprets_success() {
        let e = interpret(
            StatusCode::OK,
            r#"{"predicted_salary_usd": 142000, "normalized_experience": "Senior"}"#,
        );
        assert_eq!(
            e,
            Estimate::Salary {
                usd: 142000,
                normalized_experience: Some("Senior".into())
            }
        );
    }

    #[test]
    fn interprets_error_payload() {
        let e = interpret(
            StatusCode::OK,
            r#"{"error": "Prediction failed", "exception": "boom"}"#,
        );
        assert_eq!(
            e,
            Estimate::Failed {
                error: "Prediction failed".into(),
                exception: "boom".into()
            }
        );
    }

    #[test]
    fn interprets_non_ok_status() {
        let e = interpret(StatusCode::UNPROCESSABLE_ENTITY, "missing field");
        assert_eq!(
            e,
            Estimate::Rejected {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: "missing field".into()
            }
        );
        assert!(matches!(interpret(StatusCode::OK, "<html>"), Estimate::Failed { .. }));
    }

    fn model() -> Arc<dyn SalaryModel> {
        let p: RidgePipeline = serde_json::from_str(
            r#"{"name": "flat", "intercept": 80000.0,
                "categorical": [{"feature": "experience_level", "weights": {"Entry": -10000.0}}]}"#,
        )
        .unwrap();
        Arc::new(p)
    }

    #[tokio::test]
    async fn round_trip_against_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_routes(AppState::with_model(model())))
                .await
                .unwrap();
        });

        let client = PredictClient::new(Duration::from_secs(30)).unwrap();
        let req = PredictionRequest {
            experience_level: Some("Junior".into()),
            min_experience_years: 1,
            posted_year: 2025,
            ..Default::default()
        };
        let estimate = client
            .predict(&format!("http://{addr}/predict"), &req)
            .await
            .unwrap();
        assert_eq!(
            estimate,
            Estimate::Salary {
                usd: 70000,
                normalized_experience: Some("Entry".into())
            }
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PredictClient::new(Duration::from_secs(2)).unwrap();
        let res = client
            .predict(&format!("http://{addr}/predict"), &PredictionRequest::default())
            .await;
        assert!(matches!(res, Err(ClientError::Transport(_))));
    }
}
