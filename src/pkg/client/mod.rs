pub mod api;
pub mod handlers;
pub mod router;
pub mod uispec;

use std::{sync::Arc, time::Duration};

use standard_error::{Interpolate, StandardError};

use crate::{conf::settings, prelude::Result};
use api::PredictClient;
use router::{ClientState, build_routes};

pub async fn serve() -> Result<()> {
    let api = PredictClient::new(Duration::from_secs(settings.request_timeout_secs))
        .map_err(|e| StandardError::new("ERR-SRV-002").interpolate_err(e.to_string()))?;
    let state = ClientState {
        api: Arc::new(api),
        service_name: settings.service_name.clone(),
        default_api_url: settings.salary_api_url.clone(),
    };
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.ui_port))
        .await
        .map_err(|e| StandardError::new("ERR-SRV-001").interpolate_err(e.to_string()))?;
    tracing::info!(
        "form client listening at port {}, predicting via {}",
        settings.ui_port,
        settings.salary_api_url
    );
    tokio::select! {
        r = axum::serve(listener, build_routes(state)) => {
            tracing::warn!("form client ended unexpectedly: {:?}", &r)
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing form client");
        }
    }
    Ok(())
}
