//! Health check handlers.

use std::collections::BTreeMap;
use std::fmt::Display;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use crate::state::AppState;

/// Overall status plus one entry per probed dependency.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: BTreeMap<&'static str, ComponentHealth>,
}

/// Outcome of probing one dependency.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    fn from_probe<E: Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

impl HealthResponse {
    fn from_components(services: BTreeMap<&'static str, ComponentHealth>) -> Self {
        let status = if services.values().all(ComponentHealth::is_healthy) {
            "healthy"
        } else {
            "degraded"
        };
        Self { status, services }
    }

    fn status_code(&self) -> StatusCode {
        if self.services.values().all(ComponentHealth::is_healthy) {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies the record store answers.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = ComponentHealth::from_probe(state.store.ping().await);
    if let Some(error) = &store.error {
        tracing::warn!(error = %error, "Record store health check failed");
    }

    let response = HealthResponse::from_components(BTreeMap::from([("store", store)]));
    (response.status_code(), Json(response))
}
