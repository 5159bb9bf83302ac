//! Health check API endpoint.
//!
//! Provides a simple health check endpoint for monitoring and load balancers.
//! The controller declares no base path, so its route is documented under
//! the fallback tag without a summary.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::{Controller, ControllerRoutes};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version from Cargo.toml.
    pub version: String,
}

/// Health check, mounted at `/health`.
pub struct HealthController;

impl Controller for HealthController {
    fn base_path(&self) -> Option<&str> {
        None
    }

    fn method_names(&self) -> Vec<&'static str> {
        vec!["check"]
    }

    fn routes(&self, routes: ControllerRoutes) -> ControllerRoutes {
        routes.get("/health", health_check)
    }
}

/// Health check endpoint.
///
/// Returns basic service status information.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
