//! HTTP API routes and handlers.
//!
//! This module contains the demo application's controllers organized by domain:
//! - `users` - User CRUD and moderation
//! - `orders` - Order placement and lookup
//! - `health` - Service health checks
//! - `error` - API error types
//! - `openapi` - Serving the generated OpenAPI document

use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::app::{Application, Module};
use crate::state::AppState;

pub mod error;
pub mod health;
pub mod openapi;
pub mod orders;
pub mod users;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};

/// Modules of the demo application.
///
/// # Route Structure
///
/// ```text
/// /users                 - findAll (GET), create (POST)
/// /users/{id}            - findOne (GET), update (PUT), remove (DELETE)
/// /users/admin/banned    - listBanned (GET)
/// /users/admin/{id}/ban  - ban (POST)
/// /orders                - findAll (GET), place (POST)
/// /orders/{id}           - findOne (GET)
/// /health                - Health check (no controller base path)
/// ```
#[must_use]
pub fn modules() -> Vec<Module> {
    vec![
        Module::new("UsersModule")
            .controller(users::UsersController)
            .controller(users::UserAdminController),
        Module::new("OrdersModule").controller(orders::OrdersController),
        Module::new("HealthModule").controller(health::HealthController),
    ]
}

/// Creates the servable router: every controller route plus the document
/// endpoint.
pub fn create_router(app: Application, state: AppState) -> Router {
    app.into_router()
        .merge(openapi::router())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
