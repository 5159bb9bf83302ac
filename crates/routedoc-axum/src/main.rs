//! # routedoc-demo
//!
//! Serves the demo application and the OpenAPI document generated from
//! the routes it registers.
//!
//! This binary:
//! - Builds the demo application with deferred route registration
//! - Installs route detection before routes are registered
//! - Generates the document, writes it to the working directory and serves
//!   it at `/openapi.json`
//!
//! ## Running
//!
//! ```bash
//! cargo run --package routedoc-axum --bin routedoc-demo
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::net::SocketAddr;

use routedoc_axum::api::{self, openapi};
use routedoc_axum::{logging, AppState, Application};
use routedoc_core::{add_route_detection, write_document, GenerateOptions, RouteRegistry};
use tokio::net::TcpListener;
use tracing::info;

/// Environment variable overriding the listen port.
const PORT_ENV: &str = "ROUTEDOC_PORT";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(logging::LogProfile::from_env())?;

    info!("Starting routedoc-demo");

    let options = GenerateOptions::load()?;
    let state = AppState::new();
    let registry = RouteRegistry::new();

    let mut app = Application::deferred(api::modules());
    let kind = add_route_detection(&app, &registry)?;
    app.initialize();
    info!(?kind, routes = registry.len(), "routes detected");

    let document = openapi::publish(&app, &registry, &options, &state).await?;
    let written = write_document(std::path::Path::new("."), &document, &options).await?;
    info!(path = %written.display(), "OpenAPI document written");

    let router = api::create_router(app, state);

    let port = std::env::var(PORT_ENV)
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
