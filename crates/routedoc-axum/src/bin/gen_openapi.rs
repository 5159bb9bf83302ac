//! Generates the OpenAPI specification of the demo application to a JSON file.
//!
//! Run with: cargo run --bin gen-openapi -p routedoc-axum
//!
//! Options are read from `ROUTEDOC_CONFIG`, `./routedoc.toml` or the user
//! config directory. The file is written to the working directory as
//! `<filename>-<version>.json`.

use routedoc_axum::{api, logging, Application};
use routedoc_core::{add_route_detection, generate_openapi, GenerateOptions, RouteRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(logging::LogProfile::Development)?;

    println!("Generating OpenAPI specification...\n");

    let options = GenerateOptions::load()?;
    let registry = RouteRegistry::new();

    // Eager: every route is already registered, so detection enumerates.
    let app = Application::eager(api::modules());
    add_route_detection(&app, &registry)?;

    let output_path = generate_openapi(&app, &registry, &options).await?;

    println!("Written to: {}", output_path.display());

    let json = std::fs::read_to_string(&output_path)?;
    if let Ok(document) = serde_json::from_str::<serde_json::Value>(&json) {
        if let Some(paths) = document.get("paths").and_then(|p| p.as_object()) {
            println!("Paths: {}", paths.len());
        }
        if let Some(tags) = document.get("tags").and_then(|t| t.as_array()) {
            println!("Tags: {}", tags.len());
        }
    }

    println!("\nOpenAPI specification generated successfully!");
    Ok(())
}
