//! Document assembly and persistence.
//!
//! Combines the controller catalog, the detected routes and the caller's
//! options into an [`OpenApiDocument`], then writes it as compact JSON to
//! `<filename>-<version>.json`.

use std::path::{Path, PathBuf};

use crate::catalog::{ControllerCatalog, ControllerCatalogProvider};
use crate::document::{OpenApiDocument, Tag, OPENAPI_VERSION};
use crate::error::Result;
use crate::options::GenerateOptions;
use crate::paths::build_paths;
use crate::route::RouteRegistry;

/// Assemble a document from an already built catalog.
///
/// # Errors
///
/// Returns [`crate::RouteDocError::SummaryOutOfRange`] when routes outnumber
/// a controller's declared methods.
pub fn assemble(
    catalog: &ControllerCatalog,
    registry: &RouteRegistry,
    options: &GenerateOptions,
) -> Result<OpenApiDocument> {
    let routes = registry.snapshot();
    let paths = build_paths(catalog, &routes)?;

    Ok(OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        servers: options.servers.clone(),
        info: options.info.clone(),
        tags: catalog
            .keys()
            .map(|name| Tag {
                name: name.to_string(),
            })
            .collect(),
        paths,
    })
}

/// Build the document for `app` without writing it.
///
/// # Errors
///
/// See [`assemble`].
pub fn build_document(
    app: &dyn ControllerCatalogProvider,
    registry: &RouteRegistry,
    options: &GenerateOptions,
) -> Result<OpenApiDocument> {
    let catalog = ControllerCatalog::from_provider(app);
    assemble(&catalog, registry, options)
}

/// Write `document` into `dir` under the name derived from `options`.
///
/// Existing files are overwritten.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn write_document(
    dir: &Path,
    document: &OpenApiDocument,
    options: &GenerateOptions,
) -> Result<PathBuf> {
    let path = dir.join(options.output_file_name());
    let json = document.to_json()?;
    tokio::fs::write(&path, json).await?;
    tracing::info!(
        path = %path.display(),
        paths = document.paths.len(),
        tags = document.tags.len(),
        "OpenAPI document written"
    );
    Ok(path)
}

/// Generate the document for `app` and write it into `dir`.
///
/// # Errors
///
/// Returns an error if path building, serialization or the write fails.
pub async fn generate_openapi_in(
    dir: &Path,
    app: &dyn ControllerCatalogProvider,
    registry: &RouteRegistry,
    options: &GenerateOptions,
) -> Result<PathBuf> {
    let document = build_document(app, registry, options)?;
    write_document(dir, &document, options).await
}

/// Generate the document for `app` and write it into the working directory.
///
/// Routes must have finished registering before this is called.
///
/// # Errors
///
/// Returns an error if path building, serialization or the write fails.
pub async fn generate_openapi(
    app: &dyn ControllerCatalogProvider,
    registry: &RouteRegistry,
    options: &GenerateOptions,
) -> Result<PathBuf> {
    generate_openapi_in(Path::new("."), app, registry, options).await
}
