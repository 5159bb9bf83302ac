//! Serving the generated OpenAPI document.
//!
//! The document is generated once routes have settled and published into
//! [`AppState`]; `/openapi.json` returns whatever was published last.

use axum::routing::get;
use axum::{Extension, Json, Router};
use routedoc_core::{build_document, GenerateOptions, OpenApiDocument, RouteRegistry};

use crate::api::error::{ApiError, ApiResult};
use crate::app::Application;
use crate::state::AppState;

/// Path the document is served at.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Router exposing the published document. Not a controller, so it is
/// never part of the document itself.
pub fn router() -> Router {
    Router::new().route(OPENAPI_PATH, get(get_openapi_spec))
}

/// Serve the OpenAPI document as JSON.
///
/// Responds 404 until a document has been published.
pub async fn get_openapi_spec(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<OpenApiDocument>> {
    state.document().await.map(Json).ok_or_else(|| {
        ApiError::not_found(
            "document_not_generated",
            "No OpenAPI document has been generated yet",
        )
    })
}

/// Build the document for `app` from `registry` and publish it.
///
/// # Errors
///
/// Returns an error if path building fails.
pub async fn publish(
    app: &Application,
    registry: &RouteRegistry,
    options: &GenerateOptions,
    state: &AppState,
) -> routedoc_core::Result<OpenApiDocument> {
    let document = build_document(app, registry, options)?;
    state.publish_document(document.clone()).await;
    tracing::info!(paths = document.paths.len(), "OpenAPI document published");
    Ok(document)
}
