//! # routedoc-core
//!
//! Generates OpenAPI 3.0 documents from the routes a web application
//! registers and the controllers it declares.
//!
//! This crate provides:
//! - Route detection through pluggable route sources (enumeration or hook)
//! - A controller catalog built from host introspection
//! - The path builder: tag inference, positional summaries, path parameters
//! - Document assembly and persistence
//!
//! ## Architecture
//!
//! - [`route`] - Detected routes and the registry collecting them
//! - [`source`] - Engine capabilities and the two route source strategies
//! - [`catalog`] - Controller base paths and declared method names
//! - [`paths`] - The OpenAPI `paths` builder
//! - [`document`] - Serializable document model
//! - [`generate`] - Assembling and writing documents
//! - [`options`] - Generation options loading and validation
//! - [`error`] - Unified error types for the crate

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod catalog;
pub mod document;
pub mod error;
pub mod generate;
pub mod options;
pub mod paths;
pub mod route;
pub mod source;

// Re-export primary types for convenience
pub use catalog::{ControllerCatalog, ControllerCatalogProvider, ControllerDescriptor, ModuleDescriptor};
pub use document::{Info, OpenApiDocument, Operation, Parameter, Paths, Server, Tag, OPENAPI_VERSION};
pub use error::{Error, Result, RouteDocError};
pub use generate::{assemble, build_document, generate_openapi, generate_openapi_in, write_document};
pub use options::GenerateOptions;
pub use paths::{build_paths, infer_tag, normalize_path, FALLBACK_TAG};
pub use route::{HttpMethod, Route, RouteRegistry};
pub use source::{
    add_route_detection, select_route_source, HttpEngine, RegisteredRoute, RouteEnumeration, RouteHook,
    RouteHookFn, RouteSource, SourceKind,
};
