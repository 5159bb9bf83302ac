//! # routedoc-axum
//!
//! Axum host integration for routedoc.
//!
//! This library provides an application model of modules and controllers
//! whose route registrations can be observed, the demo API used by the
//! binaries, the `/openapi.json` endpoint and logging setup.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod api;
pub mod app;
pub mod logging;
pub mod router;
pub mod state;

pub use app::{Application, Controller, ControllerRoutes, EngineKind, Module};
pub use router::{to_colon_path, RouteLog, TrackedRouter};
pub use state::AppState;
