//! Unified error types for the routedoc core library.
//!
//! [`RouteDocError`] covers every failure mode of route detection, path
//! building, options loading and document persistence.
//!
//! # Example
//!
//! ```rust
//! use routedoc_core::error::{Result, RouteDocError};
//!
//! fn summary_for(methods: &[String], index: usize) -> Result<&str> {
//!     methods
//!         .get(index)
//!         .map(String::as_str)
//!         .ok_or_else(|| RouteDocError::SummaryOutOfRange {
//!             tag: "users".into(),
//!             index,
//!             declared: methods.len(),
//!         })
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for all routedoc operations.
#[derive(Debug, Error)]
pub enum RouteDocError {
    // =========================================================================
    // ROUTE DETECTION ERRORS
    // =========================================================================
    /// The host engine exposes neither route enumeration nor a registration hook.
    #[error(
        "HTTP engine offers no route source. It must support route enumeration or a registration hook."
    )]
    NoRouteSource,

    // =========================================================================
    // METADATA ERRORS
    // =========================================================================
    /// A tag group holds more routes than its controller declares methods.
    #[error(
        "Tag '{tag}' has a route at position {index} but its controller declares only {declared} methods. \
         Routes must be registered in the same order the controller declares its methods."
    )]
    SummaryOutOfRange {
        /// The catalog key the routes were grouped under.
        tag: String,
        /// Zero-based position of the offending route within the group.
        index: usize,
        /// Number of method names the controller declares.
        declared: usize,
    },

    // =========================================================================
    // OPTIONS ERRORS
    // =========================================================================
    /// The generation options file was not found at the expected path.
    #[error("Options file not found at: {}", .0.display())]
    OptionsNotFound(PathBuf),

    /// The options file exists but could not be parsed.
    #[error("Failed to parse options: {0}")]
    OptionsParseError(String),

    /// The options were parsed but contain invalid values.
    #[error("Options validation failed: {0}")]
    OptionsValidationError(String),

    // =========================================================================
    // PERSISTENCE & I/O ERRORS
    // =========================================================================
    /// The document or options could not be serialized.
    #[error("Serialization error: {0}")]
    SerializeError(String),

    /// A low-level I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized [`Result`] type for routedoc operations.
pub type Result<T> = std::result::Result<T, RouteDocError>;

/// Short alias for [`RouteDocError`].
pub type Error = RouteDocError;

impl RouteDocError {
    /// Returns `true` if this error comes from controller or route metadata.
    #[inline]
    #[must_use]
    pub const fn is_metadata_error(&self) -> bool {
        matches!(self, Self::NoRouteSource | Self::SummaryOutOfRange { .. })
    }

    /// Returns `true` if this error is related to generation options.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::OptionsNotFound(_) | Self::OptionsParseError(_) | Self::OptionsValidationError(_)
        )
    }

    /// Returns `true` if this error is related to I/O or serialization.
    #[inline]
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::SerializeError(_) | Self::IoError(_))
    }

    /// Returns a machine-readable error code.
    #[inline]
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoRouteSource => "NO_ROUTE_SOURCE",
            Self::SummaryOutOfRange { .. } => "SUMMARY_OUT_OF_RANGE",
            Self::OptionsNotFound(_) => "OPTIONS_NOT_FOUND",
            Self::OptionsParseError(_) => "OPTIONS_PARSE_ERROR",
            Self::OptionsValidationError(_) => "OPTIONS_VALIDATION_ERROR",
            Self::SerializeError(_) => "SERIALIZE_ERROR",
            Self::IoError(_) => "IO_ERROR",
        }
    }
}

impl From<serde_json::Error> for RouteDocError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializeError(err.to_string())
    }
}

impl From<toml::de::Error> for RouteDocError {
    fn from(err: toml::de::Error) -> Self {
        Self::OptionsParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for RouteDocError {
    fn from(err: toml::ser::Error) -> Self {
        Self::SerializeError(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
