//! OpenAPI document model.
//!
//! Only the subset the generator emits is modeled: servers, info, tags and
//! path operations with positional path parameters and a placeholder
//! `200` response. Field order matches the serialized output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// OpenAPI version written into every document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Description attached to the placeholder `200` response.
pub const SUCCESS_DESCRIPTION: &str = "successful operation";

/// Normalized URL template → lowercase method → operation.
pub type Paths = IndexMap<String, PathItem>;

/// Lowercase method → operation.
pub type PathItem = IndexMap<String, Operation>;

/// Root of a generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// Always [`OPENAPI_VERSION`].
    pub openapi: String,
    /// Caller-supplied servers.
    pub servers: Vec<Server>,
    /// Caller-supplied title and version.
    pub info: Info,
    /// One entry per controller base path.
    pub tags: Vec<Tag>,
    /// Generated operations.
    pub paths: Paths,
}

/// A server the API is reachable at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Base URL.
    pub url: String,
}

impl Server {
    /// Create a server entry.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version; also part of the output file name.
    pub version: String,
}

impl Info {
    /// Create document metadata.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
        }
    }
}

/// A tag declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name; a controller base path.
    pub name: String,
}

/// One method on one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The single inferred tag.
    pub tags: Vec<String>,
    /// Controller method name matched by position; absent when the route
    /// fell into the fallback group and no root controller exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Path parameters; omitted entirely when there are none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Placeholder responses.
    pub responses: Responses,
}

/// A path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name as written after the colon.
    pub name: String,
    /// Always `"path"`.
    #[serde(rename = "in")]
    pub location: String,
    /// Always `true`.
    pub required: bool,
    /// Always a string schema.
    pub schema: ParameterSchema,
}

impl Parameter {
    /// A required string path parameter.
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: "path".to_string(),
            required: true,
            schema: ParameterSchema {
                schema_type: "string".to_string(),
            },
        }
    }
}

/// Parameter schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// JSON schema type.
    #[serde(rename = "type")]
    pub schema_type: String,
}

/// Responses map holding only the `200` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responses {
    /// The `200` response.
    #[serde(rename = "200")]
    pub ok: Response,
}

impl Default for Responses {
    fn default() -> Self {
        Self {
            ok: Response {
                description: SUCCESS_DESCRIPTION.to_string(),
            },
        }
    }
}

/// A response description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Human-readable description.
    pub description: String,
}

impl OpenApiDocument {
    /// Compact JSON text, as written to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
