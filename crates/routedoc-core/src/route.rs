//! Detected routes and the registry that collects them.
//!
//! A [`Route`] is one registered `(method, url)` pair. URLs use the
//! colon-prefixed segment convention for path parameters (`/users/:id`).
//! The [`RouteRegistry`] is an explicitly owned, insertion-ordered handle
//! that route sources append to and the path builder reads from.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// HTTP methods that can appear in a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// All supported methods, in the order hooks accept them.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Uppercase wire name, e.g. `"GET"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Lowercase name used as the operation key under a path item.
    #[must_use]
    pub const fn operation_key(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Parse an exact uppercase method name. Used on the hook path, where
    /// anything else is ignored.
    #[must_use]
    pub fn from_strict(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Parse a method name regardless of case. Used when enumerating
    /// engines that store lowercase method names.
    #[must_use]
    pub fn from_any_case(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a method name is not one of the supported methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: '{0}'")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_any_case(s).ok_or_else(|| UnsupportedMethod(s.to_string()))
    }
}

/// One registered endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// HTTP method.
    pub method: HttpMethod,
    /// URL template with `:name` parameter segments.
    pub url: String,
}

impl Route {
    /// Create a new route.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Insertion-ordered collection of detected routes.
///
/// Cloning yields another handle to the same list, so a registration hook
/// installed inside the host router appends to the registry the caller
/// later generates from. Nothing is ever removed except by [`reset`].
///
/// [`reset`]: RouteRegistry::reset
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RouteRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking hook cannot leave a half-written Vec behind, so a poisoned
    // lock still holds a consistent list.
    fn lock(&self) -> MutexGuard<'_, Vec<Route>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a detected route.
    pub fn push(&self, route: Route) {
        tracing::debug!(method = %route.method, url = %route.url, "route detected");
        self.lock().push(route);
    }

    /// Append many routes, keeping their order.
    pub fn extend(&self, routes: impl IntoIterator<Item = Route>) {
        for route in routes {
            self.push(route);
        }
    }

    /// Copy of every route detected so far, in detection order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Route> {
        self.lock().clone()
    }

    /// Number of detected routes, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been detected yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every detected route.
    pub fn reset(&self) {
        let cleared = std::mem::take(&mut *self.lock());
        tracing::debug!(count = cleared.len(), "route registry reset");
    }
}
