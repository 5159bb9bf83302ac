//! Route registration that can be observed.
//!
//! [`TrackedRouter`] wraps an [`axum::Router`] and records every route it
//! registers in a shared [`RouteLog`]. The log can be listed afterwards
//! (enumeration) or watched through hooks while registration is still
//! happening. Paths are recorded in the `:name` parameter convention
//! routedoc works with, translated from axum's `{name}` / `{*name}`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::handler::Handler;
use axum::routing::{self, MethodRouter};
use axum::Router;
use once_cell::sync::Lazy;
use regex::Regex;
use routedoc_core::{RegisteredRoute, RouteHookFn};

static AXUM_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\*?([^}/]+)\}").expect("axum parameter pattern is valid"));

/// Convert an axum path (`/users/{id}`) to the colon convention (`/users/:id`).
#[must_use]
pub fn to_colon_path(axum_path: &str) -> String {
    AXUM_PARAM.replace_all(axum_path, ":$1").into_owned()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Every route registered through a [`TrackedRouter`], plus the hooks
/// watching for new ones.
#[derive(Default)]
pub struct RouteLog {
    entries: Mutex<Vec<RegisteredRoute>>,
    hooks: Mutex<Vec<RouteHookFn>>,
}

impl RouteLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a registration and notify every hook.
    pub fn record(&self, route: RegisteredRoute) {
        let hooks = lock(&self.hooks).clone();
        for hook in &hooks {
            hook(&route);
        }
        tracing::trace!(method = %route.method, url = %route.url, "route registered");
        lock(&self.entries).push(route);
    }

    /// Register a hook for future registrations.
    pub fn add_hook(&self, hook: RouteHookFn) {
        lock(&self.hooks).push(hook);
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<RegisteredRoute> {
        lock(&self.entries).clone()
    }
}

impl std::fmt::Debug for RouteLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteLog")
            .field("entries", &lock(&self.entries).len())
            .field("hooks", &lock(&self.hooks).len())
            .finish()
    }
}

/// An axum router that logs what it registers.
#[derive(Debug, Clone)]
pub struct TrackedRouter {
    router: Router,
    log: Arc<RouteLog>,
}

macro_rules! method_fn {
    ($(#[$doc:meta])* $name:ident, $method:literal) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name<H, T>(self, path: &str, handler: H) -> Self
        where
            H: Handler<T, ()>,
            T: 'static,
        {
            self.route(path, $method, routing::$name(handler))
        }
    };
}

impl TrackedRouter {
    /// Start an empty router writing into `log`.
    #[must_use]
    pub fn new(log: Arc<RouteLog>) -> Self {
        Self {
            router: Router::new(),
            log,
        }
    }

    /// Register `method_router` at `path`, recording it as `method`.
    #[must_use]
    pub fn route(mut self, path: &str, method: &str, method_router: MethodRouter) -> Self {
        self.router = self.router.route(path, method_router);
        self.log
            .record(RegisteredRoute::new(method, to_colon_path(path)));
        self
    }

    method_fn!(
        /// Register a `GET` handler.
        get, "GET"
    );
    method_fn!(
        /// Register a `POST` handler.
        post, "POST"
    );
    method_fn!(
        /// Register a `PUT` handler.
        put, "PUT"
    );
    method_fn!(
        /// Register a `PATCH` handler.
        patch, "PATCH"
    );
    method_fn!(
        /// Register a `DELETE` handler.
        delete, "DELETE"
    );
    method_fn!(
        /// Register a `HEAD` handler. Never documented.
        head, "HEAD"
    );
    method_fn!(
        /// Register an `OPTIONS` handler. Never documented.
        options, "OPTIONS"
    );

    /// The shared log.
    #[must_use]
    pub fn log(&self) -> &Arc<RouteLog> {
        &self.log
    }

    /// Finish registration.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_to_colon_path() {
        assert_eq!(to_colon_path("/users"), "/users");
        assert_eq!(to_colon_path("/users/{id}"), "/users/:id");
        assert_eq!(
            to_colon_path("/orgs/{org}/repos/{repo}"),
            "/orgs/:org/repos/:repo"
        );
        assert_eq!(to_colon_path("/files/{*path}"), "/files/:path");
    }

    #[test]
    fn test_registrations_are_logged_in_order() {
        let log = Arc::new(RouteLog::new());
        let _router = TrackedRouter::new(log.clone())
            .get("/users", || async { "list" })
            .post("/users", || async { "create" })
            .head("/users", || async {});

        assert_eq!(
            log.entries(),
            vec![
                RegisteredRoute::new("GET", "/users"),
                RegisteredRoute::new("POST", "/users"),
                RegisteredRoute::new("HEAD", "/users"),
            ]
        );
    }

    #[test]
    fn test_hooks_see_only_later_registrations() {
        let log = Arc::new(RouteLog::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let router = TrackedRouter::new(log.clone()).get("/before", || async {});
        let sink = seen.clone();
        log.add_hook(Arc::new(move |route: &RegisteredRoute| {
            sink.lock().unwrap().push(route.url.clone());
        }));
        let _router = router.delete("/after/{id}", || async {});

        assert_eq!(*seen.lock().unwrap(), vec!["/after/:id".to_string()]);
        assert_eq!(log.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_tracked_routes_still_dispatch() {
        let router = TrackedRouter::new(Arc::new(RouteLog::new()))
            .get("/ping", || async { "pong" })
            .into_router();

        let response = router
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
