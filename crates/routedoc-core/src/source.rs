//! Route sources: how detected routes reach the [`RouteRegistry`].
//!
//! Host engines come in two kinds. Some register every route while the
//! application is constructed and can list them afterwards; others register
//! routes during a deferred initialization step and can only be observed
//! through a registration hook. An engine advertises what it supports via
//! [`HttpEngine`], and [`select_route_source`] picks the matching
//! [`RouteSource`] once, at setup.

use std::sync::Arc;

use crate::error::{Result, RouteDocError};
use crate::route::{HttpMethod, Route, RouteRegistry};

/// A route as the engine reports it, before method validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoute {
    /// Method name exactly as the engine stores it.
    pub method: String,
    /// URL template in the `:name` parameter convention.
    pub url: String,
}

impl RegisteredRoute {
    /// Create a registered route.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

/// Callback fired for every route an engine registers.
pub type RouteHookFn = Arc<dyn Fn(&RegisteredRoute) + Send + Sync>;

/// Engines that can list routes they have already registered.
pub trait RouteEnumeration {
    /// Every route registered so far, in registration order.
    fn registered_routes(&self) -> Vec<RegisteredRoute>;
}

/// Engines that announce each route as it is registered.
pub trait RouteHook {
    /// Install a callback invoked on each future registration.
    fn on_route(&self, hook: RouteHookFn);
}

/// Capabilities a host HTTP engine may offer for route detection.
pub trait HttpEngine {
    /// Pull-based access to registered routes, if supported.
    fn as_enumeration(&self) -> Option<&dyn RouteEnumeration> {
        None
    }

    /// Push-based registration hook, if supported.
    fn as_hook(&self) -> Option<&dyn RouteHook> {
        None
    }
}

/// Which strategy was installed for an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Routes were listed synchronously.
    Enumerated,
    /// Routes will be pushed as the engine registers them.
    Hooked,
}

/// A strategy that feeds routes from an engine into a registry.
pub trait RouteSource {
    /// The strategy this source implements.
    fn kind(&self) -> SourceKind;

    /// Connect the source to `registry`.
    fn install(self: Box<Self>, registry: &RouteRegistry);
}

/// Pull-based source: copies the engine's current route listing.
pub struct EnumeratedRoutes {
    routes: Vec<RegisteredRoute>,
}

impl EnumeratedRoutes {
    /// Snapshot the engine's routes now.
    pub fn from_engine(engine: &dyn RouteEnumeration) -> Self {
        Self {
            routes: engine.registered_routes(),
        }
    }
}

impl RouteSource for EnumeratedRoutes {
    fn kind(&self) -> SourceKind {
        SourceKind::Enumerated
    }

    fn install(self: Box<Self>, registry: &RouteRegistry) {
        for registered in self.routes {
            match HttpMethod::from_any_case(&registered.method) {
                Some(method) => registry.push(Route::new(method, registered.url)),
                None => tracing::debug!(
                    method = %registered.method,
                    url = %registered.url,
                    "skipping route with unsupported method"
                ),
            }
        }
    }
}

/// Push-based source: appends each route the engine later registers.
pub struct HookedRoutes<'a> {
    engine: &'a dyn RouteHook,
}

impl<'a> HookedRoutes<'a> {
    /// Prepare a hook on `engine`.
    pub fn new(engine: &'a dyn RouteHook) -> Self {
        Self { engine }
    }
}

impl RouteSource for HookedRoutes<'_> {
    fn kind(&self) -> SourceKind {
        SourceKind::Hooked
    }

    fn install(self: Box<Self>, registry: &RouteRegistry) {
        let registry = registry.clone();
        self.engine.on_route(Arc::new(move |registered: &RegisteredRoute| {
            if let Some(method) = HttpMethod::from_strict(&registered.method) {
                registry.push(Route::new(method, registered.url.clone()));
            }
        }));
    }
}

/// Choose the route source for `engine`: enumeration when available,
/// otherwise the registration hook.
///
/// # Errors
///
/// Returns [`RouteDocError::NoRouteSource`] if the engine offers neither.
pub fn select_route_source(engine: &dyn HttpEngine) -> Result<Box<dyn RouteSource + '_>> {
    if let Some(enumeration) = engine.as_enumeration() {
        return Ok(Box::new(EnumeratedRoutes::from_engine(enumeration)));
    }
    if let Some(hook) = engine.as_hook() {
        return Ok(Box::new(HookedRoutes::new(hook)));
    }
    Err(RouteDocError::NoRouteSource)
}

/// Install route detection for `engine`, feeding `registry`.
///
/// Call once, after the engine is constructed and before any deferred
/// initialization registers routes.
///
/// # Errors
///
/// Returns [`RouteDocError::NoRouteSource`] if the engine offers neither
/// capability.
pub fn add_route_detection(engine: &dyn HttpEngine, registry: &RouteRegistry) -> Result<SourceKind> {
    let source = select_route_source(engine)?;
    let kind = source.kind();
    source.install(registry);
    tracing::info!(?kind, detected = registry.len(), "route detection installed");
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ListingEngine(Vec<RegisteredRoute>);

    impl RouteEnumeration for ListingEngine {
        fn registered_routes(&self) -> Vec<RegisteredRoute> {
            self.0.clone()
        }
    }

    impl HttpEngine for ListingEngine {
        fn as_enumeration(&self) -> Option<&dyn RouteEnumeration> {
            Some(self)
        }
    }

    #[derive(Default)]
    struct HookEngine {
        hooks: Mutex<Vec<RouteHookFn>>,
    }

    impl HookEngine {
        fn register(&self, method: &str, url: &str) {
            let route = RegisteredRoute::new(method, url);
            for hook in self.hooks.lock().unwrap().iter() {
                hook(&route);
            }
        }
    }

    impl RouteHook for HookEngine {
        fn on_route(&self, hook: RouteHookFn) {
            self.hooks.lock().unwrap().push(hook);
        }
    }

    impl HttpEngine for HookEngine {
        fn as_hook(&self) -> Option<&dyn RouteHook> {
            Some(self)
        }
    }

    struct BareEngine;

    impl HttpEngine for BareEngine {}

    #[test]
    fn test_enumeration_reads_existing_routes_case_insensitively() {
        let engine = ListingEngine(vec![
            RegisteredRoute::new("get", "/users"),
            RegisteredRoute::new("options", "/users"),
            RegisteredRoute::new("POST", "/users"),
        ]);
        let registry = RouteRegistry::new();

        let kind = add_route_detection(&engine, &registry).unwrap();

        assert_eq!(kind, SourceKind::Enumerated);
        assert_eq!(
            registry.snapshot(),
            vec![
                Route::new(HttpMethod::Get, "/users"),
                Route::new(HttpMethod::Post, "/users"),
            ]
        );
    }

    #[test]
    fn test_hook_collects_later_registrations() {
        let engine = HookEngine::default();
        let registry = RouteRegistry::new();

        let kind = add_route_detection(&engine, &registry).unwrap();
        assert_eq!(kind, SourceKind::Hooked);
        assert!(registry.is_empty());

        engine.register("GET", "/orders");
        engine.register("HEAD", "/orders");
        engine.register("delete", "/orders/:id");
        engine.register("DELETE", "/orders/:id");

        assert_eq!(
            registry.snapshot(),
            vec![
                Route::new(HttpMethod::Get, "/orders"),
                Route::new(HttpMethod::Delete, "/orders/:id"),
            ]
        );
    }

    #[test]
    fn test_engine_without_capabilities_is_rejected() {
        let registry = RouteRegistry::new();
        let err = add_route_detection(&BareEngine, &registry).unwrap_err();
        assert!(matches!(err, RouteDocError::NoRouteSource));
    }
}
