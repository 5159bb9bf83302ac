//! Host application: modules of controllers mounted on an axum router.
//!
//! An [`Application`] is either eager, registering every controller route
//! when it is built, or deferred, registering them only when
//! [`Application::initialize`] runs. Before initialization the only way to
//! observe routes is the registration hook; afterwards they can be listed.
//! That split is what [`routedoc_core::select_route_source`] probes for.

use std::sync::Arc;

use axum::Router;
use routedoc_core::{
    ControllerCatalogProvider, ControllerDescriptor, HttpEngine, ModuleDescriptor, RegisteredRoute,
    RouteEnumeration, RouteHook, RouteHookFn,
};

use crate::router::{RouteLog, TrackedRouter};

/// A group of routes mounted under one base path.
///
/// `method_names` must list handlers in the order [`Controller::routes`]
/// registers them; documented summaries are matched by position.
pub trait Controller: Send + Sync + 'static {
    /// Base path, e.g. `"users"`. `None` leaves the controller out of the
    /// generated document's catalog.
    fn base_path(&self) -> Option<&str>;

    /// Handler names in declaration order.
    fn method_names(&self) -> Vec<&'static str>;

    /// Register this controller's routes.
    fn routes(&self, routes: ControllerRoutes) -> ControllerRoutes;
}

/// Registration scope for one controller; paths are relative to its base.
#[derive(Debug)]
pub struct ControllerRoutes {
    base: String,
    router: TrackedRouter,
}

macro_rules! scoped_method_fn {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name<H, T>(mut self, path: &str, handler: H) -> Self
        where
            H: axum::handler::Handler<T, ()>,
            T: 'static,
        {
            let full = self.full_path(path);
            self.router = self.router.$name(&full, handler);
            self
        }
    };
}

impl ControllerRoutes {
    fn new(base_path: Option<&str>, router: TrackedRouter) -> Self {
        Self {
            base: base_path.unwrap_or_default().trim_matches('/').to_string(),
            router,
        }
    }

    /// Join the controller base with a relative path.
    #[must_use]
    pub fn full_path(&self, path: &str) -> String {
        match (self.base.is_empty(), path.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => path.to_string(),
            (false, _) => format!("/{}{}", self.base, path),
        }
    }

    scoped_method_fn!(
        /// Register a `GET` handler.
        get
    );
    scoped_method_fn!(
        /// Register a `POST` handler.
        post
    );
    scoped_method_fn!(
        /// Register a `PUT` handler.
        put
    );
    scoped_method_fn!(
        /// Register a `PATCH` handler.
        patch
    );
    scoped_method_fn!(
        /// Register a `DELETE` handler.
        delete
    );
    scoped_method_fn!(
        /// Register a `HEAD` handler.
        head
    );
    scoped_method_fn!(
        /// Register an `OPTIONS` handler.
        options
    );

    fn into_inner(self) -> TrackedRouter {
        self.router
    }
}

/// A named set of controllers.
#[derive(Clone)]
pub struct Module {
    name: String,
    controllers: Vec<Arc<dyn Controller>>,
}

impl Module {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controllers: Vec::new(),
        }
    }

    /// Add a controller.
    #[must_use]
    pub fn controller(mut self, controller: impl Controller) -> Self {
        self.controllers.push(Arc::new(controller));
        self
    }

    /// Module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("controllers", &self.controllers.len())
            .finish()
    }
}

/// How and when an application registers its routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Routes registered while building the application.
    Eager,
    /// Routes registered by [`Application::initialize`].
    Deferred,
}

/// The host application.
#[derive(Debug)]
pub struct Application {
    kind: EngineKind,
    modules: Vec<Module>,
    log: Arc<RouteLog>,
    router: Option<Router>,
}

impl Application {
    /// Build an application that registers all routes immediately.
    #[must_use]
    pub fn eager(modules: Vec<Module>) -> Self {
        let mut app = Self::with_kind(EngineKind::Eager, modules);
        app.initialize();
        app
    }

    /// Build an application whose routes are registered later by
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn deferred(modules: Vec<Module>) -> Self {
        Self::with_kind(EngineKind::Deferred, modules)
    }

    fn with_kind(kind: EngineKind, modules: Vec<Module>) -> Self {
        Self {
            kind,
            modules,
            log: Arc::new(RouteLog::new()),
            router: None,
        }
    }

    /// Register every controller route. Does nothing the second time.
    pub fn initialize(&mut self) {
        if self.router.is_some() {
            return;
        }

        let mut router = TrackedRouter::new(self.log.clone());
        for module in &self.modules {
            for controller in &module.controllers {
                let scope = ControllerRoutes::new(controller.base_path(), router);
                router = controller.routes(scope).into_inner();
            }
            tracing::debug!(module = %module.name, "module routes registered");
        }

        self.router = Some(router.into_router());
        tracing::info!(kind = ?self.kind, routes = self.log.entries().len(), "application initialized");
    }

    /// Whether routes have been registered.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.router.is_some()
    }

    /// How this application registers routes.
    #[must_use]
    pub const fn kind(&self) -> EngineKind {
        self.kind
    }

    /// The servable router, initializing first if needed.
    #[must_use]
    pub fn into_router(mut self) -> Router {
        self.initialize();
        self.router.unwrap_or_default()
    }
}

impl RouteEnumeration for Application {
    fn registered_routes(&self) -> Vec<RegisteredRoute> {
        self.log.entries()
    }
}

impl RouteHook for Application {
    fn on_route(&self, hook: RouteHookFn) {
        self.log.add_hook(hook);
    }
}

impl HttpEngine for Application {
    fn as_enumeration(&self) -> Option<&dyn RouteEnumeration> {
        self.is_initialized().then_some(self as &dyn RouteEnumeration)
    }

    fn as_hook(&self) -> Option<&dyn RouteHook> {
        (!self.is_initialized()).then_some(self as &dyn RouteHook)
    }
}

impl ControllerCatalogProvider for Application {
    fn modules(&self) -> Vec<ModuleDescriptor> {
        self.modules
            .iter()
            .map(|module| ModuleDescriptor {
                name: module.name.clone(),
                controllers: module
                    .controllers
                    .iter()
                    .map(|controller| ControllerDescriptor {
                        base_path: controller.base_path().map(str::to_string),
                        method_names: controller
                            .method_names()
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routedoc_core::{add_route_detection, HttpMethod, Route, RouteRegistry, SourceKind};

    struct Notes;

    impl Controller for Notes {
        fn base_path(&self) -> Option<&str> {
            Some("notes")
        }

        fn method_names(&self) -> Vec<&'static str> {
            vec!["list", "get"]
        }

        fn routes(&self, routes: ControllerRoutes) -> ControllerRoutes {
            routes
                .get("", || async { "[]" })
                .get("/{id}", || async { "{}" })
        }
    }

    struct Unmapped;

    impl Controller for Unmapped {
        fn base_path(&self) -> Option<&str> {
            None
        }

        fn method_names(&self) -> Vec<&'static str> {
            vec!["ping"]
        }

        fn routes(&self, routes: ControllerRoutes) -> ControllerRoutes {
            routes.get("/ping", || async { "pong" })
        }
    }

    fn modules() -> Vec<Module> {
        vec![Module::new("NotesModule").controller(Notes).controller(Unmapped)]
    }

    fn expected() -> Vec<Route> {
        vec![
            Route::new(HttpMethod::Get, "/notes"),
            Route::new(HttpMethod::Get, "/notes/:id"),
            Route::new(HttpMethod::Get, "/ping"),
        ]
    }

    #[test]
    fn test_full_path_joining() {
        let log = Arc::new(RouteLog::new());
        let scoped = ControllerRoutes::new(Some("/users/"), TrackedRouter::new(log.clone()));
        assert_eq!(scoped.full_path(""), "/users");
        assert_eq!(scoped.full_path("/{id}"), "/users/{id}");

        let root = ControllerRoutes::new(Some("/"), TrackedRouter::new(log));
        assert_eq!(root.full_path(""), "/");
        assert_eq!(root.full_path("/health"), "/health");
    }

    #[test]
    fn test_eager_application_is_enumerated() {
        let app = Application::eager(modules());
        let registry = RouteRegistry::new();

        let kind = add_route_detection(&app, &registry).unwrap();

        assert_eq!(kind, SourceKind::Enumerated);
        assert_eq!(registry.snapshot(), expected());
    }

    #[test]
    fn test_deferred_application_is_hooked() {
        let mut app = Application::deferred(modules());
        let registry = RouteRegistry::new();

        let kind = add_route_detection(&app, &registry).unwrap();
        assert_eq!(kind, SourceKind::Hooked);
        assert!(registry.is_empty());

        app.initialize();
        assert_eq!(registry.snapshot(), expected());
    }

    #[test]
    fn test_initialize_twice_registers_once() {
        let mut app = Application::eager(modules());
        app.initialize();
        assert_eq!(app.registered_routes().len(), 3);
    }

    #[test]
    fn test_catalog_skips_controllers_without_base_path() {
        let app = Application::deferred(modules());
        let catalog = routedoc_core::ControllerCatalog::from_provider(&app);

        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["notes"]);
        assert_eq!(
            catalog.methods("notes").unwrap(),
            ["list".to_string(), "get".to_string()]
        );
    }
}
