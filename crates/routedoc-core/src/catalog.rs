//! Controller catalog: controller base paths and their declared methods.

use indexmap::IndexMap;
use serde::Serialize;

/// Metadata for one controller, as reported by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerDescriptor {
    /// Declared base path; `None` when the host cannot resolve one.
    pub base_path: Option<String>,
    /// Own and inherited method names, in declaration order.
    pub method_names: Vec<String>,
}

impl ControllerDescriptor {
    /// Describe a controller mounted at `base_path`.
    pub fn new<I, S>(base_path: impl Into<String>, method_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_path: Some(base_path.into()),
            method_names: method_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// A host module and the controllers it owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleDescriptor {
    /// Module name, for logging.
    pub name: String,
    /// Controllers in declaration order.
    pub controllers: Vec<ControllerDescriptor>,
}

/// Host-side introspection used to build a [`ControllerCatalog`].
pub trait ControllerCatalogProvider {
    /// Every module known to the host application.
    fn modules(&self) -> Vec<ModuleDescriptor>;
}

/// Mapping from controller base path to its ordered method names.
///
/// Keys keep the order controllers were discovered in; that order also
/// drives the document's `tags` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ControllerCatalog {
    entries: IndexMap<String, Vec<String>>,
}

impl ControllerCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk every module and controller the provider reports.
    ///
    /// Controllers without a base path are skipped.
    pub fn from_provider(provider: &dyn ControllerCatalogProvider) -> Self {
        let mut catalog = Self::new();
        for module in provider.modules() {
            for controller in module.controllers {
                match controller.base_path {
                    Some(base_path) => catalog.insert(base_path, controller.method_names),
                    None => tracing::debug!(
                        module = %module.name,
                        "controller has no base path, omitted from catalog"
                    ),
                }
            }
        }
        tracing::debug!(controllers = catalog.len(), "controller catalog built");
        catalog
    }

    /// Set the method list for `base_path`. Re-inserting an existing key
    /// replaces its methods but keeps its position.
    pub fn insert<I, S>(&mut self, base_path: impl Into<String>, method_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            base_path.into(),
            method_names.into_iter().map(Into::into).collect(),
        );
    }

    /// Method names declared for `base_path`.
    #[must_use]
    pub fn methods(&self, base_path: &str) -> Option<&[String]> {
        self.entries.get(base_path).map(Vec::as_slice)
    }

    /// Whether `base_path` is a catalog key.
    #[must_use]
    pub fn contains(&self, base_path: &str) -> bool {
        self.entries.contains_key(base_path)
    }

    /// Find the key whose slash-trimmed form equals `candidate`.
    ///
    /// Hosts declare base paths as `users`, `/users` or `/users/`; URL
    /// candidates never carry the surrounding slashes.
    #[must_use]
    pub fn key_matching(&self, candidate: &str) -> Option<&str> {
        self.entries
            .keys()
            .find(|key| key.trim_matches('/') == candidate)
            .map(String::as_str)
    }

    /// Base paths in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of controllers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no controller was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for ControllerCatalog
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for (key, methods) in iter {
            catalog.insert(key, methods);
        }
        catalog
    }
}
