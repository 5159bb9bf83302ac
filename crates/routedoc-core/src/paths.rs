//! Builds the OpenAPI `paths` object from detected routes.
//!
//! Each route is tagged with the controller it belongs to by matching the
//! first two URL segments, then the first one, against the catalog. Routes
//! are grouped per tag in detection order, and the n-th route of a group
//! takes the n-th method name its controller declares as summary. Colon
//! parameters become `{name}` placeholders plus required string path
//! parameters.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::ControllerCatalog;
use crate::document::{Operation, Parameter, Paths, Responses};
use crate::error::{Result, RouteDocError};
use crate::route::{HttpMethod, Route};

/// Tag given to routes that match no controller.
pub const FALLBACK_TAG: &str = "/";

static PATH_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":[^/]+").expect("path parameter pattern is valid"));

/// A route with its inferred tag and positional summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRoute<'a> {
    /// The underlying route.
    pub route: &'a Route,
    /// Catalog key or [`FALLBACK_TAG`].
    pub tag: &'a str,
    /// Method name at this route's position in its tag group.
    pub summary: Option<String>,
}

/// A URL rewritten to OpenAPI placeholders, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    /// Template using `{name}` placeholders.
    pub template: String,
    /// One entry per colon segment, in URL order.
    pub parameters: Vec<Parameter>,
}

/// Pick the tag for `url`.
///
/// Tries the first two segments joined by `/`, then the first segment
/// alone, and falls back to [`FALLBACK_TAG`]. Longer prefixes are never
/// considered.
#[must_use]
pub fn infer_tag<'c>(catalog: &'c ControllerCatalog, url: &str) -> &'c str {
    let segments: Vec<&str> = url.split('/').skip(1).take(2).collect();

    if let Some(key) = catalog.key_matching(&segments.join("/")) {
        return key;
    }
    if let Some(key) = segments.first().and_then(|first| catalog.key_matching(first)) {
        return key;
    }
    FALLBACK_TAG
}

/// Rewrite `:name` segments to `{name}` and collect them as parameters.
#[must_use]
pub fn normalize_path(url: &str) -> NormalizedPath {
    let mut template = url.to_string();
    let mut parameters = Vec::new();

    for found in PATH_PARAM.find_iter(url) {
        let raw = found.as_str();
        let name = raw[1..].split(':').next().unwrap_or_default();
        template = template.replacen(raw, &format!("{{{name}}}"), 1);
        parameters.push(Parameter::path(name));
    }

    NormalizedPath {
        template,
        parameters,
    }
}

/// Tag every route and assign summaries by position within each tag group.
///
/// Groups are returned in order of first appearance.
///
/// # Errors
///
/// Returns [`RouteDocError::SummaryOutOfRange`] when a controller's group
/// holds more routes than the controller declares methods.
pub fn tag_routes<'a>(
    catalog: &'a ControllerCatalog,
    routes: &'a [Route],
) -> Result<IndexMap<&'a str, Vec<TaggedRoute<'a>>>> {
    let mut groups: IndexMap<&str, Vec<&Route>> = IndexMap::new();
    for route in routes {
        groups.entry(infer_tag(catalog, &route.url)).or_default().push(route);
    }

    let mut tagged_groups = IndexMap::with_capacity(groups.len());
    for (tag, members) in groups {
        // Only the fallback tag can be missing from the catalog.
        let declared = catalog.methods(tag);
        let mut tagged = Vec::with_capacity(members.len());

        for (index, route) in members.into_iter().enumerate() {
            let summary = match declared {
                Some(methods) => Some(methods.get(index).cloned().ok_or_else(|| {
                    RouteDocError::SummaryOutOfRange {
                        tag: tag.to_string(),
                        index,
                        declared: methods.len(),
                    }
                })?),
                None => None,
            };
            tagged.push(TaggedRoute {
                route,
                tag,
                summary,
            });
        }

        tagged_groups.insert(tag, tagged);
    }

    Ok(tagged_groups)
}

/// Build the `paths` object for `routes`.
///
/// # Errors
///
/// Propagates [`RouteDocError::SummaryOutOfRange`] from [`tag_routes`].
pub fn build_paths(catalog: &ControllerCatalog, routes: &[Route]) -> Result<Paths> {
    let groups = tag_routes(catalog, routes)?;
    let mut paths = Paths::new();

    for (tag, tagged) in groups {
        let mut by_url: IndexMap<&str, Vec<&TaggedRoute<'_>>> = IndexMap::new();
        for entry in &tagged {
            by_url.entry(entry.route.url.as_str()).or_default().push(entry);
        }

        for (url, shared) in by_url {
            let normalized = normalize_path(url);
            for entry in shared {
                insert_operation(
                    &mut paths,
                    &normalized,
                    entry.route.method,
                    tag,
                    entry.summary.clone(),
                );
            }
        }
    }

    tracing::debug!(paths = paths.len(), routes = routes.len(), "paths built");
    Ok(paths)
}

fn insert_operation(
    paths: &mut Paths,
    normalized: &NormalizedPath,
    method: HttpMethod,
    tag: &str,
    summary: Option<String>,
) {
    let operation = Operation {
        tags: vec![tag.to_string()],
        summary,
        parameters: normalized.parameters.clone(),
        responses: Responses::default(),
    };
    paths
        .entry(normalized.template.clone())
        .or_default()
        .insert(method.operation_key().to_string(), operation);
}
