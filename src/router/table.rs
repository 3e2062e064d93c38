use super::path::{join_path, PathTemplate};
use crate::dispatcher::{ParsedRequest, RouteRecord};
use crate::error::{SpecError, SpecResult};
use crate::metadata::ControllerRef;
use crate::spec::{HandlerSpec, Operation, Paths, Verb};
use http::Method;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Lookups slower than this are logged at `warn`.
const SLOW_MATCH_THRESHOLD: Duration = Duration::from_millis(1);

/// One registered operation: verb, full path and owning controller method.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub verb: Verb,
    /// Full path with the controller's base path joined in front.
    pub path: Arc<str>,
    pub template: PathTemplate,
    pub operation: Arc<Operation>,
    pub owner: ControllerRef,
    pub method_name: Arc<str>,
}

impl RouteEntry {
    /// `<ClassName>.<methodName>`
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}.{}", self.owner.name, self.method_name)
    }
}

/// Append-only table of every operation registered by every controller.
///
/// Lookups scan entries in registration order; the first entry whose verb and
/// template match wins. Registration takes `&mut self`, lookups `&self`, so a
/// built table can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every operation of `spec` for `owner`.
    ///
    /// Returns the number of routes added. Nothing is added when an operation
    /// lacks a method name.
    pub fn register_controller(&mut self, owner: &ControllerRef, spec: &HandlerSpec) -> SpecResult<usize> {
        self.register_controller_at("", owner, spec)
    }

    /// Like [`register_controller`](Self::register_controller), with `prefix`
    /// joined in front of the spec's own base path.
    pub fn register_controller_at(
        &mut self,
        prefix: &str,
        owner: &ControllerRef,
        spec: &HandlerSpec,
    ) -> SpecResult<usize> {
        let base_path = join_path(prefix, spec.base_path.as_deref().unwrap_or_default());

        let mut staged = Vec::with_capacity(spec.paths.values().map(|item| item.len()).sum());
        for (path, item) in &spec.paths {
            for (verb, operation) in item {
                let method_name =
                    operation
                        .handler_name()
                        .ok_or_else(|| SpecError::MissingOperationName {
                            class: owner.name.to_string(),
                            verb: *verb,
                            path: path.clone(),
                        })?;
                let full_path = join_path(&base_path, path);
                debug!(
                    controller = %owner,
                    method = %verb,
                    path = %full_path,
                    handler = %method_name,
                    "Staged route"
                );
                staged.push(RouteEntry {
                    verb: *verb,
                    template: PathTemplate::compile(&full_path),
                    path: Arc::from(full_path),
                    operation: Arc::new(operation.clone()),
                    owner: owner.clone(),
                    method_name: Arc::from(method_name),
                });
            }
        }

        let added = staged.len();
        self.entries.extend(staged);
        info!(
            controller = %owner,
            base_path = %base_path,
            routes_added = added,
            routes_count = self.entries.len(),
            "Registered controller routes"
        );
        Ok(added)
    }

    /// Find the route for a parsed request.
    #[must_use]
    pub fn find(&self, request: &ParsedRequest) -> Option<RouteRecord> {
        self.route(&request.method, &request.path)
    }

    /// Find the route for `method` and `path`; `path` is normalized first.
    ///
    /// A miss is `None`, never an error.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteRecord> {
        debug!(method = %method, path = %path, "Route match attempt");

        let Ok(verb) = Verb::try_from(method) else {
            warn!(method = %method, path = %path, "Unsupported method, no route matched");
            return None;
        };

        let match_start = Instant::now();
        let normalized = join_path("", path);
        let found = self.entries.iter().find_map(|entry| {
            if entry.verb != verb {
                return None;
            }
            entry
                .template
                .match_path(&normalized)
                .map(|params| (entry, params))
        });
        let match_duration = match_start.elapsed();

        let Some((entry, path_params)) = found else {
            warn!(
                method = %method,
                path = %normalized,
                duration_us = match_duration.as_micros(),
                "No route matched"
            );
            return None;
        };

        if match_duration > SLOW_MATCH_THRESHOLD {
            warn!(
                method = %method,
                path = %normalized,
                handler = %entry.describe(),
                route_pattern = %entry.path,
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %method,
                path = %normalized,
                handler = %entry.describe(),
                route_pattern = %entry.path,
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Some(RouteRecord {
            verb: entry.verb,
            path_template: Arc::clone(&entry.path),
            operation: Arc::clone(&entry.operation),
            owner: entry.owner.clone(),
            method_name: Arc::clone(&entry.method_name),
            path_params,
        })
    }

    /// Merged `paths` view of every registered operation.
    ///
    /// A later registration for the same path and verb replaces the earlier
    /// one in the view, although lookups still resolve to the first.
    #[must_use]
    pub fn describe_api_paths(&self) -> Paths {
        let mut paths = Paths::new();
        for entry in &self.entries {
            paths
                .entry(entry.path.to_string())
                .or_default()
                .insert(entry.verb, entry.operation.as_ref().clone());
        }
        paths
    }

    /// Registered entries in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Log every registered route at `info`.
    pub fn dump_routes(&self) {
        info!(routes_count = self.entries.len(), "Routing table");
        for entry in &self.entries {
            info!(
                method = %entry.verb,
                path = %entry.path,
                handler = %entry.describe(),
                "Route"
            );
        }
    }
}
