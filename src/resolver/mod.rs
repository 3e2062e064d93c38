//! # Resolver Module
//!
//! Merges the class, method and parameter metadata recorded in a
//! [`MetadataRegistry`] into one normalized [`HandlerSpec`] per controller
//! class.
//!
//! ## Algorithm
//!
//! 1. Deep-copy the class-level spec (nearest in the inheritance chain) or
//!    start from an empty one. `basePath` and path keys are normalized.
//! 2. For every endpoint aggregated across the chain, copy its operation
//!    (`{responses: {}}` when none was given).
//! 3. Reject methods declaring parameters both on the method and on its
//!    formal parameters. Otherwise take the parameter-level list with holes
//!    dropped, or the method-level list.
//! 4. Attach the single request body; more than one is an error.
//! 5. Tag the operation with `x-operation-name`.
//! 6. Insert at `paths[path][verb]`; a later endpoint replaces an earlier one.
//! 7. For the first parameter whose type is not a built-in value type (models
//!    and semantic wrappers alike), store its converted schema, plus lifted
//!    definitions, in `components.schemas` under the type name. Later
//!    parameters are not harvested, even when the first hit is a wrapper.
//! 8. Cache the result by class identity.

#[cfg(test)]
mod tests;

use crate::error::{SpecError, SpecResult};
use crate::metadata::{ClassId, MetadataRegistry};
use crate::router::join_path;
use crate::schema::harvest_schema;
use crate::spec::{HandlerSpec, Paths};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves controller classes to [`HandlerSpec`]s, memoized per class.
///
/// The cache is keyed by exact class identity: a subclass is resolved on its
/// own and never shares the entry of its parent.
#[derive(Debug, Default)]
pub struct MetadataResolver {
    cache: HashMap<ClassId, Arc<HandlerSpec>>,
}

impl MetadataResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spec of `class`, computed on first use.
    ///
    /// # Errors
    ///
    /// - [`SpecError::MixedParameterDeclarations`]
    /// - [`SpecError::MultipleRequestBodies`]
    /// - [`SpecError::MissingItems`] from a model's generated schema
    /// - [`SpecError::UnknownClass`]
    pub fn resolve(&mut self, registry: &MetadataRegistry, class: ClassId) -> SpecResult<Arc<HandlerSpec>> {
        if let Some(spec) = self.cache.get(&class) {
            debug!(class = %class, "Controller spec served from cache");
            return Ok(Arc::clone(spec));
        }

        let spec = Arc::new(build_spec(registry, class)?);
        info!(
            class = %registry.class_name(class)?,
            base_path = ?spec.base_path,
            paths_count = spec.paths.len(),
            "Resolved controller spec"
        );
        self.cache.insert(class, Arc::clone(&spec));
        Ok(spec)
    }

    /// Previously resolved spec of `class`, without resolving.
    #[must_use]
    pub fn cached(&self, class: ClassId) -> Option<Arc<HandlerSpec>> {
        self.cache.get(&class).map(Arc::clone)
    }

    /// Forget every resolved spec.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn build_spec(registry: &MetadataRegistry, class: ClassId) -> SpecResult<HandlerSpec> {
    let class_name = registry.class_name(class)?;
    let mut spec = registry.class_spec(class)?.cloned().unwrap_or_default();
    spec.base_path = spec.base_path.as_deref().map(|base| join_path("", base));
    spec.paths = normalize_paths(std::mem::take(&mut spec.paths));

    for (method, endpoint) in registry.all_endpoints(class)? {
        debug!(class = %class_name, method = %method, verb = %endpoint.verb, path = %endpoint.path, "Resolving endpoint");
        let mut operation = endpoint.spec.unwrap_or_default();

        let parameter_level = registry.all_parameters(class, &method)?;
        let method_level = registry.method_level_parameters(class, &method)?;
        match (parameter_level, method_level) {
            (Some(params), Some(_)) if !params.is_empty() => {
                return Err(SpecError::MixedParameterDeclarations {
                    class: class_name.to_string(),
                    method,
                });
            }
            (Some(params), _) => operation.parameters = Some(params),
            (None, Some(list)) => operation.parameters = Some(list),
            (None, None) => {}
        }

        let mut bodies = registry.all_request_bodies(class, &method)?;
        if bodies.len() > 1 {
            return Err(SpecError::MultipleRequestBodies {
                class: class_name.to_string(),
                method,
                count: bodies.len(),
            });
        }
        if let Some(body) = bodies.pop() {
            operation.request_body = Some(body);
        }

        operation.operation_name = Some(method.clone());

        let path = join_path("", &endpoint.path);
        let item = spec.paths.entry(path.clone()).or_default();
        if item.insert(endpoint.verb, operation).is_some() {
            debug!(
                class = %class_name,
                method = %method,
                verb = %endpoint.verb,
                path = %path,
                "Operation replaced an earlier one at the same path and verb"
            );
        }

        let declared = registry.declared_param_types(class, &method)?;
        if let Some(complex) = declared.iter().find(|ty| ty.is_complex()) {
            debug!(class = %class_name, method = %method, model = %complex.type_name(), "Generating model schema");
            let schemas = spec.schemas_mut();
            let schema = harvest_schema(&complex.json_schema(), schemas)?;
            schemas.insert(complex.type_name().to_string(), schema);
        }
    }

    Ok(spec)
}

fn normalize_paths(paths: Paths) -> Paths {
    let mut normalized = Paths::with_capacity(paths.len());
    for (path, item) in paths {
        normalized.entry(join_path("", &path)).or_default().extend(item);
    }
    normalized
}
