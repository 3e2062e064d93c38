use super::class::{ClassDef, ClassId, ControllerRef};
use crate::error::{SpecError, SpecResult};
use crate::schema::{fill_param_schema, infer_body_schema, TypeDescriptor};
use crate::spec::{HandlerSpec, MediaType, Operation, Parameter, RequestBody, SchemaFragment, Verb};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Media type used when a request body declares no content.
const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Endpoint recorded for a controller method.
#[derive(Debug, Clone, PartialEq)]
pub struct RestEndpoint {
    pub verb: Verb,
    pub path: String,
    pub spec: Option<Operation>,
}

type MethodKey = (ClassId, String);

/// Metadata recorded against controller classes, methods and parameters.
///
/// One instance is owned by the application bootstrap; [`MetadataRegistry::clear`]
/// resets it for test isolation.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    classes: Vec<ClassDef>,
    class_specs: HashMap<ClassId, HandlerSpec>,
    endpoints: HashMap<ClassId, IndexMap<String, RestEndpoint>>,
    parameters: HashMap<MethodKey, BTreeMap<usize, Parameter>>,
    method_parameters: HashMap<MethodKey, Vec<Parameter>>,
    request_bodies: HashMap<MethodKey, BTreeMap<usize, RequestBody>>,
}

impl MetadataRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every class and all recorded metadata.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Register a class declaration and return its identity.
    pub fn define_class(&mut self, def: ClassDef) -> SpecResult<ClassId> {
        if let Some(parent) = def.parent {
            self.class(parent)?;
        }
        let id = ClassId(self.classes.len());
        debug!(class = %def.name, id = %id, parent = ?def.parent, "Defined controller class");
        self.classes.push(def);
        Ok(id)
    }

    pub fn class(&self, id: ClassId) -> SpecResult<&ClassDef> {
        self.classes.get(id.0).ok_or(SpecError::UnknownClass(id))
    }

    pub fn class_name(&self, id: ClassId) -> SpecResult<&str> {
        Ok(self.class(id)?.name())
    }

    pub fn controller_ref(&self, id: ClassId) -> SpecResult<ControllerRef> {
        Ok(ControllerRef {
            id,
            name: Arc::from(self.class_name(id)?),
        })
    }

    /// Class ids from the root ancestor down to `id`.
    pub fn ancestry(&self, id: ClassId) -> SpecResult<Vec<ClassId>> {
        let mut chain = vec![id];
        let mut current = self.class(id)?.parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.class(parent)?.parent;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Declared parameter types of `method`, from the nearest class declaring it.
    pub fn declared_param_types(&self, id: ClassId, method: &str) -> SpecResult<&[TypeDescriptor]> {
        for class in self.ancestry(id)?.into_iter().rev() {
            if let Some(types) = self.class(class)?.methods.get(method) {
                return Ok(types);
            }
        }
        Ok(&[])
    }

    fn declared_param_type(&self, id: ClassId, method: &str, index: usize) -> SpecResult<Option<&TypeDescriptor>> {
        Ok(self.declared_param_types(id, method)?.get(index))
    }

    // ---------------------------------------------------------------------
    // Recording
    // ---------------------------------------------------------------------

    /// Class-level spec (`basePath`, extra paths, components).
    pub fn api(&mut self, id: ClassId, spec: HandlerSpec) -> SpecResult<()> {
        self.class(id)?;
        self.class_specs.insert(id, spec);
        Ok(())
    }

    /// Expose `method` as the operation `verb path`.
    pub fn operation(
        &mut self,
        id: ClassId,
        method: &str,
        verb: Verb,
        path: &str,
        spec: Option<Operation>,
    ) -> SpecResult<()> {
        self.class(id)?;
        self.endpoints.entry(id).or_default().insert(
            method.to_string(),
            RestEndpoint {
                verb,
                path: path.to_string(),
                spec,
            },
        );
        Ok(())
    }

    pub fn get(&mut self, id: ClassId, method: &str, path: &str, spec: Option<Operation>) -> SpecResult<()> {
        self.operation(id, method, Verb::Get, path, spec)
    }

    pub fn post(&mut self, id: ClassId, method: &str, path: &str, spec: Option<Operation>) -> SpecResult<()> {
        self.operation(id, method, Verb::Post, path, spec)
    }

    pub fn put(&mut self, id: ClassId, method: &str, path: &str, spec: Option<Operation>) -> SpecResult<()> {
        self.operation(id, method, Verb::Put, path, spec)
    }

    pub fn patch(&mut self, id: ClassId, method: &str, path: &str, spec: Option<Operation>) -> SpecResult<()> {
        self.operation(id, method, Verb::Patch, path, spec)
    }

    pub fn del(&mut self, id: ClassId, method: &str, path: &str, spec: Option<Operation>) -> SpecResult<()> {
        self.operation(id, method, Verb::Delete, path, spec)
    }

    /// Describe the formal parameter `index` of `method`.
    ///
    /// When the parameter carries no schema, or a schema without `type`, the
    /// declared type fills in `type` and `format`.
    ///
    /// # Errors
    ///
    /// [`SpecError::ArrayTypeMismatch`] when the schema is `type: array` but
    /// the declared type is neither an array, a plain object nor unknown.
    pub fn param(&mut self, id: ClassId, method: &str, index: usize, mut param: Parameter) -> SpecResult<()> {
        let declared = self.declared_param_type(id, method, index)?.cloned();

        if let Some(ty) = &declared {
            if !param.schema.as_ref().is_some_and(|s| s.schema_type.is_some()) {
                let explicit = param.schema.take();
                let had_schema = explicit.is_some();
                let filled = fill_param_schema(ty, explicit.unwrap_or_default());
                if had_schema || filled != SchemaFragment::default() {
                    param.schema = Some(filled);
                }
            }
        }

        if param.schema.as_ref().is_some_and(|s| s.is_array()) {
            if let Some(ty) = declared.as_ref().filter(|ty| !ty.accepts_array_schema()) {
                return Err(SpecError::ArrayTypeMismatch {
                    class: self.class_name(id)?.to_string(),
                    method: method.to_string(),
                    index,
                    declared: ty.type_name().to_string(),
                });
            }
        }

        self.parameters
            .entry((id, method.to_string()))
            .or_default()
            .insert(index, param);
        Ok(())
    }

    /// Describe a parameter on the method itself rather than on one of its
    /// formal parameters. Declarations keep call order.
    pub fn method_param(&mut self, id: ClassId, method: &str, param: Parameter) -> SpecResult<()> {
        self.class(id)?;
        self.method_parameters
            .entry((id, method.to_string()))
            .or_default()
            .push(param);
        Ok(())
    }

    /// Mark the formal parameter `index` as the request body.
    ///
    /// Without content the body defaults to `application/json`; every media
    /// type lacking a schema receives the one inferred from the declared type.
    pub fn request_body(
        &mut self,
        id: ClassId,
        method: &str,
        index: usize,
        body: Option<RequestBody>,
    ) -> SpecResult<()> {
        let mut body = body.unwrap_or_default();
        if body.content.is_empty() {
            body.content
                .insert(DEFAULT_MEDIA_TYPE.to_string(), MediaType::default());
        }

        if let Some(ty) = self.declared_param_type(id, method, index)? {
            let schema = infer_body_schema(ty);
            for media in body.content.values_mut() {
                if media.schema.is_none() {
                    media.schema = Some(schema.clone());
                }
            }
        }

        self.request_bodies
            .entry((id, method.to_string()))
            .or_default()
            .insert(index, body);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    /// Class-level spec recorded on exactly this class.
    pub fn own_class_spec(&self, id: ClassId) -> SpecResult<Option<&HandlerSpec>> {
        self.class(id)?;
        Ok(self.class_specs.get(&id))
    }

    /// Class-level spec of the nearest class in the chain that has one.
    pub fn class_spec(&self, id: ClassId) -> SpecResult<Option<&HandlerSpec>> {
        for class in self.ancestry(id)?.into_iter().rev() {
            if let Some(spec) = self.class_specs.get(&class) {
                return Ok(Some(spec));
            }
        }
        Ok(None)
    }

    /// Endpoints recorded on exactly this class.
    pub fn own_endpoints(&self, id: ClassId) -> SpecResult<Option<&IndexMap<String, RestEndpoint>>> {
        self.class(id)?;
        Ok(self.endpoints.get(&id))
    }

    /// Endpoints across the inheritance chain, keyed by method name.
    ///
    /// Ancestor methods come first; a subclass endpoint for an inherited method
    /// replaces it in place, new subclass methods are appended.
    pub fn all_endpoints(&self, id: ClassId) -> SpecResult<IndexMap<String, RestEndpoint>> {
        let mut merged = IndexMap::new();
        for class in self.ancestry(id)? {
            if let Some(endpoints) = self.endpoints.get(&class) {
                for (method, endpoint) in endpoints {
                    merged.insert(method.clone(), endpoint.clone());
                }
            }
        }
        Ok(merged)
    }

    /// Parameter-level metadata of `method` in parameter-index order, holes
    /// skipped; `None` when no class in the chain recorded any.
    pub fn all_parameters(&self, id: ClassId, method: &str) -> SpecResult<Option<Vec<Parameter>>> {
        let merged = self.merge_by_index(&self.parameters, id, method)?;
        Ok(merged.map(|by_index| by_index.into_values().collect()))
    }

    /// Method-level parameter list from the nearest class that recorded one.
    pub fn method_level_parameters(&self, id: ClassId, method: &str) -> SpecResult<Option<Vec<Parameter>>> {
        for class in self.ancestry(id)?.into_iter().rev() {
            if let Some(params) = self.method_parameters.get(&(class, method.to_string())) {
                return Ok(Some(params.clone()));
            }
        }
        Ok(None)
    }

    /// Request bodies of `method`, in parameter order.
    pub fn all_request_bodies(&self, id: ClassId, method: &str) -> SpecResult<Vec<RequestBody>> {
        Ok(self
            .merge_by_index(&self.request_bodies, id, method)?
            .map(|by_index| by_index.into_values().collect())
            .unwrap_or_default())
    }

    fn merge_by_index<T: Clone>(
        &self,
        channel: &HashMap<MethodKey, BTreeMap<usize, T>>,
        id: ClassId,
        method: &str,
    ) -> SpecResult<Option<BTreeMap<usize, T>>> {
        let mut merged: Option<BTreeMap<usize, T>> = None;
        for class in self.ancestry(id)? {
            if let Some(entries) = channel.get(&(class, method.to_string())) {
                let target = merged.get_or_insert_with(BTreeMap::new);
                for (index, value) in entries {
                    target.insert(*index, value.clone());
                }
            }
        }
        Ok(merged)
    }
}
