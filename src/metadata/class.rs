use crate::schema::TypeDescriptor;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Identity of a controller class inside one [`MetadataRegistry`](super::MetadataRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) usize);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declaration of a controller class: name, optional parent and the declared
/// parameter types of its methods.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub(crate) name: String,
    pub(crate) parent: Option<ClassId>,
    pub(crate) methods: IndexMap<String, Vec<TypeDescriptor>>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            methods: IndexMap::new(),
        }
    }

    /// Inherit from `parent`.
    #[must_use]
    pub fn extends(mut self, parent: ClassId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare a method and the types of its formal parameters.
    #[must_use]
    pub fn method<I>(mut self, name: impl Into<String>, param_types: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        self.methods
            .insert(name.into(), param_types.into_iter().collect());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }
}

/// Owning class of a route: identity plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerRef {
    pub id: ClassId,
    pub name: Arc<str>,
}

impl fmt::Display for ControllerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
