use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Produces the JSON schema of a model type; may contain a local `definitions` map.
pub type SchemaGenerator = Arc<dyn Fn() -> Value + Send + Sync>;

/// Built-in value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// Wrapper types that map to an OpenAPI `type` plus `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKind {
    Integer,
    Long,
    Float,
    Double,
    Byte,
    Binary,
    Date,
    DateTime,
    Password,
}

impl SemanticKind {
    /// `(type, format)` pair.
    #[must_use]
    pub fn type_and_format(self) -> (&'static str, &'static str) {
        match self {
            SemanticKind::Integer => ("integer", "int32"),
            SemanticKind::Long => ("integer", "int64"),
            SemanticKind::Float => ("number", "float"),
            SemanticKind::Double => ("number", "double"),
            SemanticKind::Byte => ("string", "byte"),
            SemanticKind::Binary => ("string", "binary"),
            SemanticKind::Date => ("string", "date"),
            SemanticKind::DateTime => ("string", "date-time"),
            SemanticKind::Password => ("string", "password"),
        }
    }
}

/// A model type and its schema generator.
#[derive(Clone)]
pub struct NamedType {
    name: Arc<str>,
    generator: SchemaGenerator,
}

impl NamedType {
    pub fn new<F>(name: &str, generator: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            generator: Arc::new(generator),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the generator.
    #[must_use]
    pub fn json_schema(&self) -> Value {
        (self.generator)()
    }
}

impl fmt::Debug for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedType").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Declared type of a formal parameter.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Semantic(SemanticKind),
    Named(NamedType),
    Unknown,
}

impl TypeDescriptor {
    #[must_use]
    pub fn string() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::String)
    }

    #[must_use]
    pub fn number() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::Boolean)
    }

    #[must_use]
    pub fn array() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::Array)
    }

    #[must_use]
    pub fn object() -> Self {
        TypeDescriptor::Primitive(PrimitiveKind::Object)
    }

    #[must_use]
    pub fn semantic(kind: SemanticKind) -> Self {
        TypeDescriptor::Semantic(kind)
    }

    /// Model type whose schema comes from `generator`.
    pub fn named<F>(name: &str, generator: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        TypeDescriptor::Named(NamedType::new(name, generator))
    }

    /// Model type without property metadata; its generated schema is `{}`.
    #[must_use]
    pub fn opaque(name: &str) -> Self {
        Self::named(name, || Value::Object(serde_json::Map::new()))
    }

    /// Anything other than the five built-in value types and unknown
    /// (`any` reflects as a plain object). Semantic wrappers are complex.
    #[must_use]
    pub fn is_complex(&self) -> bool {
        !matches!(self, TypeDescriptor::Primitive(_) | TypeDescriptor::Unknown)
    }

    /// JSON schema of a complex type: the generator output for models, `{}`
    /// for everything else.
    #[must_use]
    pub fn json_schema(&self) -> Value {
        match self {
            TypeDescriptor::Named(model) => model.json_schema(),
            _ => Value::Object(serde_json::Map::new()),
        }
    }

    /// Display name used in diagnostics and as the component schema key.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            TypeDescriptor::Primitive(kind) => match kind {
                PrimitiveKind::String => "String",
                PrimitiveKind::Number => "Number",
                PrimitiveKind::Boolean => "Boolean",
                PrimitiveKind::Array => "Array",
                PrimitiveKind::Object => "Object",
            },
            TypeDescriptor::Semantic(kind) => match kind {
                SemanticKind::Integer => "Integer",
                SemanticKind::Long => "Long",
                SemanticKind::Float => "Float",
                SemanticKind::Double => "Double",
                SemanticKind::Byte => "Byte",
                SemanticKind::Binary => "Binary",
                SemanticKind::Date => "Date",
                SemanticKind::DateTime => "DateTime",
                SemanticKind::Password => "Password",
            },
            TypeDescriptor::Named(named) => named.name(),
            TypeDescriptor::Unknown => "unknown",
        }
    }

    /// Whether a parameter of this type may declare an `array` schema.
    #[must_use]
    pub fn accepts_array_schema(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Primitive(PrimitiveKind::Array | PrimitiveKind::Object)
                | TypeDescriptor::Unknown
        )
    }
}
