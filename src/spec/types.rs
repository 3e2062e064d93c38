use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Operations of one path template, keyed by verb.
pub type PathItem = IndexMap<Verb, Operation>;

/// All path templates of a spec, in declaration order.
pub type Paths = IndexMap<String, PathItem>;

/// Vendor extensions and keywords without a dedicated field.
pub type Extensions = IndexMap<String, Value>;

/// HTTP verb of an operation, lowercase on the wire (`get`, `post`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Verb {
    /// Lowercase wire name (`"get"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Put => "put",
            Verb::Post => "post",
            Verb::Delete => "delete",
            Verb::Options => "options",
            Verb::Head => "head",
            Verb::Patch => "patch",
            Verb::Trace => "trace",
        }
    }

    /// Whether a request method is this verb.
    #[must_use]
    pub fn matches(self, method: &Method) -> bool {
        Verb::try_from(method).is_ok_and(|v| v == self)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.as_str().to_ascii_uppercase())
    }
}

/// Error returned when a string or method is not a supported verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVerb(pub String);

impl fmt::Display for UnknownVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported HTTP verb '{}'", self.0)
    }
}

impl std::error::Error for UnknownVerb {}

impl FromStr for Verb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "put" => Ok(Verb::Put),
            "post" => Ok(Verb::Post),
            "delete" => Ok(Verb::Delete),
            "options" => Ok(Verb::Options),
            "head" => Ok(Verb::Head),
            "patch" => Ok(Verb::Patch),
            "trace" => Ok(Verb::Trace),
            _ => Err(UnknownVerb(s.to_string())),
        }
    }
}

impl TryFrom<&Method> for Verb {
    type Error = UnknownVerb;

    /// Only the standard method constants map to a verb; extension methods
    /// never do, whatever their spelling.
    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        [
            (Method::GET, Verb::Get),
            (Method::PUT, Verb::Put),
            (Method::POST, Verb::Post),
            (Method::DELETE, Verb::Delete),
            (Method::OPTIONS, Verb::Options),
            (Method::HEAD, Verb::Head),
            (Method::PATCH, Verb::Patch),
            (Method::TRACE, Verb::Trace),
        ]
        .into_iter()
        .find_map(|(standard, verb)| (standard == *method).then_some(verb))
        .ok_or_else(|| UnknownVerb(method.as_str().to_string()))
    }
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => Method::GET,
            Verb::Put => Method::PUT,
            Verb::Post => Method::POST,
            Verb::Delete => Method::DELETE,
            Verb::Options => Method::OPTIONS,
            Verb::Head => Method::HEAD,
            Verb::Patch => Method::PATCH,
            Verb::Trace => Method::TRACE,
        }
    }
}

/// Origin of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

/// `additionalProperties` is either a flag or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Flag(bool),
    Schema(Box<SchemaFragment>),
}

/// JSON-schema-like description of a value's shape (OpenAPI schema object subset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFragment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaFragment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaFragment>>,
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(rename = "allOf", default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaFragment>>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Local definitions produced by schema generators; lifted into
    /// `components.schemas` during resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, SchemaFragment>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl SchemaFragment {
    /// Fragment with only `type` set.
    #[must_use]
    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// Fragment with `type` and `format` set.
    #[must_use]
    pub fn of_type_and_format(schema_type: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            format: Some(format.into()),
            ..Self::default()
        }
    }

    /// `{ "$ref": "<reference>" }`.
    #[must_use]
    pub fn reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    /// `{ "type": "array", "items": <items> }`.
    #[must_use]
    pub fn array_of(items: SchemaFragment) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.schema_type.as_deref() == Some("array")
    }
}

/// Parameter of an operation (`query`, `header`, `path` or `cookie`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaFragment>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: None,
            description: None,
            schema: None,
            extensions: Extensions::new(),
        }
    }

    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// Path parameters are always required.
    #[must_use]
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path).required(true)
    }

    #[must_use]
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }

    #[must_use]
    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Cookie)
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: SchemaFragment) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Array parameter whose items follow `items`.
    #[must_use]
    pub fn array(name: impl Into<String>, location: ParameterLocation, items: SchemaFragment) -> Self {
        Self::new(name, location).with_schema(SchemaFragment::array_of(items))
    }
}

/// Body descriptor for one media type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaFragment>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Request body of an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl RequestBody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Adds a media type; `schema` may be left for inference.
    #[must_use]
    pub fn content(mut self, media_type: impl Into<String>, schema: Option<SchemaFragment>) -> Self {
        self.content.insert(
            media_type.into(),
            MediaType {
                schema,
                extensions: Extensions::new(),
            },
        );
        self
    }
}

/// One verb+path handler entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, Value>,
    /// Name of the controller method implementing this operation.
    #[serde(rename = "x-operation-name", default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Operation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn response(mut self, status: impl Into<String>, response: Value) -> Self {
        self.responses.insert(status.into(), response);
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.get_or_insert_with(Vec::new).push(parameter);
        self
    }

    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        self.parameters.as_deref().unwrap_or_default()
    }

    /// Method name to dispatch to: `x-operation-name`, falling back to `operationId`.
    #[must_use]
    pub fn handler_name(&self) -> Option<&str> {
        self.operation_name
            .as_deref()
            .or(self.operation_id.as_deref())
    }
}

/// `components` section; only schemas are produced by resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaFragment>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Normalized API specification of one controller class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandlerSpec {
    /// Prefix for every path of the controller.
    #[serde(rename = "basePath", default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl HandlerSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Adds (or replaces) the operation at `path`/`verb`.
    #[must_use]
    pub fn with_operation(mut self, verb: Verb, path: impl Into<String>, operation: Operation) -> Self {
        self.paths.entry(path.into()).or_default().insert(verb, operation);
        self
    }

    #[must_use]
    pub fn operation(&self, path: &str, verb: Verb) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.get(&verb))
    }

    /// Schemas map, created on first use.
    pub fn schemas_mut(&mut self) -> &mut IndexMap<String, SchemaFragment> {
        &mut self.components.get_or_insert_with(Components::default).schemas
    }

    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&SchemaFragment> {
        self.components.as_ref().and_then(|c| c.schemas.get(name))
    }
}
