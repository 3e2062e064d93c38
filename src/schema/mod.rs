//! # Schema Module
//!
//! Maps declared parameter types to [`SchemaFragment`]s and converts JSON
//! schemas produced by external generators into the OpenAPI dialect.
//!
//! ## Type descriptors
//!
//! Controller methods declare the type of each formal parameter with a
//! [`TypeDescriptor`]:
//!
//! - [`TypeDescriptor::Primitive`] - `string`, `number`, `boolean`, `array`, `object`
//! - [`TypeDescriptor::Semantic`] - wrappers carrying an OpenAPI `format`
//!   (`integer/int32`, `integer/int64`, `string/date-time`, ...)
//! - [`TypeDescriptor::Named`] - a model type plus the generator producing its JSON schema
//! - [`TypeDescriptor::Unknown`] - no type information (`any`)
//!
//! ## Conversion
//!
//! [`json_to_schema`] rewrites `$ref`s from the generator's `definitions`
//! namespace into `components/schemas`, drops keywords that have no OpenAPI
//! counterpart and rejects arrays without `items`. [`harvest_schema`] also
//! lifts the nested `definitions` into a components map.

mod convert;
mod descriptor;
mod infer;

pub use convert::{harvest_schema, json_to_schema, rewrite_ref, IGNORED_KEYWORDS};
pub use descriptor::{NamedType, PrimitiveKind, SchemaGenerator, SemanticKind, TypeDescriptor};
pub use infer::{fill_param_schema, infer_body_schema, infer_param_schema, COMPONENTS_SCHEMAS_PREFIX};
