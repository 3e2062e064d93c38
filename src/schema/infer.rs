use super::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::spec::SchemaFragment;

/// Prefix of `$ref`s pointing at component schemas.
pub const COMPONENTS_SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// Schema of a non-body parameter with the given declared type.
///
/// Arrays map to `{type: array}` without `items`: the item type is not known
/// at this layer. Model and unknown types produce an empty fragment.
#[must_use]
pub fn infer_param_schema(ty: &TypeDescriptor) -> SchemaFragment {
    fill_param_schema(ty, SchemaFragment::default())
}

/// Complete `schema` with the type and format implied by `ty`.
///
/// Values already present in `schema` win; a schema carrying both `type` and
/// `format` is returned untouched.
#[must_use]
pub fn fill_param_schema(ty: &TypeDescriptor, mut schema: SchemaFragment) -> SchemaFragment {
    if schema.schema_type.is_some() && schema.format.is_some() {
        return schema;
    }

    let (schema_type, format) = match ty {
        TypeDescriptor::Primitive(kind) => {
            let schema_type = match kind {
                PrimitiveKind::String => "string",
                PrimitiveKind::Number => "number",
                PrimitiveKind::Boolean => "boolean",
                PrimitiveKind::Array => "array",
                PrimitiveKind::Object => "object",
            };
            (Some(schema_type), None)
        }
        TypeDescriptor::Semantic(kind) => {
            let (schema_type, format) = kind.type_and_format();
            (Some(schema_type), Some(format))
        }
        TypeDescriptor::Named(_) | TypeDescriptor::Unknown => (None, None),
    };

    if schema.schema_type.is_none() {
        schema.schema_type = schema_type.map(str::to_string);
    }
    if schema.format.is_none() {
        schema.format = format.map(str::to_string);
    }
    schema
}

/// Schema of a request body with the given declared type.
///
/// Types without a JSON type (models) are referenced as
/// `#/components/schemas/<TypeName>`.
#[must_use]
pub fn infer_body_schema(ty: &TypeDescriptor) -> SchemaFragment {
    let mut schema = infer_param_schema(ty);
    if schema.schema_type.is_none() {
        schema.reference = Some(format!("{COMPONENTS_SCHEMAS_PREFIX}{}", ty.type_name()));
    }
    schema
}
