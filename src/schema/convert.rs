use crate::error::{SpecError, SpecResult};
use crate::spec::{AdditionalProperties, SchemaFragment};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// JSON-schema keywords without an OpenAPI counterpart; dropped on conversion.
pub const IGNORED_KEYWORDS: [&str; 5] = [
    "anyOf",
    "oneOf",
    "additionalItems",
    "defaultProperties",
    "typeof",
];

/// Convert a JSON schema tree into a [`SchemaFragment`].
///
/// Keywords without special handling are copied verbatim. Non-object input
/// yields an empty fragment.
///
/// # Errors
///
/// [`SpecError::MissingItems`] when any (nested) schema has `type: "array"`
/// and no `items`.
pub fn json_to_schema(json: &Value) -> SpecResult<SchemaFragment> {
    let Some(obj) = json.as_object() else {
        return Ok(SchemaFragment::default());
    };

    let mut result = SchemaFragment::default();
    for (keyword, value) in obj {
        if IGNORED_KEYWORDS.contains(&keyword.as_str()) {
            continue;
        }
        match keyword.as_str() {
            "type" => {
                if value.as_str() == Some("array") && !has_items(obj) {
                    return Err(SpecError::MissingItems);
                }
                result.schema_type = match value {
                    Value::String(s) => Some(s.clone()),
                    Value::Array(types) => types.first().and_then(Value::as_str).map(str::to_string),
                    _ => None,
                };
            }
            "format" if value.is_string() => {
                result.format = value.as_str().map(str::to_string);
            }
            "allOf" if value.is_array() => {
                let all_of = value
                    .as_array()
                    .into_iter()
                    .flatten()
                    .map(json_to_schema)
                    .collect::<SpecResult<Vec<_>>>()?;
                result.all_of = Some(all_of);
            }
            "properties" if value.is_object() => {
                result.properties = Some(convert_map(value)?);
            }
            "definitions" if value.is_object() => {
                result.definitions = Some(convert_map(value)?);
            }
            "additionalProperties" => {
                if !value.is_boolean() {
                    result.additional_properties =
                        Some(AdditionalProperties::Schema(Box::new(json_to_schema(value)?)));
                }
            }
            "items" => {
                let items = match value {
                    Value::Array(list) => list.first().unwrap_or(&Value::Null),
                    other => other,
                };
                result.items = Some(Box::new(json_to_schema(items)?));
            }
            "enum" if value.is_array() => {
                let mut values = Vec::new();
                for element in value.as_array().into_iter().flatten() {
                    values.push(convert_enum_element(element)?);
                }
                result.enum_values = Some(values);
            }
            "$ref" if value.is_string() => {
                result.reference = value.as_str().map(rewrite_ref);
            }
            _ => {
                result.extensions.insert(keyword.clone(), value.clone());
            }
        }
    }

    Ok(result)
}

/// [`json_to_schema`] plus lifting of nested `definitions` into `schemas`.
///
/// The returned fragment carries no `definitions`.
pub fn harvest_schema(
    json: &Value,
    schemas: &mut IndexMap<String, SchemaFragment>,
) -> SpecResult<SchemaFragment> {
    let mut schema = json_to_schema(json)?;
    if let Some(definitions) = schema.definitions.take() {
        schemas.extend(definitions);
    }
    Ok(schema)
}

/// Point a generator `$ref` at `components/schemas`.
///
/// Both `#definitions/X` and `#/definitions/X` are rewritten; other references
/// are kept.
#[must_use]
pub fn rewrite_ref(reference: &str) -> String {
    if let Some(name) = reference.strip_prefix("#/definitions/") {
        return format!("#/components/schemas/{name}");
    }
    reference.replacen("#definitions", "#components/schemas", 1)
}

fn has_items(obj: &Map<String, Value>) -> bool {
    obj.get("items").is_some_and(|items| !items.is_null())
}

fn convert_map(value: &Value) -> SpecResult<IndexMap<String, SchemaFragment>> {
    value
        .as_object()
        .into_iter()
        .flatten()
        .map(|(name, schema)| Ok((name.clone(), json_to_schema(schema)?)))
        .collect()
}

// Primitive and null entries are kept as-is; objects are schemas themselves.
fn convert_enum_element(element: &Value) -> SpecResult<Value> {
    if !element.is_object() {
        return Ok(element.clone());
    }
    let schema = json_to_schema(element)?;
    Ok(serde_json::to_value(&schema).unwrap_or_else(|_| element.clone()))
}
