//! # Schema Documents
//!
//! Schemas authored as JSON or YAML data. Field names are camelCase:
//!
//! ```yaml
//! type: object
//! description: Customer
//! properties:
//!   email:
//!     type: string
//!     regex: "^[^@]+@[^@]+$"
//!   tags:
//!     type: array
//!     items: { type: string }
//!     some: { type: string, in: [vip] }
//! ```
//!
//! The array predicates `some`, `every`, and `none` are written as nested
//! schemas: an element satisfies the predicate when it validates against
//! that schema.
//!
//! Unknown type tags fail with `UnsupportedType`. Any other malformed
//! content fails with `InvalidSchema`, including unknown fields and
//! constraints that belong to another type. Both errors carry the location of
//! the offending node within the schema document.
//!
//! YAML documents are converted to JSON values before parsing, so both
//! formats accept exactly the same schemas.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use shapeguard_core::ValidationError;

use crate::schema::{
    ArraySchema, BooleanSchema, NumberSchema, ObjectSchema, Pattern, Predicate, Schema,
    StringSchema,
};

/// Error loading a schema or data document from disk.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The file parsed, but does not describe a valid schema.
    #[error("invalid schema in '{path}': {source}")]
    InvalidSchema {
        /// Path to the schema document.
        path: String,
        /// The schema-level failure (`UnsupportedType` or `InvalidSchema`).
        #[source]
        source: ValidationError,
    },
}

/// Wire form of one schema node. Which fields apply depends on `type`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSchema {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    nullable: bool,
    description: Option<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    regex: Option<String>,
    date_format: Option<String>,
    starts_with: Option<String>,
    ends_with: Option<String>,
    includes: Option<String>,
    #[serde(rename = "in")]
    allow_list: Option<Vec<Value>>,
    not_in: Option<Vec<Value>>,
    min: Option<f64>,
    max: Option<f64>,
    properties: Option<Map<String, Value>>,
    items: Option<Value>,
    some: Option<Value>,
    every: Option<Value>,
    none: Option<Value>,
}

/// Constraint fields each type tag accepts, besides `type`, `nullable`,
/// and `description`.
const STRING_FIELDS: &[&str] = &[
    "minLength",
    "maxLength",
    "regex",
    "dateFormat",
    "startsWith",
    "endsWith",
    "includes",
    "in",
    "notIn",
];
const NUMBER_FIELDS: &[&str] = &["min", "max", "in", "notIn"];
const OBJECT_FIELDS: &[&str] = &["properties"];
const ARRAY_FIELDS: &[&str] = &["items", "minLength", "maxLength", "some", "every", "none"];

impl RawSchema {
    /// Document names of the constraint fields present on this node.
    fn constraint_fields(&self) -> Vec<&'static str> {
        [
            ("minLength", self.min_length.is_some()),
            ("maxLength", self.max_length.is_some()),
            ("regex", self.regex.is_some()),
            ("dateFormat", self.date_format.is_some()),
            ("startsWith", self.starts_with.is_some()),
            ("endsWith", self.ends_with.is_some()),
            ("includes", self.includes.is_some()),
            ("in", self.allow_list.is_some()),
            ("notIn", self.not_in.is_some()),
            ("min", self.min.is_some()),
            ("max", self.max.is_some()),
            ("properties", self.properties.is_some()),
            ("items", self.items.is_some()),
            ("some", self.some.is_some()),
            ("every", self.every.is_some()),
            ("none", self.none.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Fail on the first constraint that does not apply to this type.
    fn only(&self, accepted: &[&str]) -> Result<(), ValidationError> {
        match self
            .constraint_fields()
            .into_iter()
            .find(|field| !accepted.contains(field))
        {
            Some(field) => Err(ValidationError::invalid_schema(format!(
                "`{field}` does not apply to a {} schema",
                self.tag
            ))
            .at_key(field)),
            None => Ok(()),
        }
    }
}

/// Parse a schema from its JSON representation.
///
/// # Errors
///
/// Returns `UnsupportedType` for an unknown `type` tag and `InvalidSchema`
/// for anything else that does not describe a schema, including unknown
/// fields and constraints that belong to another type.
pub fn parse_schema(document: &Value) -> Result<Schema, ValidationError> {
    let raw = RawSchema::deserialize(document)
        .map_err(|e| ValidationError::invalid_schema(format!("malformed schema: {e}")))?;

    match raw.tag.as_str() {
        "string" => string_schema(raw).map(Schema::String),
        "number" => number_schema(raw).map(Schema::Number),
        "boolean" => {
            raw.only(&[])?;
            Ok(Schema::Boolean(BooleanSchema {
                nullable: raw.nullable,
                description: raw.description,
            }))
        }
        "object" => object_schema(raw).map(Schema::Object),
        "array" => array_schema(raw).map(Schema::Array),
        other => Err(ValidationError::unsupported_type(other)),
    }
}

fn string_schema(raw: RawSchema) -> Result<StringSchema, ValidationError> {
    raw.only(STRING_FIELDS)?;
    let regex = raw
        .regex
        .as_deref()
        .map(Pattern::new)
        .transpose()
        .map_err(|e| e.at_key("regex"))?;

    Ok(StringSchema {
        nullable: raw.nullable,
        description: raw.description,
        min_length: raw.min_length,
        max_length: raw.max_length,
        regex,
        date_format: raw.date_format,
        starts_with: raw.starts_with,
        ends_with: raw.ends_with,
        includes: raw.includes,
        allow_list: string_list(raw.allow_list).map_err(|e| e.at_key("in"))?,
        deny_list: string_list(raw.not_in).map_err(|e| e.at_key("notIn"))?,
    })
}

fn number_schema(raw: RawSchema) -> Result<NumberSchema, ValidationError> {
    raw.only(NUMBER_FIELDS)?;
    Ok(NumberSchema {
        nullable: raw.nullable,
        description: raw.description,
        min: raw.min,
        max: raw.max,
        allow_list: number_list(raw.allow_list).map_err(|e| e.at_key("in"))?,
        deny_list: number_list(raw.not_in).map_err(|e| e.at_key("notIn"))?,
    })
}

fn object_schema(raw: RawSchema) -> Result<ObjectSchema, ValidationError> {
    raw.only(OBJECT_FIELDS)?;
    let mut object = ObjectSchema::new().nullable(raw.nullable);
    object.description = raw.description;
    for (name, child) in raw.properties.unwrap_or_default() {
        let schema = parse_schema(&child).map_err(|e| e.at_key(name.as_str()).at_key("properties"))?;
        object = object.property(name, schema);
    }
    Ok(object)
}

fn array_schema(raw: RawSchema) -> Result<ArraySchema, ValidationError> {
    raw.only(ARRAY_FIELDS)?;
    let items = raw
        .items
        .ok_or_else(|| ValidationError::invalid_schema("array schema requires `items`"))?;
    let items = parse_schema(&items).map_err(|e| e.at_key("items"))?;

    let mut array = ArraySchema::new(items).nullable(raw.nullable);
    array.description = raw.description;
    array.min_length = raw.min_length;
    array.max_length = raw.max_length;
    array.some = predicate(raw.some, "some")?;
    array.every = predicate(raw.every, "every")?;
    array.none = predicate(raw.none, "none")?;
    Ok(array)
}

fn predicate(document: Option<Value>, key: &str) -> Result<Option<Predicate>, ValidationError> {
    document
        .map(|d| parse_schema(&d).map(Predicate::conforms_to))
        .transpose()
        .map_err(|e| e.at_key(key))
}

fn string_list(values: Option<Vec<Value>>) -> Result<Option<Vec<String>>, ValidationError> {
    values
        .map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| match v {
                    Value::String(s) => Ok(s),
                    other => Err(ValidationError::invalid_schema(format!(
                        "expected a string entry, found {other}"
                    ))
                    .at_index(i)),
                })
                .collect()
        })
        .transpose()
}

fn number_list(values: Option<Vec<Value>>) -> Result<Option<Vec<f64>>, ValidationError> {
    values
        .map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    v.as_f64().ok_or_else(|| {
                        ValidationError::invalid_schema(format!(
                            "expected a numeric entry, found {v}"
                        ))
                        .at_index(i)
                    })
                })
                .collect()
        })
        .transpose()
}

/// Parse a schema from YAML (or JSON, which is a YAML subset) text.
///
/// # Errors
///
/// Returns an `InvalidSchema` error if the text is not YAML, or any
/// error [`parse_schema`] reports.
pub fn parse_schema_str(text: &str) -> Result<Schema, ValidationError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)
        .map_err(|e| ValidationError::invalid_schema(format!("invalid YAML: {e}")))?;
    let json = yaml_to_json_value(&yaml).map_err(ValidationError::invalid_schema)?;
    parse_schema(&json)
}

/// Load a schema document from a `.json`, `.yaml`, or `.yml` file.
///
/// # Errors
///
/// Returns `SchemaLoadError::DocumentLoadError` if the file cannot be read
/// or parsed, and `SchemaLoadError::InvalidSchema` if it does not describe
/// a schema.
pub fn load_schema(path: &Path) -> Result<Schema, SchemaLoadError> {
    let document = load_value(path)?;
    parse_schema(&document).map_err(|source| SchemaLoadError::InvalidSchema {
        path: path.display().to_string(),
        source,
    })
}

/// Load a JSON or YAML data file as a JSON value.
///
/// The format is chosen by extension: `.yaml`/`.yml` parse as YAML,
/// everything else as JSON.
///
/// # Errors
///
/// Returns `SchemaLoadError::DocumentLoadError` if the file cannot be read
/// or parsed.
pub fn load_value(path: &Path) -> Result<Value, SchemaLoadError> {
    let load_error = |reason: String| SchemaLoadError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| load_error(format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => {
            let yaml_value: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| load_error(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(&yaml_value)
                .map_err(|e| load_error(format!("YAML-to-JSON conversion failed: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped; non-string map keys are stringified.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
