//! Boolean validator.

use serde_json::Value;

use shapeguard_core::ValidationError;

use super::require;
use crate::schema::BooleanSchema;

/// Validate a boolean value.
pub fn validate_boolean(value: &Value, schema: &BooleanSchema) -> Result<Value, ValidationError> {
    let description = schema.label();
    match require(value, schema.nullable, description)? {
        None => Ok(Value::Null),
        Some(Value::Bool(b)) => Ok(Value::Bool(*b)),
        Some(_) => Err(ValidationError::type_mismatch(description, "a boolean")),
    }
}
