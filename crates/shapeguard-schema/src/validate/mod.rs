//! # Validation
//!
//! Structural recursion over [`Schema`]: the dispatcher picks the
//! type-specific validator for the schema variant, and the object and array
//! validators call back into the dispatcher for their children.
//!
//! ## Policy shared by every validator
//!
//! 1. Missing (`null` or an absent key) is checked first. Non-nullable
//!    schemas fail with `MissingValue`; nullable schemas return `null`
//!    without evaluating any other constraint.
//! 2. The runtime type is checked next (`TypeMismatch`).
//! 3. Constraints run in a fixed order and the first failure is returned.
//!
//! The validated result is always a newly built value; inputs and schemas
//! are only borrowed.
//!
//! Recursion depth is bounded by the depth of the schema, never by the
//! depth of the input.

mod array;
mod boolean;
mod number;
mod object;
mod string;

use serde_json::Value;

use shapeguard_core::ValidationError;

use crate::document::parse_schema;
use crate::schema::Schema;

pub use array::validate_array;
pub use boolean::validate_boolean;
pub use number::validate_number;
pub use object::validate_object;
pub use string::validate_string;

/// Stand-in for an absent object key.
pub(crate) static MISSING: Value = Value::Null;

/// Validate `value` against `schema`, returning the confirmed-valid value.
///
/// # Errors
///
/// Returns the first violated constraint, with the path to the offending
/// value.
pub fn validate(value: &Value, schema: &Schema) -> Result<Value, ValidationError> {
    dispatch(value, schema).map_err(|err| {
        tracing::debug!(
            kind = %err.kind(),
            path = %err.path(),
            schema_type = schema.type_name(),
            "validation failed"
        );
        err
    })
}

/// Validate `value` against a schema given as a JSON document.
///
/// # Errors
///
/// Returns `UnsupportedType` if the document names an unknown type tag,
/// `InvalidSchema` if it is otherwise malformed, or the first data
/// violation.
pub fn validate_with_document(value: &Value, document: &Value) -> Result<Value, ValidationError> {
    let schema = parse_schema(document)?;
    validate(value, &schema)
}

pub(crate) fn dispatch(value: &Value, schema: &Schema) -> Result<Value, ValidationError> {
    tracing::trace!(schema_type = schema.type_name(), "dispatch");
    match schema {
        Schema::String(s) => validate_string(value, s),
        Schema::Number(s) => validate_number(value, s),
        Schema::Boolean(s) => validate_boolean(value, s),
        Schema::Object(s) => validate_object(value, s),
        Schema::Array(s) => validate_array(value, s),
    }
}

/// Apply the missing-value policy.
///
/// `Ok(None)` means the value is missing and accepted; the caller returns
/// `null` without further checks.
pub(crate) fn require<'a>(
    value: &'a Value,
    nullable: bool,
    description: &str,
) -> Result<Option<&'a Value>, ValidationError> {
    match value {
        Value::Null if nullable => Ok(None),
        Value::Null => Err(ValidationError::missing(description)),
        present => Ok(Some(present)),
    }
}
