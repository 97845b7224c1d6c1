//! Number validator.

use serde_json::Value;

use shapeguard_core::{display_number, ErrorKind, ValidationError};

use super::require;
use crate::schema::NumberSchema;

/// Validate a numeric value.
///
/// Constraint order: `min`, `max`, `in`, `notIn`. Bounds are inclusive.
/// The returned value keeps the input's integer or float representation.
pub fn validate_number(value: &Value, schema: &NumberSchema) -> Result<Value, ValidationError> {
    let description = schema.label();
    let Some(value) = require(value, schema.nullable, description)? else {
        return Ok(Value::Null);
    };
    let Some(n) = value.as_f64() else {
        return Err(ValidationError::type_mismatch(description, "a number"));
    };

    if let Some(min) = schema.min {
        if n < min {
            return Err(ValidationError::new(
                ErrorKind::BelowMinimum,
                format!(
                    "{description} must be greater than or equal to {}",
                    display_number(min)
                ),
            ));
        }
    }

    if let Some(max) = schema.max {
        if n > max {
            return Err(ValidationError::new(
                ErrorKind::AboveMaximum,
                format!(
                    "{description} must be less than or equal to {}",
                    display_number(max)
                ),
            ));
        }
    }

    if let Some(allowed) = &schema.allow_list {
        if !allowed.contains(&n) {
            return Err(ValidationError::new(
                ErrorKind::NotInAllowList,
                format!("{description} must be one of [{}]", join(allowed)),
            ));
        }
    }

    if let Some(denied) = &schema.deny_list {
        if denied.contains(&n) {
            return Err(ValidationError::new(
                ErrorKind::InDenyList,
                format!("{description} must not be one of [{}]", join(denied)),
            ));
        }
    }

    Ok(value.clone())
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| display_number(*v))
        .collect::<Vec<_>>()
        .join(", ")
}
