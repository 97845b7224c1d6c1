//! String validator.

use serde_json::Value;

use shapeguard_core::{parse_date, ErrorKind, ValidationError};

use super::require;
use crate::schema::StringSchema;

/// Validate a text value.
///
/// Constraint order: `minLength`, `maxLength`, `regex`, `dateFormat`,
/// `startsWith`, `endsWith`, `includes`, `in`, `notIn`. Lengths count
/// Unicode scalar values.
pub fn validate_string(value: &Value, schema: &StringSchema) -> Result<Value, ValidationError> {
    let description = schema.label();
    let Some(value) = require(value, schema.nullable, description)? else {
        return Ok(Value::Null);
    };
    let Value::String(text) = value else {
        return Err(ValidationError::type_mismatch(description, "a string"));
    };

    let length = text.chars().count();

    if let Some(min) = schema.min_length {
        if length < min {
            return Err(ValidationError::new(
                ErrorKind::LengthTooShort,
                format!("{description} must be at least {min} characters long"),
            ));
        }
    }

    if let Some(max) = schema.max_length {
        if length > max {
            return Err(ValidationError::new(
                ErrorKind::LengthTooLong,
                format!("{description} must be at most {max} characters long"),
            ));
        }
    }

    if let Some(pattern) = &schema.regex {
        if !pattern.is_match(text) {
            return Err(ValidationError::new(
                ErrorKind::PatternMismatch,
                format!("{description} must match the pattern {pattern}"),
            ));
        }
    }

    if let Some(format) = &schema.date_format {
        if !parse_date(text, format).is_valid() {
            return Err(ValidationError::new(
                ErrorKind::InvalidDate,
                format!("{description} must be a valid date in the format {format}"),
            ));
        }
    }

    if let Some(prefix) = &schema.starts_with {
        if !text.starts_with(prefix.as_str()) {
            return Err(ValidationError::new(
                ErrorKind::AffixMismatch,
                format!("{description} must start with {prefix:?}"),
            ));
        }
    }

    if let Some(suffix) = &schema.ends_with {
        if !text.ends_with(suffix.as_str()) {
            return Err(ValidationError::new(
                ErrorKind::AffixMismatch,
                format!("{description} must end with {suffix:?}"),
            ));
        }
    }

    if let Some(needle) = &schema.includes {
        if !text.contains(needle.as_str()) {
            return Err(ValidationError::new(
                ErrorKind::ContainmentMismatch,
                format!("{description} must include {needle:?}"),
            ));
        }
    }

    if let Some(allowed) = &schema.allow_list {
        if !allowed.iter().any(|a| a == text) {
            return Err(ValidationError::new(
                ErrorKind::NotInAllowList,
                format!("{description} must be one of {allowed:?}"),
            ));
        }
    }

    if let Some(denied) = &schema.deny_list {
        if denied.iter().any(|d| d == text) {
            return Err(ValidationError::new(
                ErrorKind::InDenyList,
                format!("{description} must not be one of {denied:?}"),
            ));
        }
    }

    Ok(Value::String(text.clone()))
}
