//! Array validator.

use serde_json::Value;

use shapeguard_core::{ErrorKind, ValidationError};

use super::{dispatch, require};
use crate::schema::ArraySchema;

/// Running state of the three element predicates.
struct Predicates<'a> {
    schema: &'a ArraySchema,
    some_hit: bool,
    every_held: bool,
    none_held: bool,
}

impl<'a> Predicates<'a> {
    fn new(schema: &'a ArraySchema) -> Self {
        Self {
            schema,
            some_hit: false,
            every_held: true,
            none_held: true,
        }
    }

    /// Fold one validated element in. Each predicate stops being evaluated
    /// once its outcome is settled.
    fn observe(&mut self, element: &Value) {
        if let Some(some) = &self.schema.some {
            if !self.some_hit && some.test(element) {
                self.some_hit = true;
            }
        }
        if let Some(every) = &self.schema.every {
            if self.every_held && !every.test(element) {
                self.every_held = false;
            }
        }
        if let Some(none) = &self.schema.none {
            if self.none_held && none.test(element) {
                self.none_held = false;
            }
        }
    }

    /// Names of the configured predicates that ended unsatisfied.
    fn failed(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if self.schema.some.is_some() && !self.some_hit {
            failed.push("some");
        }
        if self.schema.every.is_some() && !self.every_held {
            failed.push("every");
        }
        if self.schema.none.is_some() && !self.none_held {
            failed.push("none");
        }
        failed
    }
}

/// Validate an ordered sequence.
///
/// `minLength`/`maxLength` are checked first. Every element is then
/// validated against `items`: a `null` element is kept as `null` when the
/// item schema is nullable and fails with `MissingValue` otherwise. The
/// first element failure aborts, located under the element index.
/// Predicates are judged once all elements have validated.
pub fn validate_array(value: &Value, schema: &ArraySchema) -> Result<Value, ValidationError> {
    let description = schema.label();
    let Some(value) = require(value, schema.nullable, description)? else {
        return Ok(Value::Null);
    };
    let Value::Array(elements) = value else {
        return Err(ValidationError::type_mismatch(description, "an array"));
    };

    if let Some(min) = schema.min_length {
        if elements.len() < min {
            return Err(ValidationError::new(
                ErrorKind::LengthTooShort,
                format!("{description} must contain at least {min} items"),
            ));
        }
    }

    if let Some(max) = schema.max_length {
        if elements.len() > max {
            return Err(ValidationError::new(
                ErrorKind::LengthTooLong,
                format!("{description} must contain at most {max} items"),
            ));
        }
    }

    let mut predicates = Predicates::new(schema);
    let validated = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let checked = dispatch(element, &schema.items).map_err(|e| e.at_index(index))?;
            predicates.observe(&checked);
            Ok(checked)
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let failed = predicates.failed();
    if !failed.is_empty() {
        return Err(ValidationError::new(
            ErrorKind::PredicateUnsatisfied,
            format!(
                "{description} does not satisfy the {} predicate{}",
                failed.join(", "),
                if failed.len() > 1 { "s" } else { "" }
            ),
        ));
    }

    Ok(Value::Array(validated))
}
