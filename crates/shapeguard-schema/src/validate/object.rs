//! Object validator.

use serde_json::{Map, Value};

use shapeguard_core::ValidationError;

use super::{dispatch, require, MISSING};
use crate::schema::ObjectSchema;

/// Validate a record.
///
/// Properties are validated in declaration order; an absent key counts as a
/// missing value. The first failing property aborts with its error, located
/// under the property name. The result holds exactly the declared
/// properties: undeclared input fields are dropped.
pub fn validate_object(value: &Value, schema: &ObjectSchema) -> Result<Value, ValidationError> {
    let description = schema.label();
    let Some(value) = require(value, schema.nullable, description)? else {
        return Ok(Value::Null);
    };
    let Value::Object(fields) = value else {
        return Err(ValidationError::type_mismatch(description, "an object"));
    };

    let mut validated = Map::new();
    for (name, property) in schema.properties() {
        let field = fields.get(name).unwrap_or(&MISSING);
        let checked = dispatch(field, property).map_err(|e| e.at_key(name.as_str()))?;
        validated.insert(name.clone(), checked);
    }

    Ok(Value::Object(validated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, NumberSchema, StringSchema};
    use serde_json::json;
    use shapeguard_core::ErrorKind;

    #[test]
    fn test_drops_undeclared_fields() {
        let schema = ObjectSchema::new().property("a", NumberSchema::new());
        let result = validate_object(&json!({"a": 1, "b": 2}), &schema).unwrap();
        assert_eq!(result, json!({"a": 1}));
    }

    #[test]
    fn test_rejects_arrays_and_primitives() {
        let schema = ObjectSchema::new();
        for value in [json!([]), json!("x"), json!(0), json!(false)] {
            let err = validate_object(&value, &schema).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        }
    }

    #[test]
    fn test_absent_key_is_missing() {
        let schema = ObjectSchema::new().property("name", StringSchema::new().description("Name"));
        let err = validate_object(&json!({}), &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
        assert_eq!(err.to_string(), "name: Name is required");
    }

    #[test]
    fn test_absent_nullable_key_becomes_null() {
        let schema = ObjectSchema::new()
            .property("nickname", StringSchema::new().nullable(true))
            .property("age", NumberSchema::new());
        let result = validate_object(&json!({"age": 30}), &schema).unwrap();
        assert_eq!(result, json!({"nickname": null, "age": 30}));
    }

    #[test]
    fn test_first_failing_property_in_declaration_order_wins() {
        let schema = ObjectSchema::new()
            .property("b", NumberSchema::new())
            .property("a", NumberSchema::new());
        let err = validate_object(&json!({"a": "x", "b": "y"}), &schema).unwrap_err();
        assert_eq!(err.path().to_string(), "b");
    }

    #[test]
    fn test_nested_error_path() {
        let schema = ObjectSchema::new().property(
            "owner",
            ObjectSchema::new().property(
                "emails",
                ArraySchema::new(StringSchema::new().includes("@")),
            ),
        );
        let input = json!({"owner": {"emails": ["a@b", "nope"]}});
        let err = validate_object(&input, &schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContainmentMismatch);
        assert_eq!(err.path().to_string(), "owner.emails[1]");
    }

    #[test]
    fn test_empty_schema_yields_empty_record() {
        let schema = ObjectSchema::new();
        assert_eq!(validate_object(&json!({"x": 1}), &schema).unwrap(), json!({}));
    }
}
