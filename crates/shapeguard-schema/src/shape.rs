//! # Typed Shapes
//!
//! Maps a schema's shape to the Rust type of its validated result through
//! the [`Shape`] trait's associated `Output` type:
//!
//! | Shape                   | `Output`              |
//! |-------------------------|-----------------------|
//! | [`StringSchema`]        | `String`              |
//! | [`NumberSchema`]        | `f64`                 |
//! | [`BooleanSchema`]       | `bool`                |
//! | [`ObjectSchema`]        | `Map<String, Value>`  |
//! | [`ArraySchema`]         | `Vec<Value>`          |
//! | [`Record<T>`]           | `T`                   |
//! | [`ListOf<S>`]           | `Vec<S::Output>`      |
//! | [`Nullable<S>`]         | `Option<S::Output>`   |
//! | [`Schema`]              | `Value`               |
//!
//! ```
//! use serde_json::json;
//! use shapeguard_schema::{check, ListOf, Nullable, NumberSchema, StringSchema};
//!
//! let tags = ListOf::new(StringSchema::new().min_length(1));
//! let tags: Vec<String> = check(&json!(["a", "b"]), &tags).unwrap();
//! assert_eq!(tags, vec!["a", "b"]);
//!
//! let limit = Nullable::new(NumberSchema::new().min(0.0));
//! assert_eq!(check(&json!(null), &limit).unwrap(), None);
//! ```
//!
//! Nullability belongs in the type: wrap a shape in [`Nullable`] to get an
//! `Option`. A bare variant whose `nullable` flag is set still validates
//! `null`, but projecting it into the non-optional output fails with
//! `MissingValue`.

use std::any::type_name;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use shapeguard_core::ValidationError;

use crate::schema::{ArraySchema, BooleanSchema, NumberSchema, ObjectSchema, Schema, StringSchema};
use crate::validate::{
    dispatch, validate_array, validate_boolean, validate_number, validate_object, validate_string,
};

/// A schema with a statically known result type.
pub trait Shape {
    /// Rust type of a validated value.
    type Output;

    /// The untyped schema this shape validates with. Used when a shape is
    /// nested inside another one.
    fn to_schema(&self) -> Schema;

    /// Validate `value`, producing the confirmed-valid JSON value.
    fn validate(&self, value: &Value) -> Result<Value, ValidationError>;

    /// Convert a value this shape has already validated into `Output`.
    fn project(&self, validated: Value) -> Result<Self::Output, ValidationError>;
}

/// Validate `value` and return it as the shape's typed output.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn check<S: Shape + ?Sized>(value: &Value, shape: &S) -> Result<S::Output, ValidationError> {
    let validated = shape.validate(value)?;
    shape.project(validated)
}

fn unexpected(description: &str, expected: &str, found: &Value) -> ValidationError {
    match found {
        Value::Null => ValidationError::missing(description),
        _ => ValidationError::type_mismatch(description, expected),
    }
}

impl Shape for Schema {
    type Output = Value;

    fn to_schema(&self) -> Schema {
        self.clone()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        dispatch(value, self)
    }

    fn project(&self, validated: Value) -> Result<Value, ValidationError> {
        Ok(validated)
    }
}

impl Shape for StringSchema {
    type Output = String;

    fn to_schema(&self) -> Schema {
        self.clone().into()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        validate_string(value, self)
    }

    fn project(&self, validated: Value) -> Result<String, ValidationError> {
        match validated {
            Value::String(s) => Ok(s),
            other => Err(unexpected(self.label(), "a string", &other)),
        }
    }
}

impl Shape for NumberSchema {
    type Output = f64;

    fn to_schema(&self) -> Schema {
        self.clone().into()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        validate_number(value, self)
    }

    fn project(&self, validated: Value) -> Result<f64, ValidationError> {
        validated
            .as_f64()
            .ok_or_else(|| unexpected(self.label(), "a number", &validated))
    }
}

impl Shape for BooleanSchema {
    type Output = bool;

    fn to_schema(&self) -> Schema {
        self.clone().into()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        validate_boolean(value, self)
    }

    fn project(&self, validated: Value) -> Result<bool, ValidationError> {
        validated
            .as_bool()
            .ok_or_else(|| unexpected(self.label(), "a boolean", &validated))
    }
}

impl Shape for ObjectSchema {
    type Output = Map<String, Value>;

    fn to_schema(&self) -> Schema {
        self.clone().into()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        validate_object(value, self)
    }

    fn project(&self, validated: Value) -> Result<Map<String, Value>, ValidationError> {
        match validated {
            Value::Object(fields) => Ok(fields),
            other => Err(unexpected(self.label(), "an object", &other)),
        }
    }
}

impl Shape for ArraySchema {
    type Output = Vec<Value>;

    fn to_schema(&self) -> Schema {
        self.clone().into()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        validate_array(value, self)
    }

    fn project(&self, validated: Value) -> Result<Vec<Value>, ValidationError> {
        match validated {
            Value::Array(elements) => Ok(elements),
            other => Err(unexpected(self.label(), "an array", &other)),
        }
    }
}

/// Accepts a missing value, mapping the inner output to `Option`.
#[derive(Debug, Clone)]
pub struct Nullable<S> {
    inner: S,
}

impl<S: Shape> Nullable<S> {
    /// Wrap `inner` so a missing value projects to `None`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped shape.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Shape> Shape for Nullable<S> {
    type Output = Option<S::Output>;

    fn to_schema(&self) -> Schema {
        self.inner.to_schema().with_nullable(true)
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        match value {
            Value::Null => Ok(Value::Null),
            present => self.inner.validate(present),
        }
    }

    fn project(&self, validated: Value) -> Result<Option<S::Output>, ValidationError> {
        match validated {
            Value::Null => Ok(None),
            present => self.inner.project(present).map(Some),
        }
    }
}

/// An array whose elements project through a typed item shape.
#[derive(Debug, Clone)]
pub struct ListOf<S> {
    item: S,
    array: ArraySchema,
}

impl<S: Shape> ListOf<S> {
    /// An array whose elements must match `item`.
    pub fn new(item: S) -> Self {
        let array = ArraySchema::new(item.to_schema());
        Self { item, array }
    }

    /// Adjust the array-level constraints (length bounds, predicates,
    /// description). The item schema always stays the one given to
    /// [`ListOf::new`].
    pub fn configure(mut self, f: impl FnOnce(ArraySchema) -> ArraySchema) -> Self {
        let mut array = f(self.array);
        array.items = Box::new(self.item.to_schema());
        self.array = array;
        self
    }

    /// The element shape.
    pub fn item(&self) -> &S {
        &self.item
    }
}

impl<S: Shape> Shape for ListOf<S> {
    type Output = Vec<S::Output>;

    fn to_schema(&self) -> Schema {
        self.array.clone().into()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        validate_array(value, &self.array)
    }

    fn project(&self, validated: Value) -> Result<Vec<S::Output>, ValidationError> {
        match validated {
            Value::Array(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(i, e)| self.item.project(e).map_err(|err| err.at_index(i)))
                .collect(),
            other => Err(unexpected(self.array.label(), "an array", &other)),
        }
    }
}

/// An object schema whose validated record deserializes into `T`.
///
/// The validated record contains exactly the declared properties, so `T`
/// should declare the same fields (using `Option` for nullable ones).
pub struct Record<T> {
    object: ObjectSchema,
    _output: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Record<T> {
    /// Validate with `object`, then deserialize into `T`.
    pub fn new(object: ObjectSchema) -> Self {
        Self {
            object,
            _output: PhantomData,
        }
    }

    /// The object schema records are validated with.
    pub fn object(&self) -> &ObjectSchema {
        &self.object
    }
}

impl<T> Clone for Record<T> {
    fn clone(&self) -> Self {
        Self {
            object: self.object.clone(),
            _output: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Record<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("object", &self.object)
            .field("output", &type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Shape for Record<T> {
    type Output = T;

    fn to_schema(&self) -> Schema {
        self.object.clone().into()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        validate_object(value, &self.object)
    }

    fn project(&self, validated: Value) -> Result<T, ValidationError> {
        if validated.is_null() {
            return Err(ValidationError::missing(self.object.label()));
        }
        serde_json::from_value(validated).map_err(|e| {
            ValidationError::type_mismatch(
                self.object.label(),
                &format!("convertible to {}: {e}", type_name::<T>()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use shapeguard_core::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Customer {
        name: String,
        age: f64,
        nickname: Option<String>,
        tags: Vec<String>,
    }

    fn customer_shape() -> Record<Customer> {
        Record::new(
            ObjectSchema::new()
                .property("name", StringSchema::new().min_length(1))
                .property("age", NumberSchema::new().min(0.0))
                .property("nickname", StringSchema::new().nullable(true))
                .property("tags", ArraySchema::new(StringSchema::new())),
        )
    }

    #[test]
    fn test_record_projection() {
        let input = json!({"name": "Ada", "age": 36, "tags": ["math"], "ignored": 1});
        let customer = check(&input, &customer_shape()).unwrap();
        assert_eq!(
            customer,
            Customer {
                name: "Ada".into(),
                age: 36.0,
                nickname: None,
                tags: vec!["math".into()],
            }
        );
    }

    #[test]
    fn test_record_reports_validation_error() {
        let input = json!({"name": "", "age": 36, "tags": []});
        let err = check(&input, &customer_shape()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthTooShort);
        assert_eq!(err.path().to_string(), "name");
    }

    #[test]
    fn test_primitive_outputs() {
        assert_eq!(check(&json!("x"), &StringSchema::new()).unwrap(), "x");
        assert_eq!(check(&json!(3), &NumberSchema::new()).unwrap(), 3.0);
        assert!(check(&json!(true), &BooleanSchema::new()).unwrap());
    }

    #[test]
    fn test_nullable_output() {
        let shape = Nullable::new(BooleanSchema::new());
        assert_eq!(check(&json!(null), &shape).unwrap(), None);
        assert_eq!(check(&json!(false), &shape).unwrap(), Some(false));
        assert!(shape.to_schema().is_nullable());
    }

    #[test]
    fn test_nullable_flag_without_wrapper_cannot_project() {
        let shape = NumberSchema::new().nullable(true);
        let err = check(&json!(null), &shape).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn test_list_of_nested_shapes() {
        let shape = ListOf::new(ListOf::new(NumberSchema::new()));
        let grid: Vec<Vec<f64>> = check(&json!([[1, 2], [3]]), &shape).unwrap();
        assert_eq!(grid, vec![vec![1.0, 2.0], vec![3.0]]);
    }

    #[test]
    fn test_list_of_nullable_items() {
        let shape = ListOf::new(Nullable::new(NumberSchema::new()));
        let values = check(&json!([1, null, 2]), &shape).unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(2.0)]);
    }

    #[test]
    fn test_list_configure_keeps_items() {
        let shape = ListOf::new(NumberSchema::new())
            .configure(|a| a.min_length(2).every(|v| v.as_f64().is_some_and(|n| n > 0.0)));
        assert!(check(&json!([1, 2]), &shape).is_ok());
        assert_eq!(
            check(&json!([1]), &shape).unwrap_err().kind(),
            ErrorKind::LengthTooShort
        );
        assert_eq!(
            check(&json!([1, -2]), &shape).unwrap_err().kind(),
            ErrorKind::PredicateUnsatisfied
        );
        assert_eq!(
            check(&json!(["1", 2]), &shape).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_dynamic_schema_shape() {
        let schema: Schema = ObjectSchema::new().property("a", NumberSchema::new()).into();
        assert_eq!(check(&json!({"a": 1, "b": 2}), &schema).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_record_type_mismatch_on_incompatible_target() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrong {
            name: u32,
        }
        let shape: Record<Wrong> =
            Record::new(ObjectSchema::new().property("name", StringSchema::new()));
        let err = check(&json!({"name": "Ada"}), &shape).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
