//! # shapeguard-schema — Schema Model & Runtime Validation
//!
//! Checks untyped JSON values against declarative schemas and returns a
//! newly built, confirmed-valid value, or the first violated constraint.
//!
//! ## Schemas (`schema`)
//!
//! A [`Schema`] is one of five variants: [`StringSchema`], [`NumberSchema`],
//! [`BooleanSchema`], [`ObjectSchema`], [`ArraySchema`]. Schemas are plain
//! data, evaluated directly. They can be built in code or parsed from JSON
//! and YAML documents ([`document`]).
//!
//! ## Validation (`validate`)
//!
//! - [`validate`] — the dispatcher; the only entry point most callers need.
//! - [`validate_string`], [`validate_number`], [`validate_boolean`],
//!   [`validate_object`], [`validate_array`] — the type-specific validators.
//! - [`validate_with_document`] — parse a schema document, then validate.
//!
//! ## Typed results (`shape`)
//!
//! [`check`] validates against a [`Shape`] and returns its `Output` type,
//! so a caller holding a typed schema gets `String`, `Vec<f64>`,
//! `Option<bool>`, or a deserialized record without casting.
//!
//! ## Crate Policy
//!
//! - Depends only on `shapeguard-core` internally.
//! - Validation never mutates its input or its schema.
//! - Failures are reported as structured `ValidationError`s with kind,
//!   message, and field path; nothing is accumulated or retried.

pub mod document;
pub mod schema;
pub mod shape;
pub mod validate;

pub use document::{
    load_schema, load_value, parse_schema, parse_schema_str, yaml_to_json_value, SchemaLoadError,
};
pub use schema::{
    ArraySchema, BooleanSchema, NumberSchema, ObjectSchema, Pattern, Predicate, Schema,
    StringSchema,
};
pub use shape::{check, ListOf, Nullable, Record, Shape};
pub use validate::{
    validate, validate_array, validate_boolean, validate_number, validate_object,
    validate_string, validate_with_document,
};

pub use shapeguard_core::{ErrorKind, FieldPath, ValidationError};
