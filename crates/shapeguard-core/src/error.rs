//! # Error Types — Structured Validation Failures
//!
//! Defines the single error type produced by every validator. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A failure carries its [`ErrorKind`] so callers can branch on it
//!   programmatically, a human-readable message naming the schema's
//!   description and the unmet threshold, and the [`FieldPath`] of the
//!   offending value.
//! - Validation is fail-fast: exactly one error is reported per call.
//!   Enclosing object and array validators only prepend path segments.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Description used in messages when a schema carries no label.
pub const DEFAULT_DESCRIPTION: &str = "value";

/// The kind of constraint a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The value is missing and the schema is not nullable.
    MissingValue,
    /// The value has the wrong runtime type for the schema variant.
    TypeMismatch,
    /// Text or sequence shorter than `minLength`.
    LengthTooShort,
    /// Text or sequence longer than `maxLength`.
    LengthTooLong,
    /// Text does not match the configured `regex`.
    PatternMismatch,
    /// Text does not parse as a date in the configured `dateFormat`.
    InvalidDate,
    /// Text does not satisfy `startsWith` or `endsWith`.
    AffixMismatch,
    /// Text does not contain the configured `includes` substring.
    ContainmentMismatch,
    /// Value is absent from the `in` allow-list.
    NotInAllowList,
    /// Value is present in the `notIn` deny-list.
    InDenyList,
    /// Number below `min`.
    BelowMinimum,
    /// Number above `max`.
    AboveMaximum,
    /// One or more of the array predicates `some`, `every`, `none` failed.
    PredicateUnsatisfied,
    /// A schema document names a type tag outside the five known variants.
    UnsupportedType,
    /// A schema document is malformed (ill-typed field, invalid pattern).
    InvalidSchema,
}

impl ErrorKind {
    /// Stable identifier for the kind, used in reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingValue => "missing_value",
            Self::TypeMismatch => "type_mismatch",
            Self::LengthTooShort => "length_too_short",
            Self::LengthTooLong => "length_too_long",
            Self::PatternMismatch => "pattern_mismatch",
            Self::InvalidDate => "invalid_date",
            Self::AffixMismatch => "affix_mismatch",
            Self::ContainmentMismatch => "containment_mismatch",
            Self::NotInAllowList => "not_in_allow_list",
            Self::InDenyList => "in_deny_list",
            Self::BelowMinimum => "below_minimum",
            Self::AboveMaximum => "above_maximum",
            Self::PredicateUnsatisfied => "predicate_unsatisfied",
            Self::UnsupportedType => "unsupported_type",
            Self::InvalidSchema => "invalid_schema",
        }
    }

    /// Whether the kind describes a broken schema rather than bad data.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::UnsupportedType | Self::InvalidSchema)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step from a parent value to a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property name.
    Key(String),
    /// Array element index.
    Index(usize),
}

/// Location of a value inside the validated input, outermost segment first.
///
/// Renders as `address.lines[2]`. The empty path is the root value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments from outermost to innermost.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Prepend a segment. Errors travel outward, so each enclosing
    /// validator adds its own step in front.
    pub fn push_front(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single failed constraint with structured context.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{}{message}", path_prefix(.path))]
pub struct ValidationError {
    kind: ErrorKind,
    message: String,
    path: FieldPath,
}

fn path_prefix(path: &FieldPath) -> String {
    if path.is_root() {
        String::new()
    } else {
        format!("{path}: ")
    }
}

impl ValidationError {
    /// Create an error at the root path.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: FieldPath::root(),
        }
    }

    /// `{description} is required`.
    pub fn missing(description: &str) -> Self {
        Self::new(ErrorKind::MissingValue, format!("{description} is required"))
    }

    /// `{description} must be {expected}`.
    pub fn type_mismatch(description: &str, expected: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("{description} must be {expected}"),
        )
    }

    /// Unknown schema type tag.
    pub fn unsupported_type(tag: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedType,
            format!("unsupported schema type {tag:?}"),
        )
    }

    /// Malformed schema document.
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSchema, reason)
    }

    /// Prepend a property name to the error's path.
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.path.push_front(PathSegment::Key(key.into()));
        self
    }

    /// Prepend an array index to the error's path.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.push_front(PathSegment::Index(index));
        self
    }

    /// The violated constraint.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable description, without the path prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the offending value.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }
}

/// Render a number for messages: integral values print without a fraction.
pub fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_error_display_has_no_prefix() {
        let err = ValidationError::missing("Email");
        assert_eq!(err.to_string(), "Email is required");
        assert!(err.path().is_root());
    }

    #[test]
    fn test_path_built_outward() {
        let err = ValidationError::missing("Zip code")
            .at_key("zip")
            .at_index(2)
            .at_key("addresses");
        assert_eq!(err.path().to_string(), "addresses[2].zip");
        assert_eq!(err.to_string(), "addresses[2].zip: Zip code is required");
    }

    #[test]
    fn test_root_path_display() {
        assert_eq!(FieldPath::root().to_string(), "(root)");
    }

    #[test]
    fn test_kind_preserved_through_annotation() {
        let err = ValidationError::type_mismatch("Age", "a number").at_key("age");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.message(), "Age must be a number");
    }

    #[test]
    fn test_schema_error_kinds() {
        assert!(ErrorKind::UnsupportedType.is_schema_error());
        assert!(ErrorKind::InvalidSchema.is_schema_error());
        assert!(!ErrorKind::MissingValue.is_schema_error());
    }

    #[test]
    fn test_serialize_error() {
        let err = ValidationError::missing("Name").at_key("name");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "missing_value");
        assert_eq!(json["path"], "name");
        assert_eq!(json["message"], "Name is required");
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(5.0), "5");
        assert_eq!(display_number(-3.0), "-3");
        assert_eq!(display_number(2.5), "2.5");
    }
}
