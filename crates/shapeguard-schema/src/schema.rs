//! # Schema Data Model
//!
//! A [`Schema`] is a closed union of five plain descriptors. Schemas carry
//! no behavior beyond the predicate closures stored on array schemas, and
//! are never mutated by validation.
//!
//! Every variant shares two fields: `nullable` (a missing value is accepted
//! and returned as `null`) and `description` (the label used in error
//! messages, defaulting to [`DEFAULT_DESCRIPTION`]).
//!
//! Variants are built with consuming builder methods:
//!
//! ```
//! use shapeguard_schema::{ObjectSchema, NumberSchema, StringSchema};
//!
//! let user = ObjectSchema::new()
//!     .property("name", StringSchema::new().min_length(2).description("Name"))
//!     .property("age", NumberSchema::new().min(0.0).nullable(true));
//! assert_eq!(user.properties().len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use shapeguard_core::{ValidationError, DEFAULT_DESCRIPTION};

/// A validation schema.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Text values.
    String(StringSchema),
    /// Numeric values.
    Number(NumberSchema),
    /// `true` / `false`.
    Boolean(BooleanSchema),
    /// Records with declared properties.
    Object(ObjectSchema),
    /// Ordered sequences of uniformly-typed items.
    Array(ArraySchema),
}

impl Schema {
    /// The type tag, as written in schema documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }

    /// Whether a missing value is accepted.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::String(s) => s.nullable,
            Self::Number(s) => s.nullable,
            Self::Boolean(s) => s.nullable,
            Self::Object(s) => s.nullable,
            Self::Array(s) => s.nullable,
        }
    }

    /// Label used in error messages.
    pub fn description(&self) -> &str {
        let label = match self {
            Self::String(s) => &s.description,
            Self::Number(s) => &s.description,
            Self::Boolean(s) => &s.description,
            Self::Object(s) => &s.description,
            Self::Array(s) => &s.description,
        };
        label.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Return a copy with the nullable flag replaced.
    pub fn with_nullable(self, nullable: bool) -> Self {
        match self {
            Self::String(s) => Self::String(s.nullable(nullable)),
            Self::Number(s) => Self::Number(s.nullable(nullable)),
            Self::Boolean(s) => Self::Boolean(s.nullable(nullable)),
            Self::Object(s) => Self::Object(s.nullable(nullable)),
            Self::Array(s) => Self::Array(s.nullable(nullable)),
        }
    }
}

macro_rules! common_builders {
    ($ty:ty) => {
        impl $ty {
            /// Accept a missing value, returning it as `null`.
            pub fn nullable(mut self, nullable: bool) -> Self {
                self.nullable = nullable;
                self
            }

            /// Label used in error messages.
            pub fn description(mut self, description: impl Into<String>) -> Self {
                self.description = Some(description.into());
                self
            }

            /// Label used in error messages, falling back to the placeholder.
            pub fn label(&self) -> &str {
                self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
            }
        }
    };
}

/// A compiled `regex` constraint.
///
/// Matching is an unanchored search; anchor the pattern with `^`/`$` to
/// require a full match.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidSchema` error if the pattern does not compile.
    pub fn new(source: &str) -> Result<Self, ValidationError> {
        Regex::new(source).map(Self).map_err(|e| {
            ValidationError::invalid_schema(format!("invalid regex {source:?}: {e}"))
        })
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.0.as_str())
    }
}

/// A test over a validated array element.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// An element satisfies the predicate when it validates against `schema`.
    pub fn conforms_to(schema: impl Into<Schema>) -> Self {
        let schema = schema.into();
        Self::new(move |value| crate::validate::dispatch(value, &schema).is_ok())
    }

    /// Evaluate the predicate.
    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Constraints on text values.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    /// Accept a missing value.
    pub nullable: bool,
    /// Label used in error messages.
    pub description: Option<String>,
    /// Inclusive lower bound, in Unicode scalar values.
    pub min_length: Option<usize>,
    /// Inclusive upper bound, in Unicode scalar values.
    pub max_length: Option<usize>,
    /// Pattern that must occur somewhere in the text.
    pub regex: Option<Pattern>,
    /// Token (`YYYY-MM-DD`) or strftime (`%Y-%m-%d`) format.
    pub date_format: Option<String>,
    /// Required prefix.
    pub starts_with: Option<String>,
    /// Required suffix.
    pub ends_with: Option<String>,
    /// Required substring.
    pub includes: Option<String>,
    /// The text must equal one of these (`in`).
    pub allow_list: Option<Vec<String>>,
    /// The text must equal none of these (`notIn`).
    pub deny_list: Option<Vec<String>>,
}

common_builders!(StringSchema);

impl StringSchema {
    /// An unconstrained, non-nullable string schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `n` characters.
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Allow at most `n` characters.
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Require `pattern` to match.
    pub fn regex(mut self, pattern: Pattern) -> Self {
        self.regex = Some(pattern);
        self
    }

    /// Require the text to parse as a date in `format`.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Require a prefix.
    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    /// Require a suffix.
    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.ends_with = Some(suffix.into());
        self
    }

    /// Require a substring.
    pub fn includes(mut self, needle: impl Into<String>) -> Self {
        self.includes = Some(needle.into());
        self
    }

    /// Allow-list (`in`).
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Deny-list (`notIn`).
    pub fn none_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny_list = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Constraints on numeric values.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    /// Accept a missing value.
    pub nullable: bool,
    /// Label used in error messages.
    pub description: Option<String>,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// The number must equal one of these (`in`).
    pub allow_list: Option<Vec<f64>>,
    /// The number must equal none of these (`notIn`).
    pub deny_list: Option<Vec<f64>>,
}

common_builders!(NumberSchema);

impl NumberSchema {
    /// An unconstrained, non-nullable number schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Allow-list (`in`).
    pub fn one_of(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.allow_list = Some(values.into_iter().collect());
        self
    }

    /// Deny-list (`notIn`).
    pub fn none_of(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.deny_list = Some(values.into_iter().collect());
        self
    }
}

/// Boolean values. No constraints beyond nullability.
#[derive(Debug, Clone, Default)]
pub struct BooleanSchema {
    /// Accept a missing value.
    pub nullable: bool,
    /// Label used in error messages.
    pub description: Option<String>,
}

common_builders!(BooleanSchema);

impl BooleanSchema {
    /// A non-nullable boolean schema.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Records with a fixed set of declared properties.
///
/// Properties keep declaration order, which is also validation order.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    /// Accept a missing value.
    pub nullable: bool,
    /// Label used in error messages.
    pub description: Option<String>,
    properties: Vec<(String, Schema)>,
}

common_builders!(ObjectSchema);

impl ObjectSchema {
    /// An object schema with no declared properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property. Redeclaring a name replaces its schema in place.
    pub fn property(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = name.into();
        let schema = schema.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = schema,
            None => self.properties.push((name, schema)),
        }
        self
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> &[(String, Schema)] {
        &self.properties
    }

    /// Look up a property schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }
}

/// Ordered sequences whose items all match one schema.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    /// Accept a missing value.
    pub nullable: bool,
    /// Label used in error messages.
    pub description: Option<String>,
    /// Schema every element is validated against.
    pub items: Box<Schema>,
    /// Inclusive lower bound on the element count.
    pub min_length: Option<usize>,
    /// Inclusive upper bound on the element count.
    pub max_length: Option<usize>,
    /// Satisfied once any validated element passes.
    pub some: Option<Predicate>,
    /// Unsatisfied once any validated element fails.
    pub every: Option<Predicate>,
    /// Unsatisfied once any validated element passes.
    pub none: Option<Predicate>,
}

common_builders!(ArraySchema);

impl ArraySchema {
    /// An array schema whose elements must match `items`.
    pub fn new(items: impl Into<Schema>) -> Self {
        Self {
            nullable: false,
            description: None,
            items: Box::new(items.into()),
            min_length: None,
            max_length: None,
            some: None,
            every: None,
            none: None,
        }
    }

    /// Require at least `n` elements.
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Allow at most `n` elements.
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Require at least one validated element to satisfy `predicate`.
    pub fn some(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.some = Some(Predicate::new(predicate));
        self
    }

    /// Require every validated element to satisfy `predicate`.
    pub fn every(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.every = Some(Predicate::new(predicate));
        self
    }

    /// Require no validated element to satisfy `predicate`.
    pub fn none(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.none = Some(Predicate::new(predicate));
        self
    }
}

impl From<StringSchema> for Schema {
    fn from(s: StringSchema) -> Self {
        Self::String(s)
    }
}

impl From<NumberSchema> for Schema {
    fn from(s: NumberSchema) -> Self {
        Self::Number(s)
    }
}

impl From<BooleanSchema> for Schema {
    fn from(s: BooleanSchema) -> Self {
        Self::Boolean(s)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(s: ObjectSchema) -> Self {
        Self::Object(s)
    }
}

impl From<ArraySchema> for Schema {
    fn from(s: ArraySchema) -> Self {
        Self::Array(s)
    }
}
