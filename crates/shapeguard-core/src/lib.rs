//! # shapeguard-core — Foundational Types for shapeguard
//!
//! This crate defines the types every validator shares. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One structured error.** Every failure is a [`ValidationError`]
//!    carrying an [`ErrorKind`], a display message naming the schema's
//!    description, and the [`FieldPath`] of the offending value. No bare
//!    strings as errors.
//!
//! 2. **Total date parsing.** [`temporal::parse_date`] reports unparseable
//!    input as [`ParsedDate::Invalid`] instead of failing, so the string
//!    validator decides what an invalid date means.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `shapeguard-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{
    display_number, ErrorKind, FieldPath, PathSegment, ValidationError, DEFAULT_DESCRIPTION,
};
pub use temporal::{parse_date, ParsedDate};
