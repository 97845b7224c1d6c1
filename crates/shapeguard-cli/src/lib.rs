//! # shapeguard-cli — Command-Line Interface
//!
//! Validates JSON and YAML documents against schema documents from the
//! shell, and prints the structure of a schema.
//!
//! ## Subcommands
//!
//! - `check` — validate one or more documents against a schema
//! - `inspect` — load a schema document and print its outline
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `shapeguard-schema` — no validation logic here.
//! - Handlers return exit codes: 0 success, 1 validation failure, 2 operational error.

pub mod check;
pub mod inspect;
