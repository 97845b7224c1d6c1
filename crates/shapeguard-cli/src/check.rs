//! # Check Subcommand
//!
//! Validates each document against one schema document and prints a
//! per-document verdict, in text or JSON.
//!
//! A document that fails to load is reported as a failure of that document;
//! only a schema that fails to load aborts the whole run.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use shapeguard_core::ValidationError;
use shapeguard_schema::{load_schema, load_value, validate, Schema};

/// Report format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `PASS`/`FAIL` line per document.
    #[default]
    Text,
    /// A JSON array with one report object per document.
    Json,
}

/// Arguments for the `shapeguard check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema document (.json, .yaml, or .yml).
    #[arg(long, short = 's', value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Documents to validate (.json, .yaml, or .yml).
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Include the validated value of each passing document in the report.
    #[arg(long)]
    pub emit: bool,
}

/// Outcome for a single document.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub document: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

/// Failure detail in a [`DocumentReport`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportError {
    /// The document loaded but violates the schema.
    Validation(ValidationError),
    /// The document could not be loaded.
    Load { kind: &'static str, message: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "[{}] {err}", err.kind()),
            Self::Load { message, .. } => f.write_str(message),
        }
    }
}

/// Execute the check subcommand, printing to stdout.
///
/// Returns exit code: 0 if every document passes, 1 if any fails.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_check(args, &mut out)
}

/// Execute the check subcommand, writing the report to `out`.
pub fn write_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let schema = load_schema(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;

    tracing::info!(
        schema = %args.schema.display(),
        schema_type = schema.type_name(),
        documents = args.documents.len(),
        "loaded schema"
    );

    let reports: Vec<DocumentReport> = args
        .documents
        .iter()
        .map(|path| check_document(&schema, path, args.emit))
        .collect();

    let failed = reports.iter().filter(|r| !r.valid).count();

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                match &report.error {
                    None => writeln!(out, "PASS: {}", report.document)?,
                    Some(error) => writeln!(out, "FAIL: {} — {error}", report.document)?,
                }
                if let Some(value) = &report.value {
                    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
                }
            }
            writeln!(
                out,
                "\n{}/{} document(s) passed.",
                reports.len() - failed,
                reports.len()
            )?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
        }
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Load and validate one document.
pub fn check_document(schema: &Schema, path: &Path, emit: bool) -> DocumentReport {
    let document = path.display().to_string();

    let value = match load_value(path) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(document = %document, "document failed to load: {e}");
            return DocumentReport {
                document,
                valid: false,
                value: None,
                error: Some(ReportError::Load {
                    kind: "load_error",
                    message: e.to_string(),
                }),
            };
        }
    };

    match validate(&value, schema) {
        Ok(validated) => {
            tracing::debug!(document = %document, "document passed");
            DocumentReport {
                document,
                valid: true,
                value: emit.then_some(validated),
                error: None,
            }
        }
        Err(err) => DocumentReport {
            document,
            valid: false,
            value: None,
            error: Some(ReportError::Validation(err)),
        },
    }
}
