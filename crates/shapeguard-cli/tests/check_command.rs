//! Integration test: the `check` handler against real files.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use shapeguard_cli::check::{write_check, CheckArgs, OutputFormat};

const SCHEMA: &str = r#"{
  "type": "object",
  "description": "Invoice",
  "properties": {
    "number": {"type": "string", "description": "Invoice number", "startsWith": "INV-"},
    "total": {"type": "number", "min": 0}
  }
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &CheckArgs) -> (u8, String) {
    let mut out = Vec::new();
    let code = write_check(args, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_check_all_pass() {
    let dir = TempDir::new().unwrap();
    let args = CheckArgs {
        schema: write(&dir, "invoice.schema.json", SCHEMA),
        documents: vec![write(&dir, "a.json", r#"{"number": "INV-1", "total": 10}"#)],
        format: OutputFormat::Text,
        emit: false,
    };
    let (code, output) = run(&args);
    assert_eq!(code, 0);
    assert!(output.contains("PASS:"));
    assert!(output.contains("1/1 document(s) passed."));
}

#[test]
fn test_check_reports_failure() {
    let dir = TempDir::new().unwrap();
    let args = CheckArgs {
        schema: write(&dir, "invoice.schema.json", SCHEMA),
        documents: vec![
            write(&dir, "good.yaml", "number: INV-2\ntotal: 3.5\n"),
            write(&dir, "bad.json", r#"{"number": "PO-1", "total": 10}"#),
        ],
        format: OutputFormat::Text,
        emit: false,
    };
    let (code, output) = run(&args);
    assert_eq!(code, 1);
    assert!(
        output.contains("[affix_mismatch] number: Invoice number must start with \"INV-\""),
        "unexpected output: {output}"
    );
    assert!(output.contains("1/2 document(s) passed."));
}

#[test]
fn test_check_json_report_with_emit() {
    let dir = TempDir::new().unwrap();
    let args = CheckArgs {
        schema: write(&dir, "invoice.schema.json", SCHEMA),
        documents: vec![
            write(&dir, "a.json", r#"{"number": "INV-1", "total": 10, "memo": "x"}"#),
            write(&dir, "b.json", r#"{"number": "INV-2"}"#),
        ],
        format: OutputFormat::Json,
        emit: true,
    };
    let (code, output) = run(&args);
    assert_eq!(code, 1);

    let reports: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(reports[0]["valid"], true);
    assert_eq!(reports[0]["value"], serde_json::json!({"number": "INV-1", "total": 10}));
    assert_eq!(reports[1]["valid"], false);
    assert_eq!(reports[1]["error"]["kind"], "missing_value");
    assert_eq!(reports[1]["error"]["path"], "total");
}

#[test]
fn test_unloadable_document_is_a_failure_not_an_abort() {
    let dir = TempDir::new().unwrap();
    let args = CheckArgs {
        schema: write(&dir, "invoice.schema.json", SCHEMA),
        documents: vec![dir.path().join("missing.json")],
        format: OutputFormat::Text,
        emit: false,
    };
    let (code, output) = run(&args);
    assert_eq!(code, 1);
    assert!(output.contains("cannot read file"));
}

#[test]
fn test_bad_schema_aborts() {
    let dir = TempDir::new().unwrap();
    let args = CheckArgs {
        schema: write(&dir, "bad.schema.json", r#"{"type": "tuple"}"#),
        documents: vec![write(&dir, "a.json", "{}")],
        format: OutputFormat::Text,
        emit: false,
    };
    let mut out = Vec::new();
    let err = write_check(&args, &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("unsupported schema type"));
}
