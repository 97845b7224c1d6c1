//! Integration test: loading schema and data documents from disk.
//!
//! Writes JSON and YAML files into a temporary directory, loads them with
//! `load_schema` / `load_value`, and validates the data against the schema.

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use shapeguard_schema::{load_schema, load_value, validate, ErrorKind, SchemaLoadError};

const CUSTOMER_YAML: &str = r#"
type: object
description: Customer
properties:
  email:
    type: string
    description: Email
    regex: "^[^@]+@[^@]+$"
  joined:
    type: string
    dateFormat: YYYY-MM-DD
  roles:
    type: array
    items: { type: string, notIn: [root] }
    minLength: 1
    some: { type: string, in: [owner, admin] }
  score:
    type: number
    nullable: true
    min: 0
    max: 100
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_yaml_schema_validates_json_document() {
    let dir = TempDir::new().unwrap();
    let schema_path = write(&dir, "customer.schema.yaml", CUSTOMER_YAML);
    let doc_path = write(
        &dir,
        "customer.json",
        r#"{"email": "ada@example.com", "joined": "2026-10-18", "roles": ["owner"], "extra": 1}"#,
    );

    let schema = load_schema(&schema_path).unwrap();
    let document = load_value(&doc_path).unwrap();
    let result = validate(&document, &schema).unwrap();

    assert_eq!(
        result,
        json!({
            "email": "ada@example.com",
            "joined": "2026-10-18",
            "roles": ["owner"],
            "score": null
        })
    );
}

#[test]
fn test_document_predicate_schema_enforced() {
    let dir = TempDir::new().unwrap();
    let schema = load_schema(&write(&dir, "customer.yml", CUSTOMER_YAML)).unwrap();

    let document = json!({"email": "a@b", "joined": "2026-01-01", "roles": ["guest"]});
    let err = validate(&document, &schema).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PredicateUnsatisfied);
    assert_eq!(err.path().to_string(), "roles");

    let document = json!({"email": "a@b", "joined": "2026-01-01", "roles": ["owner", "root"]});
    let err = validate(&document, &schema).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InDenyList);
    assert_eq!(err.path().to_string(), "roles[1]");
}

#[test]
fn test_document_date_format_enforced() {
    let dir = TempDir::new().unwrap();
    let schema = load_schema(&write(&dir, "customer.yaml", CUSTOMER_YAML)).unwrap();
    let document = json!({"email": "a@b", "joined": "18.10.2026", "roles": ["admin"]});
    let err = validate(&document, &schema).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDate);
    assert_eq!(err.path().to_string(), "joined");
}

#[test]
fn test_json_schema_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "flag.schema.json",
        r#"{"type": "boolean", "description": "Flag"}"#,
    );
    let schema = load_schema(&path).unwrap();
    assert_eq!(schema.type_name(), "boolean");
    assert_eq!(schema.description(), "Flag");
}

#[test]
fn test_unsupported_type_in_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.json", r#"{"type": "uuid"}"#);
    let err = load_schema(&path).unwrap_err();
    match err {
        SchemaLoadError::InvalidSchema { source, .. } => {
            assert_eq!(source.kind(), ErrorKind::UnsupportedType);
        }
        other => panic!("Expected InvalidSchema, got: {other}"),
    }
}

#[test]
fn test_unparseable_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "{not json");
    let err = load_schema(&path).unwrap_err();
    assert!(
        matches!(err, SchemaLoadError::DocumentLoadError { .. }),
        "Expected DocumentLoadError, got: {err}"
    );
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_value(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("cannot read file"));
}
