//! # Inspect Subcommand
//!
//! Loads a schema document and prints an indented outline of it, one line
//! per schema node with its configured constraints.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use shapeguard_core::display_number;
use shapeguard_schema::{load_schema, Schema};

/// Arguments for the `shapeguard inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Schema document (.json, .yaml, or .yml).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Execute the inspect subcommand, printing to stdout.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let schema = load_schema(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(outline(&schema).as_bytes())?;
    Ok(0)
}

/// Render a schema as an indented outline.
pub fn outline(schema: &Schema) -> String {
    let mut out = String::new();
    render(schema, None, 0, &mut out);
    out
}

fn render(schema: &Schema, name: Option<&str>, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let label = match name {
        Some(name) => format!("{name}: "),
        None => String::new(),
    };

    let mut line = format!("{indent}{label}{}", schema.type_name());
    if schema.is_nullable() {
        line.push('?');
    }
    if schema.description() != shapeguard_core::DEFAULT_DESCRIPTION {
        line.push_str(&format!(" {:?}", schema.description()));
    }
    for constraint in constraints(schema) {
        line.push(' ');
        line.push_str(&constraint);
    }
    out.push_str(&line);
    out.push('\n');

    match schema {
        Schema::Object(object) => {
            for (property, child) in object.properties() {
                render(child, Some(property), depth + 1, out);
            }
        }
        Schema::Array(array) => render(&array.items, Some("[]"), depth + 1, out),
        _ => {}
    }
}

fn constraints(schema: &Schema) -> Vec<String> {
    let mut c = Vec::new();
    match schema {
        Schema::String(s) => {
            if let Some(n) = s.min_length {
                c.push(format!("minLength={n}"));
            }
            if let Some(n) = s.max_length {
                c.push(format!("maxLength={n}"));
            }
            if let Some(p) = &s.regex {
                c.push(format!("regex={p}"));
            }
            if let Some(f) = &s.date_format {
                c.push(format!("dateFormat={f:?}"));
            }
            if let Some(p) = &s.starts_with {
                c.push(format!("startsWith={p:?}"));
            }
            if let Some(p) = &s.ends_with {
                c.push(format!("endsWith={p:?}"));
            }
            if let Some(p) = &s.includes {
                c.push(format!("includes={p:?}"));
            }
            if let Some(list) = &s.allow_list {
                c.push(format!("in={list:?}"));
            }
            if let Some(list) = &s.deny_list {
                c.push(format!("notIn={list:?}"));
            }
        }
        Schema::Number(s) => {
            if let Some(n) = s.min {
                c.push(format!("min={}", display_number(n)));
            }
            if let Some(n) = s.max {
                c.push(format!("max={}", display_number(n)));
            }
            if let Some(list) = &s.allow_list {
                c.push(format!("in={}", number_list(list)));
            }
            if let Some(list) = &s.deny_list {
                c.push(format!("notIn={}", number_list(list)));
            }
        }
        Schema::Array(s) => {
            if let Some(n) = s.min_length {
                c.push(format!("minLength={n}"));
            }
            if let Some(n) = s.max_length {
                c.push(format!("maxLength={n}"));
            }
            for (name, predicate) in [("some", &s.some), ("every", &s.every), ("none", &s.none)] {
                if predicate.is_some() {
                    c.push(name.to_string());
                }
            }
        }
        Schema::Boolean(_) | Schema::Object(_) => {}
    }
    c
}

fn number_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| display_number(*v)).collect();
    format!("[{}]", items.join(", "))
}
