//! # shapeguard CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shapeguard_cli::check::{run_check, CheckArgs};
use shapeguard_cli::inspect::{run_inspect, InspectArgs};

/// shapeguard — validate untyped documents against declarative schemas.
#[derive(Parser, Debug)]
#[command(name = "shapeguard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents against a schema document.
    Check(CheckArgs),

    /// Print the outline of a schema document.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("shapeguard CLI starting");

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Inspect(args) => run_inspect(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeguard_cli::check::OutputFormat;

    #[test]
    fn cli_parse_check() {
        let cli = Cli::try_parse_from([
            "shapeguard",
            "check",
            "--schema",
            "user.schema.yaml",
            "a.json",
            "b.yaml",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.schema.to_str(), Some("user.schema.yaml"));
        assert_eq!(args.documents.len(), 2);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.emit);
    }

    #[test]
    fn cli_parse_check_json_emit() {
        let cli = Cli::try_parse_from([
            "shapeguard", "check", "-s", "s.json", "--format", "json", "--emit", "d.json",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.emit);
    }

    #[test]
    fn cli_check_requires_document() {
        assert!(Cli::try_parse_from(["shapeguard", "check", "--schema", "s.json"]).is_err());
    }

    #[test]
    fn cli_check_requires_schema() {
        assert!(Cli::try_parse_from(["shapeguard", "check", "d.json"]).is_err());
    }

    #[test]
    fn cli_parse_inspect() {
        let cli = Cli::try_parse_from(["shapeguard", "inspect", "s.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn cli_verbosity_counts() {
        let cli = Cli::try_parse_from(["shapeguard", "-vv", "inspect", "s.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from([
            "shapeguard", "check", "-s", "s.json", "--format", "xml", "d.json"
        ])
        .is_err());
    }
}
