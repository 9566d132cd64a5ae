//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "geo-gateway")]
#[command(author, version, about = "Rate-limited gateway to OpenStreetMap geocoding, feature search and routing", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "SECS")]
    rate_limit: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Tools,
    Call {
        tool: String,
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    Stdio,
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_tools_command() {
    let cli = parse_args(&["geo-gateway", "tools"]).unwrap();
    assert!(matches!(cli.command, Commands::Tools));
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    assert!(cli.rate_limit.is_none());
}

#[test]
fn cli_parses_call_with_default_args() {
    let cli = parse_args(&["geo-gateway", "call", "geocode_address"]).unwrap();
    if let Commands::Call { tool, args } = cli.command {
        assert_eq!(tool, "geocode_address");
        assert_eq!(args, "{}");
    } else {
        panic!("Expected Call command");
    }
}

#[test]
fn cli_parses_call_with_json_args() {
    let cli = parse_args(&[
        "geo-gateway",
        "call",
        "get_route",
        "--args",
        r#"{"from_lat": 52.5, "from_lon": 13.3, "to_lat": 52.6, "to_lon": 13.4}"#,
    ])
    .unwrap();
    if let Commands::Call { tool, args } = cli.command {
        assert_eq!(tool, "get_route");
        let value: serde_json::Value = serde_json::from_str(&args).unwrap();
        assert_eq!(value["to_lon"], 13.4);
    } else {
        panic!("Expected Call command");
    }
}

#[test]
fn cli_requires_tool_name_for_call() {
    assert!(parse_args(&["geo-gateway", "call"]).is_err());
}

#[test]
fn cli_parses_stdio_with_global_flags() {
    let cli = parse_args(&[
        "geo-gateway",
        "stdio",
        "--rate-limit",
        "1",
        "--config",
        "/etc/geo-gateway.toml",
        "-vv",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Stdio));
    assert_eq!(cli.rate_limit, Some(1));
    assert_eq!(cli.config, Some(PathBuf::from("/etc/geo-gateway.toml")));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_rejects_non_numeric_rate_limit() {
    assert!(parse_args(&["geo-gateway", "--rate-limit", "soon", "stdio"]).is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["geo-gateway"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(parse_args(&["geo-gateway", "serve-http"]).is_err());
}
