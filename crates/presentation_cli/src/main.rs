//! geo-gateway CLI
//!
//! Runs the gateway tools from the command line or as a line-delimited
//! JSON service on stdin/stdout.

#![allow(clippy::print_stdout)]

mod stdio;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{RequestContext, ToolDispatcher};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, OsmGatewayAdapter, init_logging};
use serde_json::Value;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// geo-gateway CLI
#[derive(Parser)]
#[command(name = "geo-gateway")]
#[command(author, version, about = "Rate-limited gateway to OpenStreetMap geocoding, feature search and routing", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./geo-gateway.toml if present)
    #[arg(short, long, global = true, env = "GEO_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Minimum seconds between upstream requests (overrides the configuration)
    #[arg(long, global = true, value_name = "SECS")]
    rate_limit: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tool definitions as JSON
    Tools,

    /// Run a single tool and print its result
    ///
    /// Example: geo-gateway call geocode_address --args '{"address": "Berlin"}'
    Call {
        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Serve line-delimited JSON tool calls on stdin/stdout
    ///
    /// Each input line is `{"id": .., "tool": "..", "arguments": {..}}`;
    /// each output line is `{"id": .., "result": {..}}`.
    Stdio,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Token canceled on Ctrl-C
fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted, canceling in-flight calls");
                trigger.cancel();
            },
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
    token
}

fn build_dispatcher(config: &AppConfig) -> anyhow::Result<ToolDispatcher> {
    let adapter =
        OsmGatewayAdapter::from_config(&config.osm).context("Failed to create gateway client")?;
    Ok(ToolDispatcher::new(Arc::new(adapter)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose > 0 {
        config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    if let Some(secs) = cli.rate_limit {
        config.osm.rate_limit_secs = secs;
    }

    init_logging(&config.logging)?;

    match cli.command {
        Commands::Tools => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ToolDispatcher::definitions())?
            );
        },

        Commands::Call { tool, args } => {
            let arguments: Value =
                serde_json::from_str(&args).context("--args must be valid JSON")?;
            let dispatcher = build_dispatcher(&config)?;
            let shutdown = shutdown_token();

            let result = dispatcher
                .call(&RequestContext::child_of(&shutdown), &tool, arguments)
                .await;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if result.is_error {
                std::process::exit(1);
            }
        },

        Commands::Stdio => {
            let dispatcher = Arc::new(build_dispatcher(&config)?);
            let shutdown = shutdown_token();

            info!(
                rate_limit_secs = config.osm.rate_limit_secs,
                "Serving tool calls on stdio"
            );
            stdio::serve(
                dispatcher,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
                shutdown,
            )
            .await?;
        },
    }

    Ok(())
}
