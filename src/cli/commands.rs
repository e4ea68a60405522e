//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;

/// CI step runner and test-matrix helper for a fabric networking test suite.
///
/// Runs CI commands with real-time streamed output and exit-code
/// propagation, and exposes the static provider/fixture tables the test
/// matrix is built from.
#[derive(Parser, Debug)]
#[command(name = "fabci")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a CI step, streaming its output
    Run(RunArgs),

    /// Show the provider test matrix and enabled/disabled lists
    Providers(ProvidersArgs),

    /// Show harness fixture parameters (memory types, message sizes)
    Fixtures(FixturesArgs),

    /// Format a composite host-interface node identifier
    NodeName(NodeNameArgs),

    /// Show the resolved site configuration
    Config(ConfigArgs),
}

/// Arguments for the `run` subcommand
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Command to run (program followed by arguments)
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Working directory for the command
    #[arg(short = 'C', long)]
    pub cwd: Option<String>,

    /// Environment variables in KEY=VALUE format
    #[arg(short, long = "env", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Don't echo the command line before running it
    #[arg(long)]
    pub no_echo: bool,
}

impl RunArgs {
    /// Convert env pairs to a HashMap
    pub fn env_as_map(&self) -> HashMap<String, String> {
        self.env.iter().cloned().collect()
    }
}

/// Parse KEY=VALUE argument
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid variable '{}': expected KEY=VALUE format", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
    /// Plain text (one entry per line)
    Plain,
}

/// Arguments for the `providers` subcommand
#[derive(Parser, Debug)]
pub struct ProvidersArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show only enabled cores
    #[arg(long, conflicts_with = "disabled")]
    pub enabled: bool,

    /// Show only disabled cores
    #[arg(long)]
    pub disabled: bool,
}

/// Arguments for the `fixtures` subcommand
#[derive(Parser, Debug)]
pub struct FixturesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the `node-name` subcommand
#[derive(Parser, Debug)]
pub struct NodeNameArgs {
    /// Host name
    pub host: String,

    /// Fabric interface name
    pub interface: String,
}

/// Arguments for the `config` subcommand
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show raw paths without environment expansion
    #[arg(long)]
    pub raw: bool,
}
