//! CLI module for fabci
//!
//! Provides the command-line interface with the following subcommands:
//! - `run` - Run a CI step with streamed output
//! - `providers` - Show the provider test matrix
//! - `fixtures` - Show harness fixture parameters
//! - `node-name` - Format a host/interface identifier
//! - `config` - Show the resolved site configuration

pub mod commands;

pub use commands::{Cli, Commands, OutputFormat};
