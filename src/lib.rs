//! fabci - CI helper for a fabric networking test suite
//!
//! Provides the pieces CI orchestration scripts compose:
//! - **Command runner** - run a CI step with real-time streamed stdout and
//!   exit-code propagation up to the orchestrator
//! - **Provider tables** - static descriptors of the transport providers
//!   the test matrix covers, with enabled/disabled lists
//! - **Fixture parameters** - memory-transfer types and message-size ranges
//!   the end-to-end harness parametrizes over
//! - **Site configuration** - XDG-layered description of the CI cluster
//!
//! Failure policy: a CI step that exits non-zero surfaces as
//! [`CiError::CommandFailed`]; the binary's `main` aborts the whole run
//! with the child's exit code. Library callers are free to recover instead.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod providers;

pub use cli::{Cli, Commands};
pub use cluster::node_name;
pub use config::{load_config, SiteConfig};
pub use error::CiError;
pub use executor::{run_command, run_command_sync, ExecOptions, ExecResult};
pub use fixtures::{MemoryType, MessageRange, MESSAGE_RANGES};
pub use providers::{Provider, DISABLED_PROVIDERS, ENABLED_PROVIDERS, PROVIDERS};
