//! Error types for fabci
//!
//! Failure of a CI step is an ordinary error value carried up to `main`,
//! which is the only place allowed to terminate the process.

use thiserror::Error;

/// Main error type for CI helper operations
#[derive(Error, Debug)]
pub enum CiError {
    /// Child process exited with a non-zero code
    #[error("Command failed: {command} (exit code {exit_code})")]
    CommandFailed { command: String, exit_code: i32 },

    /// Child process was killed by a signal (no exit code available)
    #[error("Command terminated by signal: {command}")]
    Terminated { command: String },

    /// Failed to spawn the command (missing executable, permissions)
    #[error("Failed to spawn command: {command}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed message-size range spec (expected `r:<begin>,<step>,<end>`)
    #[error("Invalid message size spec: '{spec}'")]
    InvalidSizeSpec { spec: String },

    /// Unknown memory transfer type name
    #[error("Unknown memory type: '{name}'")]
    UnknownMemoryType { name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CiError {
    /// Exit code the whole process should use for this error.
    ///
    /// A failed CI step propagates the child's own code so the pipeline
    /// fails the same way the step did; everything else is a generic 1.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            CiError::CommandFailed { exit_code, .. } => *exit_code,
            _ => 1,
        }
    }
}
