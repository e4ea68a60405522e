//! Async CI step execution with streamed output
//!
//! Runs an external command and forwards its stdout to the caller's stdout
//! in real time. Output is read in incremental chunks and flushed after
//! every chunk so long-running CI steps stay visible as they progress.
//! Stderr is inherited from the parent and never redirected.
//!
//! A non-zero exit is reported as `CiError::CommandFailed` rather than by
//! terminating the process here; the top-level orchestrator decides how to
//! abort the run.

use std::collections::HashMap;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use crate::error::CiError;

/// Chunk size for streaming reads from the child's stdout pipe
const READ_CHUNK_SIZE: usize = 4096;

/// Options for CI step execution
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// Working directory for the command
    pub working_dir: Option<std::path::PathBuf>,
    /// Environment variables to set
    pub env: HashMap<String, String>,
    /// Echo the space-joined command line to stdout before running
    pub echo: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            working_dir: None,
            env: HashMap::new(),
            echo: true,
        }
    }
}

impl ExecOptions {
    /// Create options with a working directory
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Disable the command echo
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }
}

/// Result of a completed CI step
#[derive(Debug)]
pub struct ExecResult {
    /// Whether the command exited with code 0
    pub success: bool,
    /// Exit code if the process exited normally
    pub exit_code: Option<i32>,
    /// Duration of execution
    pub duration: Duration,
}

impl ExecResult {
    /// Convert a non-zero exit into the error the orchestrator propagates.
    ///
    /// Returns `Ok(self)` on success so callers can chain with `?`.
    pub fn into_step_result(self, command: impl Into<String>) -> Result<ExecResult, CiError> {
        if self.success {
            Ok(self)
        } else if let Some(code) = self.exit_code {
            Err(CiError::CommandFailed {
                command: command.into(),
                exit_code: code,
            })
        } else {
            Err(CiError::Terminated {
                command: command.into(),
            })
        }
    }
}

/// Run a CI step, streaming its stdout to our stdout as it arrives.
///
/// The command is given as a program name followed by its arguments. Stdout
/// is piped and drained to completion; stderr is inherited. The pipe is read
/// until EOF is definitively signaled, then the process is awaited for its
/// exit status, so commands that produce no output terminate promptly.
///
/// # Errors
/// * `CiError::SpawnFailed` - If the command couldn't be launched
/// * `CiError::Io` - If forwarding output fails
///
/// Note that a non-zero exit is NOT an error here: it is reported in the
/// returned `ExecResult` so the caller owns the abort policy.
pub async fn run_command(command: &[String], options: &ExecOptions) -> Result<ExecResult, CiError> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| CiError::Config("empty command".to_string()))?;
    let command_str = command.join(" ");

    if options.echo {
        let mut out = tokio::io::stdout();
        out.write_all(command_str.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
    }

    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::inherit());

    if let Some(ref dir) = options.working_dir {
        cmd.current_dir(dir);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    tracing::debug!("Executing CI step: {}", command_str);

    let mut child = cmd.spawn().map_err(|e| CiError::SpawnFailed {
        command: command_str.clone(),
        source: e,
    })?;

    // The pipe is created with Stdio::piped() above, so take() always
    // yields a handle here.
    if let Some(stdout) = child.stdout.take() {
        stream_to_stdout(stdout).await?;
    }

    let status = child.wait().await.map_err(CiError::Io)?;
    let duration = start.elapsed();

    tracing::debug!(
        "CI step finished in {:?} with status {:?}",
        duration,
        status.code()
    );

    Ok(ExecResult {
        success: status.success(),
        exit_code: status.code(),
        duration,
    })
}

/// Drain a child's stdout pipe to our stdout, chunk by chunk.
///
/// Reads raw bytes so output with no line breaks can't stall the loop,
/// and flushes after every chunk to keep interleaving visible. Runs until
/// the pipe reports EOF.
async fn stream_to_stdout<R: tokio::io::AsyncRead + Unpin>(mut reader: R) -> Result<(), CiError> {
    let mut out = tokio::io::stdout();
    let mut buf = [0u8; READ_CHUNK_SIZE];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break, // EOF
            Ok(n) => {
                out.write_all(&buf[..n]).await?;
                out.flush().await?;
            }
            Err(e) => return Err(CiError::Io(e)),
        }
    }

    Ok(())
}

/// Run a CI step synchronously (convenience wrapper for sync contexts)
pub fn run_command_sync(command: &[String], options: &ExecOptions) -> Result<ExecResult, CiError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CiError::Io)?;

    rt.block_on(run_command(command, options))
}
