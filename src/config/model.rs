//! Site configuration model
//!
//! Describes the CI site: default run behavior, where builds and logs live,
//! and which cluster nodes (with their fabric interfaces) tests run on.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root site configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SiteConfig {
    /// Default run behavior
    #[serde(default)]
    pub defaults: Defaults,

    /// Build and log directories
    #[serde(default)]
    pub paths: PathsConfig,

    /// Cluster nodes available to the test matrix, keyed by host name
    #[serde(default)]
    pub nodes: HashMap<String, NodeConfig>,
}

/// Default run behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// Echo each command line before running it
    #[serde(default = "default_echo")]
    pub echo_commands: bool,
}

fn default_echo() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            echo_commands: default_echo(),
        }
    }
}

/// Build and log directories
///
/// Values may reference environment variables (`$HOME`, `${WORKSPACE}`);
/// use [`PathsConfig::expanded`] to resolve them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory the fabric libraries are built and installed into
    #[serde(default = "default_install_dir")]
    pub install_dir: String,

    /// Directory CI step logs are written to
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_install_dir() -> String {
    "$HOME/fabric/install".to_string()
}

fn default_log_dir() -> String {
    "$HOME/fabric/logs".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            install_dir: default_install_dir(),
            log_dir: default_log_dir(),
        }
    }
}

impl PathsConfig {
    /// Resolve environment variable references in both paths
    pub fn expanded(&self) -> PathsConfig {
        PathsConfig {
            install_dir: expand(&self.install_dir),
            log_dir: expand(&self.log_dir),
        }
    }
}

/// Expand `$VAR`/`${VAR}`/`~` in a configured path, leaving the string
/// untouched when a referenced variable is unset.
fn expand(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|e| {
            tracing::warn!("Could not expand path '{}': {}", path, e);
            path.to_string()
        })
}

/// A cluster node and the fabric interfaces it exposes to tests
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct NodeConfig {
    /// Interfaces usable for test traffic, in preference order
    #[serde(default)]
    pub interfaces: Vec<String>,
}
