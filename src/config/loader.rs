//! Site configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/fabci/config.toml` (lowest priority)
//! 2. `~/.config/fabci/config.toml`
//! 3. `~/.fabci.toml`
//! 4. `./.fabci.toml` (highest priority)

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::SiteConfig;

/// Application name used for XDG directories
const APP_NAME: &str = "fabci";

/// Get XDG config search paths in priority order (lowest to highest)
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide config (lowest priority)
    paths.push(PathBuf::from(format!("/etc/{}/config.toml", APP_NAME)));

    // 2. XDG config home
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    // 3. Home directory (legacy/convenience)
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", APP_NAME)));
    }

    // 4. Current directory / project root (highest priority)
    paths.push(PathBuf::from(format!(".{}.toml", APP_NAME)));

    paths
}

/// Load the site configuration with XDG layering
///
/// Configurations are merged in priority order, with later files
/// overriding earlier ones. Environment variables with prefix
/// `FABCI_` override all file-based configuration.
///
/// # Arguments
/// * `override_path` - Optional path to a config file that takes highest priority
///
/// # Returns
/// * `Result<SiteConfig>` - The merged configuration
pub fn load_config(override_path: Option<&str>) -> Result<SiteConfig> {
    load_config_layered(&config_paths(), override_path)
}

/// Merge defaults, the given layer files, an optional override file, and
/// `FABCI_` environment variables, in that priority order
fn load_config_layered(paths: &[PathBuf], override_path: Option<&str>) -> Result<SiteConfig> {
    let mut figment = Figment::new();

    // Start with defaults
    figment = figment.merge(Serialized::defaults(SiteConfig::default()));

    // Layer configs from lowest to highest priority
    for path in paths {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    // Override path takes highest priority (if provided)
    if let Some(path) = override_path {
        let path = PathBuf::from(path);
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::warn!("Override config not found: {}", path.display());
        }
    }

    // Environment variables override everything
    // Format: FABCI_DEFAULTS__ECHO_COMMANDS=false
    // Maps to: defaults.echo_commands = false
    figment = figment.merge(Env::prefixed("FABCI_").split("__"));

    figment
        .extract()
        .context("Failed to load site configuration")
}

/// Find all existing config files (for debugging/introspection)
pub fn find_config_files() -> Vec<PathBuf> {
    config_paths().into_iter().filter(|p| p.exists()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_paths_returns_expected_paths() {
        let paths = config_paths();

        assert!(paths.len() >= 3);

        // First should be system-wide
        assert!(paths[0].to_string_lossy().contains("/etc/"));

        // Last should be the current-directory dotfile
        assert!(paths
            .last()
            .unwrap()
            .to_string_lossy()
            .contains(".fabci.toml"));
    }

    /// Serializes tests that scrub or set loader environment variables
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    /// Remove loader-mapped `FABCI_SECTION__KEY` variables so tests see
    /// only the layers they set up themselves
    fn scrub_loader_env() {
        for (key, _) in std::env::vars() {
            if key.starts_with("FABCI_") && key.contains("__") {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_load_config_defaults_without_files() {
        let _guard = ENV_LOCK.lock().unwrap();
        scrub_loader_env();
        // No layer files and a bogus override path falls back to defaults
        let config = load_config_layered(&[], Some("/nonexistent/fabci.toml")).unwrap();
        assert!(config.defaults.echo_commands);
        assert!(config.nodes.is_empty());
    }

    #[test]
    fn test_load_config_override_path() {
        let _guard = ENV_LOCK.lock().unwrap();
        scrub_loader_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(
            &path,
            r#"
            [defaults]
            echo_commands = false

            [nodes.node01]
            interfaces = ["ib0"]
            "#,
        )
        .unwrap();

        let config = load_config_layered(&[], path.to_str()).unwrap();

        assert!(!config.defaults.echo_commands);
        assert_eq!(config.nodes["node01"].interfaces, vec!["ib0"]);
    }

    #[test]
    fn test_load_config_layer_then_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        scrub_loader_env();
        let dir = TempDir::new().unwrap();
        let layer = dir.path().join("layer.toml");
        fs::write(&layer, "[defaults]\necho_commands = false\n").unwrap();
        let over = dir.path().join("override.toml");
        fs::write(&over, "[defaults]\necho_commands = true\n").unwrap();

        let config = load_config_layered(&[layer], over.to_str()).unwrap();

        // The override file wins over earlier layers
        assert!(config.defaults.echo_commands);
    }

    #[test]
    fn test_load_config_partial_override_keeps_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        scrub_loader_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(
            &path,
            r#"
            [paths]
            install_dir = "/opt/fabric"
            "#,
        )
        .unwrap();

        let config = load_config_layered(&[], path.to_str()).unwrap();

        assert_eq!(config.paths.install_dir, "/opt/fabric");
        // Untouched fields keep their defaults
        assert_eq!(config.paths.log_dir, "$HOME/fabric/logs");
    }

    #[test]
    fn test_load_config_env_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        scrub_loader_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "[defaults]\necho_commands = true\n").unwrap();

        std::env::set_var("FABCI_DEFAULTS__ECHO_COMMANDS", "false");
        let config = load_config_layered(&[], path.to_str()).unwrap();
        std::env::remove_var("FABCI_DEFAULTS__ECHO_COMMANDS");

        assert!(!config.defaults.echo_commands);
    }

    #[test]
    fn test_find_config_files_only_existing() {
        for path in find_config_files() {
            assert!(path.exists());
        }
    }
}
