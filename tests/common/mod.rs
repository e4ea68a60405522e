//! Common test utilities for fabci integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory holding an executable shell script
pub fn create_script(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let script_path = dir.path().join(name);
    std::fs::write(&script_path, content).expect("Failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&script_path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script_path, perms).expect("Failed to set permissions");
    }

    (dir, script_path)
}

/// Script that writes chunked output with no trailing newline, then fails
pub const CHUNKED_FAILING_SCRIPT: &str = r#"#!/bin/sh
printf 'first'
printf 'second'
exit 7
"#;

/// Script that emits a large unbroken line
pub const UNBROKEN_OUTPUT_SCRIPT: &str = r#"#!/bin/sh
head -c 65536 /dev/zero | tr '\0' 'x'
"#;

/// Minimal site config used by config-loading tests
pub const SAMPLE_SITE_CONFIG: &str = r#"
[defaults]
echo_commands = false

[paths]
install_dir = "/opt/fabric"
log_dir = "/var/log/fabci"

[nodes.node01]
interfaces = ["ib0", "eth0"]
"#;
