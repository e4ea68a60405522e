//! Static provider tables for the fabric test matrix
//!
//! A provider is a named network transport backend: a core (tcp, verbs, shm,
//! ...) optionally layered with a utility provider (rxd, rxm). The tables
//! here are fixed reference data describing which providers the CI matrix
//! exercises and which are compiled out; orchestration code treats them as
//! read-only lookup tables keyed by core name.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// A transport core with an optional utility layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Provider {
    /// Core provider name (e.g., "verbs", "tcp")
    pub core: &'static str,
    /// Utility provider layered on the core, if any (e.g., "rxd")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub util: Option<&'static str>,
}

impl Provider {
    /// Canonical display name: `core` or `core;util`
    pub fn name(&self) -> String {
        match self.util {
            Some(util) => format!("{};{}", self.core, util),
            None => self.core.to_string(),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provider combinations the CI matrix runs tests against
pub const PROVIDERS: &[Provider] = &[
    Provider { core: "psm3", util: None },
    Provider { core: "verbs", util: None },
    Provider { core: "verbs", util: Some("rxd") },
    Provider { core: "verbs", util: Some("rxm") },
    Provider { core: "sockets", util: None },
    Provider { core: "tcp", util: None },
    Provider { core: "udp", util: None },
    Provider { core: "udp", util: Some("rxd") },
    Provider { core: "shm", util: None },
];

/// Cores enabled in the CI build
pub const ENABLED_PROVIDERS: &[&str] = &["verbs", "tcp", "sockets", "udp", "shm", "psm3"];

/// Cores explicitly disabled in the CI build
pub const DISABLED_PROVIDERS: &[&str] = &[
    "usnic",
    "psm",
    "efa",
    "perf",
    "rstream",
    "hook_debug",
    "bgq",
    "mrail",
    "opx",
];

/// Provider combinations grouped by core name, built once at first use
static PROVIDERS_BY_CORE: Lazy<HashMap<&'static str, Vec<&'static Provider>>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, Vec<&'static Provider>> = HashMap::new();
    for prov in PROVIDERS {
        map.entry(prov.core).or_default().push(prov);
    }
    map
});

/// All matrix combinations for a given core (empty if the core is unknown)
pub fn variants(core: &str) -> &'static [&'static Provider] {
    PROVIDERS_BY_CORE
        .get(core)
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

/// Whether a core is in the enabled list
pub fn is_enabled(core: &str) -> bool {
    ENABLED_PROVIDERS.contains(&core)
}

/// Whether a core is in the disabled list
pub fn is_disabled(core: &str) -> bool {
    DISABLED_PROVIDERS.contains(&core)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name_core_only() {
        let prov = Provider {
            core: "tcp",
            util: None,
        };
        assert_eq!(prov.name(), "tcp");
        assert_eq!(prov.to_string(), "tcp");
    }

    #[test]
    fn test_provider_name_with_util() {
        let prov = Provider {
            core: "verbs",
            util: Some("rxm"),
        };
        assert_eq!(prov.name(), "verbs;rxm");
    }

    #[test]
    fn test_matrix_contents() {
        assert_eq!(PROVIDERS.len(), 9);
        assert!(PROVIDERS.iter().any(|p| p.core == "shm" && p.util.is_none()));
        assert!(PROVIDERS
            .iter()
            .any(|p| p.core == "udp" && p.util == Some("rxd")));
    }

    #[test]
    fn test_variants_lookup() {
        let verbs = variants("verbs");
        assert_eq!(verbs.len(), 3);
        assert!(verbs.iter().any(|p| p.util == Some("rxd")));
        assert!(verbs.iter().any(|p| p.util == Some("rxm")));
        assert!(verbs.iter().any(|p| p.util.is_none()));

        assert_eq!(variants("tcp").len(), 1);
        assert!(variants("not_a_provider").is_empty());
    }

    #[test]
    fn test_enabled_disabled_membership() {
        assert!(is_enabled("verbs"));
        assert!(is_enabled("psm3"));
        assert!(!is_enabled("efa"));

        assert!(is_disabled("efa"));
        assert!(is_disabled("opx"));
        assert!(!is_disabled("tcp"));
    }

    #[test]
    fn test_enabled_and_disabled_are_disjoint() {
        for core in ENABLED_PROVIDERS {
            assert!(
                !DISABLED_PROVIDERS.contains(core),
                "'{}' is both enabled and disabled",
                core
            );
        }
    }

    #[test]
    fn test_all_names_non_empty() {
        for prov in PROVIDERS {
            assert!(!prov.core.is_empty());
            if let Some(util) = prov.util {
                assert!(!util.is_empty());
            }
        }
        for core in ENABLED_PROVIDERS.iter().chain(DISABLED_PROVIDERS) {
            assert!(!core.is_empty());
        }
    }

    #[test]
    fn test_provider_serialization() {
        let json = serde_json::to_string(&Provider {
            core: "udp",
            util: Some("rxd"),
        })
        .unwrap();
        assert!(json.contains("\"core\":\"udp\""));
        assert!(json.contains("\"util\":\"rxd\""));

        let json = serde_json::to_string(&Provider {
            core: "tcp",
            util: None,
        })
        .unwrap();
        assert!(!json.contains("util"));
    }
}
