//! Cluster naming helpers
//!
//! CI jobs address a test endpoint by a composite "<host>-<interface>"
//! identifier, pairing a machine with the fabric interface under test.

use crate::config::SiteConfig;

/// Composite identifier for a host/interface pair: `"<host>-<interface>"`.
///
/// Pure formatting; an empty host yields `"-<interface>"` with no
/// special-casing.
pub fn node_name(host: &str, interface: &str) -> String {
    format!("{}-{}", host, interface)
}

/// All node names a site config declares, host by host in interface order
pub fn site_node_names(config: &SiteConfig) -> Vec<String> {
    let mut names = Vec::new();
    let mut hosts: Vec<_> = config.nodes.keys().collect();
    hosts.sort();
    for host in hosts {
        for interface in &config.nodes[host].interfaces {
            names.push(node_name(host, interface));
        }
    }
    names
}
