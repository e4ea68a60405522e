//! Site configuration module for fabci
//!
//! Provides XDG-compliant layered loading of the site description:
//! default run behavior, build/log paths, and the cluster node table.

pub mod loader;
pub mod model;

pub use loader::{config_paths, find_config_files, load_config};
pub use model::*;
