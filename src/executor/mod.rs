//! Command execution module
//!
//! Provides async CI step execution with:
//! - Real-time stdout streaming (chunked, flushed per read)
//! - Exit-code propagation as an error value
//! - Environment variable injection
//! - Working directory control

pub mod runner;

pub use runner::*;
