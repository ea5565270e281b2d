//! Shared test utilities used across nodegroup crates.

pub mod fixtures;
pub mod tracing;
