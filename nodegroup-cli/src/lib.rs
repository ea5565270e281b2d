//! Support library for the nodegroup CLI binary.
//!
//! Re-exports the CLI and logging modules so tests can exercise the command
//! without forking a subprocess.

pub mod cli;
pub mod logging;
