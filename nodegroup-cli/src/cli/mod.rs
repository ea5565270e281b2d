//! Command-line interface orchestration for nodegroup.
//!
//! The CLI takes one optional argument, the output path, loads the inventory
//! tables from their fixed locations, and replaces the data file when the
//! run passes the sanity check.

mod commands;
mod output;
mod paths;

pub use commands::{Cli, CliError, DEFAULT_OUTPUT, ExecutionSummary, run_cli, run_with_inputs};
pub use paths::{CPU_LINKS_FILE, INVENTORY_PATH, InputPaths, NOTES_FILE};

#[cfg(test)]
mod test_helpers;
