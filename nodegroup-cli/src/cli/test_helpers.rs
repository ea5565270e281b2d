//! Small helpers shared across CLI tests.
//!
//! Each test lays out the three input tables in a temporary directory and
//! runs the command against them.

use std::fs;
use std::io;
use std::path::PathBuf;

use nodegroup_core::PipelineBuilder;
use nodegroup_test_support::fixtures::{InventoryCsv, cpu_links_csv, notes_csv};
use tempfile::TempDir;

use super::{CliError, InputPaths, run_with_inputs};

pub(super) struct Workspace {
    pub(super) dir: TempDir,
    pub(super) inputs: InputPaths,
}

impl Workspace {
    pub(super) fn output(&self) -> PathBuf {
        self.dir.path().join("data.js")
    }
}

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn workspace(
    inventory: &InventoryCsv,
    notes: &[(&str, &str)],
    links: &[(&str, &str, &str)],
) -> io::Result<Workspace> {
    let dir = temp_dir();
    let inventory_path = dir.path().join("nodes.csv");
    fs::write(&inventory_path, inventory.render())?;
    let inputs = InputPaths::with_tables_in(inventory_path, dir.path());
    fs::write(&inputs.notes, notes_csv(notes))?;
    fs::write(&inputs.cpu_links, cpu_links_csv(links))?;
    Ok(Workspace { dir, inputs })
}

pub(super) fn run_expecting_error(
    workspace: &Workspace,
    builder: PipelineBuilder,
    panic_msg: &str,
) -> CliError {
    match run_with_inputs(&workspace.output(), &workspace.inputs, builder) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
