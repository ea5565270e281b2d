//! Command implementation and argument parsing for the nodegroup CLI.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use nodegroup_core::{InventorySource, PipelineBuilder, PipelineError};
use nodegroup_providers_csv::{CsvInventoryProvider, CsvProviderError};
use thiserror::Error;
use tracing::{info, instrument};

use super::output::replace_data_file;
use super::paths::InputPaths;

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "data.js";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "nodegroup",
    about = "Group active cluster nodes by hardware and write the display data file."
)]
pub struct Cli {
    /// Destination of the generated JavaScript data file.
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

/// Errors surfaced while executing the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// The running executable could not be located.
    #[error("failed to locate the running executable: {source}")]
    Locate {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing the data file failed.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Loading an input table failed.
    #[error(transparent)]
    Provider(#[from] CsvProviderError),
    /// The pipeline rejected the inventory.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    /// Returns whether the run was stopped by the group-count sanity check.
    #[must_use]
    pub fn is_sanity_failure(&self) -> bool {
        matches!(
            self,
            Self::Pipeline(PipelineError::SanityCheckFailed { .. })
        )
    }
}

/// Summarises a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// File that was written.
    pub output: PathBuf,
    /// Rows read from the inventory.
    pub nodes: usize,
    /// Groups written to the data file.
    pub groups: usize,
}

/// Executes the CLI with the default input locations.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be loaded, the sanity check
/// fails, or the data file cannot be written.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let inputs = InputPaths::beside_executable()?;
    run_with_inputs(&cli.output, &inputs, PipelineBuilder::new())
}

/// Loads `inputs`, runs the pipeline configured by `builder`, and writes the
/// result to `output`. Nothing is written when any step fails.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid, an input cannot
/// be loaded, the sanity check fails, or the data file cannot be written.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use nodegroup_cli::cli::{InputPaths, run_with_inputs};
/// # use nodegroup_core::PipelineBuilder;
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// std::fs::write(
///     dir.path().join("nodes.csv"),
///     "host,netbox_status,processor_type,cores,memory,scratch,eth_speed,gpu_type,gpus,flag,cpu_arch,gpu_cc,gpu_mem\n\
///      a01,Active,CPU1,4,16,100,10,None,0,S,x86_64,NaN,NaN\n",
/// )?;
/// std::fs::write(dir.path().join("extrainfo.csv"), "host,notes\n")?;
/// std::fs::write(dir.path().join("cpulinks.csv"), "cpu_model,cpu_display_name,cpu_url\n")?;
/// let inputs = InputPaths::with_tables_in(dir.path().join("nodes.csv"), dir.path());
/// let output = dir.path().join("data.js");
/// let summary = run_with_inputs(&output, &inputs, PipelineBuilder::new().with_min_groups(1))?;
/// assert_eq!(summary.groups, 1);
/// assert!(std::fs::read_to_string(&output)?.starts_with("const data = ["));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip_all,
    fields(output = %output.display(), inventory = %inputs.inventory.display()),
)]
pub fn run_with_inputs(
    output: &Path,
    inputs: &InputPaths,
    builder: PipelineBuilder,
) -> Result<ExecutionSummary, CliError> {
    let pipeline = builder.build()?;
    let provider = CsvInventoryProvider::try_from_paths(
        derive_source_name(&inputs.inventory),
        &inputs.inventory,
        &inputs.notes,
        &inputs.cpu_links,
    )?;
    let rows = pipeline.run(&provider)?;
    replace_data_file(output, &rows)?;
    info!(groups = rows.len(), "data file written");
    Ok(ExecutionSummary {
        output: output.to_path_buf(),
        nodes: provider.nodes().len(),
        groups: rows.len(),
    })
}

pub(crate) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "inventory".to_owned(), ToOwned::to_owned)
}
