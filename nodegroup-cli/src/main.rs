//! CLI entry point for generating the node display data file.
//!
//! Parses the optional output path, runs the grouping pipeline, and maps
//! errors to exit status 1. Logging is initialised first so every stage can
//! emit diagnostics via `tracing`.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use nodegroup_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field, info};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to generate data file")?;
    info!(
        output = %summary.output.display(),
        nodes = summary.nodes,
        groups = summary.groups,
        "run complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let cli_error = err.downcast_ref::<CliError>();
        let code = cli_error.and_then(|cli_error| match cli_error {
            CliError::Pipeline(pipeline) => Some(pipeline.code()),
            _ => None,
        });
        let code_field = code.map(|code| field::display(code.as_str()));

        if cli_error.is_some_and(CliError::is_sanity_failure) {
            error!(
                error = %err,
                code = code_field,
                "file failed sanity check, data file not renewed"
            );
        } else {
            error!(error = %err, code = code_field, "command execution failed");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
