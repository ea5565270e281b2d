//! Locations of the input tables.

use std::env;
use std::path::{Path, PathBuf};

use super::commands::CliError;

/// Node inventory exported by the metrics collector.
pub const INVENTORY_PATH: &str = "/projectnb/rcsmetrics/nodes/data/nodes.csv";
/// Host notes table shipped alongside the tool.
pub const NOTES_FILE: &str = "extrainfo.csv";
/// CPU link table shipped alongside the tool.
pub const CPU_LINKS_FILE: &str = "cpulinks.csv";

/// Paths of the three tables a run reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// Node inventory CSV.
    pub inventory: PathBuf,
    /// Host notes CSV.
    pub notes: PathBuf,
    /// CPU link CSV.
    pub cpu_links: PathBuf,
}

impl InputPaths {
    /// Uses `inventory` for the node table and looks for the auxiliary
    /// tables in `dir`.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use nodegroup_cli::cli::InputPaths;
    ///
    /// let paths = InputPaths::with_tables_in("/data/nodes.csv", Path::new("/opt/nodegroup"));
    /// assert_eq!(paths.notes, Path::new("/opt/nodegroup/extrainfo.csv"));
    /// assert_eq!(paths.cpu_links, Path::new("/opt/nodegroup/cpulinks.csv"));
    /// ```
    #[must_use]
    pub fn with_tables_in(inventory: impl Into<PathBuf>, dir: &Path) -> Self {
        Self {
            inventory: inventory.into(),
            notes: dir.join(NOTES_FILE),
            cpu_links: dir.join(CPU_LINKS_FILE),
        }
    }

    /// Default locations: the collector's inventory export plus the
    /// auxiliary tables next to the running executable.
    ///
    /// # Errors
    /// Returns [`CliError::Locate`] when the executable path is unavailable.
    pub fn beside_executable() -> Result<Self, CliError> {
        let exe = env::current_exe().map_err(|source| CliError::Locate { source })?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::with_tables_in(INVENTORY_PATH, dir))
    }
}
