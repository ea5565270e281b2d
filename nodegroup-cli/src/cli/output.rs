//! Atomic replacement of the generated data file.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use nodegroup_core::{DisplayRow, write_data_literal};
use tempfile::NamedTempFile;

use super::commands::CliError;

#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;

/// Writes `rows` to `path` through a sibling temporary file, so readers see
/// either the previous file or the complete new one.
pub(crate) fn replace_data_file(path: &Path, rows: &[DisplayRow]) -> Result<(), CliError> {
    let write_err = |source: io::Error| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        write_data_literal(rows, &mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }
    // Temporary files are created owner-only; keep the published file
    // readable the way the previous one was.
    match fs::metadata(path) {
        Ok(existing) => staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?,
        Err(_) => set_default_permissions(staged.as_file()).map_err(write_err)?,
    }
    staged
        .persist(path)
        .map_err(|err| write_err(err.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(DEFAULT_MODE))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
