//! Rendering of display rows as the JavaScript data file.

use std::io::{self, Write};

use crate::display::DisplayRow;

const PREFIX: &str = "const data = ";
const SUFFIX: &str = ";";

/// Writes `rows` to `writer` as `const data = <json>;`, with the JSON array
/// pretty-printed using two-space indentation.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use nodegroup_core::{DisplayRow, write_data_literal};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let rows = vec![DisplayRow(
///     vec!["a01".into()],
///     "CPU1<br>x86_64".into(),
///     4,
///     "16".into(),
///     "None".into(),
///     0,
///     "Shared".into(),
///     vec![],
/// )];
/// let mut buffer = Vec::new();
/// write_data_literal(&rows, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.starts_with("const data = [\n  [\n    [\n      \"a01\"\n    ],"));
/// assert!(text.ends_with("]\n];"));
/// # Ok(())
/// # }
/// ```
pub fn write_data_literal(rows: &[DisplayRow], mut writer: impl Write) -> io::Result<()> {
    writer.write_all(PREFIX.as_bytes())?;
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(SUFFIX.as_bytes())?;
    Ok(())
}
