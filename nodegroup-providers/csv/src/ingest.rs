//! Helpers for reading CSV tables into typed rows.
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::errors::CsvProviderError;

/// Cell contents treated as missing, in addition to the empty cell.
pub(crate) const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub(crate) fn normalize_cell(raw: Option<String>) -> Option<String> {
    raw.filter(|cell| !cell.is_empty() && !MISSING_MARKERS.contains(&cell.as_str()))
}

/// Drops an all-zero fractional part from a decimal integer, so `80.0` and
/// `80.` read as `80`. Anything else is returned unchanged.
pub(crate) fn strip_integral_fraction(cell: &str) -> &str {
    match cell.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
                && whole.bytes().all(|byte| byte.is_ascii_digit())
                && fraction.bytes().all(|byte| byte == b'0') =>
        {
            whole
        }
        _ => cell,
    }
}

/// Normalises a size or speed cell. Exporters write numeric columns with
/// gaps as floats, so integral spellings are reduced to the integer.
pub(crate) fn normalize_quantity(raw: Option<String>) -> Option<String> {
    normalize_cell(raw).map(|cell| strip_integral_fraction(&cell).to_owned())
}

/// Parses a count column. Integral float spellings (`4.0`) are accepted
/// because exporters write integer columns containing gaps as floats.
pub(crate) fn parse_count(
    table: &'static str,
    row: usize,
    column: &'static str,
    raw: Option<String>,
) -> Result<Option<u32>, CsvProviderError> {
    let Some(cell) = normalize_cell(raw) else {
        return Ok(None);
    };
    strip_integral_fraction(&cell)
        .parse::<u32>()
        .map(Some)
        .map_err(|_| CsvProviderError::InvalidCount {
            table,
            row,
            column,
            value: cell.clone(),
        })
}

pub(crate) fn require_value(
    table: &'static str,
    row: usize,
    column: &'static str,
    raw: Option<String>,
) -> Result<String, CsvProviderError> {
    normalize_cell(raw).ok_or(CsvProviderError::MissingValue { table, row, column })
}

/// Reads every data row of `reader` as `T`, after checking that the header
/// carries each of `required`. Rows are returned with their 1-based data row
/// number.
pub(crate) fn read_table<R, T>(
    table: &'static str,
    reader: R,
    required: &[&'static str],
) -> Result<Vec<(usize, T)>, CsvProviderError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|source| CsvProviderError::Csv { table, source })?;
    if let Some(column) = required
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(CsvProviderError::MissingColumn { table, column });
    }

    csv_reader
        .deserialize::<T>()
        .enumerate()
        .map(|(index, row)| {
            row.map(|value| (index + 1, value))
                .map_err(|source| CsvProviderError::Csv { table, source })
        })
        .collect()
}
