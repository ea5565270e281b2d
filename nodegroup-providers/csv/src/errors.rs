use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvProviderError {
    #[error("failed to open {table} table `{path}`: {source}")]
    Io {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("{table} table is missing required column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table} table row {row} has no value for `{column}`")]
    MissingValue {
        table: &'static str,
        row: usize,
        column: &'static str,
    },
    #[error("{table} table row {row} has non-integer `{column}` value `{value}`")]
    InvalidCount {
        table: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },
}
