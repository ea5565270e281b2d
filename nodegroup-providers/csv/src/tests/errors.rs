use super::CsvProviderError;
use rstest::rstest;
use std::path::PathBuf;

#[rstest]
#[case::missing_column(
    CsvProviderError::MissingColumn { table: "inventory", column: "flag" },
    "inventory table is missing required column `flag`",
)]
#[case::missing_value(
    CsvProviderError::MissingValue { table: "cpu links", row: 3, column: "cpu_url" },
    "cpu links table row 3 has no value for `cpu_url`",
)]
#[case::invalid_count(
    CsvProviderError::InvalidCount {
        table: "inventory",
        row: 7,
        column: "gpus",
        value: "two".into(),
    },
    "inventory table row 7 has non-integer `gpus` value `two`",
)]
fn error_messages_name_table_and_location(#[case] err: CsvProviderError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn io_error_keeps_source() {
    let err = CsvProviderError::Io {
        table: "notes",
        path: PathBuf::from("/missing/extrainfo.csv"),
        source: std::io::Error::other("boom"),
    };
    assert!(err.to_string().contains("`/missing/extrainfo.csv`"));
    assert!(std::error::Error::source(&err).is_some());
}
