pub(crate) use super::{CsvInventoryProvider, CsvProviderError};

mod errors;
