//! CSV providers for the node inventory, host notes, and CPU link tables.

mod errors;
mod ingest;
mod provider;

pub use errors::CsvProviderError;
pub use provider::CsvInventoryProvider;

#[cfg(test)]
mod tests;
