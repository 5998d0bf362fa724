//! Media mix reporting: summary figures and spreadsheet export.

pub mod export;
pub mod summary;

pub use export::{ExportDocument, SpreadsheetExporter, SpreadsheetRow, COLUMNS};
pub use summary::MixSummary;
