use std::path::Path;

use crate::domain::entities::dataset::Dataset;
use crate::infra::import::csv::load_csv;
use crate::infra::import::xlsx::load_xlsx;
use crate::infra::import::ImportError;

pub const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Loads an uploaded reimbursement table, choosing the reader by extension.
pub fn import_dataset(path: &Path) -> Result<Dataset, ImportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        load_csv(path)
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        load_xlsx(path)
    } else {
        Err(ImportError::UnsupportedExtension(ext))
    }
}
