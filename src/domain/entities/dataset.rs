use crate::domain::entities::record::RawRecord;

/// A loaded upload. Read-only for the lifetime of every query run against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub source: String,
    pub records: Vec<RawRecord>,
    /// Rows dropped at import because their product code was blank.
    pub skipped_rows: usize,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}
