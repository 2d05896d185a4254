use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::entities::dataset::Dataset;
use crate::infra::import::columns::ColumnMap;
use crate::infra::import::ImportError;

pub fn load_csv(csv_path: &Path) -> Result<Dataset, ImportError> {
    let file = File::open(csv_path).map_err(|source| ImportError::Open {
        path: csv_path.to_path_buf(),
        source,
    })?;
    read_csv(file, &csv_path.to_string_lossy())
}

pub fn read_csv<R: Read>(input: R, source: &str) -> Result<Dataset, ImportError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();
    let columns = ColumnMap::resolve(headers.iter())?;

    let mut dataset = Dataset {
        source: source.to_string(),
        ..Dataset::default()
    };
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        let cells: Vec<&str> = record.iter().collect();
        match columns.to_record(row_idx, &cells) {
            Some(raw) => dataset.records.push(raw),
            None => {
                tracing::warn!(row = row_idx + 2, "skipping row without product code");
                dataset.skipped_rows += 1;
            }
        }
    }

    tracing::info!(
        source,
        rows = dataset.row_count(),
        skipped = dataset.skipped_rows,
        "loaded csv"
    );
    Ok(dataset)
}
