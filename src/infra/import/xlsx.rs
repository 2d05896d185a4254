use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::dataset::Dataset;
use crate::infra::import::columns::ColumnMap;
use crate::infra::import::ImportError;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => format_float(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Whole numbers lose their `.0` so numeric date cells read as `1090101`.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Loads the first worksheet; its first row is the header.
pub fn load_xlsx(xlsx_path: &Path) -> Result<Dataset, ImportError> {
    let mut workbook = open_workbook_auto(xlsx_path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyWorkbook)??;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();
    rows_to_dataset(&rows, &xlsx_path.to_string_lossy())
}

pub fn rows_to_dataset(rows: &[Vec<String>], source: &str) -> Result<Dataset, ImportError> {
    let (header, data) = rows.split_first().ok_or(ImportError::MissingHeader)?;
    let columns = ColumnMap::resolve(header.iter().map(String::as_str))?;

    let mut dataset = Dataset {
        source: source.to_string(),
        ..Dataset::default()
    };
    for (row_idx, row) in data.iter().enumerate() {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
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
        "loaded worksheet"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::roc_date::{parse_roc_date, DateFormatError, ParsedDate};
    use crate::infra::import::columns::REQUIRED_COLUMNS;

    #[test]
    fn cell_to_string_drops_integral_fraction() {
        assert_eq!(cell_to_string(&Data::Float(1090101.0)), "1090101");
        assert_eq!(cell_to_string(&Data::Float(35.2)), "35.2");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn rows_to_dataset_ignores_blank_rows() {
        let header: Vec<String> = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        let mut data = vec!["".to_string(); REQUIRED_COLUMNS.len()];
        data[0] = "A1".to_string();
        data[12] = "1090101".to_string();
        let blank = vec!["".to_string(); REQUIRED_COLUMNS.len()];

        let dataset =
            rows_to_dataset(&[header, blank, data], "book.xlsx").expect("rows should load");

        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.skipped_rows, 0);
        assert_eq!(dataset.records[0].row_idx, 1);
        assert_eq!(dataset.records[0].effective_date_raw, "1090101");
    }

    #[test]
    fn numeric_pre_2011_date_surfaces_dropped_leading_zero() {
        let raw = cell_to_string(&Data::Float(991231.0));
        assert_eq!(raw, "991231");
        assert!(matches!(
            parse_roc_date(&raw),
            ParsedDate::Failure {
                reason: DateFormatError::MissingLeadingZero,
                ..
            }
        ));
    }

    #[test]
    fn rows_to_dataset_requires_header() {
        assert!(matches!(
            rows_to_dataset(&[], "empty.xlsx"),
            Err(ImportError::MissingHeader)
        ));
    }
}
