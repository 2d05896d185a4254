use crate::domain::entities::record::{DisplayFields, RawRecord};
use crate::infra::import::ImportError;

pub const COL_PRODUCT_CODE: &str = "藥品代號";
pub const COL_ENGLISH_NAME: &str = "藥品英文名稱";
pub const COL_LOCAL_NAME: &str = "藥品中文名稱";
pub const COL_INGREDIENT: &str = "成分";
pub const COL_SINGLE_OR_COMPOUND: &str = "單複方";
pub const COL_PRICE: &str = "支付價";
pub const COL_DISTRIBUTOR: &str = "藥商";
pub const COL_MANUFACTURER: &str = "製造廠名稱";
pub const COL_DOSAGE_FORM: &str = "劑型";
pub const COL_CLASSIFICATION: &str = "藥品分類";
pub const COL_CLASSIFICATION_GROUP: &str = "分類分組名稱";
pub const COL_ATC_CODE: &str = "ATC代碼";
pub const COL_EFFECTIVE_DATE: &str = "有效起日";

pub const REQUIRED_COLUMNS: [&str; 13] = [
    COL_PRODUCT_CODE,
    COL_ENGLISH_NAME,
    COL_LOCAL_NAME,
    COL_INGREDIENT,
    COL_SINGLE_OR_COMPOUND,
    COL_PRICE,
    COL_DISTRIBUTOR,
    COL_MANUFACTURER,
    COL_DOSAGE_FORM,
    COL_CLASSIFICATION,
    COL_CLASSIFICATION_GROUP,
    COL_ATC_CODE,
    COL_EFFECTIVE_DATE,
];

fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnMap {
    /// Matches header names exactly (ignoring surrounding whitespace and a
    /// leading BOM). Reports every missing column at once.
    pub fn resolve<'h, I>(headers: I) -> Result<Self, ImportError>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let headers: Vec<&str> = headers.into_iter().map(normalize_header).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::MissingHeader);
        }

        let mut indices = [0_usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
            match headers.iter().position(|h| h == name) {
                Some(idx) => indices[slot] = idx,
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }
        Ok(Self { indices })
    }

    fn cell<'r>(&self, row: &[&'r str], column: &str) -> &'r str {
        REQUIRED_COLUMNS
            .iter()
            .position(|name| *name == column)
            .and_then(|slot| row.get(self.indices[slot]).copied())
            .map(str::trim)
            .unwrap_or("")
    }

    /// Converts one data row. Returns `None` when the product code is blank.
    pub fn to_record(&self, row_idx: usize, row: &[&str]) -> Option<RawRecord> {
        let product_code = self.cell(row, COL_PRODUCT_CODE);
        if product_code.is_empty() {
            return None;
        }
        let ingredient = self.cell(row, COL_INGREDIENT);

        Some(RawRecord {
            row_idx,
            product_code: product_code.to_string(),
            ingredient: (!ingredient.is_empty()).then(|| ingredient.to_string()),
            effective_date_raw: self.cell(row, COL_EFFECTIVE_DATE).to_string(),
            price_raw: self.cell(row, COL_PRICE).to_string(),
            display: DisplayFields {
                english_name: self.cell(row, COL_ENGLISH_NAME).to_string(),
                local_name: self.cell(row, COL_LOCAL_NAME).to_string(),
                composition: ingredient.to_string(),
                single_or_compound: self.cell(row, COL_SINGLE_OR_COMPOUND).to_string(),
                distributor: self.cell(row, COL_DISTRIBUTOR).to_string(),
                manufacturer: self.cell(row, COL_MANUFACTURER).to_string(),
                dosage_form: self.cell(row, COL_DOSAGE_FORM).to_string(),
                classification: self.cell(row, COL_CLASSIFICATION).to_string(),
                classification_group: self.cell(row, COL_CLASSIFICATION_GROUP).to_string(),
                atc_code: self.cell(row, COL_ATC_CODE).to_string(),
            },
        })
    }
}
