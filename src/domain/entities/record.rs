/// Descriptive columns shown for a product, copied verbatim from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFields {
    pub english_name: String,
    pub local_name: String,
    pub composition: String,
    pub single_or_compound: String,
    pub distributor: String,
    pub manufacturer: String,
    pub dosage_form: String,
    pub classification: String,
    pub classification_group: String,
    pub atc_code: String,
}

/// One row of the uploaded reimbursement table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 0-based data row position in the source file.
    pub row_idx: usize,
    pub product_code: String,
    pub ingredient: Option<String>,
    pub effective_date_raw: String,
    pub price_raw: String,
    pub display: DisplayFields,
}

impl RawRecord {
    pub fn ingredient_contains(&self, needle_lowercase: &str) -> bool {
        self.ingredient
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(needle_lowercase))
    }
}
