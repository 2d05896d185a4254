use crate::domain::entities::record::RawRecord;
use crate::domain::roc_date::{parse_roc_date, ParsedDate};

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord<'a> {
    pub raw: &'a RawRecord,
    pub date: ParsedDate,
    pub price: Option<f64>,
}

pub fn normalize(raw: &RawRecord) -> NormalizedRecord<'_> {
    NormalizedRecord {
        raw,
        date: parse_roc_date(&raw.effective_date_raw),
        price: parse_price(&raw.price_raw),
    }
}

/// Reads a price cell. Blank, non-numeric and non-finite values are missing.
pub fn parse_price(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|price| price.is_finite())
}
