//! Price history reconstruction for a single product code.
//!
//! Records with a decodable effective date are ordered chronologically
//! (stable, so same-day rows keep their file order) and compared end to end
//! and pairwise. Records whose date failed to decode are kept aside so they
//! can be shown to the user, but never take part in the arithmetic.

use crate::domain::calendar::Elapsed;
use crate::domain::normalize::NormalizedRecord;

/// Percentage decrease from `previous` to `current`.
///
/// Negative when the price went up. `None` when either price is missing or
/// `previous` is zero.
pub fn price_drop_percent(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    let previous = previous?;
    let current = current?;
    if previous == 0.0 {
        return None;
    }
    let drop = (previous - current) / previous * 100.0;
    drop.is_finite().then_some(drop)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry<'a> {
    pub predecessor: NormalizedRecord<'a>,
    pub current: NormalizedRecord<'a>,
    pub elapsed: Elapsed,
    pub price_drop: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Summary<'a> {
    /// At least one record has a valid date.
    Dated {
        earliest: NormalizedRecord<'a>,
        latest: NormalizedRecord<'a>,
        elapsed: Elapsed,
        /// `None` for a single dated record: one point has no interval.
        price_drop: Option<f64>,
    },
    /// No record has a valid date. `first`/`last` are the first and last rows
    /// in file order, kept only so something can be displayed.
    Undated {
        first: NormalizedRecord<'a>,
        last: NormalizedRecord<'a>,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductHistory<'a> {
    pub product_code: String,
    pub ordered_valid: Vec<NormalizedRecord<'a>>,
    pub failed: Vec<NormalizedRecord<'a>>,
    pub summary: Summary<'a>,
    pub ledger: Vec<LedgerEntry<'a>>,
}

impl<'a> ProductHistory<'a> {
    #[cfg(test)]
    pub fn earliest(&self) -> Option<&NormalizedRecord<'a>> {
        self.ordered_valid.first()
    }

    pub fn latest(&self) -> Option<&NormalizedRecord<'a>> {
        self.ordered_valid.last()
    }

    /// Record whose descriptive fields represent the product.
    pub fn display_record(&self) -> Option<&NormalizedRecord<'a>> {
        match &self.summary {
            Summary::Dated { .. } => self.latest(),
            Summary::Undated { last, .. } => Some(last),
            Summary::Empty => None,
        }
    }
}

/// Builds the history of one product code from its rows in file order.
pub fn build(records: Vec<NormalizedRecord<'_>>) -> ProductHistory<'_> {
    let product_code = records
        .first()
        .map(|record| record.raw.product_code.clone())
        .unwrap_or_default();

    let fallback = match (records.first(), records.last()) {
        (Some(first), Some(last)) => Summary::Undated {
            first: first.clone(),
            last: last.clone(),
        },
        _ => Summary::Empty,
    };

    let (mut ordered_valid, failed): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| record.date.date().is_some());
    ordered_valid.sort_by_key(|record| record.date.date());

    let summary = match (ordered_valid.first(), ordered_valid.last()) {
        (Some(earliest), Some(latest)) => {
            let elapsed = match (earliest.date.date(), latest.date.date()) {
                (Some(start), Some(end)) => Elapsed::between(start, end),
                _ => Elapsed::default(),
            };
            let price_drop = if ordered_valid.len() > 1 {
                price_drop_percent(earliest.price, latest.price)
            } else {
                None
            };
            Summary::Dated {
                earliest: earliest.clone(),
                latest: latest.clone(),
                elapsed,
                price_drop,
            }
        }
        _ => fallback,
    };

    let ledger = ordered_valid
        .windows(2)
        .map(|pair| {
            let (predecessor, current) = (&pair[0], &pair[1]);
            let elapsed = match (predecessor.date.date(), current.date.date()) {
                (Some(start), Some(end)) => Elapsed::between(start, end),
                _ => Elapsed::default(),
            };
            LedgerEntry {
                predecessor: predecessor.clone(),
                current: current.clone(),
                elapsed,
                price_drop: price_drop_percent(predecessor.price, current.price),
            }
        })
        .collect();

    ProductHistory {
        product_code,
        ordered_valid,
        failed,
        summary,
        ledger,
    }
}
