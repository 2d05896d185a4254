use std::collections::HashMap;

use crate::domain::entities::dataset::Dataset;
use crate::domain::history::{build, ProductHistory};
use crate::domain::normalize::{normalize, NormalizedRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<'a> {
    /// The ingredient box is empty.
    NoQuery,
    /// One history per matched product code, in order of first appearance.
    /// Empty when nothing matched.
    Matches(Vec<ProductHistory<'a>>),
}

impl QueryOutcome<'_> {
    pub fn product_count(&self) -> usize {
        match self {
            QueryOutcome::NoQuery => 0,
            QueryOutcome::Matches(histories) => histories.len(),
        }
    }
}

/// Filters `dataset` by a case-insensitive ingredient substring and rebuilds
/// the price history of every matching product code.
pub fn query<'a>(dataset: &'a Dataset, ingredient: &str) -> QueryOutcome<'a> {
    if ingredient.trim().is_empty() {
        return QueryOutcome::NoQuery;
    }
    // Surrounding spaces are part of the term once it is non-blank.
    let needle = ingredient.to_lowercase();

    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<NormalizedRecord<'a>>> = Vec::new();
    for record in dataset
        .records
        .iter()
        .filter(|record| record.ingredient_contains(&needle))
    {
        let slot = *slots
            .entry(record.product_code.as_str())
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[slot].push(normalize(record));
    }

    let histories: Vec<ProductHistory<'a>> = groups.into_iter().map(build).collect();
    tracing::debug!(
        ingredient = %needle,
        products = histories.len(),
        "ingredient query finished"
    );
    QueryOutcome::Matches(histories)
}
