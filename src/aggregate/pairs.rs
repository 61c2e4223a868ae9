use serde::Serialize;

use super::{Datasets, SummaryTable};
use crate::error::ConfigError;
use crate::schema::{CategoryMap, Locale, SchemaTables};
use crate::stats::mean;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairMean {
    pub key: String,
    pub mean: f64,
}

/// A [`PairMean`] with the adjectives to print on either side of the scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledPair {
    pub key: String,
    pub left: &'static str,
    pub right: &'static str,
    pub mean: f64,
}

/// Run of consecutive word-pair rows that belong to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpan {
    pub category: String,
    pub start: usize,
    pub len: usize,
}

/// Per dataset, the mean answer of every word pair, in canonical order.
pub fn pair_means(datasets: &Datasets) -> SummaryTable<Vec<PairMean>> {
    let entries = datasets
        .iter()
        .map(|(name, table)| {
            let means = table
                .keys()
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let column: Vec<f64> = table.rows().iter().map(|r| r[i]).collect();
                    PairMean {
                        key: key.clone(),
                        mean: mean(&column),
                    }
                })
                .collect();
            (name.to_string(), means)
        })
        .collect();
    SummaryTable::from_entries(entries)
}

/// Row ranges of each category in a word-pair chart laid out in category
/// order.
pub fn category_spans(categories: &CategoryMap) -> Vec<CategorySpan> {
    let mut start = 0;
    categories
        .iter()
        .map(|(name, keys)| {
            let span = CategorySpan {
                category: name.to_string(),
                start,
                len: keys.len(),
            };
            start += keys.len();
            span
        })
        .collect()
}

/// Attach the `locale` adjectives of each pair.
pub fn label_pairs(
    means: &[PairMean],
    tables: &SchemaTables,
    locale: Locale,
) -> Result<Vec<LabeledPair>, ConfigError> {
    means
        .iter()
        .map(|m| {
            let pair = tables
                .pair(&m.key)
                .ok_or_else(|| ConfigError::UnknownPair(m.key.clone()))?;
            let (left, right) = pair.labels(locale);
            Ok(LabeledPair {
                key: m.key.clone(),
                left,
                right,
                mean: m.mean,
            })
        })
        .collect()
}
