use serde::Serialize;
use tracing::debug;

use super::{flatten, Datasets, SummaryTable};
use crate::error::ConfigError;
use crate::schema::CategoryMap;
use crate::stats::mean;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMean {
    pub category: String,
    pub mean: f64,
}

/// Per dataset, the mean of every rating in each category's columns.
///
/// All cells of a category are pooled, which equals the mean of the column
/// means since every column has one value per respondent. Categories come
/// out in `categories` order for every dataset.
pub fn average_by_dimension(
    datasets: &Datasets,
    categories: &CategoryMap,
) -> Result<SummaryTable<Vec<CategoryMean>>, ConfigError> {
    let mut entries = Vec::with_capacity(datasets.len());
    for (name, table) in datasets.iter() {
        let mut means = Vec::with_capacity(categories.len());
        for (category, keys) in categories.iter() {
            if keys.is_empty() {
                return Err(ConfigError::EmptyCategory(category.to_string()));
            }
            let values = flatten(name, table, keys)?;
            means.push(CategoryMean {
                category: category.to_string(),
                mean: mean(&values),
            });
        }
        debug!(dataset = name, ?means, "category averages");
        entries.push((name.to_string(), means));
    }
    Ok(SummaryTable::from_entries(entries))
}

/// Look up one category's mean in an [`average_by_dimension`] row.
pub fn category_mean(means: &[CategoryMean], category: &str) -> Option<f64> {
    means
        .iter()
        .find(|m| m.category == category)
        .map(|m| m.mean)
}
