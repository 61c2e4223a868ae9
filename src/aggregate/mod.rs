// src/aggregate/mod.rs
//! Summaries over a collection of normalized datasets.
//!
//! Every table produced here is keyed by dataset name in the order the
//! datasets were inserted; that order is the legend order downstream.

pub mod average;
pub mod pairs;
pub mod portfolio;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use average::{average_by_dimension, CategoryMean};
pub use pairs::{category_spans, label_pairs, pair_means, CategorySpan, LabeledPair, PairMean};
pub use portfolio::{portfolio, PortfolioAxes, PortfolioPoint, Region};

use crate::error::ConfigError;
use crate::process::NormalizedTable;

/// Named datasets in insertion order. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    entries: Vec<(String, NormalizedTable)>,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        table: NormalizedTable,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ConfigError::DuplicateDataset(name));
        }
        self.entries.push((name, table));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NormalizedTable> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NormalizedTable)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys carried by every dataset, in the first dataset's order. Short
    /// and long exports can be compared on this set.
    pub fn common_keys(&self) -> Vec<String> {
        let Some((_, first)) = self.entries.first() else {
            return Vec::new();
        };
        first
            .keys()
            .iter()
            .filter(|k| self.entries.iter().all(|(_, t)| t.column_index(k).is_some()))
            .cloned()
            .collect()
    }
}

/// Dataset name → statistic, in dataset insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable<T> {
    entries: Vec<(String, T)>,
}

impl<T> SummaryTable<T> {
    pub(crate) fn from_entries(entries: Vec<(String, T)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `f` to every statistic, keeping names and order.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(&str, &T) -> Result<U, E>,
    ) -> Result<SummaryTable<U>, E> {
        let entries = self
            .entries
            .iter()
            .map(|(n, v)| f(n, v).map(|u| (n.clone(), u)))
            .collect::<Result<_, E>>()?;
        Ok(SummaryTable { entries })
    }
}

impl<T: Serialize> Serialize for SummaryTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Every value of `keys`' columns across all respondents, row by row.
pub(crate) fn flatten(
    dataset: &str,
    table: &NormalizedTable,
    keys: &[String],
) -> Result<Vec<f64>, ConfigError> {
    let indices = keys
        .iter()
        .map(|k| {
            table
                .column_index(k)
                .ok_or_else(|| ConfigError::UnknownColumn {
                    dataset: dataset.to_string(),
                    column: k.clone(),
                })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    Ok(table
        .rows()
        .iter()
        .flat_map(|row| indices.iter().map(move |&i| row[i]))
        .collect())
}
