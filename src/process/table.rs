use serde::Serialize;

use crate::schema::SchemaVariant;

/// Ratings on the signed symmetric scale, one row per respondent and one
/// column per canonical key, in canonical order.
///
/// Only [`normalize`](crate::process::normalize) builds these, so every value
/// is within the scale bound and every key is present once. There is no
/// mutable access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable {
    variant: SchemaVariant,
    keys: Vec<String>,
    ids: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl NormalizedTable {
    pub(crate) fn new(
        variant: SchemaVariant,
        keys: Vec<String>,
        ids: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == keys.len()));
        debug_assert_eq!(ids.len(), rows.len());
        Self {
            variant,
            keys,
            ids,
            rows,
        }
    }

    /// Layout the export was read with.
    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// All respondents' values for `key`.
    pub fn column(&self, key: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(key)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }
}
