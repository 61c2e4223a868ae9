// src/schema/mod.rs
pub mod attrakdiff;
pub mod category;
pub mod locale;
pub mod types;

use std::collections::HashMap;

pub use category::{categorize, CategoryMap};
pub use locale::{ChartLabels, ChartStrings, Locale, Localized};
pub use types::{Polarity, SchemaVariant, SurveyColumn, WordPair, REVERSED_MARKER};

use crate::error::ConfigError;

/// Static description of a survey: both export layouts, the categories and
/// the word-pair dictionary that fixes the canonical column order.
///
/// Built once and handed to every stage by reference.
#[derive(Debug, Clone)]
pub struct SchemaTables {
    marker: &'static str,
    short: Vec<SurveyColumn>,
    long: Vec<SurveyColumn>,
    categories: Vec<&'static str>,
    pairs: Vec<WordPair>,
    ordinals: HashMap<&'static str, usize>,
    strings: ChartStrings,
}

impl SchemaTables {
    /// Layout entries carry the [`REVERSED_MARKER`] suffix for reversed
    /// questions; every key must have an entry in `pairs`.
    pub fn new(
        marker: &'static str,
        short: &[&'static str],
        long: &[&'static str],
        categories: &[&'static str],
        pairs: &[WordPair],
        strings: ChartStrings,
    ) -> Result<Self, ConfigError> {
        if short.len() == long.len() {
            return Err(ConfigError::AmbiguousSchema(short.len()));
        }

        let ordinals: HashMap<&'static str, usize> =
            pairs.iter().enumerate().map(|(i, p)| (p.key, i)).collect();

        let short: Vec<SurveyColumn> = short.iter().copied().map(SurveyColumn::parse).collect();
        let long: Vec<SurveyColumn> = long.iter().copied().map(SurveyColumn::parse).collect();
        if let Some(col) = short
            .iter()
            .chain(long.iter())
            .find(|c| !ordinals.contains_key(c.key))
        {
            return Err(ConfigError::UnknownPair(col.key.to_string()));
        }

        Ok(Self {
            marker,
            short,
            long,
            categories: categories.to_vec(),
            pairs: pairs.to_vec(),
            ordinals,
            strings,
        })
    }

    /// Name of the column that ends the rating block.
    pub fn marker(&self) -> &'static str {
        self.marker
    }

    pub fn columns(&self, variant: SchemaVariant) -> &[SurveyColumn] {
        match variant {
            SchemaVariant::Short => &self.short,
            SchemaVariant::Long => &self.long,
        }
    }

    /// Which layout has exactly `count` rating columns.
    pub fn variant_for(&self, count: usize) -> Option<SchemaVariant> {
        if count == self.short.len() {
            Some(SchemaVariant::Short)
        } else if count == self.long.len() {
            Some(SchemaVariant::Long)
        } else {
            None
        }
    }

    pub fn categories(&self) -> &[&'static str] {
        &self.categories
    }

    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    /// Position of `key` in the canonical order.
    pub fn ordinal(&self, key: &str) -> Option<usize> {
        self.ordinals.get(key).copied()
    }

    pub fn pair(&self, key: &str) -> Option<&WordPair> {
        self.ordinal(key).map(|i| &self.pairs[i])
    }

    pub fn chart_labels(&self, locale: Locale) -> ChartLabels {
        self.strings.resolve(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::locale::CHART_STRINGS;

    fn pair(key: &'static str) -> WordPair {
        WordPair {
            key,
            left: Localized::new("-", "-", "-"),
            right: Localized::new("+", "+", "+"),
        }
    }

    #[test]
    fn rejects_layout_keys_without_labels() {
        let pairs = [pair("A1"), pair("B1")];
        let err = SchemaTables::new("URL", &["A1"], &["A1", "C1*"], &["A", "B"], &pairs, CHART_STRINGS)
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownPair("C1".to_string()));
    }

    #[test]
    fn rejects_layouts_of_equal_size() {
        let pairs = [pair("A1"), pair("B1")];
        let err = SchemaTables::new("URL", &["A1"], &["B1"], &["A", "B"], &pairs, CHART_STRINGS)
            .unwrap_err();
        assert_eq!(err, ConfigError::AmbiguousSchema(1));
    }

    #[test]
    fn ordinal_follows_pair_order() {
        let pairs = [pair("B1"), pair("A1")];
        let tables =
            SchemaTables::new("URL", &["A1"], &["A1*", "B1"], &["A", "B"], &pairs, CHART_STRINGS)
                .unwrap();
        assert_eq!(tables.ordinal("B1"), Some(0));
        assert_eq!(tables.ordinal("A1"), Some(1));
        assert_eq!(tables.ordinal("A1*"), None);
        assert_eq!(tables.columns(SchemaVariant::Long)[0].polarity, Polarity::Reversed);
    }
}
