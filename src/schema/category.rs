// src/schema/category.rs
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ConfigError;

/// Ordered mapping of category name to the canonical keys it groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryMap {
    entries: Vec<(String, Vec<String>)>,
}

/// Group `columns` by substring match on each category name, keeping both
/// the category order and the column order.
///
/// Must be recomputed for every column set: the result depends on which
/// keys a layout actually carries.
pub fn categorize<S: AsRef<str>>(columns: &[S], categories: &[&str]) -> CategoryMap {
    let entries = categories
        .iter()
        .map(|name| {
            let members = columns
                .iter()
                .filter_map(|col| {
                    let col: &str = col.as_ref();
                    col.contains(*name).then(|| col.to_string())
                })
                .collect();
            (name.to_string(), members)
        })
        .collect();
    CategoryMap { entries }
}

impl CategoryMap {
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, cols)| cols.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(n, cols)| (n.as_str(), cols.as_slice()))
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

    /// Check that every column lands in exactly one category.
    pub fn validate_partition<S: AsRef<str>>(&self, columns: &[S]) -> Result<(), ConfigError> {
        for col in columns.iter() {
            let col: &str = col.as_ref();
            let count = self
                .entries
                .iter()
                .filter(|(_, members)| members.iter().any(|m| m == col))
                .count();
            if count != 1 {
                return Err(ConfigError::NotAPartition {
                    column: col.to_string(),
                    count,
                });
            }
        }
        Ok(())
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, cols) in &self.entries {
            map.serialize_entry(name, cols)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_substring_in_column_order() {
        let cols = ["QP2", "QHI3", "QP1", "ATT1", "QHS4"];
        let map = categorize(&cols, &["QP", "QHI", "QHS", "ATT"]);

        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["QP", "QHI", "QHS", "ATT"]);
        assert_eq!(map.get("QP").unwrap(), ["QP2", "QP1"]);
        assert_eq!(map.get("QHI").unwrap(), ["QHI3"]);
        assert_eq!(map.get("ATT").unwrap(), ["ATT1"]);
        assert!(map.get("XX").is_none());
        map.validate_partition(&cols).unwrap();
    }

    #[test]
    fn overlapping_names_break_the_partition() {
        let cols = ["QHI1", "QHS1"];
        let map = categorize(&cols, &["QH", "QHI"]);
        assert_eq!(
            map.validate_partition(&cols),
            Err(ConfigError::NotAPartition {
                column: "QHI1".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn uncovered_column_breaks_the_partition() {
        let cols = ["QP1", "ZZ9"];
        let map = categorize(&cols, &["QP"]);
        assert!(matches!(
            map.validate_partition(&cols),
            Err(ConfigError::NotAPartition { count: 0, .. })
        ));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let map = categorize(&["ATT1", "QP1"], &["QP", "ATT"]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"QP":["QP1"],"ATT":["ATT1"]}"#);
    }
}
