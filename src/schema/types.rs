// src/schema/types.rs

use serde::{Deserialize, Serialize};

use super::locale::{Locale, Localized};

/// Suffix the survey layouts use to flag a question asked with its poles swapped.
pub const REVERSED_MARKER: char = '*';

/// Which pole of a word pair the survey showed on the high end of the scale.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Normal,
    Reversed,
}

/// One positional column of a survey layout.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
pub struct SurveyColumn {
    pub key: &'static str,
    pub polarity: Polarity,
}

impl SurveyColumn {
    /// Classify a layout entry such as `"QP2*"`: the marker is turned into a
    /// [`Polarity`] once, here, and never appears in a key.
    pub fn parse(entry: &'static str) -> Self {
        match entry.strip_suffix(REVERSED_MARKER) {
            Some(key) => Self {
                key,
                polarity: Polarity::Reversed,
            },
            None => Self {
                key: entry,
                polarity: Polarity::Normal,
            },
        }
    }
}

/// The two fixed export layouts.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    Short,
    Long,
}

/// A bipolar adjective pair: `left` is the pole mapped to the negative end
/// of the normalized scale.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WordPair {
    pub key: &'static str,
    pub left: Localized,
    pub right: Localized,
}

impl WordPair {
    pub fn labels(&self, locale: Locale) -> (&'static str, &'static str) {
        (self.left.get(locale), self.right.get(locale))
    }
}
