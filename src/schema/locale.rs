// src/schema/locale.rs
//! Localized label tables. Everything here is static lookup data: the
//! pipeline never formats or translates text itself.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::aggregate::Region;
use crate::error::ConfigError;

/// Languages the label tables are written in.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    De,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Fr, Locale::De];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    /// Accepts a language code such as `"fr"` (case-insensitive).
    pub fn parse(code: &str) -> Result<Self, ConfigError> {
        let wanted = code.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownLocale(code.to_string()))
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One string in every supported language.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Localized {
    pub en: &'static str,
    pub fr: &'static str,
    pub de: &'static str,
}

impl Localized {
    pub const fn new(en: &'static str, fr: &'static str, de: &'static str) -> Self {
        Self { en, fr, de }
    }

    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Fr => self.fr,
            Locale::De => self.de,
        }
    }
}

/// Axis and title strings for the three charts.
#[derive(Debug, Clone, Copy)]
pub struct ChartStrings {
    pub pragmatic_axis: Localized,
    pub hedonic_axis: Localized,
    pub dimension: Localized,
    pub average: Localized,
    pub averages_title: Localized,
    pub pairs_title: Localized,
    pub portfolio_title: Localized,
}

/// [`ChartStrings`] resolved for one locale, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLabels {
    pub pragmatic_axis: &'static str,
    pub hedonic_axis: &'static str,
    pub dimension: &'static str,
    pub average: &'static str,
    pub averages_title: &'static str,
    pub pairs_title: &'static str,
    pub portfolio_title: &'static str,
}

impl ChartStrings {
    pub fn resolve(&self, locale: Locale) -> ChartLabels {
        ChartLabels {
            pragmatic_axis: self.pragmatic_axis.get(locale),
            hedonic_axis: self.hedonic_axis.get(locale),
            dimension: self.dimension.get(locale),
            average: self.average.get(locale),
            averages_title: self.averages_title.get(locale),
            pairs_title: self.pairs_title.get(locale),
            portfolio_title: self.portfolio_title.get(locale),
        }
    }
}

pub const CHART_STRINGS: ChartStrings = ChartStrings {
    pragmatic_axis: Localized::new(
        "Pragmatic quality (PQ)",
        "Qualité pragmatique (QP)",
        "Pragmatische Qualität (PQ)",
    ),
    hedonic_axis: Localized::new(
        "Hedonic quality (HQ)",
        "Qualité hédonique (QH)",
        "Hedonische Qualität (HQ)",
    ),
    dimension: Localized::new("Dimensions", "Dimensions", "Dimensionen"),
    average: Localized::new("Average value", "Valeur moyenne", "Mittelwert"),
    averages_title: Localized::new(
        "Average values by dimension",
        "Valeurs moyennes par dimension",
        "Mittelwerte der Dimensionen",
    ),
    pairs_title: Localized::new(
        "Description of word-pairs",
        "Profil des paires de mots",
        "Profil der Wortpaare",
    ),
    portfolio_title: Localized::new(
        "Portfolio of results",
        "Portfolio des résultats",
        "Portfolio der Ergebnisse",
    ),
};

/// Names of the labelled cells of the portfolio grid.
pub const REGION_NAMES: &[(Region, Localized)] = &[
    (
        Region::TooSelfOriented,
        Localized::new("too self-oriented", "trop orienté soi", "zu selbstorientiert"),
    ),
    (
        Region::SelfOriented,
        Localized::new("self-oriented", "orienté soi", "selbstorientiert"),
    ),
    (
        Region::Desired,
        Localized::new("desired", "désiré", "begehrt"),
    ),
    (
        Region::Neutral,
        Localized::new("neutral", "neutre", "neutral"),
    ),
    (
        Region::TaskOriented,
        Localized::new("task-oriented", "orienté tâche", "handlungsorientiert"),
    ),
    (
        Region::Superfluous,
        Localized::new("superfluous", "superflu", "überflüssig"),
    ),
    (
        Region::TooTaskOriented,
        Localized::new("too task-oriented", "trop orienté tâche", "zu handlungsorientiert"),
    ),
];

pub fn region_name(region: Region, locale: Locale) -> Option<&'static str> {
    REGION_NAMES
        .iter()
        .find(|(r, _)| *r == region)
        .map(|(_, name)| name.get(locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_codes() {
        assert_eq!(Locale::parse("en").unwrap(), Locale::En);
        assert_eq!(Locale::parse(" FR ").unwrap(), Locale::Fr);
        assert_eq!("de".parse::<Locale>().unwrap(), Locale::De);
    }

    #[test]
    fn unknown_locale_is_config_error() {
        assert_eq!(
            Locale::parse("it"),
            Err(ConfigError::UnknownLocale("it".to_string()))
        );
    }

    #[test]
    fn every_named_region_has_all_languages() {
        for (region, name) in REGION_NAMES {
            for locale in Locale::ALL {
                assert!(!name.get(locale).is_empty(), "{region:?} in {locale}");
            }
        }
        assert_eq!(region_name(Region::Desired, Locale::Fr), Some("désiré"));
    }
}
