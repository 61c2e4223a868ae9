// src/schema/attrakdiff.rs
//! Built-in tables for the AttrakDiff questionnaire as exported by the
//! survey platform.

use once_cell::sync::Lazy;

use super::{
    locale::{Localized, CHART_STRINGS},
    SchemaTables, WordPair,
};

/// Marks the end of the rating columns in an export.
pub const URL_MARKER: &str = "URL";

/// Semantic categories, in display order.
pub const CATEGORIES: &[&str] = &["QP", "QHI", "QHS", "ATT"];

/// Column layout of the 10-item short questionnaire.
pub const ORDER_SHORT: &[&str] = &[
    "ATT2", "QP2*", "QHS2", "QP3*", "QHI3*", "ATT5*", "QP5*", "QHI4", "QP6", "QHS5",
];

/// Column layout of the 28-item questionnaire.
pub const ORDER_LONG: &[&str] = &[
    "QP1*", "QHI1", "ATT1*", "QHS1*", "QP2*", "QHI2*", "ATT2", "QP3*", "ATT3*", "QP4", "QHI3*",
    "QP5*", "QHI4", "QHI5", "QHI6*", "QHI7", "ATT4", "QHS2", "ATT5*", "QP6", "ATT6", "QHS3*",
    "QHS4*", "QHS5", "QHS6", "ATT7*", "QHS7*", "QP7",
];

const fn pair(key: &'static str, left: Localized, right: Localized) -> WordPair {
    WordPair { key, left, right }
}

/// Word pairs in canonical order.
pub const PAIRS: &[WordPair] = &[
    pair(
        "QP1",
        Localized::new("technical", "technique", "technisch"),
        Localized::new("human", "humain", "menschlich"),
    ),
    pair(
        "QP2",
        Localized::new("complicated", "compliqué", "kompliziert"),
        Localized::new("simple", "simple", "einfach"),
    ),
    pair(
        "QP3",
        Localized::new("impractical", "pas pratique", "unpraktisch"),
        Localized::new("practical", "pratique", "praktisch"),
    ),
    pair(
        "QP4",
        Localized::new("cumbersome", "fastidieux", "umständlich"),
        Localized::new("straightforward", "efficace", "direkt"),
    ),
    pair(
        "QP5",
        Localized::new("unpredictable", "imprévisible", "unberechenbar"),
        Localized::new("predictable", "prévisible", "voraussagbar"),
    ),
    pair(
        "QP6",
        Localized::new("confusing", "confus", "verwirrend"),
        Localized::new("clearly structured", "clair", "übersichtlich"),
    ),
    pair(
        "QP7",
        Localized::new("unruly", "incontrôlable", "widerspenstig"),
        Localized::new("manageable", "maîtrisable", "handhabbar"),
    ),
    pair(
        "QHI1",
        Localized::new("isolating", "m'isole", "isolierend"),
        Localized::new("connective", "me sociabilise", "verbindend"),
    ),
    pair(
        "QHI2",
        Localized::new("unprofessional", "amateur", "laienhaft"),
        Localized::new("professional", "professionnel", "fachmännisch"),
    ),
    pair(
        "QHI3",
        Localized::new("tacky", "de mauvais goût", "stillos"),
        Localized::new("stylish", "de bon goût", "stilvoll"),
    ),
    pair(
        "QHI4",
        Localized::new("cheap", "bas de gamme", "minderwertig"),
        Localized::new("premium", "haut de gamme", "wertvoll"),
    ),
    pair(
        "QHI5",
        Localized::new("alienating", "m'exclut", "ausgrenzend"),
        Localized::new("integrating", "m'intègre", "einbeziehend"),
    ),
    pair(
        "QHI6",
        Localized::new(
            "separates me from people",
            "me sépare des autres",
            "trennt mich von Leuten",
        ),
        Localized::new(
            "brings me closer to people",
            "me rapproche des autres",
            "bringt mich den Leuten näher",
        ),
    ),
    pair(
        "QHI7",
        Localized::new("unpresentable", "non présentable", "nicht vorzeigbar"),
        Localized::new("presentable", "présentable", "vorzeigbar"),
    ),
    pair(
        "QHS1",
        Localized::new("conventional", "conventionnel", "konventionell"),
        Localized::new("inventive", "original", "originell"),
    ),
    pair(
        "QHS2",
        Localized::new("unimaginative", "sans imagination", "phantasielos"),
        Localized::new("creative", "créatif", "kreativ"),
    ),
    pair(
        "QHS3",
        Localized::new("cautious", "prudent", "vorsichtig"),
        Localized::new("bold", "audacieux", "mutig"),
    ),
    pair(
        "QHS4",
        Localized::new("conservative", "conservateur", "konservativ"),
        Localized::new("innovative", "novateur", "innovativ"),
    ),
    pair(
        "QHS5",
        Localized::new("dull", "ennuyeux", "lahm"),
        Localized::new("captivating", "captivant", "fesselnd"),
    ),
    pair(
        "QHS6",
        Localized::new("undemanding", "peu exigeant", "harmlos"),
        Localized::new("challenging", "stimulant", "herausfordernd"),
    ),
    pair(
        "QHS7",
        Localized::new("ordinary", "commun", "herkömmlich"),
        Localized::new("novel", "nouveau", "neuartig"),
    ),
    pair(
        "ATT1",
        Localized::new("unpleasant", "déplaisant", "unangenehm"),
        Localized::new("pleasant", "plaisant", "angenehm"),
    ),
    pair(
        "ATT2",
        Localized::new("ugly", "laid", "hässlich"),
        Localized::new("attractive", "beau", "attraktiv"),
    ),
    pair(
        "ATT3",
        Localized::new("disagreeable", "désagréable", "unsympathisch"),
        Localized::new("likeable", "agréable", "sympathisch"),
    ),
    pair(
        "ATT4",
        Localized::new("rejecting", "rebutant", "zurückweisend"),
        Localized::new("inviting", "attirant", "einladend"),
    ),
    pair(
        "ATT5",
        Localized::new("bad", "mauvais", "schlecht"),
        Localized::new("good", "bon", "gut"),
    ),
    pair(
        "ATT6",
        Localized::new("repelling", "repoussant", "abstoßend"),
        Localized::new("appealing", "attrayant", "anziehend"),
    ),
    pair(
        "ATT7",
        Localized::new("discouraging", "décourageant", "entmutigend"),
        Localized::new("motivating", "motivant", "motivierend"),
    ),
];

static TABLES: Lazy<SchemaTables> = Lazy::new(|| {
    SchemaTables::new(
        URL_MARKER,
        ORDER_SHORT,
        ORDER_LONG,
        CATEGORIES,
        PAIRS,
        CHART_STRINGS,
    )
    .expect("built-in AttrakDiff tables should be consistent")
});

/// The process-wide AttrakDiff tables, built on first use.
pub fn tables() -> &'static SchemaTables {
    &TABLES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{categorize, Polarity, SchemaVariant};
    use std::collections::HashSet;

    #[test]
    fn layouts_have_known_sizes() {
        let t = tables();
        assert_eq!(t.columns(SchemaVariant::Short).len(), 10);
        assert_eq!(t.columns(SchemaVariant::Long).len(), 28);
        assert_eq!(t.variant_for(10), Some(SchemaVariant::Short));
        assert_eq!(t.variant_for(28), Some(SchemaVariant::Long));
        assert_eq!(t.variant_for(11), None);
    }

    #[test]
    fn long_layout_asks_every_pair_once() {
        let keys: HashSet<&str> = tables()
            .columns(SchemaVariant::Long)
            .iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys.len(), PAIRS.len());
        assert!(PAIRS.iter().all(|p| keys.contains(p.key)));
    }

    #[test]
    fn short_layout_agrees_with_long_on_polarity() {
        let t = tables();
        for col in t.columns(SchemaVariant::Short) {
            let long = t
                .columns(SchemaVariant::Long)
                .iter()
                .find(|c| c.key == col.key)
                .expect("short item missing from long layout");
            assert_eq!(col.polarity, long.polarity, "{}", col.key);
        }
    }

    #[test]
    fn long_layout_mixes_polarities() {
        let reversed = tables()
            .columns(SchemaVariant::Long)
            .iter()
            .filter(|c| c.polarity == Polarity::Reversed)
            .count();
        assert_eq!(reversed, 15);
    }

    #[test]
    fn categories_partition_the_canonical_keys() {
        let t = tables();
        let keys: Vec<&str> = t.pairs().iter().map(|p| p.key).collect();
        let map = categorize(&keys, t.categories());
        map.validate_partition(&keys).unwrap();
        assert_eq!(map.len(), 4);
        assert!(map.iter().all(|(_, cols)| cols.len() == 7));
    }
}
