use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{flatten, Datasets, SummaryTable};
use crate::error::{ConfigError, Error};
use crate::schema::CategoryMap;
use crate::stats::{estimate, Estimate};

/// Which categories feed each portfolio axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAxes {
    pub x: Vec<String>,
    pub y: Vec<String>,
}

impl Default for PortfolioAxes {
    /// Pragmatic quality against hedonic quality (identity + stimulation).
    fn default() -> Self {
        Self {
            x: vec!["QP".to_string()],
            y: vec!["QHI".to_string(), "QHS".to_string()],
        }
    }
}

impl PortfolioAxes {
    /// A category may appear at most once per axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, names) in [("x", &self.x), ("y", &self.y)] {
            for (i, name) in names.iter().enumerate() {
                if names[..i].contains(name) {
                    return Err(ConfigError::DuplicateAxisCategory {
                        axis,
                        category: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn keys(categories: &CategoryMap, names: &[String]) -> Result<Vec<String>, ConfigError> {
        let mut keys = Vec::new();
        for name in names {
            let members = categories
                .get(name)
                .ok_or_else(|| ConfigError::UnknownCategory(name.clone()))?;
            if members.is_empty() {
                return Err(ConfigError::EmptyCategory(name.clone()));
            }
            keys.extend_from_slice(members);
        }
        Ok(keys)
    }
}

/// One dataset's position with a confidence interval on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioPoint {
    pub x: Estimate,
    pub y: Estimate,
}

impl PortfolioPoint {
    pub fn region(&self) -> Option<Region> {
        Region::classify(self.x.mean, self.y.mean)
    }
}

/// Labelled cells of the portfolio's 3×3 grid. The grid lines sit at ±1 on
/// both axes; the middle-left and bottom-middle cells carry no name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    TooSelfOriented,
    SelfOriented,
    Desired,
    Neutral,
    TaskOriented,
    Superfluous,
    TooTaskOriented,
}

impl Region {
    pub fn classify(x: f64, y: f64) -> Option<Region> {
        fn band(v: f64) -> i8 {
            if v < -1.0 {
                -1
            } else if v > 1.0 {
                1
            } else {
                0
            }
        }
        match (band(x), band(y)) {
            (-1, 1) => Some(Region::TooSelfOriented),
            (0, 1) => Some(Region::SelfOriented),
            (1, 1) => Some(Region::Desired),
            (0, 0) => Some(Region::Neutral),
            (1, 0) => Some(Region::TaskOriented),
            (-1, -1) => Some(Region::Superfluous),
            (1, -1) => Some(Region::TooTaskOriented),
            _ => None,
        }
    }
}

/// Per dataset, the pooled mean and t interval of the x-axis ratings and of
/// the y-axis ratings.
///
/// Each axis is one flat sample of every answer to every question in its
/// categories: questions are treated as exchangeable, not estimated one by
/// one. `confidence` is the interval mass, see [`estimate`].
pub fn portfolio(
    datasets: &Datasets,
    categories: &CategoryMap,
    axes: &PortfolioAxes,
    confidence: f64,
) -> Result<SummaryTable<PortfolioPoint>, Error> {
    axes.validate()?;
    let x_keys = PortfolioAxes::keys(categories, &axes.x)?;
    let y_keys = PortfolioAxes::keys(categories, &axes.y)?;

    let mut entries = Vec::with_capacity(datasets.len());
    for (name, table) in datasets.iter() {
        let x = estimate(&flatten(name, table, &x_keys)?, confidence)?;
        let y = estimate(&flatten(name, table, &y_keys)?, confidence)?;
        debug!(dataset = name, ?x, ?y, "portfolio point");
        entries.push((name.to_string(), PortfolioPoint { x, y }));
    }
    Ok(SummaryTable::from_entries(entries))
}
