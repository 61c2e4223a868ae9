//! The full analysis of a dataset collection, bundled for a renderer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::aggregate::{
    average_by_dimension, category_spans, label_pairs, pair_means, portfolio, CategoryMean,
    CategorySpan, Datasets, LabeledPair, PortfolioPoint, Region, SummaryTable,
};
use crate::config::AnalysisConfig;
use crate::error::{ConfigError, Result};
use crate::schema::{categorize, locale::region_name, CategoryMap, ChartLabels, Locale, SchemaTables};

/// A portfolio point with its grid cell, named in the report's locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioEntry {
    #[serde(flatten)]
    pub point: PortfolioPoint,
    pub region: Option<Region>,
    pub region_name: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub locale: Locale,
    pub confidence: f64,
    pub labels: ChartLabels,
    pub datasets: Vec<String>,
    pub categories: CategoryMap,
    pub spans: Vec<CategorySpan>,
    pub averages: SummaryTable<Vec<CategoryMean>>,
    pub pairs: SummaryTable<Vec<LabeledPair>>,
    pub portfolio: SummaryTable<PortfolioEntry>,
}

/// Run the three aggregations over `datasets`.
///
/// Categories are computed from the keys every dataset carries, so a short
/// export can be compared with long ones on the shared questions. The
/// word-pair table still lists each dataset's own columns.
#[instrument(level = "info", skip_all, fields(datasets = datasets.len()))]
pub fn analyze(
    datasets: &Datasets,
    tables: &SchemaTables,
    config: &AnalysisConfig,
) -> Result<Report> {
    if datasets.is_empty() {
        return Err(ConfigError::NoDatasets.into());
    }
    let locale = config.locale()?;

    let keys = datasets.common_keys();
    let categories = categorize(&keys, tables.categories());
    categories.validate_partition(&keys)?;

    let averages = average_by_dimension(datasets, &categories)?;
    let pairs = pair_means(datasets).try_map(|_, means| label_pairs(means, tables, locale))?;
    let portfolio = portfolio(datasets, &categories, &config.axes, config.confidence)?.try_map(
        |_, point| {
            let region = point.region();
            Ok::<_, ConfigError>(PortfolioEntry {
                point: *point,
                region,
                region_name: region.and_then(|r| region_name(r, locale)),
            })
        },
    )?;

    for (name, entry) in portfolio.iter() {
        info!(
            dataset = name,
            x = entry.point.x.mean,
            y = entry.point.y.mean,
            region = ?entry.region,
            "portfolio"
        );
    }

    Ok(Report {
        generated_at: Utc::now(),
        locale,
        confidence: config.confidence,
        labels: tables.chart_labels(locale),
        datasets: datasets.names().map(str::to_string).collect(),
        spans: category_spans(&categories),
        categories,
        averages,
        pairs,
        portfolio,
    })
}
