// src/export.rs
//! Tabular and JSON output of a [`Report`].

use csv::Writer;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::aggregate::{average::category_mean, CategoryMean, LabeledPair, SummaryTable};
use crate::error::Result;
use crate::report::{PortfolioEntry, Report};

fn fmt_value(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.4}")).unwrap_or_default()
}

/// One row per category, one column per dataset.
pub fn write_averages_csv<W: Write>(
    averages: &SummaryTable<Vec<CategoryMean>>,
    dimension_label: &str,
    out: W,
) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    let mut header = vec![dimension_label.to_string()];
    header.extend(averages.names().map(str::to_string));
    wtr.write_record(&header)?;

    let categories: Vec<&str> = averages
        .iter()
        .next()
        .map(|(_, means)| means.iter().map(|m| m.category.as_str()).collect())
        .unwrap_or_default();
    for category in categories {
        let mut record = vec![category.to_string()];
        record.extend(
            averages
                .iter()
                .map(|(_, means)| fmt_value(category_mean(means, category))),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per word pair (first dataset's order), one column per dataset.
/// A dataset that did not ask a pair leaves its cell empty.
pub fn write_pairs_csv<W: Write>(pairs: &SummaryTable<Vec<LabeledPair>>, out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    let mut header = vec!["key".to_string(), "left".to_string(), "right".to_string()];
    header.extend(pairs.names().map(str::to_string));
    wtr.write_record(&header)?;

    let Some((_, rows)) = pairs.iter().next() else {
        wtr.flush()?;
        return Ok(());
    };
    for row in rows {
        let mut record = vec![row.key.clone(), row.left.to_string(), row.right.to_string()];
        record.extend(pairs.iter().map(|(_, labeled)| {
            fmt_value(labeled.iter().find(|p| p.key == row.key).map(|p| p.mean))
        }));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per dataset with both axis estimates and the grid cell.
pub fn write_portfolio_csv<W: Write>(
    portfolio: &SummaryTable<PortfolioEntry>,
    out: W,
) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record([
        "dataset", "x_mean", "x_lower", "x_upper", "y_mean", "y_lower", "y_upper", "region",
    ])?;
    for (name, entry) in portfolio.iter() {
        let (x, y) = (entry.point.x, entry.point.y);
        wtr.write_record([
            name.to_string(),
            fmt_value(Some(x.mean)),
            fmt_value(Some(x.lower())),
            fmt_value(Some(x.upper())),
            fmt_value(Some(y.mean)),
            fmt_value(Some(y.lower())),
            fmt_value(Some(y.upper())),
            entry.region_name.unwrap_or_default().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_report_json<W: Write>(report: &Report, out: W) -> Result<()> {
    serde_json::to_writer_pretty(out, report)?;
    Ok(())
}

/// Write `averages.csv`, `pairs.csv`, `portfolio.csv` and `report.json`
/// into `dir`, creating it if needed. Returns the written paths.
pub fn write_all<P: AsRef<Path>>(report: &Report, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let create = |name: &str| -> Result<(PathBuf, BufWriter<File>)> {
        let path = dir.join(name);
        let file = File::create(&path)?;
        Ok((path, BufWriter::new(file)))
    };

    let mut written = Vec::with_capacity(4);

    let (path, out) = create("averages.csv")?;
    write_averages_csv(&report.averages, report.labels.dimension, out)?;
    written.push(path);

    let (path, out) = create("pairs.csv")?;
    write_pairs_csv(&report.pairs, out)?;
    written.push(path);

    let (path, out) = create("portfolio.csv")?;
    write_portfolio_csv(&report.portfolio, out)?;
    written.push(path);

    let (path, mut out) = create("report.json")?;
    write_report_json(report, &mut out)?;
    out.flush()?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "wrote summaries");
    Ok(written)
}
