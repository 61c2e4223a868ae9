use anyhow::Result;
use attrakdiff::{
    analyze,
    aggregate::Region,
    error::{Error, SchemaError},
    export::write_all,
    process::{is_input_error, load_datasets, DatasetSource},
    schema::attrakdiff::{tables, ORDER_LONG},
    AnalysisConfig, Datasets,
};
use std::{fs, path::Path};
use tempfile::tempdir;

fn export_text(columns: usize, rows: &[Vec<u8>], delimiter: &str) -> String {
    let mut header = vec!["ID".to_string()];
    header.extend((0..columns).map(|i| format!("Q{i}")));
    header.extend(["URL".to_string(), "Browser".to_string()]);
    let mut text = header.join(delimiter) + "\n";
    for (i, row) in rows.iter().enumerate() {
        let mut cells = vec![format!("R{i}")];
        cells.extend(row.iter().map(|v| v.to_string()));
        cells.extend(["http://example.org".to_string(), "Firefox".to_string()]);
        text += &(cells.join(delimiter) + "\n");
    }
    text
}

fn write_utf16(path: &Path, text: &str) -> Result<()> {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    fs::write(path, bytes)?;
    Ok(())
}

fn load(sources: &[DatasetSource], config: &AnalysisConfig) -> Result<Datasets> {
    let opts = config.ingest_options()?;
    let mut datasets = Datasets::new();
    for (name, loaded) in load_datasets(sources, &opts, tables(), &config.scale) {
        datasets.insert(name, loaded?)?;
    }
    Ok(datasets)
}

#[test]
fn neutral_runs_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let mut sources = Vec::new();
    for name in ["B", "A"] {
        let path = dir.path().join(format!("{name}.csv"));
        write_utf16(&path, &export_text(28, &vec![vec![4; 28]; 10], "\t"))?;
        sources.push(DatasetSource {
            name: name.to_string(),
            path,
        });
    }

    let config = AnalysisConfig::default();
    let datasets = load(&sources, &config)?;
    let report = analyze(&datasets, tables(), &config)?;

    assert_eq!(report.datasets, vec!["B", "A"]);
    for (_, means) in report.averages.iter() {
        assert_eq!(means.len(), 4);
        assert!(means.iter().all(|m| m.mean == 0.0));
    }
    for (_, pairs) in report.pairs.iter() {
        assert_eq!(pairs.len(), ORDER_LONG.len());
    }
    for (_, entry) in report.portfolio.iter() {
        assert_eq!(entry.point.x.mean, 0.0);
        assert_eq!(entry.point.y.width(), 0.0);
        assert_eq!(entry.region, Some(Region::Neutral));
    }

    let written = write_all(&report, dir.path().join("out"))?;
    let averages = fs::read_to_string(&written[0])?;
    assert!(averages.starts_with("Dimensions,B,A\n"));
    Ok(())
}

#[test]
fn semicolon_utf8_export_with_yaml_settings() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("run.csv");
    // every answer at the top of the scale, reversed items included
    fs::write(&path, export_text(10, &[vec![7; 10], vec![7; 10], vec![6; 10]], ";"))?;

    let config =
        AnalysisConfig::from_yaml_str("locale: de\ndelimiter: ';'\nencoding: utf-8\nconfidence: 0.9\n")?;
    let datasets = load(
        &[DatasetSource {
            name: "run".to_string(),
            path,
        }],
        &config,
    )?;
    let table = datasets.get("run").unwrap();
    assert_eq!(table.column("QP6"), Some(vec![3.0, 3.0, 2.0]));
    assert_eq!(table.column("QP2"), Some(vec![-3.0, -3.0, -2.0]));

    let report = analyze(&datasets, tables(), &config)?;
    assert_eq!(report.labels.dimension, "Dimensionen");
    let qp6 = report.pairs.get("run").unwrap().iter().find(|p| p.key == "QP6").unwrap();
    assert_eq!(qp6.left, "verwirrend");
    assert!(qp6.mean > 2.6 && qp6.mean < 2.7);
    Ok(())
}

#[test]
fn broken_exports_are_reported_per_dataset() -> Result<()> {
    let dir = tempdir()?;
    let cases = [
        ("no-marker", "ID\tQ1\tQ2\n1\t4\t4\n".to_string()),
        ("eleven", export_text(11, &[vec![4; 11]], "\t")),
        ("good", export_text(10, &[vec![4; 10], vec![5; 10]], "\t")),
    ];
    let mut sources = Vec::new();
    for (name, text) in &cases {
        let path = dir.path().join(format!("{name}.csv"));
        write_utf16(&path, text)?;
        sources.push(DatasetSource {
            name: name.to_string(),
            path,
        });
    }

    let config = AnalysisConfig::default();
    let loaded = load_datasets(&sources, &config.ingest_options()?, tables(), &config.scale);
    assert!(matches!(
        &loaded[0].1,
        Err(Error::Schema(SchemaError::MissingMarker { .. }))
    ));
    assert!(matches!(
        &loaded[1].1,
        Err(Error::Schema(SchemaError::UnexpectedColumnCount { actual: 11, .. }))
    ));
    assert!(loaded[0].1.as_ref().is_err_and(is_input_error));
    assert!(loaded[2].1.is_ok());
    Ok(())
}
