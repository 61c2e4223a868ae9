// src/process/mod.rs
pub mod normalize;
pub mod raw_table;
pub mod table;
pub mod utils;

use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub use normalize::{normalize, rescale, RatingScale};
pub use raw_table::{parse_raw_table, read_raw_table, IngestOptions, RawTable};
pub use table::NormalizedTable;

use crate::error::{Error, Result};
use crate::schema::SchemaTables;

/// Read one export from disk into a [`RawTable`].
#[tracing::instrument(level = "info", skip(path, opts), fields(path = %path.as_ref().display()))]
pub fn load_survey_file<P: AsRef<Path>>(path: P, opts: &IngestOptions) -> Result<RawTable> {
    let bytes = fs::read(path.as_ref())?;
    read_raw_table(&bytes, opts)
}

/// Read and normalize one export.
pub fn load_normalized<P: AsRef<Path>>(
    path: P,
    opts: &IngestOptions,
    tables: &SchemaTables,
    scale: &RatingScale,
) -> Result<NormalizedTable> {
    let raw = load_survey_file(path, opts)?;
    normalize(&raw, tables, scale)
}

/// One named export to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub name: String,
    pub path: PathBuf,
}

/// Load every source in parallel. Results come back in input order, each
/// paired with its name, so callers decide whether a failure is fatal.
pub fn load_datasets(
    sources: &[DatasetSource],
    opts: &IngestOptions,
    tables: &SchemaTables,
    scale: &RatingScale,
) -> Vec<(String, Result<NormalizedTable>)> {
    let results: Vec<(String, Result<NormalizedTable>)> = sources
        .par_iter()
        .map(|src| {
            let loaded = load_normalized(&src.path, opts, tables, scale);
            (src.name.clone(), loaded)
        })
        .collect();

    for (name, result) in &results {
        match result {
            Ok(table) => info!(
                dataset = %name,
                respondents = table.len(),
                variant = ?table.variant(),
                "loaded"
            ),
            Err(e) => warn!(dataset = %name, error = %e, "failed to load"),
        }
    }
    results
}

/// Is this a structural/data problem with the export itself, as opposed to
/// an I/O failure?
pub fn is_input_error(err: &Error) -> bool {
    matches!(err, Error::Schema(_) | Error::Data(_) | Error::Csv(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::attrakdiff;
    use crate::test_support::{init_test_logging, survey_csv, utf16le_with_bom};
    use anyhow::Result;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn load_survey_file_reads_utf16_export() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(&utf16le_with_bom(&survey_csv(10, &[vec![5; 10], vec![3; 10]])))?;

        let table = load_normalized(
            tmp.path(),
            &IngestOptions::default(),
            attrakdiff::tables(),
            &RatingScale::default(),
        )?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.keys().len(), 10);
        Ok(())
    }

    #[test]
    fn load_datasets_keeps_input_order_and_reports_failures() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let mut sources = Vec::new();
        for (name, body) in [
            ("zeta", survey_csv(10, &[vec![4; 10], vec![4; 10]])),
            ("alpha", String::from("ID\tQ1\n1\t4\n")),
            ("mid", survey_csv(28, &[vec![6; 28], vec![2; 28]])),
        ] {
            let path = dir.path().join(format!("{name}.csv"));
            std::fs::write(&path, utf16le_with_bom(&body))?;
            sources.push(DatasetSource {
                name: name.to_string(),
                path,
            });
        }

        let loaded = load_datasets(
            &sources,
            &IngestOptions::default(),
            attrakdiff::tables(),
            &RatingScale::default(),
        );
        let names: Vec<&str> = loaded.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert!(loaded[0].1.is_ok());
        assert!(matches!(&loaded[1].1, Err(e) if is_input_error(e)));
        assert!(loaded[2].1.is_ok());
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_survey_file("/definitely/not/here.csv", &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!is_input_error(&err));
    }
}
