//! AttrakDiff survey analysis.
//!
//! Load tab-separated questionnaire exports, normalize every answer onto a
//! signed scale in canonical question order, then summarize a collection of
//! datasets: category averages, word-pair profiles and the pragmatic/hedonic
//! portfolio with confidence intervals.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod process;
pub mod report;
pub mod schema;
pub mod stats;

pub use aggregate::Datasets;
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use report::{analyze, Report};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::process::{normalize, parse_raw_table, NormalizedTable, RatingScale};
    use crate::schema::attrakdiff;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Byte-order mark followed by little-endian UTF-16, as the survey
    /// platform writes it.
    pub fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        bytes
    }

    /// A tab-separated export with `columns` rating columns, the `URL`
    /// marker and one trailing metadata column.
    pub fn survey_csv(columns: usize, rows: &[Vec<u8>]) -> String {
        let mut header = vec!["ID".to_string()];
        header.extend((0..columns).map(|i| format!("Q{i}")));
        header.push("URL".to_string());
        header.push("Browser".to_string());

        let mut text = header.join("\t");
        text.push('\n');
        for (i, row) in rows.iter().enumerate() {
            let mut cells = vec![format!("R{}", i + 1)];
            cells.extend(row.iter().map(u8::to_string));
            cells.push("http://example.org".to_string());
            cells.push("Firefox".to_string());
            text.push_str(&cells.join("\t"));
            text.push('\n');
        }
        text
    }

    /// Normalize raw 1..7 answers; 10 values per row is the short layout,
    /// 28 the long one.
    pub fn table_from_rows(rows: &[Vec<u8>]) -> NormalizedTable {
        let columns = rows.first().map(Vec::len).unwrap_or(attrakdiff::ORDER_SHORT.len());
        let raw = parse_raw_table(&survey_csv(columns, rows), b'\t').unwrap();
        normalize(&raw, attrakdiff::tables(), &RatingScale::default()).unwrap()
    }

    /// Every respondent answers the middle of the scale.
    pub fn neutral_table(columns: usize, respondents: usize) -> NormalizedTable {
        table_from_rows(&vec![vec![4u8; columns]; respondents])
    }
}
