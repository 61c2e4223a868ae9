use csv::{ReaderBuilder, Trim};
use encoding_rs::{Encoding, UTF_16LE};
use tracing::debug;

use crate::error::{DataError, Result, SchemaError};
use crate::process::utils::{clean_str, decode_text};

/// A survey export exactly as read, before any schema is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column labels after the row-identifier column, as the export names them.
    pub headers: Vec<String>,
    /// First field of every row: the respondent id.
    pub ids: Vec<String>,
    /// One Vec per respondent, aligned with `headers`.
    pub rows: Vec<Vec<String>>,
}

/// How to turn export bytes into a [`RawTable`].
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub delimiter: u8,
    /// Used when the bytes carry no byte-order mark.
    pub encoding: &'static Encoding,
}

impl Default for IngestOptions {
    /// Tab-separated UTF-16, the survey platform's export format.
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            encoding: UTF_16LE,
        }
    }
}

/// Decode `bytes` and parse them as a delimited table.
pub fn read_raw_table(bytes: &[u8], opts: &IngestOptions) -> Result<RawTable> {
    let text = decode_text(bytes, opts.encoding)?;
    parse_raw_table(&text, opts.delimiter)
}

/// Parse already-decoded text. The header row is mandatory and every data
/// row must have as many fields as the header.
pub fn parse_raw_table(text: &str, delimiter: u8) -> Result<RawTable> {
    // the BOM survives decoding when the caller hands us text directly
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let header = rdr.headers()?.clone();
    if header.is_empty() {
        return Err(SchemaError::MissingHeader.into());
    }
    let headers: Vec<String> = header.iter().skip(1).map(clean_str).collect();

    let mut ids = Vec::new();
    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() != header.len() {
            return Err(DataError::RowLength {
                row: idx,
                expected: header.len(),
                actual: record.len(),
            }
            .into());
        }
        ids.push(record.get(0).map(clean_str).unwrap_or_default());
        rows.push(record.iter().skip(1).map(str::to_string).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed raw table");
    Ok(RawTable { headers, ids, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::utf16le_with_bom;

    #[test]
    fn splits_id_column_from_data() {
        let raw = parse_raw_table("ID\tQ1\tQ2\tURL\n7\t1\t2\thttp://x\n8\t3\t4\thttp://y\n", b'\t')
            .unwrap();
        assert_eq!(raw.headers, vec!["Q1", "Q2", "URL"]);
        assert_eq!(raw.ids, vec!["7", "8"]);
        assert_eq!(raw.rows[1], vec!["3", "4", "http://y"]);
    }

    #[test]
    fn honours_semicolon_and_quotes() {
        let raw = parse_raw_table("\"ID\";\"Q1\";\"URL\"\n\"1\";\"5\";\"a;b\"\n", b';').unwrap();
        assert_eq!(raw.headers, vec!["Q1", "URL"]);
        assert_eq!(raw.rows[0], vec!["5", "a;b"]);
    }

    #[test]
    fn reads_utf16_export() {
        let bytes = utf16le_with_bom("ID\tQ1\tURL\r\n1\t6\tu\r\n");
        let raw = read_raw_table(&bytes, &IngestOptions::default()).unwrap();
        assert_eq!(raw.headers, vec!["Q1", "URL"]);
        assert_eq!(raw.rows, vec![vec!["6".to_string(), "u".to_string()]]);
    }

    #[test]
    fn ragged_row_is_data_error() {
        let err = parse_raw_table("ID\tQ1\tURL\n1\t2\n", b'\t').unwrap_err();
        assert!(matches!(
            err,
            Error::Data(DataError::RowLength {
                row: 0,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = parse_raw_table("", b'\t').unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaError::MissingHeader)));
    }
}
