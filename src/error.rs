// src/error.rs
use thiserror::Error;

/// Structural mismatch between an export and the known survey layouts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("the export has no header row")]
    MissingHeader,

    #[error("missing `{marker}` marker column: not a survey export")]
    MissingMarker { marker: String },

    #[error("unexpected column count before `{marker}`: expected {short} or {long}, got {actual}")]
    UnexpectedColumnCount {
        marker: String,
        short: usize,
        long: usize,
        actual: usize,
    },
}

/// A cell or row that cannot be turned into a rating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("input is not valid {encoding} text")]
    Encoding { encoding: &'static str },

    #[error("row {row}: expected {expected} fields, got {actual}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row}, column {column}: `{value}` is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}, column {column}: {value} lies outside [-{bound}, {bound}] after rescaling")]
    OutOfRange {
        row: usize,
        column: String,
        value: f64,
        bound: f64,
    },

    #[error("the export contains no respondents")]
    NoRespondents,
}

/// Interval estimation preconditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatisticsError {
    #[error("at least 2 observations are needed for an interval, got {len}")]
    InsufficientSample { len: usize },

    #[error("confidence level {0} is outside [0, 1)")]
    InvalidConfidence(f64),

    #[error("sample contains a non-finite value")]
    NonFinite,

    #[error("t distribution: {0}")]
    Distribution(String),
}

/// Unknown names in configuration or lookups into the static tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown locale `{0}` (expected one of en, fr, de)")]
    UnknownLocale(String),

    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    #[error("category `{0}` has no columns")]
    EmptyCategory(String),

    #[error("dataset `{dataset}` has no column `{column}`")]
    UnknownColumn { dataset: String, column: String },

    #[error("no word-pair labels for column `{0}`")]
    UnknownPair(String),

    #[error("column `{column}` belongs to {count} categories")]
    NotAPartition { column: String, count: usize },

    #[error("dataset `{0}` is already loaded")]
    DuplicateDataset(String),

    #[error("short and long layouts must differ in size, both have {0} columns")]
    AmbiguousSchema(usize),

    #[error("invalid rating scale {min}..{max}")]
    InvalidScale { min: f64, max: f64 },

    #[error("invalid delimiter `{0}`: expected `tab` or a single ASCII character")]
    InvalidDelimiter(String),

    #[error("unknown text encoding `{0}`")]
    UnknownEncoding(String),

    #[error("confidence level {0} is outside [0, 1)")]
    InvalidConfidence(f64),

    #[error("category `{category}` is listed twice on the {axis} axis")]
    DuplicateAxisCategory { axis: &'static str, category: String },

    #[error("no datasets to analyze")]
    NoDatasets,
}

/// Crate-wide error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Statistics(#[from] StatisticsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
