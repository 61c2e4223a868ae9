use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ConfigError, DataError, Result, SchemaError};
use crate::process::{raw_table::RawTable, table::NormalizedTable, utils::parse_rating};
use crate::schema::{Polarity, SchemaTables, SchemaVariant, SurveyColumn};

/// The raw answer scale, `min..=max` (1..7 for AttrakDiff).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingScale {
    pub min: f64,
    pub max: f64,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self { min: 1.0, max: 7.0 }
    }
}

impl RatingScale {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.max > self.min {
            Ok(())
        } else {
            Err(ConfigError::InvalidScale {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Center of the raw scale: 4 for 1..7.
    pub fn shift(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Half-width of the normalized scale: 3 for 1..7.
    pub fn bound(&self) -> f64 {
        (self.max - self.min) / 2.0
    }
}

/// Map one raw answer onto `[-bound, bound]`.
///
/// Normal questions are shifted (`x - 4`); reversed ones are flipped around
/// the center (`4 - x`, i.e. `(bound + 1) - x` on a 1..7 scale).
pub fn rescale(raw: f64, polarity: Polarity, scale: &RatingScale) -> f64 {
    match polarity {
        Polarity::Normal => raw - scale.shift(),
        Polarity::Reversed => scale.shift() - raw,
    }
}

/// Step 1: number of rating columns, i.e. the position of the marker column.
pub fn locate_marker(raw: &RawTable, marker: &str) -> std::result::Result<usize, SchemaError> {
    raw.headers
        .iter()
        .position(|h| h == marker)
        .ok_or_else(|| SchemaError::MissingMarker {
            marker: marker.to_string(),
        })
}

/// Step 2: pick the layout whose size matches `count`.
pub fn detect_variant(
    count: usize,
    tables: &SchemaTables,
) -> std::result::Result<SchemaVariant, SchemaError> {
    tables
        .variant_for(count)
        .ok_or_else(|| SchemaError::UnexpectedColumnCount {
            marker: tables.marker().to_string(),
            short: tables.columns(SchemaVariant::Short).len(),
            long: tables.columns(SchemaVariant::Long).len(),
            actual: count,
        })
}

/// Turn a raw export into canonical signed ratings.
///
/// 1) drop the marker column and everything after it
/// 2) check the remaining width against the two layouts
/// 3) name the columns positionally from the matching layout
/// 4) rescale each cell according to its column's polarity
/// 5) reorder columns into the canonical pair order
///
/// Columns are matched by position only; header text is never compared.
#[instrument(level = "debug", skip_all, fields(rows = raw.rows.len()))]
pub fn normalize(
    raw: &RawTable,
    tables: &SchemaTables,
    scale: &RatingScale,
) -> Result<NormalizedTable> {
    scale.validate()?;

    // 1) + 2)
    let count = locate_marker(raw, tables.marker())?;
    let variant = detect_variant(count, tables)?;

    // 3)
    let layout: &[SurveyColumn] = tables.columns(variant);

    // 5) computed up front so each row is written once, already in order
    let mut order: Vec<(usize, usize)> = layout
        .iter()
        .enumerate()
        .map(|(pos, col)| {
            tables
                .ordinal(col.key)
                .map(|ord| (ord, pos))
                .ok_or_else(|| ConfigError::UnknownPair(col.key.to_string()))
        })
        .collect::<std::result::Result<_, _>>()?;
    order.sort_unstable();

    if raw.rows.is_empty() {
        return Err(DataError::NoRespondents.into());
    }

    // 4)
    let bound = scale.bound();
    let mut rows = Vec::with_capacity(raw.rows.len());
    for (row_idx, cells) in raw.rows.iter().enumerate() {
        if cells.len() != raw.headers.len() {
            return Err(DataError::RowLength {
                row: row_idx,
                expected: raw.headers.len(),
                actual: cells.len(),
            }
            .into());
        }
        let mut values = Vec::with_capacity(order.len());
        for &(_, pos) in &order {
            let col = &layout[pos];
            let cell = &cells[pos];
            let value = parse_rating(cell).ok_or_else(|| DataError::NotNumeric {
                row: row_idx,
                column: col.key.to_string(),
                value: cell.clone(),
            })?;
            let scaled = rescale(value, col.polarity, scale);
            if scaled.abs() > bound {
                return Err(DataError::OutOfRange {
                    row: row_idx,
                    column: col.key.to_string(),
                    value: scaled,
                    bound,
                }
                .into());
            }
            values.push(scaled);
        }
        rows.push(values);
    }

    let keys = order
        .iter()
        .map(|&(_, pos)| layout[pos].key.to_string())
        .collect();
    debug!(?variant, columns = order.len(), "normalized export");
    let ids = (0..rows.len())
        .map(|i| raw.ids.get(i).cloned().unwrap_or_default())
        .collect();
    Ok(NormalizedTable::new(variant, keys, ids, rows))
}
