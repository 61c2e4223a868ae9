use encoding_rs::Encoding;

use crate::error::DataError;

/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) Decode an export into text. A byte-order mark wins over `fallback`.
pub fn decode_text(bytes: &[u8], fallback: &'static Encoding) -> Result<String, DataError> {
    let (text, used, had_errors) = fallback.decode(bytes);
    if had_errors {
        return Err(DataError::Encoding {
            encoding: used.name(),
        });
    }
    Ok(text.into_owned())
}

/// 3) Parse one rating cell. Decimal commas are accepted, since the
/// semicolon-delimited exports come from locales that write them.
pub fn parse_rating(cell: &str) -> Option<f64> {
    let cleaned = clean_str(cell);
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .or_else(|_| cleaned.replace(',', ".").parse::<f64>())
        .ok()
        .filter(|v| v.is_finite())
}
