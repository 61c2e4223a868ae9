//! Analysis settings: defaults, optionally overridden by a YAML file, then by
//! command-line flags.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::aggregate::PortfolioAxes;
use crate::error::{ConfigError, Result};
use crate::process::{IngestOptions, RatingScale};
use crate::schema::Locale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Language code for labels (`en`, `fr`, `de`).
    pub locale: String,
    /// Interval mass for the portfolio, e.g. `0.95`.
    pub confidence: f64,
    /// `tab` or a single character such as `;`.
    pub delimiter: String,
    /// Encoding label used when an export has no byte-order mark.
    pub encoding: String,
    pub scale: RatingScale,
    pub axes: PortfolioAxes,
    /// Fail the whole run when one dataset cannot be loaded.
    pub strict: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En.code().to_string(),
            confidence: 0.95,
            delimiter: "tab".to_string(),
            encoding: "utf-16le".to_string(),
            scale: RatingScale::default(),
            axes: PortfolioAxes::default(),
            strict: false,
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn locale(&self) -> std::result::Result<Locale, ConfigError> {
        Locale::parse(&self.locale)
    }

    pub fn ingest_options(&self) -> std::result::Result<IngestOptions, ConfigError> {
        Ok(IngestOptions {
            delimiter: parse_delimiter(&self.delimiter)?,
            encoding: Encoding::for_label(self.encoding.trim().as_bytes())
                .ok_or_else(|| ConfigError::UnknownEncoding(self.encoding.clone()))?,
        })
    }

    /// Check every field that can be checked without data.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.confidence) {
            return Err(ConfigError::InvalidConfidence(self.confidence));
        }
        self.locale()?;
        self.ingest_options()?;
        self.scale.validate()?;
        self.axes.validate()?;
        Ok(())
    }
}

fn parse_delimiter(raw: &str) -> std::result::Result<u8, ConfigError> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(ConfigError::InvalidDelimiter(raw.to_string())),
            }
        }
    }
}
