//! Configuration for catalog scanning and segment concatenation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectorError};

/// What to do when a filename in the source directory cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail catalog construction on the first malformed filename
    #[default]
    Abort,
    /// Leave the file out, log a warning and record it in `Catalog::skipped`
    Skip,
}

/// Selector configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Acquisition file extension (default: "rhd")
    pub extension: String,

    /// Delimiter between filename fields (default: '_')
    pub delimiter: char,

    /// Policy for filenames that do not parse (default: Abort)
    pub malformed_policy: MalformedPolicy,

    /// Seconds spanned by one filename time unit (default: 1.0)
    /// Used to turn window bounds into sample frames
    pub seconds_per_unit: f64,

    /// Largest sample rate difference tolerated between segments, in Hz (default: 0.01)
    pub sample_rate_tolerance: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            extension: "rhd".to_string(),
            delimiter: '_',
            malformed_policy: MalformedPolicy::Abort,
            seconds_per_unit: 1.0,
            sample_rate_tolerance: 0.01,
        }
    }
}

impl SelectorConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// ```
    /// use intan_selector::{MalformedPolicy, SelectorConfig};
    ///
    /// let config = SelectorConfig::from_toml_str("malformed_policy = \"skip\"").unwrap();
    /// assert_eq!(config.malformed_policy, MalformedPolicy::Skip);
    /// assert_eq!(config.extension, "rhd");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SelectorConfig =
            toml::from_str(text).map_err(|e| SelectorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.normalized_extension().is_empty() {
            return Err(SelectorError::Config(
                "extension must not be empty".to_string(),
            ));
        }
        if !self.seconds_per_unit.is_finite() || self.seconds_per_unit <= 0.0 {
            return Err(SelectorError::Config(format!(
                "seconds_per_unit must be finite and > 0, got {}",
                self.seconds_per_unit
            )));
        }
        if self.sample_rate_tolerance.is_nan() || self.sample_rate_tolerance < 0.0 {
            return Err(SelectorError::Config(format!(
                "sample_rate_tolerance must be >= 0, got {}",
                self.sample_rate_tolerance
            )));
        }
        Ok(())
    }

    /// Extension without a leading dot, lowercased.
    pub(crate) fn normalized_extension(&self) -> String {
        self.extension
            .trim()
            .trim_start_matches('.')
            .to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rhd_naming() {
        let config = SelectorConfig::default();
        assert_eq!(config.extension, "rhd");
        assert_eq!(config.delimiter, '_');
        assert_eq!(config.malformed_policy, MalformedPolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_full_document() {
        let text = r#"
            extension = ".RHD"
            delimiter = "-"
            malformed_policy = "skip"
            seconds_per_unit = 0.5
            sample_rate_tolerance = 0.1
        "#;
        let config = SelectorConfig::from_toml_str(text).unwrap();
        assert_eq!(config.normalized_extension(), "rhd");
        assert_eq!(config.delimiter, '-');
        assert_eq!(config.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(config.seconds_per_unit, 0.5);
    }

    #[test]
    fn rejects_non_positive_unit() {
        let err = SelectorConfig::from_toml_str("seconds_per_unit = 0.0").unwrap_err();
        assert!(matches!(err, SelectorError::Config(_)));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = SelectorConfig::from_toml_str("malformed_policy = \"ignore\"").unwrap_err();
        assert!(matches!(err, SelectorError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selector.toml");
        fs::write(&path, "extension = \"dat\"\n").unwrap();
        let config = SelectorConfig::load(&path).unwrap();
        assert_eq!(config.extension, "dat");
        assert_eq!(config.seconds_per_unit, 1.0);
    }
}
