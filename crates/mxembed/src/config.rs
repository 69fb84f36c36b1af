//! Configuration types for fixture generation.
//!
//! All types implement [`serde::Deserialize`] and default every missing
//! field, so a configuration file only needs the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`HostAttributes`] - Attributes written on the `<mxfile>` wrapper.
//! - [`CodecConfig`] - Compression level and round-trip verification.
//! - [`OutputConfig`] - Host document options such as the header comment.
//!
//! # Example
//!
//! ```
//! # use mxembed::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.codec().compression_level(), Ok(9));
//! assert_eq!(config.host().host(), "Electron");
//! ```

use serde::Deserialize;

use mxembed_codec::deflate::BEST_LEVEL;

pub use crate::wrapper::HostAttributes;

const DEFAULT_COMMENT: &str = "Test fixture - regenerated with valid compression";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// `<mxfile>` attributes.
    #[serde(default)]
    host: HostAttributes,

    /// Token codec settings.
    #[serde(default)]
    codec: CodecConfig,

    /// Host document settings.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(host: HostAttributes, codec: CodecConfig, output: OutputConfig) -> Self {
        Self {
            host,
            codec,
            output,
        }
    }

    /// Returns the `<mxfile>` attributes.
    pub fn host(&self) -> &HostAttributes {
        &self.host
    }

    /// Returns the codec configuration.
    pub fn codec(&self) -> &CodecConfig {
        &self.codec
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Check every section, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns a description of the invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.codec.compression_level()?;
        self.output.comment()?;
        Ok(())
    }
}

/// Token codec settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// DEFLATE level, `0..=9`.
    compression_level: u32,

    /// Decode every generated token and compare it with its source.
    verify_round_trip: bool,
}

impl CodecConfig {
    pub fn new(compression_level: u32, verify_round_trip: bool) -> Self {
        Self {
            compression_level,
            verify_round_trip,
        }
    }

    /// Returns the configured compression level.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is above 9.
    pub fn compression_level(&self) -> Result<u32, String> {
        if self.compression_level > BEST_LEVEL {
            return Err(format!(
                "compression_level must be between 0 and {BEST_LEVEL}, got {}",
                self.compression_level
            ));
        }
        Ok(self.compression_level)
    }

    /// Whether generated tokens are decoded and compared with their source.
    pub fn verify_round_trip(&self) -> bool {
        self.verify_round_trip
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(BEST_LEVEL, true)
    }
}

/// Host document settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Comment written after the XML declaration; empty disables it.
    comment: String,
}

impl OutputConfig {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }

    /// Returns the header comment, or `None` if it is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot appear inside an XML comment.
    pub fn comment(&self) -> Result<Option<&str>, String> {
        if self.comment.is_empty() {
            return Ok(None);
        }
        if self.comment.contains("--") || self.comment.ends_with('-') {
            return Err(format!(
                "comment must not contain `--` or end with `-`: {:?}",
                self.comment
            ));
        }
        Ok(Some(&self.comment))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host(), &HostAttributes::new("Electron", "test-fixture", "1.0"));
        assert_eq!(config.codec().compression_level(), Ok(9));
        assert!(config.codec().verify_round_trip());
        assert_eq!(config.output().comment(), Ok(Some(DEFAULT_COMMENT)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_compression_level_out_of_range() {
        let codec = CodecConfig::new(10, true);
        assert!(codec.compression_level().is_err());

        let config = AppConfig::new(HostAttributes::default(), codec, OutputConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_comment_is_disabled() {
        assert_eq!(OutputConfig::new("").comment(), Ok(None));
    }

    #[test]
    fn test_comment_rejects_double_hyphen() {
        assert!(OutputConfig::new("a -- b").comment().is_err());
        assert!(OutputConfig::new("trailing-").comment().is_err());
        assert!(OutputConfig::new("single - hyphen").comment().is_ok());
    }
}
