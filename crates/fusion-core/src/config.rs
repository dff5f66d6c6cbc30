/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Plugin options and their validated configuration.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{FusionError, Result};

/// Default pattern for files the plugin handles
pub const DEFAULT_TEST: &str = r"\.js$";

/// Default extension the plugin registers with the bundler
pub const DEFAULT_EXTENSION: &str = ".js";

static DEFAULT_TEST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_TEST).unwrap());

/// Options as written in the bundler configuration.
///
/// Every field is optional; unknown keys are rejected rather than silently
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FusionOptions {
    /// Regular expression selecting the files to transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    /// Extension to register as handled, including the leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
}

impl FusionOptions {
    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated plugin configuration.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    test: Regex,
    ext: String,
}

impl FusionConfig {
    /// Configuration with the default pattern and extension.
    pub fn new() -> Self {
        FusionConfig {
            test: DEFAULT_TEST_RE.clone(),
            ext: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Validate `options`, falling back to the defaults for missing fields.
    pub fn from_options(options: &FusionOptions) -> Result<Self> {
        let mut config = FusionConfig::new();
        if let Some(test) = &options.test {
            config = config.with_test(test)?;
        }
        if let Some(ext) = &options.ext {
            config = config.with_extension(ext)?;
        }
        Ok(config)
    }

    pub fn with_test(mut self, pattern: &str) -> Result<Self> {
        self.test = Regex::new(pattern)?;
        Ok(self)
    }

    pub fn with_extension(mut self, ext: &str) -> Result<Self> {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(FusionError::invalid_config(format!(
                "extension must start with '.' and name a suffix, got \"{ext}\""
            )));
        }
        self.ext = ext.to_string();
        Ok(self)
    }

    pub fn test(&self) -> &Regex {
        &self.test
    }

    pub fn extension(&self) -> &str {
        &self.ext
    }

    /// Whether a file path should reach the transform.
    pub fn matches(&self, path: &str) -> bool {
        self.test.is_match(path)
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FusionConfig::default();
        assert_eq!(config.extension(), ".js");
        assert!(config.matches("src/index.js"));
        assert!(!config.matches("src/index.ts"));
        assert!(!config.matches("src/index.js.map"));
    }

    #[test]
    fn test_options_override_defaults() {
        let options = FusionOptions::from_json(r#"{"test": "\\.mjs$", "ext": ".mjs"}"#).unwrap();
        let config = FusionConfig::from_options(&options).unwrap();
        assert_eq!(config.extension(), ".mjs");
        assert!(config.matches("a.mjs"));
        assert!(!config.matches("a.js"));
    }

    #[test]
    fn test_partial_options() {
        let options = FusionOptions::from_json(r#"{"ext": ".jsx"}"#).unwrap();
        let config = FusionConfig::from_options(&options).unwrap();
        assert_eq!(config.extension(), ".jsx");
        assert_eq!(config.test().as_str(), DEFAULT_TEST);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = FusionOptions::from_json(r#"{"ext": ".js", "minify": true}"#).unwrap_err();
        assert!(matches!(err, FusionError::Options(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let options = FusionOptions {
            test: Some("(".into()),
            ext: None,
        };
        let err = FusionConfig::from_options(&options).unwrap_err();
        assert!(matches!(err, FusionError::InvalidPattern(_)));
    }

    #[test]
    fn test_invalid_extension() {
        assert!(matches!(
            FusionConfig::new().with_extension("js"),
            Err(FusionError::InvalidConfig(_))
        ));
        assert!(FusionConfig::new().with_extension(".").is_err());
    }
}
