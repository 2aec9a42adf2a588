//! Configuration file parsing
//!
//! Reads schema-lint.toml configuration files. A config file selects which
//! linters run, overrides their severity and thresholds, narrows the tables
//! and columns they look at, and passes linter-specific properties.
//!
//! ```toml
//! [lint]
//! run_all_linters = true
//! fail_on = "high"
//!
//! [[linter]]
//! id = "table-with-badly-named-columns"
//! severity = "low"
//! table-exclusion-pattern = "audit\\..*"
//! [linter.config]
//! bad-column-names = ".*_tmp"
//! ```

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::{LinterId, Severity};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("linter {linter} requires a non-blank '{property}' property")]
    MissingProperty { linter: LinterId, property: String },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Explicit linter entries, in file order. An id may appear more than
    /// once; each entry runs as its own instance.
    #[serde(default, rename = "linter")]
    pub linters: Vec<LinterConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LintConfig {
    /// Also run every registered linter that has no explicit entry.
    #[serde(default = "default_true")]
    pub run_all_linters: bool,

    /// Exit non-zero if lints meet or exceed this severity
    #[serde(default = "default_fail_on")]
    pub fail_on: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            run_all_linters: true,
            fail_on: default_fail_on(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Report format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// Settings for one linter instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinterConfig {
    pub id: LinterId,

    #[serde(default = "default_true")]
    pub run: bool,

    /// Overrides the linter's default severity.
    #[serde(default)]
    pub severity: Option<String>,

    /// The linter "exceeds its threshold" when it produces more lints
    /// than this.
    #[serde(default)]
    pub threshold: Option<usize>,

    #[serde(default)]
    pub table_inclusion_pattern: Option<String>,
    #[serde(default)]
    pub table_exclusion_pattern: Option<String>,
    #[serde(default)]
    pub column_inclusion_pattern: Option<String>,
    #[serde(default)]
    pub column_exclusion_pattern: Option<String>,

    /// Linter-specific properties.
    #[serde(default)]
    pub config: toml::Table,
}

fn default_true() -> bool {
    true
}

fn default_fail_on() -> String {
    "critical".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

const FORMATS: &[&str] = &["text", "json"];

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Severity at or above which the run fails; `None` when `fail_on = "none"`.
    pub fn fail_on(&self) -> Option<Severity> {
        Severity::parse(&self.lint.fail_on)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail_on = &self.lint.fail_on;
        if !fail_on.eq_ignore_ascii_case("none") && Severity::parse(fail_on).is_none() {
            return Err(ConfigError::Validation(format!(
                "invalid fail_on value '{}'. Valid values: critical, high, medium, low, none",
                fail_on
            )));
        }

        if !FORMATS.contains(&self.output.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "invalid output format '{}'. Valid values: {}",
                self.output.format,
                FORMATS.join(", ")
            )));
        }

        for linter in &self.linters {
            linter.validate()?;
        }
        Ok(())
    }
}

impl LinterConfig {
    /// Default settings for a linter that has no entry in the config file.
    pub fn new(id: LinterId) -> Self {
        Self {
            id,
            run: true,
            severity: None,
            threshold: None,
            table_inclusion_pattern: None,
            table_exclusion_pattern: None,
            column_inclusion_pattern: None,
            column_exclusion_pattern: None,
            config: toml::Table::new(),
        }
    }

    /// Builder-style helper for setting a property.
    pub fn with_property(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity.as_deref().and_then(Severity::parse)
    }

    pub fn table_rule(&self) -> Result<InclusionRule, ConfigError> {
        InclusionRule::new(
            self.table_inclusion_pattern.as_deref(),
            self.table_exclusion_pattern.as_deref(),
        )
    }

    pub fn column_rule(&self) -> Result<InclusionRule, ConfigError> {
        InclusionRule::new(
            self.column_inclusion_pattern.as_deref(),
            self.column_exclusion_pattern.as_deref(),
        )
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(toml::Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.config.get(key).and_then(toml::Value::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.config.get(key).and_then(toml::Value::as_integer)
    }

    /// A string property that must be present and non-blank.
    pub fn required_string(&self, key: &str) -> Result<&str, ConfigError> {
        match self.get_string(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingProperty {
                linter: self.id,
                property: key.to_string(),
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(severity) = &self.severity
            && Severity::parse(severity).is_none()
        {
            return Err(ConfigError::Validation(format!(
                "invalid severity '{}' for linter {}. Valid values: critical, high, medium, low",
                severity, self.id
            )));
        }
        self.table_rule()?;
        self.column_rule()?;
        Ok(())
    }
}

/// Include/exclude filter over qualified names (`schema.table` or
/// `schema.table.column`). Patterns must match the whole name.
#[derive(Debug, Clone, Default)]
pub struct InclusionRule {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl InclusionRule {
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            include: include.map(full_match).transpose()?,
            exclude: exclude.map(full_match).transpose()?,
        })
    }

    /// Rule that includes everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, name: &str) -> bool {
        let included = self.include.as_ref().is_none_or(|re| re.is_match(name));
        let excluded = self.exclude.as_ref().is_some_and(|re| re.is_match(name));
        included && !excluded
    }
}

pub(crate) fn full_match(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
