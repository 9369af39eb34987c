//! Generator configuration.
//!
//! This module handles loading configuration from `typegen.toml` files.
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock generator: the built-in classifier table, no exclusions and the
//! `crate::types` path layout.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::openapi::ir::classify::{ClassifierRule, DEFAULT_MODULE, ModuleClassifier, default_rules};
use crate::openapi::ir::utils::{default_reserved_words, is_module_identifier};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "typegen.toml";

/// Module path generated types are referenced through.
pub const DEFAULT_GENERATED_PATH: &str = "crate::types::generated";

/// Module path hand-written (excluded) types are referenced through.
pub const DEFAULT_MANUAL_PATH: &str = "crate::types";

/// Immutable settings for one generator run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sanitized type names that are maintained by hand and never generated.
    pub exclude: BTreeSet<String>,

    /// Path prefix for references to generated types.
    pub generated_path: String,

    /// Path prefix for references to excluded types.
    pub manual_path: String,

    /// Words that get a trailing `_` when they come out as identifiers.
    pub reserved_words: BTreeSet<String>,

    /// Module classification rules.
    pub classifier: ClassifierConfig,

    /// Output location.
    pub output: OutputConfig,
}

/// `[classifier]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Tag for names no rule matches.
    pub fallback: String,

    /// Ordered rules; the first match wins.
    pub rules: Vec<ClassifierRule>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the module files and `mod.rs` are written to.
    pub dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            exclude: BTreeSet::new(),
            generated_path: DEFAULT_GENERATED_PATH.to_string(),
            manual_path: DEFAULT_MANUAL_PATH.to_string(),
            reserved_words: default_reserved_words(),
            classifier: ClassifierConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_MODULE.to_string(),
            rules: default_rules(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/types/generated"),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a file path.
    ///
    /// With `None` the default `typegen.toml` in the working directory is
    /// tried, and its absence yields the default configuration. An explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound {
                        path: p.to_path_buf(),
                    });
                }
                p.to_path_buf()
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILENAME);
                if !default_path.exists() {
                    debug!("No {CONFIG_FILENAME} found, using defaults.");
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&content, &config_path)?;
        debug!(path = %config_path.display(), "Loaded configuration.");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new(CONFIG_FILENAME))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::InvalidToml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generated_path.trim().is_empty() {
            return Err(ConfigError::invalid_value("generated_path", "must not be empty"));
        }
        if self.manual_path.trim().is_empty() {
            return Err(ConfigError::invalid_value("manual_path", "must not be empty"));
        }
        if !is_module_identifier(&self.classifier.fallback, &self.reserved_words) {
            return Err(ConfigError::invalid_value(
                "classifier.fallback",
                format!(
                    "'{}' is not a valid module name",
                    self.classifier.fallback
                ),
            ));
        }
        for (i, rule) in self.classifier.rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("classifier.rules[{i}].pattern"),
                    "must not be empty",
                ));
            }
            if !is_module_identifier(&rule.module, &self.reserved_words) {
                return Err(ConfigError::invalid_value(
                    format!("classifier.rules[{i}].module"),
                    format!("'{}' is not a valid module name", rule.module),
                ));
            }
        }
        Ok(())
    }

    /// Whether a sanitized type name is maintained by hand.
    pub fn is_excluded(&self, rust_name: &str) -> bool {
        self.exclude.contains(rust_name)
    }

    /// Build the classifier described by the `[classifier]` section.
    pub fn classifier(&self) -> ModuleClassifier {
        ModuleClassifier::new(self.classifier.rules.clone(), &self.classifier.fallback)
    }

    /// Add names to the exclusion set.
    pub fn with_exclusions<'a, I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.exclude.extend(names.into_iter().map(str::to_string));
        self
    }

    /// Replace the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }
}
