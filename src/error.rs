//! Error types for schema loading, code generation and persistence.
//!
//! Generation itself has a single fatal condition: a `$ref` naming a
//! definition the document does not contain. Everything else the engine
//! cannot model precisely degrades to `serde_json::Value` instead of failing,
//! and naming collisions are resolved by suffixing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for top-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading or parsing the input document.
    #[error("Failed to load schema document: {0}")]
    Load(#[from] LoadError),

    /// Error turning the document into Rust code.
    #[error("Failed to generate types: {0}")]
    Generate(#[from] GenerateError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Check mode found generated files that differ from the document.
    #[error("Generated files are out of date: {}", .files.join(", "))]
    OutOfDate {
        /// Output files that would change.
        files: Vec<String>,
    },
}

/// Fatal conditions raised while building declarations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// A `$ref` names a definition that is not in the document.
    #[error("Definition '{definition}' references unknown schema '{reference}'")]
    UnresolvedReference {
        /// Definition holding the reference.
        definition: String,
        /// The `$ref` value as written.
        reference: String,
    },
}

/// Error reading the input document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading the file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON document.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid YAML document.
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given explicitly but not found.
    #[error("Configuration file not found: {path}")]
    NotFound {
        /// File involved.
        path: PathBuf,
    },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml {
        /// File involved.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Dotted configuration key.
        key: String,
        /// What was wrong.
        message: String,
    },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an existing generated file.
    #[error("Failed to read existing file {path}: {source}")]
    ReadFile {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to move a fully written temporary file into place.
    #[error("Failed to replace {path}: {source}")]
    ReplaceFile {
        /// File that was to be replaced.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Create an unresolved reference error.
    pub fn unresolved(definition: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            definition: definition.into(),
            reference: reference.into(),
        }
    }
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
