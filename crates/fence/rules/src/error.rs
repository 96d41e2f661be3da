//! Error types for fence configuration

use thiserror::Error;

/// Malformed or inconsistent fence configuration.
///
/// Raised while building a rule set, never during evaluation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A key outside the recognized option set
    #[error("unrecognized fence option: {0}")]
    UnknownKey(String),

    /// Input could not be deserialized (wrong types, bad syntax)
    #[error("invalid fence configuration: {0}")]
    Parse(String),

    #[error("rootPath must be a non-empty path")]
    EmptyRootPath,

    #[error("rootPath must be absolute and canonical: {0}")]
    NonCanonicalRoot(String),

    #[error("{option} entry must be absolute and canonical: {path}")]
    NonCanonicalPath { option: &'static str, path: String },

    #[error("{option} entry {path} is outside rootPath {root}")]
    OutsideRoot {
        option: &'static str,
        path: String,
        root: String,
    },

    #[error("unsupported fence config format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read fence config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Classify a deserializer message; unknown keys get their own variant.
    pub(crate) fn from_deserialize(message: String) -> Self {
        if message.contains("unknown field") {
            ConfigError::UnknownKey(message)
        } else {
            ConfigError::Parse(message)
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::from_deserialize(e.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::from_deserialize(e.to_string())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
