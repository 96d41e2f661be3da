//! Fence configuration surface

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Declarative fence options.
///
/// The option set is closed: unknown keys in JSON or YAML input are
/// rejected rather than ignored. The custom predicate cannot be expressed in
/// a file and is attached through [`crate::PathRules::with_predicate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FenceConfig {
    /// Absolute root that relative rule paths resolve against
    #[serde(default)]
    pub root_path: Option<PathBuf>,

    /// Only files under one of these prefixes are allowed
    #[serde(default)]
    pub valid_paths: Option<Vec<PathBuf>>,

    /// Files under any of these prefixes are rejected
    #[serde(default)]
    pub invalid_paths: Option<Vec<PathBuf>>,

    /// Only packages with one of these names are allowed
    #[serde(default)]
    pub valid_modules: Option<Vec<String>>,

    /// Packages with these names are rejected, by name or install path
    #[serde(default)]
    pub invalid_modules: Option<Vec<String>>,

    /// Attach the rejected fact to violations and log it
    #[serde(default)]
    pub debug: bool,
}

impl FenceConfig {
    /// Configuration rooted at `root_path`.
    pub fn rooted(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: Some(root_path.into()),
            ..Self::default()
        }
    }

    pub fn with_valid_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.valid_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_invalid_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.invalid_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_valid_modules<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_modules = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_invalid_modules<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.invalid_modules = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Parse a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Parse an already-decoded JSON value, as handed over by a host.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load configuration from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!(path = %path.display(), format = %extension, "Loading fence config");

        match extension.as_str() {
            "json" => Self::from_json_str(&contents),
            "yaml" | "yml" => Self::from_yaml_str(&contents),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}
