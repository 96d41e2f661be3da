//! Normalization of a fence configuration into an immutable rule set

use crate::config::FenceConfig;
use crate::error::{ConfigError, Result};
use fence_types::{is_canonical, is_within, normalize_lexically};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// What a custom predicate sees of a resolution.
#[derive(Debug, Clone, Copy)]
pub struct PredicateInput<'a> {
    pub resolved_path: &'a Path,
    pub declared_module_name: Option<&'a str>,
    pub declaring_package_path: Option<&'a Path>,
}

/// Caller-supplied acceptance check; `false` rejects the resolution.
pub type Predicate = Arc<dyn Fn(&PredicateInput<'_>) -> bool + Send + Sync>;

/// Builder that validates a [`FenceConfig`] and produces a [`RuleSet`].
pub struct PathRules {
    config: FenceConfig,
    predicate: Option<Predicate>,
}

impl PathRules {
    pub fn new(config: FenceConfig) -> Self {
        Self {
            config,
            predicate: None,
        }
    }

    /// Attach the custom `validate` predicate.
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&PredicateInput<'_>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Attach an already-shared predicate.
    pub fn with_shared_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Validate and normalize.
    ///
    /// With a root, rule paths are resolved against it and must stay inside
    /// it. Without a root they must already be absolute and canonical. When
    /// a root is given and `validPaths` is omitted, everything under the root
    /// is allowed.
    pub fn build(self) -> Result<RuleSet> {
        let FenceConfig {
            root_path,
            valid_paths,
            invalid_paths,
            valid_modules,
            invalid_modules,
            debug,
        } = self.config;

        let root_path = match root_path {
            Some(root) if root.as_os_str().is_empty() => return Err(ConfigError::EmptyRootPath),
            Some(root) if !is_canonical(&root) => {
                return Err(ConfigError::NonCanonicalRoot(root.display().to_string()))
            }
            other => other,
        };

        let valid_paths = match valid_paths {
            Some(paths) => Some(resolve_all("validPaths", paths, root_path.as_deref())?),
            None => root_path.clone().map(|root| vec![root]),
        };
        let invalid_paths = invalid_paths
            .map(|paths| resolve_all("invalidPaths", paths, root_path.as_deref()))
            .transpose()?;

        let rules = RuleSet {
            root_path,
            valid_paths,
            invalid_paths,
            valid_modules,
            invalid_modules,
            predicate: self.predicate,
            debug,
        };

        debug!(
            root = ?rules.root_path,
            valid_paths = ?rules.valid_paths,
            invalid_paths = ?rules.invalid_paths,
            valid_modules = ?rules.valid_modules,
            invalid_modules = ?rules.invalid_modules,
            has_predicate = rules.predicate.is_some(),
            "Built fence rule set"
        );

        Ok(rules)
    }
}

fn resolve_all(
    option: &'static str,
    paths: Vec<PathBuf>,
    root: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    paths
        .into_iter()
        .map(|path| resolve_one(option, path, root))
        .collect()
}

fn resolve_one(option: &'static str, path: PathBuf, root: Option<&Path>) -> Result<PathBuf> {
    match root {
        None => {
            if is_canonical(&path) {
                Ok(path)
            } else {
                Err(ConfigError::NonCanonicalPath {
                    option,
                    path: path.display().to_string(),
                })
            }
        }
        Some(root) => {
            let resolved = normalize_lexically(&root.join(&path));
            if is_within(&resolved, root) {
                Ok(resolved)
            } else {
                Err(ConfigError::OutsideRoot {
                    option,
                    path: resolved.display().to_string(),
                    root: root.display().to_string(),
                })
            }
        }
    }
}

/// Immutable, normalized fence rules for one build session.
#[derive(Clone, Default)]
pub struct RuleSet {
    root_path: Option<PathBuf>,
    valid_paths: Option<Vec<PathBuf>>,
    invalid_paths: Option<Vec<PathBuf>>,
    valid_modules: Option<Vec<String>>,
    invalid_modules: Option<Vec<String>>,
    predicate: Option<Predicate>,
    debug: bool,
}

impl RuleSet {
    /// Rules with nothing configured; every resolution is accepted.
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    pub fn valid_paths(&self) -> Option<&[PathBuf]> {
        self.valid_paths.as_deref()
    }

    pub fn invalid_paths(&self) -> Option<&[PathBuf]> {
        self.invalid_paths.as_deref()
    }

    pub fn valid_modules(&self) -> Option<&[String]> {
        self.valid_modules.as_deref()
    }

    pub fn invalid_modules(&self) -> Option<&[String]> {
        self.invalid_modules.as_deref()
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("root_path", &self.root_path)
            .field("valid_paths", &self.valid_paths)
            .field("invalid_paths", &self.invalid_paths)
            .field("valid_modules", &self.valid_modules)
            .field("invalid_modules", &self.invalid_modules)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .field("debug", &self.debug)
            .finish()
    }
}
