use crate::error::{AuditError, Result};
use fence_types::{is_canonical, is_strictly_within, normalize_lexically};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Hook that rewrites a mirror destination; `None` skips the file.
pub type WrapPath = Arc<dyn Fn(&Path) -> Option<PathBuf> + Send + Sync>;

/// Where to mirror from and to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuditConfig {
    /// Absolute, canonical project root; only files under it are mirrored
    pub root_path: PathBuf,
    /// Output directory, resolved against `root_path`
    pub out_path: PathBuf,
}

impl AuditConfig {
    pub fn new(root_path: impl Into<PathBuf>, out_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            out_path: out_path.into(),
        }
    }

    /// Parse from a host-provided JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Copies accepted files into `out_root`, once per file per session.
pub struct AuditMirror {
    root_path: PathBuf,
    out_root: PathBuf,
    wrap_path: Option<WrapPath>,
    seen: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
    copied: usize,
    skipped: usize,
}

impl AuditMirror {
    pub fn new(config: AuditConfig) -> Result<Self> {
        let AuditConfig {
            root_path,
            out_path,
        } = config;

        if !is_canonical(&root_path) {
            return Err(AuditError::Config(format!(
                "rootPath must be absolute and canonical: {}",
                root_path.display()
            )));
        }
        if out_path.as_os_str().is_empty() {
            return Err(AuditError::Config("outPath is required".into()));
        }

        let out_root = normalize_lexically(&root_path.join(&out_path));
        if out_root == root_path {
            return Err(AuditError::Config(format!(
                "outPath must not be the project root: {}",
                root_path.display()
            )));
        }

        info!(
            root = %root_path.display(),
            out = %out_root.display(),
            "Audit mirror configured"
        );

        Ok(Self {
            root_path,
            out_root,
            wrap_path: None,
            seen: HashSet::new(),
            dirs: HashSet::new(),
            copied: 0,
            skipped: 0,
        })
    }

    /// Install a destination rewrite hook.
    pub fn with_wrap_path<F>(mut self, wrap_path: F) -> Self
    where
        F: Fn(&Path) -> Option<PathBuf> + Send + Sync + 'static,
    {
        self.wrap_path = Some(Arc::new(wrap_path));
        self
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn out_root(&self) -> &Path {
        &self.out_root
    }

    /// Files copied this session.
    pub fn copied(&self) -> usize {
        self.copied
    }

    /// Files the wrap hook declined this session.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Mirror one accepted file. Repeated calls for the same path are no-ops.
    ///
    /// Copy failures are returned as-is and the file is not marked seen.
    pub fn admit(&mut self, resolved_path: &Path) -> Result<()> {
        if self.seen.contains(resolved_path) {
            return Ok(());
        }

        if !is_canonical(resolved_path) || !is_strictly_within(resolved_path, &self.root_path) {
            return Err(AuditError::Config(format!(
                "{} is not a canonical path under {}",
                resolved_path.display(),
                self.root_path.display()
            )));
        }

        let relative = resolved_path
            .strip_prefix(&self.root_path)
            .map_err(|e| AuditError::Config(e.to_string()))?;
        let candidate = self.out_root.join(relative);

        let destination = match &self.wrap_path {
            Some(wrap) => wrap(&candidate),
            None => Some(candidate),
        };

        match destination {
            Some(destination) => {
                self.check_destination(resolved_path, &destination)?;
                self.ensure_parent(&destination)?;
                std::fs::copy(resolved_path, &destination).map_err(|source| AuditError::Io {
                    path: destination.display().to_string(),
                    source,
                })?;
                debug!(
                    source = %resolved_path.display(),
                    destination = %destination.display(),
                    "Mirrored file"
                );
                self.copied += 1;
            }
            None => {
                debug!(source = %resolved_path.display(), "Mirror skipped by wrap hook");
                self.skipped += 1;
            }
        }

        self.seen.insert(resolved_path.to_path_buf());
        Ok(())
    }

    /// Forget seen files and created directories for a new session.
    pub fn reset(&mut self) {
        self.seen.clear();
        self.dirs.clear();
        self.copied = 0;
        self.skipped = 0;
    }

    fn check_destination(&self, source: &Path, destination: &Path) -> Result<()> {
        if !is_canonical(destination) || !is_strictly_within(destination, &self.out_root) {
            return Err(AuditError::Config(format!(
                "mirror destination {} is not a canonical path under {}",
                destination.display(),
                self.out_root.display()
            )));
        }
        if destination == source {
            return Err(AuditError::Config(format!(
                "mirror destination {} is its own source",
                destination.display()
            )));
        }
        Ok(())
    }

    fn ensure_parent(&mut self, destination: &Path) -> Result<()> {
        let Some(parent) = destination.parent() else {
            return Ok(());
        };
        if self.dirs.contains(parent) {
            return Ok(());
        }
        std::fs::create_dir_all(parent).map_err(|source| AuditError::Io {
            path: parent.display().to_string(),
            source,
        })?;
        self.dirs.insert(parent.to_path_buf());
        Ok(())
    }
}

impl fmt::Debug for AuditMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditMirror")
            .field("root_path", &self.root_path)
            .field("out_root", &self.out_root)
            .field("wrap_path", &self.wrap_path.as_ref().map(|_| "<fn>"))
            .field("seen", &self.seen.len())
            .field("copied", &self.copied)
            .field("skipped", &self.skipped)
            .finish()
    }
}
