use crate::error::TraceError;
use crate::history::ResolutionHistory;
use fence_types::{common_prefix, has_normal_segment, ProvenanceEntry};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::debug;

/// Running segment-wise common prefix of every path seen on a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommonRoot {
    prefix: Option<PathBuf>,
}

impl CommonRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow the root so it is also a prefix of `path`.
    pub fn fold(&mut self, path: &Path) {
        self.prefix = Some(match self.prefix.take() {
            None => path.to_path_buf(),
            Some(prefix) => common_prefix(&prefix, path),
        });
    }

    /// The current root; empty before anything was folded.
    pub fn path(&self) -> &Path {
        self.prefix.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// A root with no named segment shortens nothing, so paths are shown
    /// absolute.
    pub fn is_empty(&self) -> bool {
        !has_normal_segment(self.path())
    }

    /// Render `path` relative to the root as `./rest`, or `.` for the root
    /// itself. With an empty root the path is returned unchanged.
    pub fn relative(&self, path: &Path) -> Result<String, TraceError> {
        let root = self.path();
        let Ok(rest) = path.strip_prefix(root) else {
            return Err(TraceError::RootContainment {
                path: path.display().to_string(),
                root: root.display().to_string(),
            });
        };
        if self.is_empty() {
            return Ok(path.display().to_string());
        }
        if rest.as_os_str().is_empty() {
            Ok(".".to_string())
        } else {
            Ok(format!(".{}{}", MAIN_SEPARATOR, rest.display()))
        }
    }
}

/// How a trace entry was imported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceOrigin {
    pub import_text: String,
    pub display_importer: String,
}

/// One rendered step of a trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceLine {
    pub display_path: String,
    pub origin: Option<TraceOrigin>,
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  * {}", quote(&self.display_path))?;
        if let Some(origin) = &self.origin {
            write!(
                f,
                " (as {} from {})",
                quote(&origin.import_text),
                quote(&origin.display_importer)
            )?;
        }
        Ok(())
    }
}

/// A rendered import chain, failing file first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Trace {
    lines: Vec<TraceLine>,
    root: PathBuf,
}

impl Trace {
    /// Lines in traversal order, from the failing file toward the entry point.
    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    /// The common root the lines are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "  * in {}", quote(&self.root.display().to_string()))
    }
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_owned()).to_string()
}

/// Reconstructs the import chain behind a resolution.
pub struct TraceBuilder;

impl TraceBuilder {
    /// Walk provenance links backward from `failing_path` and render them.
    ///
    /// Stops at a file with no recorded provenance, at an entry point, or
    /// when a file repeats (circular imports).
    pub fn build(failing_path: &Path, history: &ResolutionHistory) -> Result<Trace, TraceError> {
        let chain = Self::chain(failing_path, history);

        let mut root = CommonRoot::new();
        for entry in &chain {
            root.fold(&entry.resolved_path);
            if let Some(importer) = &entry.importer_path {
                root.fold(importer);
            }
        }

        let lines = chain
            .iter()
            .map(|entry| {
                let origin = entry
                    .importer_path
                    .as_deref()
                    .map(|importer| {
                        root.relative(importer).map(|display_importer| TraceOrigin {
                            import_text: entry.import_text.clone(),
                            display_importer,
                        })
                    })
                    .transpose()?;
                Ok(TraceLine {
                    display_path: root.relative(&entry.resolved_path)?,
                    origin,
                })
            })
            .collect::<Result<Vec<_>, TraceError>>()?;

        Ok(Trace {
            lines,
            root: root.path().to_path_buf(),
        })
    }

    /// The provenance entries on the chain, failing file first.
    pub fn chain<'a>(
        failing_path: &'a Path,
        history: &'a ResolutionHistory,
    ) -> Vec<&'a ProvenanceEntry> {
        let mut chain = Vec::new();
        let mut visited: HashSet<&Path> = HashSet::new();
        let mut current = Some(failing_path);

        while let Some(path) = current {
            let Some(entry) = history.get(path) else {
                break;
            };
            if !visited.insert(path) {
                debug!(path = %path.display(), "Import cycle; truncating trace");
                break;
            }
            chain.push(entry);
            current = entry.importer_path.as_deref();
        }

        chain
    }
}
