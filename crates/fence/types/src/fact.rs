use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One import resolved by the host build tool.
///
/// `resolved_path` is the identity key for everything downstream and must
/// already be absolute and canonical; hosts canonicalize before handing a
/// fact over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionFact {
    /// The file the import resolved to
    pub resolved_path: PathBuf,
    /// The file containing the import; `None` for build entry points
    #[serde(default)]
    pub importer_path: Option<PathBuf>,
    /// The import text as written by the importer
    #[serde(default)]
    pub import_text: String,
    /// Name declared by the package that owns the resolved file
    #[serde(default)]
    pub declared_module_name: Option<String>,
    /// Manifest of the package that owns the resolved file
    #[serde(default)]
    pub declaring_package_path: Option<PathBuf>,
}

impl ResolutionFact {
    /// A fact for a build entry point (no importer).
    pub fn entry(resolved_path: impl Into<PathBuf>) -> Self {
        let resolved_path = resolved_path.into();
        let import_text = resolved_path.display().to_string();
        Self {
            resolved_path,
            importer_path: None,
            import_text,
            declared_module_name: None,
            declaring_package_path: None,
        }
    }

    /// A fact for `import_text` in `importer` resolving to `resolved_path`.
    pub fn imported(
        resolved_path: impl Into<PathBuf>,
        importer: impl Into<PathBuf>,
        import_text: impl Into<String>,
    ) -> Self {
        Self {
            resolved_path: resolved_path.into(),
            importer_path: Some(importer.into()),
            import_text: import_text.into(),
            declared_module_name: None,
            declaring_package_path: None,
        }
    }

    /// Attach the declaring package's name and manifest path.
    pub fn declared_by(
        mut self,
        module_name: impl Into<String>,
        package_path: impl Into<PathBuf>,
    ) -> Self {
        self.declared_module_name = Some(module_name.into());
        self.declaring_package_path = Some(package_path.into());
        self
    }

    /// Attach only the declared module name.
    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.declared_module_name = Some(module_name.into());
        self
    }

    /// Whether this fact has no importer.
    pub fn is_entry(&self) -> bool {
        self.importer_path.is_none()
    }
}

/// Where a resolved file was first imported from.
///
/// Stored once per resolved path; later resolutions of the same file never
/// replace it because the first import site is the one worth reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceEntry {
    pub resolved_path: PathBuf,
    pub importer_path: Option<PathBuf>,
    pub import_text: String,
}

impl ProvenanceEntry {
    pub fn resolved_path(&self) -> &Path {
        &self.resolved_path
    }

    pub fn importer_path(&self) -> Option<&Path> {
        self.importer_path.as_deref()
    }
}

impl From<&ResolutionFact> for ProvenanceEntry {
    fn from(fact: &ResolutionFact) -> Self {
        Self {
            resolved_path: fact.resolved_path.clone(),
            importer_path: fact.importer_path.clone(),
            import_text: fact.import_text.clone(),
        }
    }
}
