use thiserror::Error;

/// Errors from trace construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// A chain path fell outside the computed common root. This is an
    /// internal bug in root computation, not a user error.
    #[error("trace path {path} is not under computed common root {root:?}")]
    RootContainment { path: String, root: String },
}
