use thiserror::Error;

/// Errors from audit mirroring.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Misconfiguration or a destination escaping the output tree
    #[error("audit configuration error: {0}")]
    Config(String),

    /// Directory creation or copy failure
    #[error("audit I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for AuditError {
    fn from(e: serde_json::Error) -> Self {
        AuditError::Config(e.to_string())
    }
}

/// Result type for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
