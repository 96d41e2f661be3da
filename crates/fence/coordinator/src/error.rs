use fence_audit::AuditError;
use fence_provenance::{Trace, TraceError};
use fence_rules::RejectReason;
use fence_types::ResolutionFact;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A resolution that broke a fence, with the import chain that led to it.
///
/// Displays as the rule message followed by the rendered trace.
#[derive(Debug, Clone, Serialize)]
pub struct FenceViolation {
    pub reason: RejectReason,
    pub message: String,
    pub trace: Trace,
    /// The rejected fact, attached only in debug mode
    pub fact: Option<ResolutionFact>,
}

impl fmt::Display for FenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.message, self.trace)
    }
}

impl std::error::Error for FenceViolation {}

/// Errors surfaced to the host build tool.
#[derive(Error, Debug)]
pub enum FenceError {
    #[error("{0}")]
    Violation(Box<FenceViolation>),

    /// Trace root computation broke its own invariant
    #[error("internal trace error: {0}")]
    Trace(#[from] TraceError),

    #[error("accept sink failed: {0}")]
    Sink(#[from] AuditError),

    #[error("fence session already faulted; start a new session")]
    Faulted,

    /// The host reported a path that is relative or not normalized
    #[error("resolution path is not absolute and canonical: {path}")]
    NonCanonicalFact { path: String },
}

impl FenceError {
    pub fn violation(&self) -> Option<&FenceViolation> {
        match self {
            FenceError::Violation(v) => Some(v),
            _ => None,
        }
    }
}
