use crate::error::FenceError;
use fence_audit::AuditMirror;
use fence_types::ResolutionFact;

/// Receives every resolution a session accepted.
pub trait AcceptSink: Send {
    /// Handle one accepted resolution. Errors propagate to the host.
    fn accept(&mut self, fact: &ResolutionFact) -> Result<(), FenceError>;

    /// Drop per-session state when a new session starts.
    fn reset(&mut self) {}
}

impl AcceptSink for AuditMirror {
    fn accept(&mut self, fact: &ResolutionFact) -> Result<(), FenceError> {
        self.admit(&fact.resolved_path)?;
        Ok(())
    }

    fn reset(&mut self) {
        AuditMirror::reset(self);
    }
}
