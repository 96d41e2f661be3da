//! # fence-coordinator
//!
//! Runs module fences for one build session.
//!
//! The host hands every resolution to [`FenceCoordinator::observe`]. The
//! coordinator records provenance, evaluates the rules and, on the first
//! rejection, returns a [`FenceViolation`] carrying the import trace that
//! pulled the offending file in. Accepted resolutions can be forwarded to an
//! [`AcceptSink`] such as the audit mirror.
//!
//! ```text
//! Idle --start--> Recording --observe/accept--> Recording
//!                     |
//!                     +--observe/reject--> Faulted
//! ```

pub mod coordinator;
pub mod error;
pub mod sink;
pub mod telemetry;

pub use coordinator::{FenceCoordinator, SessionState};
pub use error::{FenceError, FenceViolation};
pub use sink::AcceptSink;

pub use fence_audit::{AuditConfig, AuditError, AuditMirror};
pub use fence_provenance::{ResolutionHistory, Trace, TraceBuilder, TraceLine};
pub use fence_rules::{ConfigError, FenceConfig, PathRules, RejectReason, RuleSet};
pub use fence_types::ResolutionFact;
