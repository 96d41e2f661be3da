//! Fence session orchestration
//!
//! One coordinator owns the rule set, the resolution history and the accept
//! sink for a single build. Nothing is shared between coordinators, so
//! sequential or concurrent builds each get their own instance.

use crate::error::{FenceError, FenceViolation};
use crate::sink::AcceptSink;
use fence_provenance::{ResolutionHistory, TraceBuilder};
use fence_rules::{FenceConfig, PathRules, RuleEvaluator, RuleSet, Verdict};
use fence_types::{is_canonical, ResolutionFact};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Lifecycle of a fence session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No session running; history is empty
    Idle,
    /// Accepting resolution events
    Recording,
    /// A resolution was rejected; the build is expected to abort
    Faulted,
}

/// Validates resolutions for one build session.
pub struct FenceCoordinator {
    rules: RuleSet,
    history: ResolutionHistory,
    state: SessionState,
    session_id: Option<Uuid>,
    sink: Option<Box<dyn AcceptSink>>,
    accepted: usize,
}

impl FenceCoordinator {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            history: ResolutionHistory::new(),
            state: SessionState::Idle,
            session_id: None,
            sink: None,
            accepted: 0,
        }
    }

    /// Build rules from a declarative config with no custom predicate.
    pub fn from_config(config: FenceConfig) -> fence_rules::Result<Self> {
        Ok(Self::new(PathRules::new(config).build()?))
    }

    /// Forward accepted resolutions to `sink`.
    pub fn with_sink(mut self, sink: impl AcceptSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn history(&self) -> &ResolutionHistory {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Resolutions accepted in the current session.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Begin a fresh session, discarding provenance and sink state from any
    /// previous one.
    pub fn start_session(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.history.clear();
        if let Some(sink) = self.sink.as_mut() {
            sink.reset();
        }
        self.accepted = 0;
        self.session_id = Some(id);
        self.state = SessionState::Recording;
        info!(session = %id, "Fence session started");
        id
    }

    /// End the session and drop its provenance.
    pub fn end_session(&mut self) {
        if let Some(id) = self.session_id.take() {
            info!(
                session = %id,
                resolutions = self.history.len(),
                accepted = self.accepted,
                faulted = self.state == SessionState::Faulted,
                "Fence session ended"
            );
        }
        self.history.clear();
        self.state = SessionState::Idle;
    }

    /// Record and validate one resolution.
    ///
    /// An idle coordinator starts a session implicitly. A faulted session
    /// refuses further events until [`start_session`](Self::start_session).
    /// Facts with a relative or non-normalized path are refused before
    /// anything is recorded.
    pub fn observe(&mut self, fact: &ResolutionFact) -> Result<(), FenceError> {
        if self.state == SessionState::Faulted {
            return Err(FenceError::Faulted);
        }
        Self::check_canonical(fact)?;
        if self.state == SessionState::Idle {
            self.start_session();
        }

        self.history.record(fact);

        match RuleEvaluator::evaluate(fact, &self.rules) {
            Verdict::Accept => {
                self.accepted += 1;
                debug!(path = %fact.resolved_path.display(), "Resolution accepted");
                if let Some(sink) = self.sink.as_mut() {
                    sink.accept(fact)?;
                }
                Ok(())
            }
            Verdict::Reject(rejection) => {
                self.state = SessionState::Faulted;
                let trace = TraceBuilder::build(&fact.resolved_path, &self.history)?;

                warn!(
                    session = ?self.session_id,
                    path = %fact.resolved_path.display(),
                    reason = %rejection.reason,
                    depth = trace.len(),
                    "Fence violation"
                );
                if self.rules.debug() {
                    error!(fact = ?fact, "Rejected resolution");
                }

                Err(FenceError::Violation(Box::new(FenceViolation {
                    reason: rejection.reason,
                    message: rejection.message(),
                    trace,
                    fact: self.rules.debug().then(|| fact.clone()),
                })))
            }
        }
    }
}

impl FenceCoordinator {
    fn check_canonical(fact: &ResolutionFact) -> Result<(), FenceError> {
        let paths = std::iter::once(fact.resolved_path.as_path())
            .chain(fact.importer_path.as_deref());
        for path in paths {
            if !is_canonical(path) {
                warn!(path = %path.display(), "Refusing non-canonical resolution");
                return Err(FenceError::NonCanonicalFact {
                    path: path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FenceCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FenceCoordinator")
            .field("rules", &self.rules)
            .field("history", &self.history.len())
            .field("state", &self.state)
            .field("session_id", &self.session_id)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
