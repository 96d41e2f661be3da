//! Rule evaluation for single resolutions
//!
//! Checks run in a fixed order and the first failing check explains the
//! rejection; later checks are not evaluated.

use crate::rules::{PredicateInput, RuleSet};
use fence_types::{contains_package_dir, is_within, ResolutionFact};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::trace;

/// Which rule rejected a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    ValidModules,
    InvalidModules,
    ValidPaths,
    InvalidPaths,
    Predicate,
}

impl RejectReason {
    /// Name of the configuration option behind this reason.
    pub fn tag(&self) -> &'static str {
        match self {
            RejectReason::ValidModules => "validModules",
            RejectReason::InvalidModules => "invalidModules",
            RejectReason::ValidPaths => "validPaths",
            RejectReason::InvalidPaths => "invalidPaths",
            RejectReason::Predicate => "validate",
        }
    }

    fn is_module_check(&self) -> bool {
        matches!(
            self,
            RejectReason::ValidModules | RejectReason::InvalidModules
        )
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A failed check together with what it failed on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectReason,
    /// The resolved path that was rejected
    pub subject: PathBuf,
    /// Declared module name, for module checks
    pub module_name: Option<String>,
}

impl Rejection {
    fn new(reason: RejectReason, fact: &ResolutionFact) -> Self {
        Self {
            reason,
            subject: fact.resolved_path.clone(),
            module_name: fact.declared_module_name.clone(),
        }
    }

    /// Human-readable rejection message.
    pub fn message(&self) -> String {
        let base = format!("[fencing] {}: {}", self.reason, self.subject.display());
        if self.reason.is_module_check() {
            format!(
                "{} ({})",
                base,
                self.module_name.as_deref().unwrap_or("unknown")
            )
        } else {
            base
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of evaluating one resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Verdict::Reject(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accept => None,
            Verdict::Reject(rejection) => Some(rejection),
        }
    }
}

type Check = fn(&ResolutionFact, &RuleSet) -> bool;

/// Evaluation order; each entry returns `true` when the fact passes.
const CHECKS: [(RejectReason, Check); 5] = [
    (RejectReason::ValidModules, check_valid_modules),
    (RejectReason::InvalidModules, check_invalid_modules),
    (RejectReason::ValidPaths, check_valid_paths),
    (RejectReason::InvalidPaths, check_invalid_paths),
    (RejectReason::Predicate, check_predicate),
];

/// Stateless evaluator of resolution facts against a rule set.
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Evaluate every configured check in order, stopping at the first failure.
    pub fn evaluate(fact: &ResolutionFact, rules: &RuleSet) -> Verdict {
        for (reason, check) in CHECKS {
            if !check(fact, rules) {
                trace!(
                    path = %fact.resolved_path.display(),
                    reason = %reason,
                    "Fence check failed"
                );
                return Verdict::Reject(Rejection::new(reason, fact));
            }
        }
        Verdict::Accept
    }
}

fn check_valid_modules(fact: &ResolutionFact, rules: &RuleSet) -> bool {
    let Some(valid) = rules.valid_modules() else {
        return true;
    };
    fact.declared_module_name
        .as_ref()
        .is_some_and(|name| valid.contains(name))
}

fn check_invalid_modules(fact: &ResolutionFact, rules: &RuleSet) -> bool {
    let Some(invalid) = rules.invalid_modules() else {
        return true;
    };
    let banned_name = fact
        .declared_module_name
        .as_ref()
        .is_some_and(|name| invalid.contains(name));
    // A banned package can also arrive nested under another package's install path.
    let banned_path = invalid
        .iter()
        .any(|name| contains_package_dir(&fact.resolved_path, name));
    !(banned_name || banned_path)
}

fn check_valid_paths(fact: &ResolutionFact, rules: &RuleSet) -> bool {
    rules.valid_paths().map_or(true, |prefixes| {
        prefixes
            .iter()
            .any(|prefix| is_within(&fact.resolved_path, prefix))
    })
}

fn check_invalid_paths(fact: &ResolutionFact, rules: &RuleSet) -> bool {
    rules.invalid_paths().map_or(true, |prefixes| {
        !prefixes
            .iter()
            .any(|prefix| is_within(&fact.resolved_path, prefix))
    })
}

fn check_predicate(fact: &ResolutionFact, rules: &RuleSet) -> bool {
    rules.predicate().map_or(true, |predicate| {
        predicate(&PredicateInput {
            resolved_path: &fact.resolved_path,
            declared_module_name: fact.declared_module_name.as_deref(),
            declaring_package_path: fact.declaring_package_path.as_deref(),
        })
    })
}
