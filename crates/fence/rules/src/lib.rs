//! # fence-rules
//!
//! Declarative fence rules: which resolved files a build may pull in.
//!
//! A [`FenceConfig`] is normalized by [`PathRules`] into an immutable
//! [`RuleSet`]; [`RuleEvaluator`] then checks each resolution against it and
//! returns a [`Verdict`]. Evaluation never raises; turning a rejection into a
//! build failure is the coordinator's job.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod rules;

pub use config::FenceConfig;
pub use error::{ConfigError, Result};
pub use evaluator::{RejectReason, Rejection, RuleEvaluator, Verdict};
pub use rules::{PathRules, Predicate, PredicateInput, RuleSet};
