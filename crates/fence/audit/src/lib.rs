//! # fence-audit
//!
//! Copies every file a fence accepted into an output tree, preserving its
//! path relative to the project root, so the exact set of sources a build
//! pulled in can be inspected offline.

pub mod error;
pub mod mirror;

pub use error::{AuditError, Result};
pub use mirror::{AuditConfig, AuditMirror, WrapPath};
