//! # fence-provenance
//!
//! Where did this module come from?
//!
//! [`ResolutionHistory`] remembers, for every resolved file, the first
//! importer that pulled it in. When a resolution is rejected,
//! [`TraceBuilder`] walks those links backwards from the rejected file to a
//! build entry point and renders the chain with paths shortened to their
//! common root:
//!
//! ```text
//!   * "./vendor/x.js" (as "../vendor/x" from "./src/a.js")
//!   * "./src/a.js"
//!   * in "/proj"
//! ```
//!
//! The walk is iterative with a visited set, so circular imports truncate the
//! trace instead of looping.

pub mod error;
pub mod history;
pub mod trace;

pub use error::TraceError;
pub use history::ResolutionHistory;
pub use trace::{CommonRoot, Trace, TraceBuilder, TraceLine, TraceOrigin};
