//! Core type definitions for module fences.
//!
//! A host build tool resolves imports and hands each result to the fence as a
//! [`ResolutionFact`]. The fence never resolves anything itself; it only
//! reasons about the identity of resolved files, which is why the path
//! helpers in [`paths`] are purely lexical and never touch the filesystem.

pub mod fact;
pub mod paths;

// Re-export primary types at crate root for ergonomic use.
pub use fact::{ProvenanceEntry, ResolutionFact};
pub use paths::{
    common_prefix, contains_package_dir, has_normal_segment, is_canonical, is_strictly_within,
    is_within, normalize_lexically,
};
