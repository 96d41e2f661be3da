use fence_types::{ProvenanceEntry, ResolutionFact};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Provenance of every file resolved during one build session.
///
/// Append-only and first-seen-wins: once a resolved path has an entry,
/// later resolutions of the same path never replace it.
#[derive(Debug, Default, Clone)]
pub struct ResolutionHistory {
    entries: HashMap<PathBuf, ProvenanceEntry>,
}

impl ResolutionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `fact.resolved_path` came from, unless already known.
    ///
    /// Returns `true` when a new entry was inserted.
    pub fn record(&mut self, fact: &ResolutionFact) -> bool {
        if self.entries.contains_key(&fact.resolved_path) {
            return false;
        }
        debug!(
            path = %fact.resolved_path.display(),
            importer = ?fact.importer_path,
            import = %fact.import_text,
            "Recorded provenance"
        );
        self.entries
            .insert(fact.resolved_path.clone(), ProvenanceEntry::from(fact));
        true
    }

    pub fn get(&self, path: &Path) -> Option<&ProvenanceEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all provenance; used when a session ends.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProvenanceEntry> {
        self.entries.values()
    }
}
