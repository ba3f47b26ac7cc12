//! Local store for clauses the user marked as important.
//!
//! Pins are keyed by (analysis id, clause id) and live entirely outside
//! the analysis lifecycle: a pin may reference an analysis that no
//! longer exists and nothing cascades. Every operation reads and
//! rewrites the whole set, which is fine at the tens-to-hundreds scale
//! of a single-user store.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

use super::backend::KeyValueBackend;

/// Fixed storage key for the serialized pin list.
pub const PINNED_CLAUSES_KEY: &str = "clause_pinned_clauses";

/// One pinned clause: a composite (analysis, clause) key, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedClause {
    pub analysis_id: String,
    pub clause_id: String,
}

pub struct PinStore {
    backend: Box<dyn KeyValueBackend>,
}

impl PinStore {
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// All pins. A missing key, an unreadable backend or a corrupt
    /// payload all yield the empty set: pins are non-critical metadata
    /// and must never block the rest of the client.
    pub fn list(&self) -> Vec<PinnedClause> {
        let raw = match self.backend.get(PINNED_CLAUSES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read pinned clauses: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(pins) => pins,
            Err(e) => {
                warn!("Discarding corrupt pinned clause payload: {}", e);
                Vec::new()
            }
        }
    }

    pub fn is_pinned(&self, analysis_id: &str, clause_id: &str) -> bool {
        self.list()
            .iter()
            .any(|p| p.analysis_id == analysis_id && p.clause_id == clause_id)
    }

    /// Idempotent insert: pinning an already-pinned clause is a no-op.
    pub fn pin(&self, analysis_id: &str, clause_id: &str) -> Result<(), StorageError> {
        let mut pins = self.list();
        if pins
            .iter()
            .any(|p| p.analysis_id == analysis_id && p.clause_id == clause_id)
        {
            return Ok(());
        }

        pins.push(PinnedClause {
            analysis_id: analysis_id.to_string(),
            clause_id: clause_id.to_string(),
        });
        self.save(&pins)?;
        debug!("Pinned clause {} of analysis {}", clause_id, analysis_id);
        Ok(())
    }

    /// Idempotent removal: unpinning an absent clause is a no-op.
    pub fn unpin(&self, analysis_id: &str, clause_id: &str) -> Result<(), StorageError> {
        let mut pins = self.list();
        let before = pins.len();
        pins.retain(|p| !(p.analysis_id == analysis_id && p.clause_id == clause_id));
        if pins.len() == before {
            return Ok(());
        }

        self.save(&pins)?;
        debug!("Unpinned clause {} of analysis {}", clause_id, analysis_id);
        Ok(())
    }

    fn save(&self, pins: &[PinnedClause]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(pins)?;
        self.backend.set(PINNED_CLAUSES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::{FileBackend, MemoryBackend};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn memory_store() -> PinStore {
        PinStore::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn pin_then_is_pinned() {
        let store = memory_store();
        assert!(!store.is_pinned("a1", "c1"));

        store.pin("a1", "c1").unwrap();
        assert!(store.is_pinned("a1", "c1"));
        assert!(!store.is_pinned("a1", "c2"));
        assert!(!store.is_pinned("a2", "c1"));
    }

    #[test]
    fn unpin_after_pin_removes_exactly_one_pair() {
        let store = memory_store();
        store.pin("a1", "c1").unwrap();
        store.pin("a1", "c2").unwrap();

        store.unpin("a1", "c1").unwrap();
        assert!(!store.is_pinned("a1", "c1"));
        assert!(store.is_pinned("a1", "c2"));
    }

    #[test]
    fn pin_is_idempotent() {
        let store = memory_store();
        store.pin("a1", "c1").unwrap();
        store.pin("a1", "c1").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn unpin_of_absent_pair_is_noop() {
        let store = memory_store();
        store.unpin("a1", "c1").unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn corrupt_payload_degrades_to_empty() {
        let backend = MemoryBackend::new();
        backend.set(PINNED_CLAUSES_KEY, "not json {{{").unwrap();
        let store = PinStore::new(Box::new(backend));

        assert!(store.list().is_empty());
        assert!(!store.is_pinned("a1", "c1"));

        // The store stays usable: the next pin replaces the corrupt payload.
        store.pin("a1", "c1").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn stored_payload_uses_camel_case_pairs() {
        let backend = MemoryBackend::new();
        backend
            .set(
                PINNED_CLAUSES_KEY,
                r#"[{"analysisId":"a1","clauseId":"c1"}]"#,
            )
            .unwrap();
        let store = PinStore::new(Box::new(backend));
        assert!(store.is_pinned("a1", "c1"));
    }

    #[test]
    fn file_backed_pins_survive_a_new_store_instance() {
        let tmp = TempDir::new().unwrap();

        let store = PinStore::new(Box::new(FileBackend::new(tmp.path())));
        store.pin("a1", "c1").unwrap();
        store.pin("a2", "c7").unwrap();
        drop(store);

        let reopened = PinStore::new(Box::new(FileBackend::new(tmp.path())));
        let pins: HashSet<PinnedClause> = reopened.list().into_iter().collect();
        let expected: HashSet<PinnedClause> = [
            PinnedClause {
                analysis_id: "a1".into(),
                clause_id: "c1".into(),
            },
            PinnedClause {
                analysis_id: "a2".into(),
                clause_id: "c7".into(),
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(pins, expected);
    }
}
