pub mod backend;
pub mod pins;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use pins::{PinStore, PinnedClause, PINNED_CLAUSES_KEY};
