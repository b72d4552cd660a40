//! Snapshot persistence: JSON documents with atomic writes and a backup location.

pub mod error;
pub mod format;
pub mod manager;

pub use error::StoreError;
pub use format::{decode_snapshot, encode_snapshot};
pub use manager::{SavedTo, SnapshotStore};
