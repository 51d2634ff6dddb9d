//! Snapshot persistence

pub mod session_storage;
pub mod snapshot_serializer;

pub use session_storage::SessionStorage;
pub use snapshot_serializer::SnapshotSerializer;
