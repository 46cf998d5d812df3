//! Persistence of the latest capture

mod sink;
mod snapshot_store;

pub use sink::StoreSink;
pub use snapshot_store::SnapshotStore;
