//! # Serialization Formats
//!
//! Pure byte-level formats for registry persistence. File I/O lives in the
//! app layer; this module only transforms between registries and bytes.

mod snapshot;

pub use snapshot::{
    MAX_SNAPSHOT_PAYLOAD_SIZE, SerializableRegistry, SnapshotHeader, registry_from_bytes,
    registry_to_bytes, snapshot_checksum,
};
