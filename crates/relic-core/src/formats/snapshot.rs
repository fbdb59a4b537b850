//! # Snapshot Format
//!
//! Binary serialization for Relic registries.
//!
//! Format: Header (5 bytes) + postcard-serialized registry data.
//! - 4 bytes: Magic ("RLIC")
//! - 1 byte: Version
//!
//! Save → load → save produces bit-identical bytes, so snapshots can be
//! compared and checksummed for verification.
//!
//! ## Security
//!
//! Pre-deserialization validation prevents allocation DoS from corrupted or
//! hostile files: maximum payload size and header magic/version are checked
//! before the payload is parsed.

use crate::clock::Clock;
use crate::ledger::MemoryLedger;
use crate::store::TokenStore;
use crate::{AccountId, Registry, RegistryError, primitives};
use serde::{Deserialize, Serialize};

// =============================================================================
// SECURITY LIMITS
// =============================================================================

/// Maximum allowed payload size for the snapshot format.
///
/// A registry entry is a handful of integers per token; 64 MB covers
/// collections far beyond anything this engine will see. Validated BEFORE
/// deserialization is attempted.
pub const MAX_SNAPSHOT_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Minimum valid file size (header only).
const MIN_FILE_SIZE: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes all registry data.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(RegistryError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(RegistryError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RegistryError> {
        if bytes.len() < MIN_FILE_SIZE {
            return Err(RegistryError::SerializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZABLE REGISTRY
// =============================================================================

/// Persistable representation of a registry.
///
/// The clock is intentionally NOT persisted: a loaded registry runs on
/// whatever clock the host supplies (system clock by default). Stake
/// timestamps are absolute unix seconds, so eligibility survives restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableRegistry {
    pub admin: AccountId,
    pub base_uri: String,
    pub store: TokenStore,
    pub ledger: MemoryLedger,
}

impl From<&Registry> for SerializableRegistry {
    fn from(registry: &Registry) -> Self {
        Self {
            admin: registry.admin(),
            base_uri: registry.base_uri().to_string(),
            store: registry.store().clone(),
            ledger: registry.ledger().clone(),
        }
    }
}

impl SerializableRegistry {
    /// Rebuild a live registry, attaching the given clock.
    #[must_use]
    pub fn into_registry(self, clock: Clock) -> Registry {
        Registry::from_parts(self.admin, self.base_uri, self.store, self.ledger, clock)
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a registry to bytes (header + payload).
///
/// This is a pure transformation - no file I/O.
pub fn registry_to_bytes(registry: &Registry) -> Result<Vec<u8>, RegistryError> {
    let header = SnapshotHeader::new();
    let serializable = SerializableRegistry::from(registry);

    let payload = postcard::to_stdvec(&serializable)
        .map_err(|e| RegistryError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(MIN_FILE_SIZE + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize a registry from bytes, attaching `clock`.
///
/// Validates minimum size, maximum payload size, and the header before any
/// payload parsing.
pub fn registry_from_bytes(bytes: &[u8], clock: Clock) -> Result<Registry, RegistryError> {
    if bytes.len() < MIN_FILE_SIZE {
        return Err(RegistryError::SerializationError(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > MAX_SNAPSHOT_PAYLOAD_SIZE {
        return Err(RegistryError::SerializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SNAPSHOT_PAYLOAD_SIZE
        )));
    }

    let header = SnapshotHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = &bytes[MIN_FILE_SIZE..];
    let serializable: SerializableRegistry = postcard::from_bytes(payload).map_err(|e| {
        RegistryError::SerializationError(format!("Failed to deserialize registry data: {}", e))
    })?;

    Ok(serializable.into_registry(clock))
}

/// XOR-fold checksum over the snapshot bytes for integrity display.
///
/// Not cryptographic; detects accidental corruption and gives operators a
/// stable value to compare across exports.
#[must_use]
pub fn snapshot_checksum(bytes: &[u8]) -> u64 {
    let mut acc: u64 = 0xcbf2_9ce4_8422_2325;
    for chunk in bytes.chunks(8) {
        let mut word = [0u8; 8];
        word[..chunk.len()].copy_from_slice(chunk);
        acc ^= u64::from_le_bytes(word);
        acc = acc.rotate_left(13).wrapping_mul(0x0100_0000_01b3);
    }
    acc
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenId;

    const ADMIN: AccountId = AccountId(0);
    const ALICE: AccountId = AccountId(1);

    fn populated_registry() -> Registry {
        let mut reg = Registry::with_clock(ADMIN, Clock::manual(1_000));
        reg.mint(ADMIN, ALICE, 2).expect("mint");
        reg.set_base_uri(ADMIN, "ipfs://cid/").expect("set base");
        reg.stake(ALICE, TokenId(1)).expect("stake");
        reg
    }

    #[test]
    fn header_roundtrip() {
        let header = SnapshotHeader::new();
        let bytes = header.to_bytes();
        let restored = SnapshotHeader::from_bytes(&bytes).expect("parse header");

        assert_eq!(restored.magic, *primitives::MAGIC_BYTES);
        assert_eq!(restored.version, primitives::FORMAT_VERSION);
    }

    #[test]
    fn bytes_roundtrip_bit_exact() {
        let registry = populated_registry();

        let bytes1 = registry_to_bytes(&registry).expect("first serialize");
        let restored = registry_from_bytes(&bytes1, Clock::manual(1_000)).expect("deserialize");
        let bytes2 = registry_to_bytes(&restored).expect("second serialize");

        assert_eq!(
            bytes1, bytes2,
            "save -> load -> save must produce identical bytes"
        );
    }

    #[test]
    fn roundtrip_preserves_state_and_ownership() {
        let registry = populated_registry();
        let bytes = registry_to_bytes(&registry).expect("serialize");
        let restored = registry_from_bytes(&bytes, Clock::manual(1_000)).expect("deserialize");

        assert_eq!(restored.total_supply(), 2);
        assert_eq!(restored.owner_of(TokenId(0)), Ok(ALICE));
        assert_eq!(restored.is_staked(TokenId(1)), Ok(true));
        assert_eq!(restored.base_uri(), "ipfs://cid/");
        assert_eq!(restored.admin(), ADMIN);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = vec![0u8; 10];
        bytes[0..4].copy_from_slice(b"XXXX"); // Wrong magic

        let result = registry_from_bytes(&bytes, Clock::System);
        assert!(result.is_err());
    }

    #[test]
    fn truncated_data_rejected() {
        let result = registry_from_bytes(&[0u8; 3], Clock::System);
        assert!(result.is_err());
    }

    #[test]
    fn checksum_is_deterministic_and_content_sensitive() {
        let registry = populated_registry();
        let bytes = registry_to_bytes(&registry).expect("serialize");

        assert_eq!(snapshot_checksum(&bytes), snapshot_checksum(&bytes));

        let mut mutated = bytes.clone();
        mutated[6] ^= 0xff;
        assert_ne!(snapshot_checksum(&bytes), snapshot_checksum(&mutated));
    }
}
