//! # relic-core
//!
//! The deterministic registry engine for Relic - THE LOGIC.
//!
//! This crate models ownership, time-gated staking, and level progression of
//! a fixed collection of unique tokens. Every rule lives here: the staking
//! state machine, the transfer guard, privileged minting, and the metadata
//! locator.
//!
//! ## Architectural Constraints
//!
//! - The registry is the ONLY place token state is mutated
//! - Every operation commits or rejects atomically; no partial mutation
//! - NO async, NO network dependencies (pure Rust)
//! - Time is read through an injectable [`Clock`], never ambiently
//! - Callers are explicit [`AccountId`] parameters, never ambient identity

// =============================================================================
// MODULES
// =============================================================================

pub mod clock;
pub mod formats;
pub mod ledger;
pub mod metadata;
pub mod primitives;
pub mod registry;
pub mod staking;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{AccountId, RegistryError, TokenId, TokenState};

// =============================================================================
// RE-EXPORTS: Registry Engine
// =============================================================================

pub use clock::Clock;
pub use ledger::{MemoryLedger, OwnershipLedger};
pub use metadata::{EvolutionStage, MetadataDocument, power_boost, token_uri};
pub use registry::Registry;
pub use staking::StakeEngine;
pub use store::TokenStore;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{
    SerializableRegistry, SnapshotHeader, registry_from_bytes, registry_to_bytes,
    snapshot_checksum,
};
