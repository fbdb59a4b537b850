//! # Core Type Definitions
//!
//! This module contains all core types for the Relic registry engine:
//! - Identifiers (`TokenId`, `AccountId`)
//! - Per-token mutable state (`TokenState`)
//! - Error types (`RegistryError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Use saturating/checked arithmetic for counters to prevent overflow

use crate::primitives::MIN_LEVEL;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for a token in the collection.
///
/// Token ids are dense: they are assigned sequentially from 0 as minting
/// occurs and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u64);

/// Identifier for a principal (a wallet/account that can own tokens).
///
/// Every registry operation takes the caller's `AccountId` as an explicit
/// parameter; there is no ambient identity mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

// =============================================================================
// TOKEN STATE
// =============================================================================

/// The mutable per-token record layered on top of ownership.
///
/// `staked_at` is unix seconds and is meaningful only while `staked` is true;
/// it records the start of the most recent stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    /// Progression counter, `MIN_LEVEL..=MAX_LEVEL`. Starts at 1 on mint and
    /// only ever increases, by exactly 1 per successful level-up.
    pub level: u8,
    /// Whether the token is currently staked.
    pub staked: bool,
    /// Unix timestamp (seconds) of the most recent stake call.
    pub staked_at: u64,
}

impl TokenState {
    /// The state every token is minted with: level 1, unstaked.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            level: MIN_LEVEL,
            staked: false,
            staked_at: 0,
        }
    }

    /// Seconds elapsed since the current stake began.
    ///
    /// Only meaningful while staked. Time never moves backward relative to
    /// the operation order, so the subtraction saturates defensively to 0
    /// rather than wrapping.
    #[must_use]
    pub const fn staked_elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.staked_at)
    }
}

impl Default for TokenState {
    fn default() -> Self {
        Self::initial()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Relic registry.
///
/// Every rejection is synchronous and all-or-nothing: a failed operation
/// leaves the registry exactly as it was. There are no fatal errors at this
/// layer; the registry remains fully available after any rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The caller lacks the required role or does not own the token.
    #[error("Unauthorized")]
    Unauthorized,

    /// The token id has not been minted.
    #[error("Token not found: {0:?}")]
    TokenNotFound(TokenId),

    /// Stake was called on a token that is already staked.
    #[error("Already staked: {0:?}")]
    AlreadyStaked(TokenId),

    /// Unstake or level-up was called on a token that is not staked.
    #[error("Not staked: {0:?}")]
    NotStaked(TokenId),

    /// The stake period has not elapsed yet. Carries the remaining wait.
    #[error("Too early: {remaining_secs}s remaining until level-up eligibility")]
    TooEarly { remaining_secs: u64 },

    /// Level-up was called on a token already at the maximum level.
    #[error("Already at max level: {0:?}")]
    AlreadyMaxLevel(TokenId),

    /// A transfer was attempted while the token is staked.
    #[error("Token locked by stake: {0:?}")]
    TokenLocked(TokenId),

    /// A request parameter failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
