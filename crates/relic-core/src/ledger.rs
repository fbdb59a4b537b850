//! # Ownership Ledger
//!
//! Unique-ownership bookkeeping: which principal holds which token.
//!
//! The ledger is deliberately dumb. It knows nothing about staking or levels;
//! the only coupling to the staking subsystem is the transfer guard in
//! `Registry`, which consults the staked flag before delegating here. The
//! trait is the seam a different ledger implementation (or an external one)
//! must satisfy.

use crate::{AccountId, RegistryError, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// LEDGER TRAIT
// =============================================================================

/// The ownership operations the registry relies on.
///
/// Implementations must enforce caller authorization on `transfer`:
/// only the current owner may move a token. Approval/operator bookkeeping is
/// out of scope for this crate.
pub trait OwnershipLedger {
    /// Current owner of a token, if the token has been assigned.
    fn owner_of(&self, id: TokenId) -> Option<AccountId>;

    /// Number of tokens held by an account.
    fn balance_of(&self, account: AccountId) -> u64;

    /// Assign a freshly minted token to an account.
    ///
    /// Minting-time only; must not be used to reassign an owned token.
    fn assign(&mut self, id: TokenId, to: AccountId) -> Result<(), RegistryError>;

    /// Move a token from `from` to `to` on behalf of `caller`.
    ///
    /// Fails with `Unauthorized` unless `caller == from == owner_of(id)`.
    fn transfer(
        &mut self,
        id: TokenId,
        from: AccountId,
        to: AccountId,
        caller: AccountId,
    ) -> Result<(), RegistryError>;
}

// =============================================================================
// IN-MEMORY LEDGER
// =============================================================================

/// The default in-memory ledger.
///
/// Uses `BTreeMap` for deterministic ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLedger {
    owners: BTreeMap<TokenId, AccountId>,
}

impl MemoryLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate all assignments in token-id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, AccountId)> + '_ {
        self.owners.iter().map(|(id, owner)| (*id, *owner))
    }
}

impl OwnershipLedger for MemoryLedger {
    fn owner_of(&self, id: TokenId) -> Option<AccountId> {
        self.owners.get(&id).copied()
    }

    fn balance_of(&self, account: AccountId) -> u64 {
        self.owners.values().filter(|&&o| o == account).count() as u64
    }

    fn assign(&mut self, id: TokenId, to: AccountId) -> Result<(), RegistryError> {
        if self.owners.contains_key(&id) {
            return Err(RegistryError::InvalidInput(format!(
                "token {} already assigned",
                id.0
            )));
        }
        self.owners.insert(id, to);
        Ok(())
    }

    fn transfer(
        &mut self,
        id: TokenId,
        from: AccountId,
        to: AccountId,
        caller: AccountId,
    ) -> Result<(), RegistryError> {
        let owner = self
            .owners
            .get(&id)
            .copied()
            .ok_or(RegistryError::TokenNotFound(id))?;

        if owner != from || caller != from {
            return Err(RegistryError::Unauthorized);
        }

        self.owners.insert(id, to);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
