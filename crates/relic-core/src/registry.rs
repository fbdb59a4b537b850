//! # Registry Module
//!
//! The registry is the facade combining the token store, the ownership
//! ledger, the staking engine, and the clock. It is the single
//! exclusive-access boundary the whole system is modeled behind: every
//! state-changing operation commits or rejects atomically before the next
//! one is processed, and a failed operation leaves no partial mutation.
//!
//! ## Privileged role
//!
//! Minting and base-URI configuration require the admin principal fixed at
//! construction. All other operations require the caller to be the token's
//! current owner. There is no ambient identity: the caller is always an
//! explicit parameter.

use crate::clock::Clock;
use crate::ledger::{MemoryLedger, OwnershipLedger};
use crate::metadata;
use crate::primitives::{MAX_BASE_URI_LENGTH, MAX_MINT_QUANTITY};
use crate::staking::StakeEngine;
use crate::store::TokenStore;
use crate::{AccountId, RegistryError, TokenId, TokenState};

/// The Relic token registry.
#[derive(Debug, Clone)]
pub struct Registry {
    admin: AccountId,
    base_uri: String,
    clock: Clock,
    store: TokenStore,
    ledger: MemoryLedger,
}

impl Registry {
    /// Create an empty registry administered by `admin`, using the system
    /// clock.
    #[must_use]
    pub fn new(admin: AccountId) -> Self {
        Self::with_clock(admin, Clock::System)
    }

    /// Create an empty registry with an explicit clock.
    #[must_use]
    pub fn with_clock(admin: AccountId, clock: Clock) -> Self {
        Self {
            admin,
            base_uri: String::new(),
            clock,
            store: TokenStore::new(),
            ledger: MemoryLedger::new(),
        }
    }

    /// Reassemble a registry from persisted parts. Used by the snapshot
    /// format; not a public construction path for callers.
    pub(crate) fn from_parts(
        admin: AccountId,
        base_uri: String,
        store: TokenStore,
        ledger: MemoryLedger,
        clock: Clock,
    ) -> Self {
        Self {
            admin,
            base_uri,
            clock,
            store,
            ledger,
        }
    }

    // =========================================================================
    // MINTING
    // =========================================================================

    /// Mint `quantity` new tokens to `to`, assigning sequential ids starting
    /// at the current supply. Admin-only.
    ///
    /// Every new token starts at level 1, unstaked. Returns the ids created.
    pub fn mint(
        &mut self,
        caller: AccountId,
        to: AccountId,
        quantity: u64,
    ) -> Result<Vec<TokenId>, RegistryError> {
        if caller != self.admin {
            return Err(RegistryError::Unauthorized);
        }
        if quantity == 0 {
            return Err(RegistryError::InvalidInput(
                "mint quantity must be at least 1".to_string(),
            ));
        }
        if quantity > MAX_MINT_QUANTITY {
            return Err(RegistryError::InvalidInput(format!(
                "mint quantity {} exceeds maximum {}",
                quantity, MAX_MINT_QUANTITY
            )));
        }

        let mut minted = Vec::with_capacity(quantity as usize);
        for _ in 0..quantity {
            let id = self.store.push_initial();
            // Ids are fresh by construction, so assignment cannot collide.
            self.ledger.assign(id, to)?;
            minted.push(id);
        }
        Ok(minted)
    }

    // =========================================================================
    // STAKING
    // =========================================================================

    /// Stake a token. Owner-only; rejects `AlreadyStaked`.
    pub fn stake(&mut self, caller: AccountId, id: TokenId) -> Result<(), RegistryError> {
        self.require_owner(caller, id)?;
        let now = self.clock.now();
        StakeEngine::stake(id, self.store.get_mut(id)?, now)
    }

    /// Unstake a token. Owner-only; rejects `NotStaked`.
    ///
    /// Unstaking resets level-up eligibility: the next level-up requires a
    /// fresh stake and a full period.
    pub fn unstake(&mut self, caller: AccountId, id: TokenId) -> Result<(), RegistryError> {
        self.require_owner(caller, id)?;
        StakeEngine::unstake(id, self.store.get_mut(id)?)
    }

    /// Level up a token. Owner-only; requires the token to be staked and the
    /// full stake period to have elapsed since the current stake began.
    pub fn level_up(&mut self, caller: AccountId, id: TokenId) -> Result<(), RegistryError> {
        self.require_owner(caller, id)?;
        let now = self.clock.now();
        StakeEngine::level_up(id, self.store.get_mut(id)?, now)
    }

    // =========================================================================
    // TRANSFER GUARD
    // =========================================================================

    /// Transfer a token from `from` to `to` on behalf of `caller`.
    ///
    /// This is the only path into the ownership ledger's transfer, and it is
    /// guarded: a staked token cannot move. The staked check runs first so a
    /// locked token is reported as locked even to its owner.
    pub fn transfer(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        id: TokenId,
    ) -> Result<(), RegistryError> {
        let state = self.store.get(id)?;
        if state.staked {
            return Err(RegistryError::TokenLocked(id));
        }
        self.ledger.transfer(id, from, to, caller)
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    /// Set the base URI all token locators derive from. Admin-only.
    pub fn set_base_uri(
        &mut self,
        caller: AccountId,
        base_uri: impl Into<String>,
    ) -> Result<(), RegistryError> {
        if caller != self.admin {
            return Err(RegistryError::Unauthorized);
        }
        let base_uri = base_uri.into();
        if base_uri.len() > MAX_BASE_URI_LENGTH {
            return Err(RegistryError::InvalidInput(format!(
                "base URI length {} exceeds maximum {} bytes",
                base_uri.len(),
                MAX_BASE_URI_LENGTH
            )));
        }
        self.base_uri = base_uri;
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Current level of a token.
    pub fn get_level(&self, id: TokenId) -> Result<u8, RegistryError> {
        Ok(self.store.get(id)?.level)
    }

    /// Whether a token is currently staked.
    pub fn is_staked(&self, id: TokenId) -> Result<bool, RegistryError> {
        Ok(self.store.get(id)?.staked)
    }

    /// Seconds until the token becomes eligible for its next level-up.
    ///
    /// For an unstaked token this is the full stake period (the minimum wait
    /// after staking).
    pub fn time_until_next_level_up(&self, id: TokenId) -> Result<u64, RegistryError> {
        let state = self.store.get(id)?;
        Ok(StakeEngine::time_until_next_level_up(state, self.clock.now()))
    }

    /// Metadata locator for a token at its current level, under the current
    /// base URI.
    pub fn token_uri(&self, id: TokenId) -> Result<String, RegistryError> {
        let state = self.store.get(id)?;
        Ok(metadata::token_uri(&self.base_uri, id, state.level))
    }

    /// Current owner of a token.
    pub fn owner_of(&self, id: TokenId) -> Result<AccountId, RegistryError> {
        self.ledger
            .owner_of(id)
            .ok_or(RegistryError::TokenNotFound(id))
    }

    /// Number of tokens held by an account.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> u64 {
        self.ledger.balance_of(account)
    }

    /// Number of tokens minted so far.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.store.total_supply()
    }

    /// Full state record for a token.
    pub fn token_state(&self, id: TokenId) -> Result<TokenState, RegistryError> {
        self.store.get(id).copied()
    }

    /// The admin principal.
    #[must_use]
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    /// The configured base URI.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// The registry's clock. Mutable access is for tests and tooling driving
    /// a manual clock; `System` clocks ignore manipulation.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable clock access (see [`Registry::clock`]).
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// The token store, read-only.
    #[must_use]
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// The ownership ledger, read-only.
    #[must_use]
    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    /// Reject unless `caller` currently owns `id`.
    ///
    /// Missing tokens surface as `TokenNotFound` (the store is checked
    /// first), never as `Unauthorized`.
    fn require_owner(&self, caller: AccountId, id: TokenId) -> Result<(), RegistryError> {
        // Store check first: ids beyond supply are NotFound, not Unauthorized
        self.store.get(id)?;
        match self.ledger.owner_of(id) {
            Some(owner) if owner == caller => Ok(()),
            Some(_) => Err(RegistryError::Unauthorized),
            None => Err(RegistryError::TokenNotFound(id)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
