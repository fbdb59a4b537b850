//! # Token State Store
//!
//! Dense per-token state storage for the Relic registry.
//!
//! Token ids are assigned sequentially from 0 and never reused, so the store
//! is a plain `Vec` indexed by id. Tokens are never destroyed; the store only
//! grows. Mutation is crate-internal: external callers go through `Registry`
//! operations, which are the only place state transitions are decided.

use crate::{RegistryError, TokenId, TokenState};
use serde::{Deserialize, Serialize};

/// Dense arena of per-token state, keyed by `TokenId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStore {
    states: Vec<TokenState>,
}

impl TokenStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens minted so far. Ids `0..total_supply()` all exist.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.states.len() as u64
    }

    /// Check whether a token id has been minted.
    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        (id.0 as usize) < self.states.len()
    }

    /// Look up a token's state. Ids at or beyond the current supply are
    /// rejected with `TokenNotFound`.
    pub fn get(&self, id: TokenId) -> Result<&TokenState, RegistryError> {
        self.states
            .get(id.0 as usize)
            .ok_or(RegistryError::TokenNotFound(id))
    }

    /// Mutable lookup, internal to the crate.
    pub(crate) fn get_mut(&mut self, id: TokenId) -> Result<&mut TokenState, RegistryError> {
        self.states
            .get_mut(id.0 as usize)
            .ok_or(RegistryError::TokenNotFound(id))
    }

    /// Append a token in its initial state, consuming the next sequential id.
    pub(crate) fn push_initial(&mut self) -> TokenId {
        let id = TokenId(self.states.len() as u64);
        self.states.push(TokenState::initial());
        id
    }

    /// Iterate all token states in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &TokenState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (TokenId(i as u64), s))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_sequential() {
        let mut store = TokenStore::new();
        assert_eq!(store.push_initial(), TokenId(0));
        assert_eq!(store.push_initial(), TokenId(1));
        assert_eq!(store.push_initial(), TokenId(2));
        assert_eq!(store.total_supply(), 3);
    }

    #[test]
    fn unminted_id_is_not_found() {
        let mut store = TokenStore::new();
        store.push_initial();

        assert!(store.get(TokenId(0)).is_ok());
        assert_eq!(
            store.get(TokenId(1)),
            Err(RegistryError::TokenNotFound(TokenId(1)))
        );
    }

    #[test]
    fn new_tokens_start_at_initial_state() {
        let mut store = TokenStore::new();
        let id = store.push_initial();

        assert_eq!(store.get(id), Ok(&TokenState::initial()));
    }

    #[test]
    fn iter_yields_in_id_order() {
        let mut store = TokenStore::new();
        store.push_initial();
        store.push_initial();

        let ids: Vec<TokenId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![TokenId(0), TokenId(1)]);
    }
}
