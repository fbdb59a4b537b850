//! # Staking State Machine
//!
//! Transition logic for the `Unstaked` ⇄ `Staked` state machine and the
//! time-gated level progression.
//!
//! Each function here is a pure transition over `(TokenState, now)`: it
//! either mutates the state completely or rejects and leaves it untouched.
//! Caller authorization (owner-only) is enforced one layer up in `Registry`,
//! where the ownership ledger is visible.
//!
//! ## Transitions
//!
//! - `stake`: Unstaked → Staked, records `staked_at := now`. Re-staking an
//!   already staked token is rejected with `AlreadyStaked` rather than
//!   silently resetting the timestamp, which would discard progress toward a
//!   pending level-up.
//! - `unstake`: Staked → Unstaked. Eligibility resets: the token must be
//!   staked again and wait the full period before its next level-up.
//! - `level_up`: requires Staked and `now - staked_at >= STAKE_PERIOD_SECS`.
//!   Does not modify `staked_at`, so a token staked continuously for N
//!   periods can level up N times without restaking.

use crate::primitives::{MAX_LEVEL, STAKE_PERIOD_SECS};
use crate::{RegistryError, TokenId, TokenState};

/// The staking transition engine.
///
/// Stateless; all state lives in the `TokenState` records it operates on.
pub struct StakeEngine;

impl StakeEngine {
    /// Enter the `Staked` state, recording the stake start time.
    pub fn stake(id: TokenId, state: &mut TokenState, now: u64) -> Result<(), RegistryError> {
        if state.staked {
            return Err(RegistryError::AlreadyStaked(id));
        }
        state.staked = true;
        state.staked_at = now;
        Ok(())
    }

    /// Leave the `Staked` state. `staked_at` becomes irrelevant until the
    /// next stake.
    pub fn unstake(id: TokenId, state: &mut TokenState) -> Result<(), RegistryError> {
        if !state.staked {
            return Err(RegistryError::NotStaked(id));
        }
        state.staked = false;
        Ok(())
    }

    /// Advance the level by exactly 1, gated on stake state, elapsed period,
    /// and the level cap.
    ///
    /// Check order: `NotStaked` before `TooEarly` before `AlreadyMaxLevel`,
    /// so callers always learn the first unmet precondition.
    pub fn level_up(id: TokenId, state: &mut TokenState, now: u64) -> Result<(), RegistryError> {
        if !state.staked {
            return Err(RegistryError::NotStaked(id));
        }

        let elapsed = state.staked_elapsed(now);
        if elapsed < STAKE_PERIOD_SECS {
            return Err(RegistryError::TooEarly {
                remaining_secs: STAKE_PERIOD_SECS - elapsed,
            });
        }

        if state.level >= MAX_LEVEL {
            return Err(RegistryError::AlreadyMaxLevel(id));
        }

        state.level = state.level.saturating_add(1);
        Ok(())
    }

    /// Seconds until the token becomes eligible for its next level-up.
    ///
    /// Returns 0 once the period has elapsed. For an unstaked token the
    /// answer is the full period: that is the minimum wait after staking.
    #[must_use]
    pub fn time_until_next_level_up(state: &TokenState, now: u64) -> u64 {
        if !state.staked {
            return STAKE_PERIOD_SECS;
        }
        STAKE_PERIOD_SECS.saturating_sub(state.staked_elapsed(now))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: TokenId = TokenId(0);

    fn staked_at(staked_at: u64) -> TokenState {
        TokenState {
            level: 1,
            staked: true,
            staked_at,
        }
    }

    #[test]
    fn stake_records_timestamp() {
        let mut state = TokenState::initial();
        StakeEngine::stake(TOKEN, &mut state, 5000).expect("stake");

        assert!(state.staked);
        assert_eq!(state.staked_at, 5000);
    }

    #[test]
    fn double_stake_is_rejected_and_keeps_timestamp() {
        let mut state = TokenState::initial();
        StakeEngine::stake(TOKEN, &mut state, 5000).expect("stake");

        let result = StakeEngine::stake(TOKEN, &mut state, 9000);
        assert_eq!(result, Err(RegistryError::AlreadyStaked(TOKEN)));
        assert_eq!(state.staked_at, 5000);
    }

    #[test]
    fn unstake_requires_staked() {
        let mut state = TokenState::initial();
        assert_eq!(
            StakeEngine::unstake(TOKEN, &mut state),
            Err(RegistryError::NotStaked(TOKEN))
        );
    }

    #[test]
    fn level_up_requires_staked() {
        let mut state = TokenState::initial();
        let result = StakeEngine::level_up(TOKEN, &mut state, STAKE_PERIOD_SECS);

        assert_eq!(result, Err(RegistryError::NotStaked(TOKEN)));
        assert_eq!(state.level, 1);
    }

    #[test]
    fn level_up_too_early_reports_remaining() {
        let mut state = staked_at(0);
        let result = StakeEngine::level_up(TOKEN, &mut state, STAKE_PERIOD_SECS - 100);

        assert_eq!(
            result,
            Err(RegistryError::TooEarly {
                remaining_secs: 100
            })
        );
        assert_eq!(state.level, 1);
    }

    #[test]
    fn level_up_after_period_advances_by_one() {
        let mut state = staked_at(0);
        StakeEngine::level_up(TOKEN, &mut state, STAKE_PERIOD_SECS).expect("level up");

        assert_eq!(state.level, 2);
        // Still staked; staked_at untouched
        assert!(state.staked);
        assert_eq!(state.staked_at, 0);
    }

    #[test]
    fn continuous_stake_allows_consecutive_level_ups() {
        let mut state = staked_at(0);

        // Three periods elapsed: three level-ups succeed back to back
        let now = STAKE_PERIOD_SECS * 3;
        for expected in 2..=4 {
            StakeEngine::level_up(TOKEN, &mut state, now).expect("level up");
            assert_eq!(state.level, expected);
        }
    }

    #[test]
    fn level_up_at_max_is_rejected() {
        let mut state = staked_at(0);
        state.level = MAX_LEVEL;

        let result = StakeEngine::level_up(TOKEN, &mut state, STAKE_PERIOD_SECS);
        assert_eq!(result, Err(RegistryError::AlreadyMaxLevel(TOKEN)));
        assert_eq!(state.level, MAX_LEVEL);
    }

    #[test]
    fn restake_resets_eligibility() {
        let mut state = staked_at(0);

        // Almost eligible, then unstake
        let now = STAKE_PERIOD_SECS - 1;
        StakeEngine::unstake(TOKEN, &mut state).expect("unstake");
        StakeEngine::stake(TOKEN, &mut state, now).expect("restake");

        // Old elapsed time is gone; the full period applies from `now`
        assert_eq!(
            StakeEngine::time_until_next_level_up(&state, now),
            STAKE_PERIOD_SECS
        );
        let result = StakeEngine::level_up(TOKEN, &mut state, now + STAKE_PERIOD_SECS - 1);
        assert!(matches!(result, Err(RegistryError::TooEarly { .. })));
    }

    #[test]
    fn time_until_next_level_up_counts_down() {
        let state = staked_at(1000);

        assert_eq!(
            StakeEngine::time_until_next_level_up(&state, 1000),
            STAKE_PERIOD_SECS
        );
        assert_eq!(
            StakeEngine::time_until_next_level_up(&state, 1000 + STAKE_PERIOD_SECS / 2),
            STAKE_PERIOD_SECS / 2
        );
        assert_eq!(
            StakeEngine::time_until_next_level_up(&state, 1000 + STAKE_PERIOD_SECS * 2),
            0
        );
    }

    #[test]
    fn time_until_next_level_up_unstaked_is_full_period() {
        let state = TokenState::initial();
        assert_eq!(
            StakeEngine::time_until_next_level_up(&state, 123_456),
            STAKE_PERIOD_SECS
        );
    }
}
