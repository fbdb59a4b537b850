//! # Lifecycle Tests
//!
//! End-to-end scenarios for the registry: mint, stake, wait, level up,
//! unstake, transfer. Time is driven through a manual clock so every
//! eligibility window is deterministic.

use relic_core::primitives::{MAX_LEVEL, STAKE_PERIOD_SECS};
use relic_core::{AccountId, Clock, Registry, RegistryError, TokenId};

const ADMIN: AccountId = AccountId(100);
const ALICE: AccountId = AccountId(1);
const BOB: AccountId = AccountId(2);

const DAY: u64 = 24 * 60 * 60;

fn registry_with_one_token() -> Registry {
    let mut reg = Registry::with_clock(ADMIN, Clock::manual(1_700_000_000));
    reg.mint(ADMIN, ALICE, 1).expect("mint");
    reg
}

// =============================================================================
// MINT
// =============================================================================

#[test]
fn fresh_mint_is_level_one_and_unstaked() {
    let reg = registry_with_one_token();

    assert_eq!(reg.get_level(TokenId(0)), Ok(1));
    assert_eq!(reg.is_staked(TokenId(0)), Ok(false));
    assert_eq!(reg.owner_of(TokenId(0)), Ok(ALICE));
    assert_eq!(reg.balance_of(ALICE), 1);
}

#[test]
fn batch_mint_consumes_dense_ids_across_calls() {
    let mut reg = Registry::with_clock(ADMIN, Clock::manual(0));

    let first = reg.mint(ADMIN, ALICE, 2).expect("mint");
    let second = reg.mint(ADMIN, BOB, 2).expect("mint");

    assert_eq!(first, vec![TokenId(0), TokenId(1)]);
    assert_eq!(second, vec![TokenId(2), TokenId(3)]);
    assert_eq!(reg.total_supply(), 4);
}

// =============================================================================
// STAKING AND LEVELING
// =============================================================================

#[test]
fn level_up_immediately_after_stake_is_too_early() {
    let mut reg = registry_with_one_token();

    reg.stake(ALICE, TokenId(0)).expect("stake");
    assert_eq!(reg.is_staked(TokenId(0)), Ok(true));

    let result = reg.level_up(ALICE, TokenId(0));
    assert_eq!(
        result,
        Err(RegistryError::TooEarly {
            remaining_secs: STAKE_PERIOD_SECS
        })
    );
    assert_eq!(reg.get_level(TokenId(0)), Ok(1));
}

#[test]
fn level_up_succeeds_after_seven_days() {
    let mut reg = registry_with_one_token();

    reg.stake(ALICE, TokenId(0)).expect("stake");
    reg.clock_mut().advance(7 * DAY);

    reg.level_up(ALICE, TokenId(0)).expect("level up");
    assert_eq!(reg.get_level(TokenId(0)), Ok(2));
}

#[test]
fn level_up_after_three_days_is_too_early() {
    let mut reg = registry_with_one_token();

    reg.stake(ALICE, TokenId(0)).expect("stake");
    reg.clock_mut().advance(3 * DAY);

    let result = reg.level_up(ALICE, TokenId(0));
    assert_eq!(
        result,
        Err(RegistryError::TooEarly {
            remaining_secs: 4 * DAY
        })
    );
}

#[test]
fn unstake_then_restake_requires_full_period_again() {
    let mut reg = registry_with_one_token();
    let id = TokenId(0);

    // Accumulate 6 days, then give up the stake
    reg.stake(ALICE, id).expect("stake");
    reg.clock_mut().advance(6 * DAY);
    reg.unstake(ALICE, id).expect("unstake");

    // Restake: old progress must not count
    reg.stake(ALICE, id).expect("restake");
    reg.clock_mut().advance(6 * DAY);
    assert_eq!(
        reg.level_up(ALICE, id),
        Err(RegistryError::TooEarly {
            remaining_secs: DAY
        })
    );

    reg.clock_mut().advance(DAY);
    reg.level_up(ALICE, id).expect("level up");
    assert_eq!(reg.get_level(id), Ok(2));
}

#[test]
fn leveling_stops_at_max_level() {
    let mut reg = registry_with_one_token();
    let id = TokenId(0);

    reg.stake(ALICE, id).expect("stake");
    // A very long stake satisfies the period check for every level-up
    reg.clock_mut().advance(STAKE_PERIOD_SECS * 100);

    for _ in 1..MAX_LEVEL {
        reg.level_up(ALICE, id).expect("level up");
    }
    assert_eq!(reg.get_level(id), Ok(MAX_LEVEL));

    assert_eq!(
        reg.level_up(ALICE, id),
        Err(RegistryError::AlreadyMaxLevel(id))
    );
    assert_eq!(reg.get_level(id), Ok(MAX_LEVEL));
}

#[test]
fn double_stake_is_rejected() {
    let mut reg = registry_with_one_token();

    reg.stake(ALICE, TokenId(0)).expect("stake");
    assert_eq!(
        reg.stake(ALICE, TokenId(0)),
        Err(RegistryError::AlreadyStaked(TokenId(0)))
    );
}

#[test]
fn time_until_next_level_up_tracks_the_clock() {
    let mut reg = registry_with_one_token();
    let id = TokenId(0);

    // Unstaked: the full period is the minimum wait
    assert_eq!(reg.time_until_next_level_up(id), Ok(STAKE_PERIOD_SECS));

    reg.stake(ALICE, id).expect("stake");
    reg.clock_mut().advance(2 * DAY);
    assert_eq!(reg.time_until_next_level_up(id), Ok(5 * DAY));

    reg.clock_mut().advance(10 * DAY);
    assert_eq!(reg.time_until_next_level_up(id), Ok(0));
}

// =============================================================================
// TRANSFER LOCK
// =============================================================================

#[test]
fn staked_token_cannot_transfer_until_unstaked() {
    let mut reg = registry_with_one_token();
    let id = TokenId(0);

    reg.stake(ALICE, id).expect("stake");
    assert_eq!(
        reg.transfer(ALICE, ALICE, BOB, id),
        Err(RegistryError::TokenLocked(id))
    );
    assert_eq!(reg.owner_of(id), Ok(ALICE));

    reg.unstake(ALICE, id).expect("unstake");
    reg.transfer(ALICE, ALICE, BOB, id).expect("transfer");
    assert_eq!(reg.owner_of(id), Ok(BOB));
    assert_eq!(reg.balance_of(ALICE), 0);
    assert_eq!(reg.balance_of(BOB), 1);
}

#[test]
fn level_survives_transfer() {
    let mut reg = registry_with_one_token();
    let id = TokenId(0);

    reg.stake(ALICE, id).expect("stake");
    reg.clock_mut().advance(STAKE_PERIOD_SECS);
    reg.level_up(ALICE, id).expect("level up");
    reg.unstake(ALICE, id).expect("unstake");

    reg.transfer(ALICE, ALICE, BOB, id).expect("transfer");
    assert_eq!(reg.get_level(id), Ok(2));
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

#[test]
fn non_owner_cannot_stake_unstake_or_level() {
    let mut reg = registry_with_one_token();
    let id = TokenId(0);

    assert_eq!(reg.stake(BOB, id), Err(RegistryError::Unauthorized));

    reg.stake(ALICE, id).expect("stake");
    assert_eq!(reg.unstake(BOB, id), Err(RegistryError::Unauthorized));

    reg.clock_mut().advance(STAKE_PERIOD_SECS);
    assert_eq!(reg.level_up(BOB, id), Err(RegistryError::Unauthorized));
    assert_eq!(reg.get_level(id), Ok(1));
}

#[test]
fn mint_and_set_base_uri_are_admin_only() {
    let mut reg = registry_with_one_token();

    assert_eq!(reg.mint(ALICE, ALICE, 1), Err(RegistryError::Unauthorized));
    assert_eq!(
        reg.set_base_uri(ALICE, "https://x/"),
        Err(RegistryError::Unauthorized)
    );
}

// =============================================================================
// METADATA
// =============================================================================

#[test]
fn token_uri_changes_with_level_and_base() {
    let mut reg = registry_with_one_token();
    let id = TokenId(0);

    reg.set_base_uri(ADMIN, "https://api.example.com/metadata/")
        .expect("set base");
    assert_eq!(
        reg.token_uri(id),
        Ok("https://api.example.com/metadata/0_1.json".to_string())
    );

    reg.stake(ALICE, id).expect("stake");
    reg.clock_mut().advance(STAKE_PERIOD_SECS);
    reg.level_up(ALICE, id).expect("level up");
    assert_eq!(
        reg.token_uri(id),
        Ok("https://api.example.com/metadata/0_2.json".to_string())
    );

    reg.set_base_uri(ADMIN, "ipfs://newcid/").expect("set base");
    assert_eq!(reg.token_uri(id), Ok("ipfs://newcid/0_2.json".to_string()));
}
