//! # Collection Primitives
//!
//! Hardcoded runtime constants for the Relic registry.
//!
//! The collection starts with zero tokens but fixed rules. These primitives
//! are compiled into the binary and are immutable at runtime.

/// Minimum continuous staking duration before a token becomes eligible for
/// one level-up, in seconds (7 days).
///
/// Eligibility is always measured from the start of the *current* stake;
/// unstaking discards any accumulated time.
pub const STAKE_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// The level every token is minted with.
pub const MIN_LEVEL: u8 = 1;

/// Upper bound on token levels.
///
/// The offline metadata generator pre-publishes documents for levels
/// `MIN_LEVEL..=MAX_LEVEL` only, so level-up beyond this is rejected to keep
/// the locator contract intact.
pub const MAX_LEVEL: u8 = 10;

/// Magic bytes for the Relic snapshot format header.
///
/// File Header = Magic Bytes ("RLIC") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"RLIC";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the serialization format.
pub const FORMAT_VERSION: u8 = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of tokens a single mint call may create.
///
/// Bounds the work done inside one operation; larger drops are issued as
/// multiple calls.
pub const MAX_MINT_QUANTITY: u64 = 1000;

/// Maximum length for the base URI string.
///
/// Locators are `base + id + "_" + level + ".json"`; bounding the base keeps
/// every derived locator within sane limits.
pub const MAX_BASE_URI_LENGTH: usize = 2048;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stake_period_is_seven_days() {
        assert_eq!(STAKE_PERIOD_SECS, 604_800);
    }

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"RLIC");
    }
}
