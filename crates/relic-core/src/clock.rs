//! # Clock Module
//!
//! Injectable time source for the registry.
//!
//! Staking eligibility is derived from wall-clock time, so the registry never
//! reads the system clock directly. It holds a [`Clock`] value instead:
//! production code uses [`Clock::System`], tests use [`Clock::Manual`] and
//! advance it deterministically.
//!
//! Within a single operation the clock is read exactly once, so every check
//! in that operation observes the same instant.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Time source for registry operations, in unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Clock {
    /// Wall-clock time from the operating system.
    System,
    /// A manually driven clock for deterministic tests.
    Manual(u64),
}

impl Clock {
    /// Create a manual clock starting at the given unix timestamp.
    #[must_use]
    pub const fn manual(start: u64) -> Self {
        Self::Manual(start)
    }

    /// Current time in unix seconds.
    ///
    /// For `System`, a clock set before the epoch reads as 0 rather than
    /// failing; registry semantics only ever compare forward distances.
    #[must_use]
    pub fn now(&self) -> u64 {
        match self {
            Self::System => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            Self::Manual(now) => *now,
        }
    }

    /// Advance a manual clock by `secs`. No effect on `System`.
    pub fn advance(&mut self, secs: u64) {
        if let Self::Manual(now) = self {
            *now = now.saturating_add(secs);
        }
    }

    /// Set a manual clock to an absolute timestamp. No effect on `System`.
    pub fn set(&mut self, secs: u64) {
        if let Self::Manual(now) = self {
            *now = secs;
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::System
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let mut clock = Clock::manual(1000);
        assert_eq!(clock.now(), 1000);

        clock.advance(500);
        assert_eq!(clock.now(), 1500);
    }

    #[test]
    fn manual_clock_set_is_absolute() {
        let mut clock = Clock::manual(1000);
        clock.set(42);
        assert_eq!(clock.now(), 42);
    }

    #[test]
    fn manual_clock_saturates_on_overflow() {
        let mut clock = Clock::manual(u64::MAX);
        clock.advance(1);
        assert_eq!(clock.now(), u64::MAX);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        let clock = Clock::System;
        assert!(clock.now() > 0);
    }
}
