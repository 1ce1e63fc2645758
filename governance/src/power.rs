//! Progressive voting-power calculation
//!
//! An account's voting power is its balance scaled by a multiplier derived
//! from how long it has held tokens continuously. The holding clock is
//! `token_lock_start` from the core ledger, stamped on the first
//! zero-to-nonzero balance transition and never reset.

use serde::{Deserialize, Serialize};

use crate::config::{LONG_TERM_THRESHOLD_SECS, VETERAN_THRESHOLD_SECS};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum HoldingTier {
    Basic,
    LongTerm,
    Veteran,
}

impl HoldingTier {
    /// Tier for an account that first held tokens at `lock_start`.
    /// `lock_start == 0` means the account has never held tokens.
    pub fn from_holding(lock_start: u64, now: u64) -> Self {
        if lock_start == 0 {
            return HoldingTier::Basic;
        }
        let held_for = now.saturating_sub(lock_start);
        if held_for >= VETERAN_THRESHOLD_SECS {
            HoldingTier::Veteran
        } else if held_for >= LONG_TERM_THRESHOLD_SECS {
            HoldingTier::LongTerm
        } else {
            HoldingTier::Basic
        }
    }

    /// Voting-power multiplier in percent (100 = 1.0x).
    pub fn multiplier(&self) -> u64 {
        match self {
            HoldingTier::Basic => 100,
            HoldingTier::LongTerm => 120,
            HoldingTier::Veteran => 150,
        }
    }
}

/// Effective voting power: balance scaled by the holding-tier multiplier.
pub fn voting_power(balance: u64, lock_start: u64, now: u64) -> u64 {
    let multiplier = HoldingTier::from_holding(lock_start, now).multiplier();
    (balance as u128 * multiplier as u128 / 100) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000;

    #[test]
    fn test_tier_progression() {
        assert_eq!(HoldingTier::from_holding(0, T0), HoldingTier::Basic);
        assert_eq!(HoldingTier::from_holding(T0, T0), HoldingTier::Basic);
        assert_eq!(
            HoldingTier::from_holding(T0, T0 + LONG_TERM_THRESHOLD_SECS),
            HoldingTier::LongTerm
        );
        assert_eq!(
            HoldingTier::from_holding(T0, T0 + VETERAN_THRESHOLD_SECS),
            HoldingTier::Veteran
        );
        // Two years of holding is comfortably veteran
        assert_eq!(
            HoldingTier::from_holding(T0, T0 + 2 * 365 * 86_400),
            HoldingTier::Veteran
        );
    }

    #[test]
    fn test_voting_power_multipliers() {
        let balance = 1_000;

        assert_eq!(voting_power(balance, 0, T0), 1_000);
        assert_eq!(
            voting_power(balance, T0, T0 + LONG_TERM_THRESHOLD_SECS),
            1_200
        );
        assert_eq!(
            voting_power(balance, T0, T0 + VETERAN_THRESHOLD_SECS),
            1_500
        );
    }

    #[test]
    fn test_power_monotonic_in_holding_duration() {
        let balance = 777;
        let mut last = 0;
        for days in [0u64, 30, 179, 180, 181, 364, 365, 366, 730] {
            let power = voting_power(balance, T0, T0 + days * 86_400);
            assert!(power >= last, "power decreased at day {days}");
            last = power;
        }
    }
}
