//! Supply elasticity engine
//!
//! Inflation and burn rates follow a fixed phase schedule, adjusted by
//! governance-approved offsets. Mints outside emergencies are capped per
//! rolling 365-day window at the current inflation rate of total supply.
//! Burns are recorded in an append-only history together with a rolling
//! 30-day revenue counter.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EconomicsError, Result};
use crate::phase::{months_since, years_since, NetworkPhase};

/// Why new supply is being created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MintReason {
    /// Scheduled issuance approved through governance.
    Scheduled,
    /// Rewards minted to the worker pool.
    PoolRewards,
    /// Emergency-council mint; bypasses the inflation cap.
    Emergency,
}

/// Where burned revenue came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RevenueSource {
    JobFees,
    GasFees,
    ServiceRevenue,
}

/// One entry of the append-only burn history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnEvent {
    pub amount: u64,
    pub timestamp: u64,
    pub burn_rate_bp: u64,
    pub supply_after: u64,
    pub source: RevenueSource,
    pub token_price_usd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyTracker {
    launch_timestamp: u64,
    total_burned: u64,
    burn_history: Vec<BurnEvent>,
    /// Governance-approved deltas on top of the base schedule.
    inflation_offset_bp: i64,
    burn_offset_bp: i64,
    /// Rolling 30-day revenue window.
    month_start: u64,
    monthly_burned: u64,
    monthly_revenue_usd: f64,
    /// Rolling 365-day mint window for the inflation cap.
    year_start: u64,
    minted_in_year: u64,
}

impl SupplyTracker {
    pub fn new(launch_timestamp: u64) -> Self {
        Self {
            launch_timestamp,
            total_burned: 0,
            burn_history: Vec::new(),
            inflation_offset_bp: 0,
            burn_offset_bp: 0,
            month_start: launch_timestamp,
            monthly_burned: 0,
            monthly_revenue_usd: 0.0,
            year_start: launch_timestamp,
            minted_in_year: 0,
        }
    }

    pub fn launch_timestamp(&self) -> u64 {
        self.launch_timestamp
    }

    pub fn phase(&self, now: u64) -> NetworkPhase {
        NetworkPhase::from_months(months_since(self.launch_timestamp, now))
    }

    fn base_inflation_rate_bp(&self, now: u64) -> u64 {
        match years_since(self.launch_timestamp, now) {
            y if y <= 2 => INFLATION_YEARS_0_2_BP,
            y if y <= 3 => INFLATION_YEAR_3_BP,
            y if y <= 4 => INFLATION_YEAR_4_BP,
            _ => INFLATION_MATURE_BP,
        }
    }

    fn base_burn_rate_bp(&self, now: u64) -> u64 {
        match months_since(self.launch_timestamp, now) {
            m if m <= 12 => BURN_MONTHS_0_12_BP,
            m if m <= 36 => BURN_MONTHS_13_36_BP,
            m if m <= 60 => BURN_MONTHS_37_60_BP,
            _ => BURN_MATURE_BP,
        }
    }

    /// Effective inflation rate: base schedule plus governance offset,
    /// saturating at zero.
    pub fn inflation_rate_bp(&self, now: u64) -> u64 {
        apply_offset(self.base_inflation_rate_bp(now), self.inflation_offset_bp)
    }

    /// Effective burn rate: base schedule plus governance offset.
    pub fn burn_rate_bp(&self, now: u64) -> u64 {
        apply_offset(self.base_burn_rate_bp(now), self.burn_offset_bp)
    }

    pub fn total_burned(&self) -> u64 {
        self.total_burned
    }

    pub fn burn_history(&self) -> &[BurnEvent] {
        &self.burn_history
    }

    pub fn monthly_revenue_usd(&self) -> f64 {
        self.monthly_revenue_usd
    }

    /// Tokens still mintable in the current 365-day window at the given
    /// total supply.
    pub fn mint_remaining(&self, total_supply: u64, now: u64) -> u64 {
        let cap = (total_supply as u128 * self.inflation_rate_bp(now) as u128 / 10_000) as u64;
        if now >= self.year_start + YEAR_SECS {
            cap
        } else {
            cap.saturating_sub(self.minted_in_year)
        }
    }

    /// Account for a mint. Non-emergency mints must fit the rolling yearly
    /// inflation cap; the caller performs the actual ledger credit.
    pub fn record_mint(
        &mut self,
        amount: u64,
        reason: MintReason,
        total_supply: u64,
        now: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Err(EconomicsError::ZeroAmount);
        }
        if reason == MintReason::Emergency {
            return Ok(());
        }
        let remaining = self.mint_remaining(total_supply, now);
        if amount > remaining {
            return Err(EconomicsError::MintCapExceeded {
                requested: amount,
                remaining,
            });
        }
        if now >= self.year_start + YEAR_SECS {
            self.year_start = now;
            self.minted_in_year = 0;
        }
        self.minted_in_year += amount;
        Ok(())
    }

    /// Account for a revenue-triggered burn and append the burn event. The
    /// caller performs the actual ledger debit; `total_supply` is the supply
    /// before the burn.
    pub fn record_burn(
        &mut self,
        amount: u64,
        source: RevenueSource,
        token_price_usd: f64,
        total_supply: u64,
        now: u64,
    ) -> Result<&BurnEvent> {
        if amount == 0 {
            return Err(EconomicsError::ZeroAmount);
        }
        if amount > total_supply {
            return Err(EconomicsError::InsufficientSupply {
                requested: amount,
                supply: total_supply,
            });
        }

        // Reset the rolling-month counter when more than 30 days elapsed.
        if now >= self.month_start + MONTH_SECS {
            self.month_start = now;
            self.monthly_burned = 0;
            self.monthly_revenue_usd = 0.0;
        }
        self.monthly_burned += amount;
        self.monthly_revenue_usd += amount as f64 / 100_000_000.0 * token_price_usd;

        self.total_burned = self
            .total_burned
            .checked_add(amount)
            .ok_or(EconomicsError::AmountOverflow)?;
        self.burn_history.push(BurnEvent {
            amount,
            timestamp: now,
            burn_rate_bp: self.burn_rate_bp(now),
            supply_after: total_supply - amount,
            source,
            token_price_usd,
        });
        Ok(self.burn_history.last().expect("just pushed"))
    }

    /// Apply governance-approved deltas to the stored rates. Rate limiting of
    /// these adjustments is the safeguards crate's concern.
    pub fn apply_rate_adjustment(&mut self, inflation_change_bp: i64, burn_change_bp: i64) {
        self.inflation_offset_bp += inflation_change_bp;
        self.burn_offset_bp += burn_change_bp;
    }
}

fn apply_offset(base_bp: u64, offset_bp: i64) -> u64 {
    if offset_bp >= 0 {
        base_bp.saturating_add(offset_bp as u64)
    } else {
        base_bp.saturating_sub(offset_bp.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAUNCH: u64 = 1_700_000_000;

    #[test]
    fn test_inflation_schedule() {
        let supply = SupplyTracker::new(LAUNCH);

        assert_eq!(supply.inflation_rate_bp(LAUNCH), 800);
        assert_eq!(supply.inflation_rate_bp(LAUNCH + 2 * YEAR_SECS), 800);
        assert_eq!(supply.inflation_rate_bp(LAUNCH + 3 * YEAR_SECS), 500);
        assert_eq!(supply.inflation_rate_bp(LAUNCH + 4 * YEAR_SECS), 300);
        assert_eq!(supply.inflation_rate_bp(LAUNCH + 5 * YEAR_SECS), 100);
    }

    #[test]
    fn test_burn_schedule() {
        let supply = SupplyTracker::new(LAUNCH);

        assert_eq!(supply.burn_rate_bp(LAUNCH), 3_000);
        assert_eq!(supply.burn_rate_bp(LAUNCH + 12 * MONTH_SECS), 3_000);
        assert_eq!(supply.burn_rate_bp(LAUNCH + 13 * MONTH_SECS), 5_000);
        assert_eq!(supply.burn_rate_bp(LAUNCH + 37 * MONTH_SECS), 7_000);
        assert_eq!(supply.burn_rate_bp(LAUNCH + 61 * MONTH_SECS), 8_000);
    }

    #[test]
    fn test_rate_offsets() {
        let mut supply = SupplyTracker::new(LAUNCH);

        supply.apply_rate_adjustment(-300, 500);
        assert_eq!(supply.inflation_rate_bp(LAUNCH), 500);
        assert_eq!(supply.burn_rate_bp(LAUNCH), 3_500);

        // Offsets cannot push a rate below zero
        supply.apply_rate_adjustment(-10_000, 0);
        assert_eq!(supply.inflation_rate_bp(LAUNCH), 0);
    }

    #[test]
    fn test_mint_cap() {
        let mut supply = SupplyTracker::new(LAUNCH);
        let total_supply = 1_000_000;

        // 800 bp of 1_000_000 = 80_000 mintable in year one
        assert_eq!(supply.mint_remaining(total_supply, LAUNCH), 80_000);

        supply
            .record_mint(50_000, MintReason::Scheduled, total_supply, LAUNCH)
            .unwrap();
        assert_eq!(supply.mint_remaining(total_supply, LAUNCH), 30_000);

        let err = supply
            .record_mint(30_001, MintReason::Scheduled, total_supply, LAUNCH)
            .unwrap_err();
        assert_eq!(
            err,
            EconomicsError::MintCapExceeded {
                requested: 30_001,
                remaining: 30_000
            }
        );

        // Emergency mints bypass the cap entirely
        supply
            .record_mint(500_000, MintReason::Emergency, total_supply, LAUNCH)
            .unwrap();

        // The window resets after a year
        let later = LAUNCH + YEAR_SECS;
        supply
            .record_mint(80_000, MintReason::Scheduled, total_supply, later)
            .unwrap();
    }

    #[test]
    fn test_burn_history_and_monthly_reset() {
        let mut supply = SupplyTracker::new(LAUNCH);

        supply
            .record_burn(1_000, RevenueSource::JobFees, 2.0, 10_000, LAUNCH + 100)
            .unwrap();
        assert_eq!(supply.total_burned(), 1_000);
        assert_eq!(supply.burn_history().len(), 1);
        assert_eq!(supply.burn_history()[0].supply_after, 9_000);

        // Second burn inside the same month accumulates revenue
        supply
            .record_burn(500, RevenueSource::GasFees, 2.0, 9_000, LAUNCH + 200)
            .unwrap();
        assert_eq!(supply.monthly_burned, 1_500);

        // Past the 30-day window the counter resets
        supply
            .record_burn(100, RevenueSource::JobFees, 2.0, 8_500, LAUNCH + MONTH_SECS + 1)
            .unwrap();
        assert_eq!(supply.monthly_burned, 100);
        assert_eq!(supply.burn_history().len(), 3);
    }

    #[test]
    fn test_burn_exceeding_supply_rejected() {
        let mut supply = SupplyTracker::new(LAUNCH);

        let err = supply
            .record_burn(10_001, RevenueSource::JobFees, 1.0, 10_000, LAUNCH)
            .unwrap_err();
        assert_eq!(
            err,
            EconomicsError::InsufficientSupply {
                requested: 10_001,
                supply: 10_000
            }
        );
        assert!(supply.burn_history().is_empty());
    }
}
