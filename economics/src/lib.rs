//! GRID Token Economics Module
//!
//! Implements the supply elasticity model:
//! - Network phase derived from time since launch
//! - Phase-based inflation and burn schedules
//! - Revenue-triggered burns with an append-only burn history
//! - Rolling-window mint cap tied to the current inflation rate

pub mod error;
pub mod phase;
pub mod supply;

pub use error::{EconomicsError, Result};
pub use phase::{months_since, years_since, NetworkPhase};
pub use supply::{BurnEvent, MintReason, RevenueSource, SupplyTracker};

/// Economic constants
pub mod constants {
    /// Seconds in a schedule month (30 days).
    pub const MONTH_SECS: u64 = 30 * 86_400;

    /// Seconds in a schedule year (365 days).
    pub const YEAR_SECS: u64 = 365 * 86_400;

    /// Inflation schedule in basis points, by years since launch.
    pub const INFLATION_YEARS_0_2_BP: u64 = 800;
    pub const INFLATION_YEAR_3_BP: u64 = 500;
    pub const INFLATION_YEAR_4_BP: u64 = 300;
    pub const INFLATION_MATURE_BP: u64 = 100;

    /// Burn schedule in basis points, by months since launch.
    pub const BURN_MONTHS_0_12_BP: u64 = 3_000;
    pub const BURN_MONTHS_13_36_BP: u64 = 5_000;
    pub const BURN_MONTHS_37_60_BP: u64 = 7_000;
    pub const BURN_MATURE_BP: u64 = 8_000;
}
