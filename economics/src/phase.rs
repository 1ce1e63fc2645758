//! Time & phase oracle
//!
//! Derives the network phase and elapsed months/years from the stored launch
//! timestamp and the caller-supplied current time. Pure functions; the launch
//! timestamp itself lives in [`crate::SupplyTracker`].

use serde::{Deserialize, Serialize};

use crate::constants::{MONTH_SECS, YEAR_SECS};

/// Network maturity phase, derived from months since launch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetworkPhase {
    /// First 12 months.
    Launch,
    /// Months 13-36.
    Growth,
    /// Months 37-60.
    Expansion,
    /// Beyond month 60.
    Mature,
}

impl NetworkPhase {
    pub fn from_months(months: u64) -> Self {
        match months {
            m if m <= 12 => NetworkPhase::Launch,
            m if m <= 36 => NetworkPhase::Growth,
            m if m <= 60 => NetworkPhase::Expansion,
            _ => NetworkPhase::Mature,
        }
    }
}

/// Whole 30-day months elapsed between `launch` and `now`.
pub fn months_since(launch: u64, now: u64) -> u64 {
    now.saturating_sub(launch) / MONTH_SECS
}

/// Whole 365-day years elapsed between `launch` and `now`.
pub fn years_since(launch: u64, now: u64) -> u64 {
    now.saturating_sub(launch) / YEAR_SECS
}
