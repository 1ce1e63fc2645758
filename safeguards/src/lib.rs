//! GRID Token Anti-Abuse Safeguards
//!
//! Three independent gates evaluated before the operations they protect:
//! - rolling-window transfer rate limiting (advisory by default)
//! - mandatory two-phase delayed execution for large transfers
//! - a monthly cap on governance-driven inflation-rate adjustments
//!
//! plus the emergency council's contract-wide pause switch that
//! short-circuits all of the above.

pub mod council;
pub mod error;
pub mod inflation_limit;
pub mod large_transfer;
pub mod rate_limit;

pub use council::EmergencyCouncil;
pub use error::{Result, SafeguardError};
pub use inflation_limit::{AdjustmentWindowStatus, InflationAdjustmentLimiter};
pub use large_transfer::{LargeTransferQueue, PendingLargeTransfer, PendingTransferStatus};
pub use rate_limit::{RateLimitStatus, TransferRateLimiter};

/// Safeguard configuration constants
pub mod config {
    use grid_core::COIN;

    /// Transfer rate-limit window (24 hours).
    pub const RATE_LIMIT_WINDOW_SECS: u64 = 86_400;

    /// Default per-account transfer volume allowed per window.
    pub const DEFAULT_RATE_LIMIT_MAX: u64 = 100_000 * COIN;

    /// Default threshold above which transfers must be two-phase.
    pub const DEFAULT_LARGE_TRANSFER_THRESHOLD: u64 = 100_000 * COIN;

    /// Default delay before a large transfer may be executed (48 hours).
    pub const DEFAULT_LARGE_TRANSFER_DELAY_SECS: u64 = 2 * 86_400;

    /// Rolling window for inflation-rate adjustments (30 days).
    pub const INFLATION_ADJUSTMENT_WINDOW_SECS: u64 = 30 * 86_400;

    /// Maximum inflation-rate adjustments per window.
    pub const MAX_INFLATION_ADJUSTMENTS_PER_MONTH: u64 = 2;
}
