//! Inflation-adjustment rate limiting
//!
//! Governance may change the stored inflation/burn rates at most
//! `MAX_INFLATION_ADJUSTMENTS_PER_MONTH` times per rolling 30-day window, so
//! a burst of passed proposals cannot whipsaw the supply schedule.

use serde::{Deserialize, Serialize};

use crate::config::{INFLATION_ADJUSTMENT_WINDOW_SECS, MAX_INFLATION_ADJUSTMENTS_PER_MONTH};
use crate::error::{Result, SafeguardError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdjustmentWindowStatus {
    pub can_adjust: bool,
    pub adjustments_remaining: u64,
    /// When the window reopens; equals `now` when adjustments remain.
    pub next_available_time: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationAdjustmentLimiter {
    window_start: u64,
    adjustments_in_window: u64,
    window_secs: u64,
    max_per_window: u64,
}

impl Default for InflationAdjustmentLimiter {
    fn default() -> Self {
        Self::new(
            INFLATION_ADJUSTMENT_WINDOW_SECS,
            MAX_INFLATION_ADJUSTMENTS_PER_MONTH,
        )
    }
}

impl InflationAdjustmentLimiter {
    pub fn new(window_secs: u64, max_per_window: u64) -> Self {
        Self {
            window_start: 0,
            adjustments_in_window: 0,
            window_secs,
            max_per_window,
        }
    }

    fn in_window(&self, now: u64) -> u64 {
        if self.window_start == 0 || now >= self.window_start + self.window_secs {
            0
        } else {
            self.adjustments_in_window
        }
    }

    pub fn check(&self, now: u64) -> AdjustmentWindowStatus {
        let used = self.in_window(now);
        let remaining = self.max_per_window.saturating_sub(used);
        AdjustmentWindowStatus {
            can_adjust: remaining > 0,
            adjustments_remaining: remaining,
            next_available_time: if remaining > 0 {
                now
            } else {
                self.window_start + self.window_secs
            },
        }
    }

    /// Consume one adjustment slot, or fail if the window is exhausted.
    pub fn record(&mut self, now: u64) -> Result<()> {
        let status = self.check(now);
        if !status.can_adjust {
            return Err(SafeguardError::AdjustmentLimitReached {
                next_available: status.next_available_time,
            });
        }
        if self.in_window(now) == 0 {
            self.window_start = now;
            self.adjustments_in_window = 0;
        }
        self.adjustments_in_window += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_monthly_cap() {
        let mut limiter = InflationAdjustmentLimiter::new(30 * 86_400, 2);

        assert!(limiter.check(NOW).can_adjust);
        limiter.record(NOW).unwrap();
        limiter.record(NOW + 100).unwrap();

        let status = limiter.check(NOW + 200);
        assert!(!status.can_adjust);
        assert_eq!(status.adjustments_remaining, 0);
        assert_eq!(status.next_available_time, NOW + 30 * 86_400);

        let err = limiter.record(NOW + 200).unwrap_err();
        assert_eq!(
            err,
            SafeguardError::AdjustmentLimitReached {
                next_available: NOW + 30 * 86_400
            }
        );
    }

    #[test]
    fn test_window_rolls_over() {
        let mut limiter = InflationAdjustmentLimiter::new(30 * 86_400, 2);
        limiter.record(NOW).unwrap();
        limiter.record(NOW + 1).unwrap();

        let later = NOW + 30 * 86_400;
        let status = limiter.check(later);
        assert!(status.can_adjust);
        assert_eq!(status.adjustments_remaining, 2);
        limiter.record(later).unwrap();
    }
}
