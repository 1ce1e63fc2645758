//! Per-account transfer rate limiting
//!
//! Each account has a fixed 24-hour rolling window. Usage accumulates inside
//! the window and resets when a transfer arrives at or after
//! `window_start + window`. The check is a separate advisory query; whether
//! an over-limit transfer is actually rejected is the caller's policy
//! (`TokenConfig::enforce_transfer_rate_limit`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use grid_core::Address;

use crate::config::{DEFAULT_RATE_LIMIT_MAX, RATE_LIMIT_WINDOW_SECS};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub window_start: u64,
    pub usage_in_window: u64,
}

/// Result of an advisory rate-limit check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub allowed: bool,
    pub usage_in_window: u64,
    pub remaining: u64,
    pub window_resets_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRateLimiter {
    windows: HashMap<Address, RateLimitWindow>,
    window_secs: u64,
    max_per_window: u64,
}

impl Default for TransferRateLimiter {
    fn default() -> Self {
        Self::new(RATE_LIMIT_WINDOW_SECS, DEFAULT_RATE_LIMIT_MAX)
    }
}

impl TransferRateLimiter {
    pub fn new(window_secs: u64, max_per_window: u64) -> Self {
        Self {
            windows: HashMap::new(),
            window_secs,
            max_per_window,
        }
    }

    fn effective_usage(&self, account: &str, now: u64) -> (u64, u64) {
        match self.windows.get(account) {
            Some(w) if now < w.window_start + self.window_secs => {
                (w.usage_in_window, w.window_start + self.window_secs)
            }
            // Expired or absent window: usage counts from scratch
            _ => (0, now + self.window_secs),
        }
    }

    /// Advisory check: would transferring `amount` stay within the window cap?
    pub fn check(&self, account: &str, amount: u64, now: u64) -> RateLimitStatus {
        let (usage, resets_at) = self.effective_usage(account, now);
        let projected = usage.saturating_add(amount);
        RateLimitStatus {
            allowed: projected <= self.max_per_window,
            usage_in_window: usage,
            remaining: self.max_per_window.saturating_sub(usage),
            window_resets_at: resets_at,
        }
    }

    /// Record `amount` against the account's window, resetting the window if
    /// it has elapsed.
    pub fn record(&mut self, account: &str, amount: u64, now: u64) {
        let window = self.windows.entry(account.to_string()).or_default();
        if window.window_start == 0 || now >= window.window_start + self.window_secs {
            window.window_start = now;
            window.usage_in_window = amount;
        } else {
            window.usage_in_window = window.usage_in_window.saturating_add(amount);
        }
    }

    pub fn usage(&self, account: &str, now: u64) -> u64 {
        self.effective_usage(account, now).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_usage_accumulates_within_window() {
        let mut limiter = TransferRateLimiter::new(86_400, 1_000);

        limiter.record("alice", 300, NOW);
        limiter.record("alice", 200, NOW + 100);
        assert_eq!(limiter.usage("alice", NOW + 200), 500);

        let status = limiter.check("alice", 400, NOW + 200);
        assert!(status.allowed);
        assert_eq!(status.remaining, 500);

        let status = limiter.check("alice", 501, NOW + 200);
        assert!(!status.allowed);
    }

    #[test]
    fn test_window_resets_after_duration() {
        let mut limiter = TransferRateLimiter::new(86_400, 1_000);

        limiter.record("alice", 900, NOW);
        assert_eq!(limiter.usage("alice", NOW), 900);

        // A full window later, usage starts over at the new amount
        limiter.record("alice", 250, NOW + 86_400);
        assert_eq!(limiter.usage("alice", NOW + 86_400), 250);
    }

    #[test]
    fn test_expired_window_reads_as_empty() {
        let mut limiter = TransferRateLimiter::new(86_400, 1_000);
        limiter.record("alice", 999, NOW);

        // Check past the window without recording: usage reads zero
        let status = limiter.check("alice", 1_000, NOW + 86_400 + 1);
        assert!(status.allowed);
        assert_eq!(status.usage_in_window, 0);
    }

    #[test]
    fn test_accounts_are_independent() {
        let mut limiter = TransferRateLimiter::new(86_400, 1_000);
        limiter.record("alice", 1_000, NOW);

        let status = limiter.check("bob", 1_000, NOW);
        assert!(status.allowed);
    }
}
