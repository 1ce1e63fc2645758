//! Emergency governance pause
//!
//! Blocks proposal creation, voting and execution while active. Token
//! transfers are never affected by this switch; the contract-wide pause in
//! the safeguards crate handles those. A cooldown between pauses prevents a
//! council member from keeping governance frozen indefinitely through
//! repeated short pauses.

use serde::{Deserialize, Serialize};

use crate::config::PAUSE_COOLDOWN_SECS;
use crate::error::{GovernanceError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GovernancePause {
    paused: bool,
    pause_ends: u64,
    pause_count: u64,
    last_pause_time: u64,
}

impl GovernancePause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self, now: u64) -> bool {
        self.paused && now < self.pause_ends
    }

    pub fn pause_ends(&self) -> u64 {
        self.pause_ends
    }

    pub fn pause_count(&self) -> u64 {
        self.pause_count
    }

    /// Fail fast if governance is currently paused.
    pub fn ensure_active(&self, now: u64) -> Result<()> {
        if self.is_paused(now) {
            return Err(GovernanceError::GovernancePaused {
                until: self.pause_ends,
            });
        }
        Ok(())
    }

    pub fn pause(&mut self, duration_secs: u64, now: u64) -> Result<()> {
        if self.is_paused(now) {
            return Err(GovernanceError::AlreadyPaused);
        }
        if self.pause_count > 0 && now < self.last_pause_time + PAUSE_COOLDOWN_SECS {
            return Err(GovernanceError::PauseCooldownActive {
                next_available: self.last_pause_time + PAUSE_COOLDOWN_SECS,
            });
        }
        self.paused = true;
        self.pause_ends = now + duration_secs;
        self.pause_count += 1;
        self.last_pause_time = now;
        Ok(())
    }

    pub fn resume(&mut self, now: u64) -> Result<()> {
        if !self.is_paused(now) {
            return Err(GovernanceError::NotPaused);
        }
        self.paused = false;
        self.pause_ends = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_and_resume() {
        let mut pause = GovernancePause::new();
        assert!(!pause.is_paused(1_000));

        pause.pause(3_600, 1_000).unwrap();
        assert!(pause.is_paused(1_001));
        assert!(pause.ensure_active(1_001).is_err());

        pause.resume(2_000).unwrap();
        assert!(!pause.is_paused(2_001));
    }

    #[test]
    fn test_pause_expires_by_itself() {
        let mut pause = GovernancePause::new();
        pause.pause(3_600, 1_000).unwrap();

        assert!(pause.is_paused(4_599));
        assert!(!pause.is_paused(4_600));
        assert!(pause.ensure_active(4_600).is_ok());
    }

    #[test]
    fn test_pause_cooldown() {
        let mut pause = GovernancePause::new();
        pause.pause(100, 1_000).unwrap();
        pause.resume(1_200).unwrap();

        // Second pause within 24h of the first is rejected
        let err = pause.pause(100, 2_000).unwrap_err();
        assert_eq!(
            err,
            GovernanceError::PauseCooldownActive {
                next_available: 1_000 + PAUSE_COOLDOWN_SECS
            }
        );

        pause.pause(100, 1_000 + PAUSE_COOLDOWN_SECS).unwrap();
        assert_eq!(pause.pause_count(), 2);
    }

    #[test]
    fn test_resume_when_not_paused() {
        let mut pause = GovernancePause::new();
        assert_eq!(pause.resume(1_000).unwrap_err(), GovernanceError::NotPaused);
    }
}
