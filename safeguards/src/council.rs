//! Emergency council and contract-wide pause
//!
//! The council is a distinguished set of accounts, separate from governance,
//! that can pause the whole contract (blocking transfers and ordinary mints)
//! and perform emergency mints/withdrawals. Every emergency action is
//! append-only-logged by the audit crate.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use grid_core::Address;

use crate::error::{Result, SafeguardError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmergencyCouncil {
    members: HashSet<Address>,
    paused: bool,
    pause_count: u64,
}

impl EmergencyCouncil {
    pub fn new(members: impl IntoIterator<Item = Address>) -> Self {
        Self {
            members: members.into_iter().collect(),
            paused: false,
            pause_count: 0,
        }
    }

    pub fn is_member(&self, account: &str) -> bool {
        self.members.contains(account)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause_count(&self) -> u64 {
        self.pause_count
    }

    pub fn ensure_member(&self, account: &str) -> Result<()> {
        if !self.is_member(account) {
            return Err(SafeguardError::NotCouncilMember);
        }
        Ok(())
    }

    /// Fail fast if the contract is paused.
    pub fn ensure_not_paused(&self) -> Result<()> {
        if self.paused {
            return Err(SafeguardError::ContractPaused);
        }
        Ok(())
    }

    pub fn pause(&mut self, caller: &str) -> Result<()> {
        self.ensure_member(caller)?;
        if self.paused {
            return Err(SafeguardError::ContractPaused);
        }
        self.paused = true;
        self.pause_count += 1;
        Ok(())
    }

    pub fn unpause(&mut self, caller: &str) -> Result<()> {
        self.ensure_member(caller)?;
        if !self.paused {
            return Err(SafeguardError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn council() -> EmergencyCouncil {
        EmergencyCouncil::new(["carol".to_string(), "dave".to_string()])
    }

    #[test]
    fn test_membership_gate() {
        let mut c = council();
        assert_eq!(
            c.pause("mallory").unwrap_err(),
            SafeguardError::NotCouncilMember
        );
        c.pause("carol").unwrap();
    }

    #[test]
    fn test_pause_unpause_cycle() {
        let mut c = council();
        assert!(c.ensure_not_paused().is_ok());

        c.pause("carol").unwrap();
        assert_eq!(c.ensure_not_paused().unwrap_err(), SafeguardError::ContractPaused);
        assert_eq!(c.pause("dave").unwrap_err(), SafeguardError::ContractPaused);

        c.unpause("dave").unwrap();
        assert!(c.ensure_not_paused().is_ok());
        assert_eq!(c.unpause("dave").unwrap_err(), SafeguardError::NotPaused);
        assert_eq!(c.pause_count(), 1);
    }
}
