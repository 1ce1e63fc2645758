//! Account ledger: balances, allowances and transfer primitives
//!
//! Every balance mutation in the system goes through this type. It also
//! maintains `token_lock_start`, the timestamp of the first moment an
//! account's balance became non-zero, which the governance crate uses to
//! compute holding tiers. The field is set exactly once per account and is
//! never reset by later transfers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{LedgerError, Result};
use crate::{Address, ZERO_ADDRESS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountRecord {
    pub balance: u64,
    pub allowances: HashMap<Address, u64>,
    /// First time the balance went from zero to non-zero; 0 = never held.
    pub token_lock_start: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    accounts: HashMap<Address, AccountRecord>,
    total_supply: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn balance_of(&self, address: &str) -> u64 {
        self.accounts
            .get(address)
            .map(|acc| acc.balance)
            .unwrap_or(0)
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> u64 {
        self.accounts
            .get(owner)
            .and_then(|acc| acc.allowances.get(spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn token_lock_start(&self, address: &str) -> u64 {
        self.accounts
            .get(address)
            .map(|acc| acc.token_lock_start)
            .unwrap_or(0)
    }

    fn require_address(address: &str) -> Result<()> {
        if address == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress);
        }
        Ok(())
    }

    /// Credit `amount` to `to`, stamping `token_lock_start` on the first
    /// zero-to-nonzero transition.
    pub fn credit(&mut self, to: &str, amount: u64, now: u64) -> Result<()> {
        Self::require_address(to)?;
        let account = self.accounts.entry(to.to_string()).or_default();
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        if account.token_lock_start == 0 && account.balance > 0 {
            account.token_lock_start = now;
        }
        Ok(())
    }

    pub fn debit(&mut self, from: &str, amount: u64) -> Result<()> {
        Self::require_address(from)?;
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        let account = self
            .accounts
            .get_mut(from)
            .expect("balance check guarantees account exists");
        account.balance -= amount;
        Ok(())
    }

    pub fn transfer(&mut self, from: &str, to: &str, amount: u64, now: u64) -> Result<()> {
        Self::require_address(from)?;
        Self::require_address(to)?;
        self.debit(from, amount)?;
        self.credit(to, amount, now)
    }

    pub fn approve(&mut self, owner: &str, spender: &str, amount: u64) -> Result<()> {
        Self::require_address(owner)?;
        Self::require_address(spender)?;
        let account = self.accounts.entry(owner.to_string()).or_default();
        account.allowances.insert(spender.to_string(), amount);
        Ok(())
    }

    pub fn increase_allowance(&mut self, owner: &str, spender: &str, added: u64) -> Result<()> {
        let current = self.allowance(owner, spender);
        let new = current.checked_add(added).ok_or(LedgerError::AmountOverflow)?;
        self.approve(owner, spender, new)
    }

    pub fn decrease_allowance(
        &mut self,
        owner: &str,
        spender: &str,
        subtracted: u64,
    ) -> Result<()> {
        let current = self.allowance(owner, spender);
        if current < subtracted {
            return Err(LedgerError::InsufficientAllowance {
                requested: subtracted,
                approved: current,
            });
        }
        self.approve(owner, spender, current - subtracted)
    }

    /// Consume `amount` of `spender`'s allowance from `owner`.
    pub fn spend_allowance(&mut self, owner: &str, spender: &str, amount: u64) -> Result<()> {
        let approved = self.allowance(owner, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                requested: amount,
                approved,
            });
        }
        if amount == 0 {
            return Ok(());
        }
        let account = self
            .accounts
            .get_mut(owner)
            .expect("non-zero allowance guarantees account exists");
        *account.allowances.get_mut(spender).unwrap() = approved - amount;
        Ok(())
    }

    /// Create new supply and credit it to `to`.
    pub fn mint_to(&mut self, to: &str, amount: u64, now: u64) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        self.credit(to, amount, now)?;
        self.total_supply = new_supply;
        Ok(())
    }

    /// Destroy `amount` from `from`'s balance and reduce total supply.
    pub fn burn_from(&mut self, from: &str, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if self.total_supply < amount {
            return Err(LedgerError::InsufficientSupply {
                requested: amount,
                supply: self.total_supply,
            });
        }
        self.debit(from, amount)?;
        self.total_supply -= amount;
        Ok(())
    }

    /// Sum of all account balances. Used by conservation checks; escrowed
    /// large-transfer amounts are intentionally not included here.
    pub fn sum_of_balances(&self) -> u64 {
        self.accounts.values().map(|acc| acc.balance).sum()
    }
}
