//! Two-phase large-transfer escrow
//!
//! Transfers at or above the configured threshold are split into an
//! initiation that debits the sender immediately (the funds sit in escrow,
//! outside any balance) and an execution, callable by anyone once the delay
//! has elapsed, that credits the recipient. Records are tri-state so the
//! escrow state machine stays auditable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use grid_core::Address;

use crate::config::{DEFAULT_LARGE_TRANSFER_DELAY_SECS, DEFAULT_LARGE_TRANSFER_THRESHOLD};
use crate::error::{Result, SafeguardError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PendingTransferStatus {
    Pending,
    Executed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLargeTransfer {
    pub id: u64,
    pub from: Address,
    pub to: Address,
    pub amount: u64,
    pub initiated_at: u64,
    pub execute_after: u64,
    pub status: PendingTransferStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeTransferQueue {
    transfers: HashMap<u64, PendingLargeTransfer>,
    next_id: u64,
    threshold: u64,
    delay_secs: u64,
}

impl Default for LargeTransferQueue {
    fn default() -> Self {
        Self::new(
            DEFAULT_LARGE_TRANSFER_THRESHOLD,
            DEFAULT_LARGE_TRANSFER_DELAY_SECS,
        )
    }
}

impl LargeTransferQueue {
    pub fn new(threshold: u64, delay_secs: u64) -> Self {
        Self {
            transfers: HashMap::new(),
            next_id: 1,
            threshold,
            delay_secs,
        }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn get(&self, id: u64) -> Option<&PendingLargeTransfer> {
        self.transfers.get(&id)
    }

    /// Fail if `amount` must go through the two-phase path instead of an
    /// ordinary transfer.
    pub fn ensure_below_threshold(&self, amount: u64) -> Result<()> {
        if amount >= self.threshold {
            return Err(SafeguardError::UseInitiateLargeTransfer {
                amount,
                threshold: self.threshold,
            });
        }
        Ok(())
    }

    /// Record a new pending transfer. The caller debits the sender in the
    /// same atomic operation.
    pub fn initiate(&mut self, from: &str, to: &str, amount: u64, now: u64) -> Result<u64> {
        if amount == 0 {
            return Err(SafeguardError::ZeroAmount);
        }
        if amount < self.threshold {
            return Err(SafeguardError::BelowLargeTransferThreshold {
                amount,
                threshold: self.threshold,
            });
        }
        let id = self.next_id;
        self.transfers.insert(
            id,
            PendingLargeTransfer {
                id,
                from: from.to_string(),
                to: to.to_string(),
                amount,
                initiated_at: now,
                execute_after: now + self.delay_secs,
                status: PendingTransferStatus::Pending,
            },
        );
        self.next_id += 1;
        Ok(id)
    }

    /// Mark a pending transfer executed once its delay has elapsed. Returns
    /// the record so the caller can credit the recipient.
    pub fn execute(&mut self, id: u64, now: u64) -> Result<PendingLargeTransfer> {
        let transfer = self
            .transfers
            .get_mut(&id)
            .ok_or(SafeguardError::TransferNotFound(id))?;

        match transfer.status {
            PendingTransferStatus::Pending => {}
            PendingTransferStatus::Executed => return Err(SafeguardError::AlreadyExecuted),
            PendingTransferStatus::Cancelled => return Err(SafeguardError::AlreadyCancelled),
        }
        if now < transfer.execute_after {
            return Err(SafeguardError::TimelockActive {
                execute_after: transfer.execute_after,
            });
        }

        transfer.status = PendingTransferStatus::Executed;
        Ok(transfer.clone())
    }

    /// Cancel a pending transfer; only the sender may cancel, and only before
    /// execution. Returns the record so the caller can refund the escrow.
    pub fn cancel(&mut self, id: u64, caller: &str) -> Result<PendingLargeTransfer> {
        let transfer = self
            .transfers
            .get_mut(&id)
            .ok_or(SafeguardError::TransferNotFound(id))?;

        if transfer.from != caller {
            return Err(SafeguardError::NotTransferSender);
        }
        match transfer.status {
            PendingTransferStatus::Pending => {}
            PendingTransferStatus::Executed => return Err(SafeguardError::AlreadyExecuted),
            PendingTransferStatus::Cancelled => return Err(SafeguardError::AlreadyCancelled),
        }

        transfer.status = PendingTransferStatus::Cancelled;
        Ok(transfer.clone())
    }

    /// Total escrowed amount across all still-pending transfers. Used by the
    /// conservation check: supply == balances + this.
    pub fn pending_total(&self) -> u64 {
        self.transfers
            .values()
            .filter(|t| t.status == PendingTransferStatus::Pending)
            .map(|t| t.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn queue() -> LargeTransferQueue {
        LargeTransferQueue::new(1_000, 3_600)
    }

    #[test]
    fn test_threshold_gate() {
        let q = queue();
        assert!(q.ensure_below_threshold(999).is_ok());
        assert_eq!(
            q.ensure_below_threshold(1_000).unwrap_err(),
            SafeguardError::UseInitiateLargeTransfer {
                amount: 1_000,
                threshold: 1_000
            }
        );
    }

    #[test]
    fn test_initiate_requires_threshold() {
        let mut q = queue();
        assert_eq!(
            q.initiate("alice", "bob", 999, NOW).unwrap_err(),
            SafeguardError::BelowLargeTransferThreshold {
                amount: 999,
                threshold: 1_000
            }
        );
        let id = q.initiate("alice", "bob", 1_000, NOW).unwrap();
        assert_eq!(id, 1);
        assert_eq!(q.pending_total(), 1_000);
    }

    #[test]
    fn test_timelock_then_execute_once() {
        let mut q = queue();
        let id = q.initiate("alice", "bob", 5_000, NOW).unwrap();

        let err = q.execute(id, NOW + 3_599).unwrap_err();
        assert_eq!(
            err,
            SafeguardError::TimelockActive {
                execute_after: NOW + 3_600
            }
        );

        let record = q.execute(id, NOW + 3_600).unwrap();
        assert_eq!(record.amount, 5_000);
        assert_eq!(record.to, "bob");
        assert_eq!(q.pending_total(), 0);

        // Idempotence: second execution fails
        assert_eq!(
            q.execute(id, NOW + 3_601).unwrap_err(),
            SafeguardError::AlreadyExecuted
        );
    }

    #[test]
    fn test_cancel_by_sender_only() {
        let mut q = queue();
        let id = q.initiate("alice", "bob", 2_000, NOW).unwrap();

        assert_eq!(
            q.cancel(id, "bob").unwrap_err(),
            SafeguardError::NotTransferSender
        );

        let record = q.cancel(id, "alice").unwrap();
        assert_eq!(record.status, PendingTransferStatus::Cancelled);
        assert_eq!(q.pending_total(), 0);

        assert_eq!(
            q.execute(id, NOW + 3_600).unwrap_err(),
            SafeguardError::AlreadyCancelled
        );
    }

    #[test]
    fn test_unknown_id() {
        let mut q = queue();
        assert_eq!(
            q.execute(42, NOW).unwrap_err(),
            SafeguardError::TransferNotFound(42)
        );
    }
}
