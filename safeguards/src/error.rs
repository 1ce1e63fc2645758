//! Safeguard error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SafeguardError {
    #[error("Contract is paused")]
    ContractPaused,

    #[error("Contract is not paused")]
    NotPaused,

    #[error("Unauthorized: caller is not an emergency council member")]
    NotCouncilMember,

    #[error("Transfer rate limit exceeded: {attempted} would exceed window cap {cap}")]
    RateLimitExceeded { attempted: u64, cap: u64 },

    #[error("Amount {amount} is at or above the large-transfer threshold {threshold}; use initiate_large_transfer")]
    UseInitiateLargeTransfer { amount: u64, threshold: u64 },

    #[error("Amount {amount} is below the large-transfer threshold {threshold}")]
    BelowLargeTransferThreshold { amount: u64, threshold: u64 },

    #[error("Pending transfer not found: {0}")]
    TransferNotFound(u64),

    #[error("Timelock active: executable at {execute_after}")]
    TimelockActive { execute_after: u64 },

    #[error("Pending transfer already executed")]
    AlreadyExecuted,

    #[error("Pending transfer already cancelled")]
    AlreadyCancelled,

    #[error("Unauthorized: only the sender may cancel a pending transfer")]
    NotTransferSender,

    #[error("Inflation adjustment limit reached: next adjustment available at {next_available}")]
    AdjustmentLimitReached { next_available: u64 },

    #[error("Zero amount")]
    ZeroAmount,
}

pub type Result<T> = std::result::Result<T, SafeguardError>;
