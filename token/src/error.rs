//! Token facade error type
//!
//! Wraps the member-crate errors and adds the failures only the facade can
//! detect (authorization, batch shape, adjustment bookkeeping).

use thiserror::Error;

use grid_core::LedgerError;
use grid_economics::EconomicsError;
use grid_governance::GovernanceError;
use grid_safeguards::SafeguardError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Economics(#[from] EconomicsError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Safeguard(#[from] SafeguardError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Batch transfer is empty")]
    EmptyBatch,

    #[error("Batch transfer too large: {count} recipients, max {max}")]
    BatchTooLarge { count: usize, max: usize },

    #[error("Proposal {0} has no pending rate adjustment")]
    NoPendingAdjustment(u64),
}

pub type Result<T> = std::result::Result<T, TokenError>;
