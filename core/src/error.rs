//! Ledger error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Zero address is not a valid account")]
    ZeroAddress,

    #[error("Zero amount")]
    ZeroAmount,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },

    #[error("Insufficient allowance: requested {requested}, approved {approved}")]
    InsufficientAllowance { requested: u64, approved: u64 },

    #[error("Insufficient supply: requested {requested}, total supply {supply}")]
    InsufficientSupply { requested: u64, supply: u64 },

    #[error("Amount overflow")]
    AmountOverflow,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
