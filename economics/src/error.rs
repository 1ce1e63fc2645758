//! Economics error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EconomicsError {
    #[error("Insufficient supply: requested {requested}, total supply {supply}")]
    InsufficientSupply { requested: u64, supply: u64 },

    #[error("Mint cap exceeded: requested {requested}, remaining in window {remaining}")]
    MintCapExceeded { requested: u64, remaining: u64 },

    #[error("Zero amount")]
    ZeroAmount,

    #[error("Amount overflow")]
    AmountOverflow,
}

pub type Result<T> = std::result::Result<T, EconomicsError>;
