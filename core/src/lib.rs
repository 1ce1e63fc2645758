//! GRID Token Core Library
//!
//! Account ledger primitives shared by the economics, governance and
//! safeguard crates: balances, allowances and the low-level transfer
//! operations every other component calls into.

pub mod error;
pub mod ledger;

pub use error::{LedgerError, Result};
pub use ledger::{AccountRecord, Ledger};

/// Account identifier on the host ledger.
pub type Address = String;

/// GRID token base unit (8 decimal places).
pub const COIN: u64 = 100_000_000;

/// The zero address; never a valid sender or recipient.
pub const ZERO_ADDRESS: &str = "";
