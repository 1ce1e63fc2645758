//! GRID Token Governance Module
//!
//! Implements the proposal lifecycle (creation, voting, quorum and
//! supermajority evaluation, execution) and the progressive voting-power
//! model that rewards long-held balances.

pub mod error;
pub mod pause;
pub mod power;
pub mod proposal;

pub use error::{GovernanceError, Result};
pub use pause::GovernancePause;
pub use power::{voting_power, HoldingTier};
pub use proposal::{GovernanceState, Proposal, ProposalStatus, ProposalType};

/// Governance configuration constants
pub mod config {
    use grid_core::COIN;

    /// Cooldown between proposals from the same account (24 hours).
    pub const PROPOSAL_COOLDOWN_SECS: u64 = 86_400;

    /// Maximum concurrently active proposals per account.
    pub const MAX_ACTIVE_PROPOSALS: u64 = 3;

    /// Voting window length (7 days).
    pub const VOTING_PERIOD_SECS: u64 = 7 * 86_400;

    /// Execution grace period after voting ends (24 hours).
    pub const EXECUTION_GRACE_SECS: u64 = 86_400;

    /// Quorum as basis points of total supply (4%).
    pub const QUORUM_BP: u64 = 400;

    /// Approval required for ordinary proposals (simple majority).
    pub const SIMPLE_MAJORITY_PERCENT: u64 = 51;

    /// Approval required for Protocol/Emergency/Strategic proposals.
    pub const SUPERMAJORITY_PERCENT: u64 = 70;

    /// Holding duration for the long-term voting tier (180 days).
    pub const LONG_TERM_THRESHOLD_SECS: u64 = 180 * 86_400;

    /// Holding duration for the veteran voting tier (365 days).
    pub const VETERAN_THRESHOLD_SECS: u64 = 365 * 86_400;

    /// Cooldown between governance pauses (24 hours).
    pub const PAUSE_COOLDOWN_SECS: u64 = 86_400;

    /// Voting power required to create each proposal type.
    pub const MINOR_PROPOSAL_THRESHOLD: u64 = 1_000 * COIN;
    pub const MAJOR_PROPOSAL_THRESHOLD: u64 = 10_000 * COIN;
    pub const PROTOCOL_PROPOSAL_THRESHOLD: u64 = 50_000 * COIN;
    pub const EMERGENCY_PROPOSAL_THRESHOLD: u64 = 100_000 * COIN;
    pub const STRATEGIC_PROPOSAL_THRESHOLD: u64 = 250_000 * COIN;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governance_constants() {
        assert_eq!(config::VOTING_PERIOD_SECS, 7 * 86_400);
        assert_eq!(config::SIMPLE_MAJORITY_PERCENT, 51);
        assert_eq!(config::SUPERMAJORITY_PERCENT, 70);
        assert!(config::VETERAN_THRESHOLD_SECS > config::LONG_TERM_THRESHOLD_SECS);
    }
}
