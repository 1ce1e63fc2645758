//! Governance error types

use thiserror::Error;

use crate::proposal::ProposalStatus;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Governance is paused until {until}")]
    GovernancePaused { until: u64 },

    #[error("Governance is not paused")]
    NotPaused,

    #[error("Governance is already paused")]
    AlreadyPaused,

    #[error("Pause cooldown active: next pause available at {next_available}")]
    PauseCooldownActive { next_available: u64 },

    #[error("Insufficient voting power: required {required}, available {available}")]
    InsufficientVotingPower { required: u64, available: u64 },

    #[error("Proposal cooldown active: next proposal allowed at {next_available}")]
    ProposalCooldownActive { next_available: u64 },

    #[error("Too many active proposals: limit is {max}")]
    TooManyActiveProposals { max: u64 },

    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),

    #[error("Proposal is {0:?}, not active")]
    ProposalNotActive(ProposalStatus),

    #[error("Proposal already executed")]
    AlreadyExecuted,

    #[error("Voting closed at {ended_at}")]
    VotingClosed { ended_at: u64 },

    #[error("Voting still open until {ends_at}")]
    VotingStillOpen { ends_at: u64 },

    #[error("Execution window passed at {deadline}")]
    ExecutionWindowPassed { deadline: u64 },

    #[error("Proposal is not past its execution deadline")]
    NotExpired,

    #[error("Already voted on this proposal")]
    AlreadyVoted,

    #[error("Vote amount must be non-zero")]
    ZeroVote,

    #[error("Vote of {requested} exceeds voting power {available}")]
    VoteExceedsPower { requested: u64, available: u64 },

    #[error("Quorum not reached: {votes} of {required} required votes")]
    QuorumNotReached { votes: u64, required: u64 },

    #[error("Approval threshold not met: {approval_percent}% for, {required_percent}% required")]
    ApprovalThresholdNotMet {
        approval_percent: u64,
        required_percent: u64,
    },

    #[error("Cannot cancel a proposal that already has votes")]
    VotesAlreadyCast,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Vote tally overflow")]
    TallyOverflow,
}

pub type Result<T> = std::result::Result<T, GovernanceError>;
