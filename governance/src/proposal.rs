//! Proposal lifecycle management
//!
//! Proposals move `Active -> {Executed | Cancelled | Expired}`; `Active` is
//! the only non-terminal state. Creation is gated by a per-account cooldown,
//! a concurrent-proposal cap and a voting-power threshold per proposal type.
//! Quorum is snapshotted from total supply at creation time; voting power is
//! evaluated at vote time, not snapshotted.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use grid_core::Address;

use crate::config::*;
use crate::error::{GovernanceError, Result};
use crate::pause::GovernancePause;

/// Proposal severity classes, in increasing order of required voting power.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProposalType {
    Minor,
    Major,
    Protocol,
    Emergency,
    Strategic,
}

impl ProposalType {
    /// Voting power required to create a proposal of this type.
    pub fn creation_threshold(&self) -> u64 {
        match self {
            ProposalType::Minor => MINOR_PROPOSAL_THRESHOLD,
            ProposalType::Major => MAJOR_PROPOSAL_THRESHOLD,
            ProposalType::Protocol => PROTOCOL_PROPOSAL_THRESHOLD,
            ProposalType::Emergency => EMERGENCY_PROPOSAL_THRESHOLD,
            ProposalType::Strategic => STRATEGIC_PROPOSAL_THRESHOLD,
        }
    }

    /// Approval percentage required for execution. Protocol-level and above
    /// need a supermajority.
    pub fn majority_requirement_percent(&self) -> u64 {
        match self {
            ProposalType::Minor | ProposalType::Major => SIMPLE_MAJORITY_PERCENT,
            ProposalType::Protocol | ProposalType::Emergency | ProposalType::Strategic => {
                SUPERMAJORITY_PERCENT
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProposalStatus {
    Active,
    Executed,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub proposal_type: ProposalType,
    pub description: String,
    /// Signed basis-point delta to the inflation rate, applied after execution.
    pub inflation_change_bp: i64,
    /// Signed basis-point delta to the burn rate, applied after execution.
    pub burn_rate_change_bp: i64,
    pub voting_start: u64,
    pub voting_end: u64,
    pub execution_deadline: u64,
    pub votes_for: u64,
    pub votes_against: u64,
    /// Snapshotted at creation from total supply.
    pub quorum_threshold: u64,
    pub status: ProposalStatus,
    pub created_at: u64,
    pub executed_at: Option<u64>,
}

impl Proposal {
    pub fn total_votes(&self) -> u64 {
        self.votes_for + self.votes_against
    }

    pub fn approval_percent(&self) -> u64 {
        let total = self.total_votes();
        if total == 0 {
            return 0;
        }
        (self.votes_for as u128 * 100 / total as u128) as u64
    }
}

/// All governance state: proposals, vote bookkeeping, per-account limits and
/// the governance pause switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceState {
    proposals: HashMap<u64, Proposal>,
    voted: HashSet<(u64, Address)>,
    last_proposal_time: HashMap<Address, u64>,
    active_proposal_count: HashMap<Address, u64>,
    next_proposal_id: u64,
    pub pause: GovernancePause,
}

impl Default for GovernanceState {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernanceState {
    pub fn new() -> Self {
        Self {
            proposals: HashMap::new(),
            voted: HashSet::new(),
            last_proposal_time: HashMap::new(),
            active_proposal_count: HashMap::new(),
            next_proposal_id: 1,
            pause: GovernancePause::new(),
        }
    }

    pub fn proposal(&self, id: u64) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn proposal_count(&self) -> u64 {
        self.next_proposal_id - 1
    }

    pub fn has_voted(&self, id: u64, voter: &str) -> bool {
        self.voted.contains(&(id, voter.to_string()))
    }

    pub fn active_proposals_of(&self, proposer: &str) -> u64 {
        self.active_proposal_count
            .get(proposer)
            .copied()
            .unwrap_or(0)
    }

    /// Create a proposal. `voting_power` is the proposer's current power and
    /// `total_supply` is used to snapshot the quorum threshold.
    #[allow(clippy::too_many_arguments)]
    pub fn create_proposal(
        &mut self,
        proposer: &str,
        description: String,
        proposal_type: ProposalType,
        inflation_change_bp: i64,
        burn_rate_change_bp: i64,
        voting_power: u64,
        total_supply: u64,
        now: u64,
    ) -> Result<u64> {
        self.pause.ensure_active(now)?;

        let required = proposal_type.creation_threshold();
        if voting_power < required {
            return Err(GovernanceError::InsufficientVotingPower {
                required,
                available: voting_power,
            });
        }

        if let Some(&last) = self.last_proposal_time.get(proposer) {
            if now < last + PROPOSAL_COOLDOWN_SECS {
                return Err(GovernanceError::ProposalCooldownActive {
                    next_available: last + PROPOSAL_COOLDOWN_SECS,
                });
            }
        }

        if self.active_proposals_of(proposer) >= MAX_ACTIVE_PROPOSALS {
            return Err(GovernanceError::TooManyActiveProposals {
                max: MAX_ACTIVE_PROPOSALS,
            });
        }

        let id = self.next_proposal_id;
        let voting_end = now + VOTING_PERIOD_SECS;
        let proposal = Proposal {
            id,
            proposer: proposer.to_string(),
            proposal_type,
            description,
            inflation_change_bp,
            burn_rate_change_bp,
            voting_start: now,
            voting_end,
            execution_deadline: voting_end + EXECUTION_GRACE_SECS,
            votes_for: 0,
            votes_against: 0,
            quorum_threshold: (total_supply as u128 * QUORUM_BP as u128 / 10_000) as u64,
            status: ProposalStatus::Active,
            created_at: now,
            executed_at: None,
        };

        self.proposals.insert(id, proposal);
        self.next_proposal_id += 1;
        self.last_proposal_time.insert(proposer.to_string(), now);
        *self
            .active_proposal_count
            .entry(proposer.to_string())
            .or_insert(0) += 1;
        Ok(id)
    }

    /// Cast a vote of `amount` (at most the voter's current voting power).
    pub fn cast_vote(
        &mut self,
        id: u64,
        voter: &str,
        support: bool,
        amount: u64,
        voting_power: u64,
        now: u64,
    ) -> Result<()> {
        self.pause.ensure_active(now)?;

        if amount == 0 {
            return Err(GovernanceError::ZeroVote);
        }
        if amount > voting_power {
            return Err(GovernanceError::VoteExceedsPower {
                requested: amount,
                available: voting_power,
            });
        }

        let key = (id, voter.to_string());
        if self.voted.contains(&key) {
            return Err(GovernanceError::AlreadyVoted);
        }

        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if proposal.status != ProposalStatus::Active {
            return Err(GovernanceError::ProposalNotActive(proposal.status));
        }
        if now > proposal.voting_end {
            return Err(GovernanceError::VotingClosed {
                ended_at: proposal.voting_end,
            });
        }

        if support {
            proposal.votes_for = proposal
                .votes_for
                .checked_add(amount)
                .ok_or(GovernanceError::TallyOverflow)?;
        } else {
            proposal.votes_against = proposal
                .votes_against
                .checked_add(amount)
                .ok_or(GovernanceError::TallyOverflow)?;
        }
        self.voted.insert(key);
        Ok(())
    }

    /// Execute a passed proposal. Returns the approved rate deltas; applying
    /// them to the supply engine is the caller's follow-on action.
    pub fn execute_proposal(&mut self, id: u64, now: u64) -> Result<(i64, i64)> {
        self.pause.ensure_active(now)?;

        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;

        match proposal.status {
            ProposalStatus::Active => {}
            ProposalStatus::Executed => return Err(GovernanceError::AlreadyExecuted),
            status => return Err(GovernanceError::ProposalNotActive(status)),
        }
        if now <= proposal.voting_end {
            return Err(GovernanceError::VotingStillOpen {
                ends_at: proposal.voting_end,
            });
        }
        if now > proposal.execution_deadline {
            return Err(GovernanceError::ExecutionWindowPassed {
                deadline: proposal.execution_deadline,
            });
        }

        let total_votes = proposal.total_votes();
        if total_votes < proposal.quorum_threshold {
            return Err(GovernanceError::QuorumNotReached {
                votes: total_votes,
                required: proposal.quorum_threshold,
            });
        }

        let required_percent = proposal.proposal_type.majority_requirement_percent();
        let approval_percent = proposal.approval_percent();
        if approval_percent < required_percent {
            return Err(GovernanceError::ApprovalThresholdNotMet {
                approval_percent,
                required_percent,
            });
        }

        proposal.status = ProposalStatus::Executed;
        proposal.executed_at = Some(now);
        let deltas = (proposal.inflation_change_bp, proposal.burn_rate_change_bp);
        let proposer = proposal.proposer.clone();
        self.release_active_slot(&proposer);
        Ok(deltas)
    }

    /// Cancel an active proposal before any vote has been cast. Proposer only.
    pub fn cancel_proposal(&mut self, id: u64, caller: &str) -> Result<()> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;

        if proposal.proposer != caller {
            return Err(GovernanceError::Unauthorized(
                "only the proposer may cancel".to_string(),
            ));
        }
        if proposal.status != ProposalStatus::Active {
            return Err(GovernanceError::ProposalNotActive(proposal.status));
        }
        if proposal.total_votes() > 0 {
            return Err(GovernanceError::VotesAlreadyCast);
        }

        proposal.status = ProposalStatus::Cancelled;
        let proposer = proposal.proposer.clone();
        self.release_active_slot(&proposer);
        Ok(())
    }

    /// Mark an active proposal whose execution deadline has passed as expired,
    /// freeing the proposer's active slot. Callable by anyone.
    pub fn expire_proposal(&mut self, id: u64, now: u64) -> Result<()> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;

        if proposal.status != ProposalStatus::Active {
            return Err(GovernanceError::ProposalNotActive(proposal.status));
        }
        if now <= proposal.execution_deadline {
            return Err(GovernanceError::NotExpired);
        }

        proposal.status = ProposalStatus::Expired;
        let proposer = proposal.proposer.clone();
        self.release_active_slot(&proposer);
        Ok(())
    }

    fn release_active_slot(&mut self, proposer: &str) {
        if let Some(count) = self.active_proposal_count.get_mut(proposer) {
            *count = count.saturating_sub(1);
        }
    }
}
