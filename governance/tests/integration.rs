use grid_core::COIN;
use grid_governance::*;

const NOW: u64 = 1_700_000_000;
const DAY: u64 = 86_400;
const SUPPLY: u64 = 10_000_000 * COIN;

#[test]
fn test_holding_tiers_and_multipliers() {
    assert_eq!(HoldingTier::from_holding(0, NOW), HoldingTier::Basic);
    assert_eq!(
        HoldingTier::from_holding(NOW - config::LONG_TERM_THRESHOLD_SECS, NOW),
        HoldingTier::LongTerm
    );
    assert_eq!(
        HoldingTier::from_holding(NOW - config::VETERAN_THRESHOLD_SECS, NOW),
        HoldingTier::Veteran
    );

    assert_eq!(HoldingTier::Basic.multiplier(), 100);
    assert_eq!(HoldingTier::LongTerm.multiplier(), 120);
    assert_eq!(HoldingTier::Veteran.multiplier(), 150);
}

#[test]
fn test_proposal_type_ladder() {
    assert!(ProposalType::Minor < ProposalType::Strategic);
    assert!(
        ProposalType::Minor.creation_threshold() < ProposalType::Major.creation_threshold()
    );
    assert!(
        ProposalType::Major.creation_threshold() < ProposalType::Protocol.creation_threshold()
    );
    assert!(
        ProposalType::Protocol.creation_threshold()
            < ProposalType::Emergency.creation_threshold()
    );
    assert!(
        ProposalType::Emergency.creation_threshold()
            < ProposalType::Strategic.creation_threshold()
    );

    // Severity rank 2 and above requires a supermajority
    assert_eq!(ProposalType::Major.majority_requirement_percent(), 51);
    assert_eq!(ProposalType::Protocol.majority_requirement_percent(), 70);
    assert_eq!(ProposalType::Strategic.majority_requirement_percent(), 70);
}

#[test]
fn test_contested_proposal_end_to_end() {
    let mut gov = GovernanceState::new();
    let quorum = SUPPLY * config::QUORUM_BP / 10_000;

    let id = gov
        .create_proposal(
            "founder",
            "raise burn rate during growth phase".to_string(),
            ProposalType::Major,
            0,
            300,
            config::MAJOR_PROPOSAL_THRESHOLD,
            SUPPLY,
            NOW,
        )
        .unwrap();

    // Contested vote that still clears quorum and a simple majority
    gov.cast_vote(id, "founder", true, quorum, quorum, NOW + DAY)
        .unwrap();
    gov.cast_vote(id, "skeptic", false, quorum / 2, quorum, NOW + 2 * DAY)
        .unwrap();

    let proposal = gov.proposal(id).unwrap();
    assert_eq!(proposal.total_votes(), quorum + quorum / 2);
    assert_eq!(proposal.approval_percent(), 66);

    let deltas = gov
        .execute_proposal(id, NOW + config::VOTING_PERIOD_SECS + 1)
        .unwrap();
    assert_eq!(deltas, (0, 300));
    assert_eq!(gov.proposal(id).unwrap().status, ProposalStatus::Executed);
}

#[test]
fn test_abandoned_proposal_expires() {
    let mut gov = GovernanceState::new();

    let id = gov
        .create_proposal(
            "founder",
            "never voted on".to_string(),
            ProposalType::Minor,
            0,
            0,
            config::MINOR_PROPOSAL_THRESHOLD,
            SUPPLY,
            NOW,
        )
        .unwrap();

    let past_deadline = NOW + config::VOTING_PERIOD_SECS + config::EXECUTION_GRACE_SECS + 1;
    assert!(gov.execute_proposal(id, past_deadline).is_err());

    gov.expire_proposal(id, past_deadline).unwrap();
    assert_eq!(gov.proposal(id).unwrap().status, ProposalStatus::Expired);

    // The freed slot lets the proposer start over
    assert_eq!(gov.active_proposals_of("founder"), 0);
}
