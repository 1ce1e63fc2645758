//! GRID Token economics & governance control plane
//!
//! The facade over the member crates: one `TokenState` owns the account
//! ledger, the supply elasticity engine, the governance state, the anti-abuse
//! safeguards and the audit log, and exposes the full contract surface.
//!
//! Every state-changing entry point follows the same control flow: emergency
//! pause check, then rate-limit gate, then domain logic, then a version bump
//! and an audit-trail log line. Operations validate before they mutate, so a
//! returned error never leaves partial state behind.
//!
//! All operations take the current time as an explicit `now` argument; the
//! host supplies the clock (see [`service::GridTokenService`] for the
//! wall-clock wrapper).

pub mod config;
pub mod error;
pub mod service;

pub use config::{TokenConfig, INITIAL_CIRCULATING, MAX_BATCH_SIZE};
pub use error::{Result, TokenError};
pub use service::GridTokenService;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use grid_audit::{AuditLog, EmergencyOperation, MonitoringStatus, SecurityAudit};
use grid_core::{Address, Ledger, LedgerError, COIN, ZERO_ADDRESS};
use grid_economics::{BurnEvent, MintReason, NetworkPhase, RevenueSource, SupplyTracker};
use grid_governance::{
    voting_power, GovernanceState, HoldingTier, Proposal, ProposalType,
};
use grid_safeguards::{
    AdjustmentWindowStatus, EmergencyCouncil, InflationAdjustmentLimiter, LargeTransferQueue,
    PendingLargeTransfer, RateLimitStatus, SafeguardError, TransferRateLimiter,
};

pub const TOKEN_NAME: &str = "GRID Compute Token";
pub const TOKEN_SYMBOL: &str = "GRID";
pub const CONTRACT_VERSION: &str = "1.0.0";

/// An account's standing in governance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceRights {
    pub tier: HoldingTier,
    pub multiplier_percent: u64,
    pub voting_power: u64,
    /// Highest proposal type the account can currently create, if any.
    pub max_proposal_type: Option<ProposalType>,
}

/// Snapshot returned by `get_contract_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInfo {
    pub name: String,
    pub symbol: String,
    pub version: String,
    pub owner: Address,
    pub total_supply: u64,
    pub total_burned: u64,
    pub launch_timestamp: u64,
    pub network_phase: NetworkPhase,
    pub paused: bool,
    pub governance_paused: bool,
    pub state_version: u64,
    pub authorized_upgrade: Option<String>,
}

/// The single global state shared by every component. Constructed once at
/// deployment and mutated only through the operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenState {
    owner: Address,
    config: TokenConfig,
    ledger: Ledger,
    supply: SupplyTracker,
    governance: GovernanceState,
    rate_limits: TransferRateLimiter,
    large_transfers: LargeTransferQueue,
    inflation_limiter: InflationAdjustmentLimiter,
    council: EmergencyCouncil,
    audit_log: AuditLog,
    /// Rate deltas approved by executed proposals, awaiting application.
    pending_adjustments: HashMap<u64, (i64, i64)>,
    authorized_upgrade: Option<String>,
    state_version: u64,
}

impl TokenState {
    /// Deploy: mint the initial circulating supply to the owner and start
    /// the phase clock at `launch_timestamp`.
    pub fn new(owner: &str, launch_timestamp: u64, config: TokenConfig) -> Result<Self> {
        let mut ledger = Ledger::new();
        ledger.mint_to(owner, INITIAL_CIRCULATING, launch_timestamp)?;

        let mut state = Self {
            owner: owner.to_string(),
            rate_limits: TransferRateLimiter::new(
                config.rate_limit_window_secs,
                config.rate_limit_max_per_window,
            ),
            large_transfers: LargeTransferQueue::new(
                config.large_transfer_threshold,
                config.large_transfer_delay_secs,
            ),
            council: EmergencyCouncil::new(config.council_members.iter().cloned()),
            config,
            ledger,
            supply: SupplyTracker::new(launch_timestamp),
            governance: GovernanceState::new(),
            inflation_limiter: InflationAdjustmentLimiter::default(),
            audit_log: AuditLog::new(),
            pending_adjustments: HashMap::new(),
            authorized_upgrade: None,
            state_version: 0,
        };
        state.bump();
        info!(
            "deployed {TOKEN_SYMBOL}: owner={owner}, initial supply={}",
            INITIAL_CIRCULATING / COIN
        );
        Ok(state)
    }

    fn bump(&mut self) {
        self.state_version += 1;
    }

    fn ensure_owner(&self, caller: &str) -> Result<()> {
        if caller != self.owner {
            return Err(TokenError::Unauthorized(format!(
                "{caller} is not the contract owner"
            )));
        }
        Ok(())
    }

    fn ensure_collaborator(&self, caller: &str, expected: &str, entry_point: &str) -> Result<()> {
        if caller != expected {
            return Err(TokenError::Unauthorized(format!(
                "{caller} may not call {entry_point}"
            )));
        }
        Ok(())
    }

    /// Gate shared by ordinary transfers: pause, large-transfer threshold and
    /// the (possibly advisory) rate limit.
    fn check_transfer_gates(&self, from: &str, amount: u64, now: u64) -> Result<()> {
        self.council.ensure_not_paused()?;
        self.large_transfers.ensure_below_threshold(amount)?;
        if self.config.enforce_transfer_rate_limit {
            let status = self.rate_limits.check(from, amount, now);
            if !status.allowed {
                return Err(SafeguardError::RateLimitExceeded {
                    attempted: status.usage_in_window.saturating_add(amount),
                    cap: self.config.rate_limit_max_per_window,
                }
                .into());
            }
        }
        Ok(())
    }

    // ----- ERC20-style surface -----

    pub fn balance_of(&self, account: &str) -> u64 {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> u64 {
        self.ledger.allowance(owner, spender)
    }

    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    pub fn transfer(&mut self, caller: &str, to: &str, amount: u64, now: u64) -> Result<()> {
        self.check_transfer_gates(caller, amount, now)?;
        self.ledger.transfer(caller, to, amount, now)?;
        self.rate_limits.record(caller, amount, now);
        self.bump();
        info!("transfer: {caller} -> {to}, amount={amount}");
        Ok(())
    }

    pub fn transfer_from(
        &mut self,
        caller: &str,
        from: &str,
        to: &str,
        amount: u64,
        now: u64,
    ) -> Result<()> {
        self.check_transfer_gates(from, amount, now)?;
        // Validate both allowance and balance before touching either, so a
        // failure cannot leave the allowance spent without the transfer.
        let approved = self.ledger.allowance(from, caller);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                requested: amount,
                approved,
            }
            .into());
        }
        let available = self.ledger.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            }
            .into());
        }
        self.ledger.spend_allowance(from, caller, amount)?;
        self.ledger.transfer(from, to, amount, now)?;
        self.rate_limits.record(from, amount, now);
        self.bump();
        info!("transfer_from: {from} -> {to} by {caller}, amount={amount}");
        Ok(())
    }

    pub fn approve(&mut self, caller: &str, spender: &str, amount: u64) -> Result<()> {
        self.ledger.approve(caller, spender, amount)?;
        self.bump();
        Ok(())
    }

    pub fn increase_allowance(&mut self, caller: &str, spender: &str, added: u64) -> Result<()> {
        self.ledger.increase_allowance(caller, spender, added)?;
        self.bump();
        Ok(())
    }

    pub fn decrease_allowance(
        &mut self,
        caller: &str,
        spender: &str,
        subtracted: u64,
    ) -> Result<()> {
        self.ledger.decrease_allowance(caller, spender, subtracted)?;
        self.bump();
        Ok(())
    }

    /// Atomic multi-recipient transfer. Fully validated before the first
    /// credit; every leg must be below the large-transfer threshold.
    pub fn batch_transfer(
        &mut self,
        caller: &str,
        recipients: &[(Address, u64)],
        now: u64,
    ) -> Result<()> {
        if recipients.is_empty() {
            return Err(TokenError::EmptyBatch);
        }
        if recipients.len() > MAX_BATCH_SIZE {
            return Err(TokenError::BatchTooLarge {
                count: recipients.len(),
                max: MAX_BATCH_SIZE,
            });
        }

        let mut total: u64 = 0;
        for (to, amount) in recipients {
            if to == ZERO_ADDRESS {
                return Err(LedgerError::ZeroAddress.into());
            }
            self.large_transfers.ensure_below_threshold(*amount)?;
            total = total
                .checked_add(*amount)
                .ok_or(LedgerError::AmountOverflow)?;
        }
        self.check_transfer_gates(caller, total, now)?;
        let available = self.ledger.balance_of(caller);
        if available < total {
            return Err(LedgerError::InsufficientBalance {
                requested: total,
                available,
            }
            .into());
        }

        for (to, amount) in recipients {
            self.ledger.transfer(caller, to, *amount, now)?;
        }
        self.rate_limits.record(caller, total, now);
        self.bump();
        info!(
            "batch_transfer: {caller} -> {} recipients, total={total}",
            recipients.len()
        );
        Ok(())
    }

    // ----- Supply control -----

    /// Mint new supply. Owner, council members and the rewards distributor
    /// may mint; non-emergency mints are capped by the rolling yearly
    /// inflation allowance, emergency mints are council-only.
    pub fn mint(
        &mut self,
        caller: &str,
        to: &str,
        amount: u64,
        reason: MintReason,
        now: u64,
    ) -> Result<()> {
        self.council.ensure_not_paused()?;
        let authorized = caller == self.owner
            || self.council.is_member(caller)
            || caller == self.config.rewards_distributor;
        if !authorized {
            return Err(TokenError::Unauthorized(format!(
                "{caller} may not mint"
            )));
        }
        if reason == MintReason::Emergency {
            self.council.ensure_member(caller)?;
        }
        if to == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress.into());
        }
        if self.ledger.total_supply().checked_add(amount).is_none() {
            return Err(LedgerError::AmountOverflow.into());
        }

        self.supply
            .record_mint(amount, reason, self.ledger.total_supply(), now)?;
        self.ledger.mint_to(to, amount, now)?;
        self.bump();
        info!("mint: {amount} to {to} by {caller} ({reason:?})");
        Ok(())
    }

    /// Burn collected revenue held by the treasury.
    pub fn burn_from_revenue(
        &mut self,
        caller: &str,
        amount: u64,
        source: RevenueSource,
        token_price_usd: f64,
        now: u64,
    ) -> Result<()> {
        self.council.ensure_not_paused()?;
        if caller != self.owner && caller != self.config.job_fee_collector {
            return Err(TokenError::Unauthorized(format!(
                "{caller} may not burn revenue"
            )));
        }
        let treasury = self.config.treasury_address.clone();
        let available = self.ledger.balance_of(&treasury);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            }
            .into());
        }

        self.supply
            .record_burn(amount, source, token_price_usd, self.ledger.total_supply(), now)?;
        self.ledger.burn_from(&treasury, amount)?;
        self.bump();
        info!("burn_from_revenue: {amount} ({source:?})");
        Ok(())
    }

    pub fn get_inflation_rate(&self, now: u64) -> u64 {
        self.supply.inflation_rate_bp(now)
    }

    pub fn get_burn_rate(&self, now: u64) -> u64 {
        self.supply.burn_rate_bp(now)
    }

    pub fn get_total_burned(&self) -> u64 {
        self.supply.total_burned()
    }

    pub fn get_burn_history(&self) -> &[BurnEvent] {
        self.supply.burn_history()
    }

    pub fn check_inflation_adjustment_rate_limit(&self, now: u64) -> AdjustmentWindowStatus {
        self.inflation_limiter.check(now)
    }

    /// Apply the rate deltas approved by an executed proposal. Deliberately a
    /// separate step from execution; each application consumes one slot of
    /// the 30-day adjustment window.
    pub fn apply_rate_adjustment(&mut self, caller: &str, proposal_id: u64, now: u64) -> Result<()> {
        self.ensure_owner(caller)?;
        let &(inflation_change, burn_change) = self
            .pending_adjustments
            .get(&proposal_id)
            .ok_or(TokenError::NoPendingAdjustment(proposal_id))?;

        self.inflation_limiter.record(now)?;
        self.supply.apply_rate_adjustment(inflation_change, burn_change);
        self.pending_adjustments.remove(&proposal_id);
        self.bump();
        info!(
            "rate adjustment applied from proposal {proposal_id}: inflation {inflation_change:+}bp, burn {burn_change:+}bp"
        );
        Ok(())
    }

    // ----- Governance -----

    pub fn get_voting_power(&self, account: &str, now: u64) -> u64 {
        voting_power(
            self.ledger.balance_of(account),
            self.ledger.token_lock_start(account),
            now,
        )
    }

    pub fn get_governance_rights(&self, account: &str, now: u64) -> GovernanceRights {
        let tier = HoldingTier::from_holding(self.ledger.token_lock_start(account), now);
        let power = self.get_voting_power(account, now);
        let max_proposal_type = [
            ProposalType::Strategic,
            ProposalType::Emergency,
            ProposalType::Protocol,
            ProposalType::Major,
            ProposalType::Minor,
        ]
        .into_iter()
        .find(|t| power >= t.creation_threshold());

        GovernanceRights {
            tier,
            multiplier_percent: tier.multiplier(),
            voting_power: power,
            max_proposal_type,
        }
    }

    pub fn create_typed_proposal(
        &mut self,
        caller: &str,
        description: String,
        proposal_type: ProposalType,
        inflation_change_bp: i64,
        burn_rate_change_bp: i64,
        now: u64,
    ) -> Result<u64> {
        let power = self.get_voting_power(caller, now);
        let id = self.governance.create_proposal(
            caller,
            description,
            proposal_type,
            inflation_change_bp,
            burn_rate_change_bp,
            power,
            self.ledger.total_supply(),
            now,
        )?;
        self.bump();
        info!("proposal {id} created by {caller} ({proposal_type:?})");
        Ok(id)
    }

    pub fn vote_on_proposal(
        &mut self,
        caller: &str,
        proposal_id: u64,
        support: bool,
        amount: u64,
        now: u64,
    ) -> Result<()> {
        let power = self.get_voting_power(caller, now);
        self.governance
            .cast_vote(proposal_id, caller, support, amount, power, now)?;
        self.bump();
        info!(
            "vote on proposal {proposal_id}: {caller} {} with {amount}",
            if support { "for" } else { "against" }
        );
        Ok(())
    }

    /// Execute a passed proposal. Approved rate deltas are recorded for a
    /// later `apply_rate_adjustment` call rather than applied implicitly.
    pub fn execute_proposal(&mut self, proposal_id: u64, now: u64) -> Result<()> {
        let (inflation_change, burn_change) = self.governance.execute_proposal(proposal_id, now)?;
        if inflation_change != 0 || burn_change != 0 {
            self.pending_adjustments
                .insert(proposal_id, (inflation_change, burn_change));
        }
        self.bump();
        info!("proposal {proposal_id} executed");
        Ok(())
    }

    pub fn cancel_proposal(&mut self, caller: &str, proposal_id: u64) -> Result<()> {
        self.governance.cancel_proposal(proposal_id, caller)?;
        self.bump();
        Ok(())
    }

    pub fn expire_proposal(&mut self, proposal_id: u64, now: u64) -> Result<()> {
        self.governance.expire_proposal(proposal_id, now)?;
        self.bump();
        Ok(())
    }

    pub fn get_proposal(&self, proposal_id: u64) -> Option<&Proposal> {
        self.governance.proposal(proposal_id)
    }

    pub fn emergency_governance_pause(
        &mut self,
        caller: &str,
        duration_secs: u64,
        now: u64,
    ) -> Result<()> {
        self.council.ensure_member(caller)?;
        self.governance.pause.pause(duration_secs, now)?;
        self.audit_log.log_emergency_operation(
            caller,
            "governance_pause".to_string(),
            0,
            format!("paused for {duration_secs}s"),
            now,
        );
        self.bump();
        warn!("governance paused by {caller} for {duration_secs}s");
        Ok(())
    }

    pub fn resume_governance(&mut self, caller: &str, now: u64) -> Result<()> {
        self.council.ensure_member(caller)?;
        self.governance.pause.resume(now)?;
        self.bump();
        info!("governance resumed by {caller}");
        Ok(())
    }

    // ----- Large transfers -----

    /// Start a two-phase transfer. The sender is debited immediately; the
    /// amount sits in escrow until `execute_large_transfer` after the delay.
    pub fn initiate_large_transfer(
        &mut self,
        caller: &str,
        to: &str,
        amount: u64,
        now: u64,
    ) -> Result<u64> {
        self.council.ensure_not_paused()?;
        if to == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress.into());
        }
        let available = self.ledger.balance_of(caller);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            }
            .into());
        }

        let id = self.large_transfers.initiate(caller, to, amount, now)?;
        self.ledger.debit(caller, amount)?;
        self.bump();
        info!("large transfer {id} initiated: {caller} -> {to}, amount={amount}");
        Ok(id)
    }

    /// Complete a pending large transfer. Callable by anyone once the
    /// timelock has elapsed.
    pub fn execute_large_transfer(&mut self, id: u64, now: u64) -> Result<()> {
        self.council.ensure_not_paused()?;
        let record = self.large_transfers.execute(id, now)?;
        self.ledger.credit(&record.to, record.amount, now)?;
        self.bump();
        info!("large transfer {id} executed: credited {} to {}", record.amount, record.to);
        Ok(())
    }

    /// Cancel a pending large transfer and refund the escrow to the sender.
    pub fn cancel_large_transfer(&mut self, caller: &str, id: u64, now: u64) -> Result<()> {
        let record = self.large_transfers.cancel(id, caller)?;
        self.ledger.credit(&record.from, record.amount, now)?;
        self.bump();
        info!("large transfer {id} cancelled, {} refunded to {}", record.amount, record.from);
        Ok(())
    }

    pub fn get_pending_transfer(&self, id: u64) -> Option<&PendingLargeTransfer> {
        self.large_transfers.get(id)
    }

    pub fn check_transfer_rate_limit(&self, account: &str, amount: u64, now: u64) -> RateLimitStatus {
        self.rate_limits.check(account, amount, now)
    }

    // ----- Security & audit -----

    pub fn submit_security_audit(
        &mut self,
        caller: &str,
        report_hash: String,
        passed: bool,
        now: u64,
    ) -> u64 {
        let id = self.audit_log.submit_audit(caller, report_hash, passed, now);
        self.bump();
        info!("security audit {id} submitted by {caller}, passed={passed}");
        id
    }

    pub fn get_security_audit_status(&self) -> Option<&SecurityAudit> {
        self.audit_log.latest_audit()
    }

    pub fn report_suspicious_activity(
        &mut self,
        caller: &str,
        subject: &str,
        category: String,
        details: String,
        now: u64,
    ) -> u64 {
        let id = self
            .audit_log
            .report_suspicious_activity(caller, subject, category, details, now);
        self.bump();
        warn!("suspicious activity report {id}: {subject} reported by {caller}");
        id
    }

    pub fn get_security_monitoring_status(&self) -> MonitoringStatus {
        self.audit_log.monitoring_status()
    }

    pub fn log_emergency_operation(
        &mut self,
        caller: &str,
        action: String,
        amount: u64,
        justification: String,
        now: u64,
    ) -> Result<u64> {
        self.council.ensure_member(caller)?;
        let id = self
            .audit_log
            .log_emergency_operation(caller, action, amount, justification, now);
        self.bump();
        Ok(id)
    }

    pub fn get_emergency_operation(&self, id: u64) -> Option<&EmergencyOperation> {
        self.audit_log.emergency_operation(id)
    }

    /// Record the owner's intent to upgrade; the host performs the actual
    /// code swap.
    pub fn authorize_upgrade(&mut self, caller: &str, new_version: String, now: u64) -> Result<()> {
        self.ensure_owner(caller)?;
        self.audit_log.log_emergency_operation(
            caller,
            "authorize_upgrade".to_string(),
            0,
            new_version.clone(),
            now,
        );
        self.authorized_upgrade = Some(new_version);
        self.bump();
        Ok(())
    }

    pub fn get_contract_info(&self, now: u64) -> ContractInfo {
        ContractInfo {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            version: CONTRACT_VERSION.to_string(),
            owner: self.owner.clone(),
            total_supply: self.ledger.total_supply(),
            total_burned: self.supply.total_burned(),
            launch_timestamp: self.supply.launch_timestamp(),
            network_phase: self.supply.phase(now),
            paused: self.council.is_paused(),
            governance_paused: self.governance.pause.is_paused(now),
            state_version: self.state_version,
            authorized_upgrade: self.authorized_upgrade.clone(),
        }
    }

    // ----- Emergency council -----

    pub fn emergency_pause(&mut self, caller: &str, now: u64) -> Result<()> {
        self.council.pause(caller)?;
        self.audit_log.log_emergency_operation(
            caller,
            "contract_pause".to_string(),
            0,
            String::new(),
            now,
        );
        self.bump();
        warn!("contract paused by {caller}");
        Ok(())
    }

    pub fn emergency_unpause(&mut self, caller: &str, now: u64) -> Result<()> {
        self.council.unpause(caller)?;
        self.audit_log.log_emergency_operation(
            caller,
            "contract_unpause".to_string(),
            0,
            String::new(),
            now,
        );
        self.bump();
        warn!("contract unpaused by {caller}");
        Ok(())
    }

    /// Council-only mint that bypasses the inflation cap and works while the
    /// contract is paused.
    pub fn emergency_mint(
        &mut self,
        caller: &str,
        to: &str,
        amount: u64,
        justification: String,
        now: u64,
    ) -> Result<()> {
        self.council.ensure_member(caller)?;
        self.supply
            .record_mint(amount, MintReason::Emergency, self.ledger.total_supply(), now)?;
        self.ledger.mint_to(to, amount, now)?;
        self.audit_log.log_emergency_operation(
            caller,
            "emergency_mint".to_string(),
            amount,
            justification,
            now,
        );
        self.bump();
        warn!("emergency mint: {amount} to {to} by {caller}");
        Ok(())
    }

    /// Council-only seizure of a compromised account's funds into the
    /// treasury.
    pub fn emergency_withdraw(
        &mut self,
        caller: &str,
        from: &str,
        amount: u64,
        justification: String,
        now: u64,
    ) -> Result<()> {
        self.council.ensure_member(caller)?;
        let treasury = self.config.treasury_address.clone();
        self.ledger.transfer(from, &treasury, amount, now)?;
        self.audit_log.log_emergency_operation(
            caller,
            "emergency_withdraw".to_string(),
            amount,
            justification,
            now,
        );
        self.bump();
        warn!("emergency withdraw: {amount} from {from} by {caller}");
        Ok(())
    }

    // ----- External collaborators -----

    /// Job-fee collector entry point: debits the payer, burns the configured
    /// percentage and credits the remainder to the treasury.
    pub fn collect_job_fee(&mut self, caller: &str, payer: &str, fee: u64, now: u64) -> Result<()> {
        self.ensure_collaborator(caller, &self.config.job_fee_collector, "collect_job_fee")?;
        self.council.ensure_not_paused()?;
        if fee == 0 {
            return Err(LedgerError::ZeroAmount.into());
        }
        let available = self.ledger.balance_of(payer);
        if available < fee {
            return Err(LedgerError::InsufficientBalance {
                requested: fee,
                available,
            }
            .into());
        }

        let burn_amount = (fee as u128 * self.config.job_fee_burn_percent as u128 / 100) as u64;
        let to_treasury = fee - burn_amount;
        if burn_amount > 0 {
            self.supply.record_burn(
                burn_amount,
                RevenueSource::JobFees,
                0.0,
                self.ledger.total_supply(),
                now,
            )?;
            self.ledger.burn_from(payer, burn_amount)?;
        }
        if to_treasury > 0 {
            let treasury = self.config.treasury_address.clone();
            self.ledger.transfer(payer, &treasury, to_treasury, now)?;
        }
        self.bump();
        info!("job fee collected: {fee} from {payer} (burned {burn_amount})");
        Ok(())
    }

    /// Rewards-distributor entry point: mints into the worker reward pool
    /// through the capped mint path.
    pub fn distribute_pool_rewards(&mut self, caller: &str, amount: u64, now: u64) -> Result<()> {
        self.ensure_collaborator(
            caller,
            &self.config.rewards_distributor,
            "distribute_pool_rewards",
        )?;
        let pool = self.config.reward_pool_address.clone();
        self.mint(caller, &pool, amount, MintReason::PoolRewards, now)
    }

    /// Fee-sponsor entry point: debits the payer and burns the gas fee.
    pub fn pay_gas_fee(&mut self, caller: &str, payer: &str, amount: u64, now: u64) -> Result<()> {
        self.ensure_collaborator(caller, &self.config.gas_sponsor, "pay_gas_fee")?;
        self.council.ensure_not_paused()?;
        let available = self.ledger.balance_of(payer);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            }
            .into());
        }

        self.supply.record_burn(
            amount,
            RevenueSource::GasFees,
            0.0,
            self.ledger.total_supply(),
            now,
        )?;
        self.ledger.burn_from(payer, amount)?;
        self.bump();
        info!("gas fee: {amount} burned from {payer}");
        Ok(())
    }

    // ----- Introspection for invariant checks -----

    /// Conservation check: total supply always equals circulating balances
    /// plus escrowed pending large transfers.
    pub fn supply_is_conserved(&self) -> bool {
        self.ledger.total_supply()
            == self.ledger.sum_of_balances() + self.large_transfers.pending_total()
    }

    pub fn state_version(&self) -> u64 {
        self.state_version
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Serialize the full contract state for snapshots and backups.
    pub fn export_state(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Restore contract state from a snapshot produced by [`export_state`].
    ///
    /// [`export_state`]: TokenState::export_state
    pub fn import_state(json: &str) -> serde_json::Result<TokenState> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAUNCH: u64 = 1_700_000_000;

    fn state() -> TokenState {
        let config = TokenConfig {
            council_members: vec!["council".to_string()],
            ..TokenConfig::default()
        };
        TokenState::new("owner", LAUNCH, config).unwrap()
    }

    #[test]
    fn test_deploy_mints_initial_supply() {
        let state = state();
        assert_eq!(state.balance_of("owner"), INITIAL_CIRCULATING);
        assert_eq!(state.total_supply(), INITIAL_CIRCULATING);
        assert!(state.supply_is_conserved());
    }

    #[test]
    fn test_mint_requires_authorization() {
        let mut state = state();
        let err = state
            .mint("mallory", "mallory", 1, MintReason::Scheduled, LAUNCH)
            .unwrap_err();
        assert!(matches!(err, TokenError::Unauthorized(_)));

        // Emergency reason requires council membership even for the owner
        let err = state
            .mint("owner", "owner", 1, MintReason::Emergency, LAUNCH)
            .unwrap_err();
        assert_eq!(err, TokenError::Safeguard(SafeguardError::NotCouncilMember));
    }

    #[test]
    fn test_contract_pause_blocks_transfers() {
        let mut state = state();
        state.emergency_pause("council", LAUNCH).unwrap();

        let err = state.transfer("owner", "bob", 100, LAUNCH).unwrap_err();
        assert_eq!(err, TokenError::Safeguard(SafeguardError::ContractPaused));

        // Emergency mint still works while paused
        state
            .emergency_mint("council", "rescue", 1_000, "hack recovery".to_string(), LAUNCH)
            .unwrap();

        state.emergency_unpause("council", LAUNCH).unwrap();
        state.transfer("owner", "bob", 100, LAUNCH).unwrap();
    }

    #[test]
    fn test_collaborator_gates() {
        let mut state = state();
        assert!(matches!(
            state.collect_job_fee("mallory", "owner", 100, LAUNCH),
            Err(TokenError::Unauthorized(_))
        ));
        assert!(matches!(
            state.distribute_pool_rewards("mallory", 100, LAUNCH),
            Err(TokenError::Unauthorized(_))
        ));
        assert!(matches!(
            state.pay_gas_fee("mallory", "owner", 100, LAUNCH),
            Err(TokenError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_state_version_bumps_on_mutation() {
        let mut state = state();
        let v0 = state.state_version();

        state.transfer("owner", "bob", 100, LAUNCH).unwrap();
        assert_eq!(state.state_version(), v0 + 1);

        // Failed operations do not bump the version
        let _ = state.transfer("bob", "carol", 1_000_000, LAUNCH).unwrap_err();
        assert_eq!(state.state_version(), v0 + 1);
    }

    #[test]
    fn test_authorize_upgrade_owner_only() {
        let mut state = state();
        assert!(state
            .authorize_upgrade("mallory", "2.0.0".to_string(), LAUNCH)
            .is_err());

        state
            .authorize_upgrade("owner", "2.0.0".to_string(), LAUNCH)
            .unwrap();
        let info = state.get_contract_info(LAUNCH);
        assert_eq!(info.authorized_upgrade.as_deref(), Some("2.0.0"));
        // The intent is also in the emergency log
        assert_eq!(
            state.get_emergency_operation(1).unwrap().action,
            "authorize_upgrade"
        );
    }
}
