//! Token configuration
//!
//! Collaborator addresses and per-deployment tunables. Constants that are
//! fixed protocol parameters live in the owning crate's `config` module;
//! everything here may differ between deployments.

use serde::{Deserialize, Serialize};

use grid_core::{Address, COIN};
use grid_safeguards::config::{
    DEFAULT_LARGE_TRANSFER_DELAY_SECS, DEFAULT_LARGE_TRANSFER_THRESHOLD, DEFAULT_RATE_LIMIT_MAX,
    RATE_LIMIT_WINDOW_SECS,
};

/// Maximum recipients per `batch_transfer` call.
pub const MAX_BATCH_SIZE: usize = 20;

/// Initial circulating supply minted to the owner at deployment.
pub const INITIAL_CIRCULATING: u64 = 100_000_000 * COIN;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Receives non-burned revenue and emergency-withdrawn funds.
    pub treasury_address: Address,
    /// Worker reward pool credited by `distribute_pool_rewards`.
    pub reward_pool_address: Address,
    /// Collaborator allowed to call `collect_job_fee`.
    pub job_fee_collector: Address,
    /// Collaborator allowed to call `distribute_pool_rewards` and `mint`.
    pub rewards_distributor: Address,
    /// Collaborator allowed to call `pay_gas_fee`.
    pub gas_sponsor: Address,
    /// Emergency council members.
    pub council_members: Vec<Address>,

    /// Percentage of each job fee that is burned (rest goes to treasury).
    pub job_fee_burn_percent: u64,

    /// Transfer rate-limit window and per-window cap.
    pub rate_limit_window_secs: u64,
    pub rate_limit_max_per_window: u64,
    /// When false the rate limit is advisory: usage is tracked and queryable
    /// but transfers are never rejected by it.
    pub enforce_transfer_rate_limit: bool,

    /// Two-phase transfer threshold and delay.
    pub large_transfer_threshold: u64,
    pub large_transfer_delay_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            treasury_address: "treasury".to_string(),
            reward_pool_address: "reward-pool".to_string(),
            job_fee_collector: "job-fee-collector".to_string(),
            rewards_distributor: "rewards-distributor".to_string(),
            gas_sponsor: "gas-sponsor".to_string(),
            council_members: Vec::new(),
            job_fee_burn_percent: 50,
            rate_limit_window_secs: RATE_LIMIT_WINDOW_SECS,
            rate_limit_max_per_window: DEFAULT_RATE_LIMIT_MAX,
            enforce_transfer_rate_limit: false,
            large_transfer_threshold: DEFAULT_LARGE_TRANSFER_THRESHOLD,
            large_transfer_delay_secs: DEFAULT_LARGE_TRANSFER_DELAY_SECS,
        }
    }
}
