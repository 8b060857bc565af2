//! Events emitted by the Term Staking program.
//!
//! Every event carries the `Clock` unix timestamp of the instruction that
//! produced it.

use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub admin_cap: Pubkey,
    pub admin: Pubkey,
    pub staking_mint: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct StakeCreated {
    pub owner: Pubkey,
    pub amount: u64,
    pub plan_index: u64,
    pub stake_index: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeRequested {
    pub owner: Pubkey,
    pub stake_index: u64,
    pub penalty: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub owner: Pubkey,
    pub stake_index: u64,
    pub amount_returned: u64,
    pub reward: u64,
    pub penalty: u64,
    pub timestamp: i64,
}

#[event]
pub struct PlanUpdated {
    pub plan_index: u64,
    pub duration: u64,
    pub apy_bps: u64,
    pub active: bool,
    pub min_amount: u64,
    pub max_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolLimitsUpdated {
    pub unstake_delay: i64,
    pub early_penalty_rate_bps: u64,
    pub min_stake_amount: u64,
    pub max_stake_amount: u64,
    pub max_pool_balance: u64,
    pub max_stakes_per_owner: u64,
    pub timestamp: i64,
}

/// Kind of emergency or pause action recorded in [`EmergencyAction`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmergencyActionKind {
    Pause,
    Unpause,
    EmergencyPause,
    Resume,
    Withdraw,
}

#[event]
pub struct EmergencyAction {
    pub action: EmergencyActionKind,
    /// Tokens moved; zero for flag changes.
    pub amount: u64,
    /// Receiving token account for withdrawals, default otherwise.
    pub recipient: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RewardPoolUpdated {
    pub amount: u64,
    pub reward_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardPoolWithdrawn {
    pub amount: u64,
    pub recipient: Pubkey,
    pub reward_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferred {
    pub admin_cap: Pubkey,
    pub previous_holder: Pubkey,
    pub new_holder: Pubkey,
    pub timestamp: i64,
}
