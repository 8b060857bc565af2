//! # Term Staking Program
//!
//! Token staking against admin-defined term plans. Each stake locks an amount
//! under a snapshot of its plan's duration and APY, and walks a one-way
//! lifecycle:
//!
//! - **Staked**: tokens sit in the pool's staking vault
//! - **UnstakeRequested**: the early-exit penalty is fixed and the unstake
//!   delay starts
//! - **Withdrawn**: principal less penalty (plus reward when eligible) has been
//!   paid out; the record stays as history
//!
//! ## Features
//! - Append-only plan registry with per-plan amount bounds
//! - Penalty snapshotted at request time; an early request forfeits reward
//! - Penalties swept into the reward vault to fund future rewards
//! - Pool-wide amount, balance and per-owner stake limits
//! - Pause, emergency mode and emergency withdrawal
//! - Admin capability bound to a single pool, transferable to a new holder
//! - Schema version gate with one-way migration
//! - Read-only views returning Anchor return data

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod vault;


use instructions::*;
use state::{PlanTerms, PoolParams};

#[program]
pub mod term_staking {
    use super::*;

    /// Creates the pool for a mint, its vaults and the admin capability.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `params` - Unstake delay, penalty rate and stake limits
    ///
    /// # Errors
    /// Returns an error if min > max, the penalty rate exceeds 10000 bp, the
    /// delay is negative or the per-owner cap is zero.
    pub fn initialize(ctx: Context<Initialize>, params: PoolParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Appends a plan to the registry at the next index.
    ///
    /// # Arguments
    /// * `duration` - Lock term in seconds
    /// * `apy_bps` - Annual rate in basis points
    /// * `active` - Whether the plan accepts stakes
    pub fn add_plan(
        ctx: Context<AddPlan>,
        duration: u64,
        apy_bps: u64,
        active: bool,
    ) -> Result<()> {
        instructions::plan::add_plan_handler(ctx, duration, apy_bps, active)
    }

    /// Edits a plan in place. Existing stakes keep their snapshot.
    ///
    /// # Errors
    /// Returns an error if the index is out of range or min > max.
    pub fn update_plan(
        ctx: Context<UpdatePlan>,
        plan_index: u64,
        apy_bps: u64,
        active: bool,
        min_amount: u64,
        max_amount: u64,
    ) -> Result<()> {
        instructions::plan::update_plan_handler(
            ctx,
            plan_index,
            apy_bps,
            active,
            min_amount,
            max_amount,
        )
    }

    /// Locks tokens under a plan.
    ///
    /// # Arguments
    /// * `plan_index` - Registry index of the plan
    /// * `amount` - Amount of tokens to lock
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool is paused or in emergency mode
    /// - The pool needs migration
    /// - Amount is zero or outside the pool/plan bounds
    /// - The plan is inactive
    /// - The pool balance limit or the per-owner stake cap would be exceeded
    pub fn stake(ctx: Context<Stake>, plan_index: u64, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, plan_index, amount)
    }

    /// Requests withdrawal of a stake, fixing its penalty.
    ///
    /// # Errors
    /// Returns an error if the stake is not in the `Staked` state.
    pub fn request_unstake(ctx: Context<RequestUnstake>, stake_index: u64) -> Result<()> {
        instructions::request_unstake::handler(ctx, stake_index)
    }

    /// Pays out a requested stake once the unstake delay has elapsed.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool is paused
    /// - No request is pending for the stake
    /// - The unstake delay has not elapsed
    /// - The reward pool cannot cover the reward
    pub fn process_unstake(ctx: Context<ProcessUnstake>, stake_index: u64) -> Result<()> {
        instructions::process_unstake::handler(ctx, stake_index)
    }

    /// Admin: updates the unstake delay and early penalty rate.
    pub fn update_pool_limits(
        ctx: Context<AdminOnly>,
        unstake_delay: i64,
        early_penalty_rate_bps: u64,
    ) -> Result<()> {
        instructions::admin::update_pool_limits_handler(ctx, unstake_delay, early_penalty_rate_bps)
    }

    /// Admin: updates the pool-wide stake amount bounds.
    pub fn update_stake_limits(ctx: Context<AdminOnly>, min: u64, max: u64) -> Result<()> {
        instructions::admin::update_stake_limits_handler(ctx, min, max)
    }

    /// Admin: updates the cap on total staked tokens.
    pub fn update_pool_balance_limit(ctx: Context<AdminOnly>, new_max: u64) -> Result<()> {
        instructions::admin::update_pool_balance_limit_handler(ctx, new_max)
    }

    /// Admin: updates the number of stakes one owner may open.
    pub fn update_max_stakes_per_owner(ctx: Context<AdminOnly>, new_max: u64) -> Result<()> {
        instructions::admin::update_max_stakes_per_owner_handler(ctx, new_max)
    }

    /// Admin: pauses or unpauses the pool outside of emergency mode.
    pub fn set_paused(ctx: Context<AdminOnly>, paused: bool) -> Result<()> {
        instructions::admin::set_paused_handler(ctx, paused)
    }

    /// Admin: enters emergency mode.
    pub fn emergency_pause(ctx: Context<AdminOnly>) -> Result<()> {
        instructions::emergency::emergency_pause_handler(ctx)
    }

    /// Admin: leaves emergency mode.
    pub fn resume_from_emergency(ctx: Context<AdminOnly>) -> Result<()> {
        instructions::emergency::resume_from_emergency_handler(ctx)
    }

    /// Admin: moves tokens out of the staking vault while in emergency mode,
    /// bypassing the stake ledger.
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
        instructions::emergency::emergency_withdraw_handler(ctx, amount)
    }

    /// Admin: funds the reward vault.
    pub fn add_to_reward_pool(ctx: Context<RewardPool>, amount: u64) -> Result<()> {
        instructions::reward_pool::add_to_reward_pool_handler(ctx, amount)
    }

    /// Admin: withdraws from the reward vault.
    pub fn withdraw_from_reward_pool(ctx: Context<RewardPool>, amount: u64) -> Result<()> {
        instructions::reward_pool::withdraw_from_reward_pool_handler(ctx, amount)
    }

    /// Admin: upgrades an older pool to the current schema version.
    pub fn migrate(ctx: Context<AdminOnly>) -> Result<()> {
        instructions::admin::migrate_handler(ctx)
    }

    /// Admin: hands the admin capability to a new holder.
    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_holder: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin_handler(ctx, new_holder)
    }

    pub fn get_pool_info(ctx: Context<PoolView>) -> Result<PoolInfo> {
        instructions::views::get_pool_info_handler(ctx)
    }

    pub fn get_plan_info(ctx: Context<PlanView>, plan_index: u64) -> Result<PlanTerms> {
        instructions::views::get_plan_info_handler(ctx, plan_index)
    }

    pub fn get_stake_info(ctx: Context<StakeView>, stake_index: u64) -> Result<StakeInfo> {
        instructions::views::get_stake_info_handler(ctx, stake_index)
    }

    pub fn get_stake_status(
        ctx: Context<StakeStatusView>,
        stake_index: u64,
    ) -> Result<StakeStatus> {
        instructions::views::get_stake_status_handler(ctx, stake_index)
    }

    pub fn get_unstake_request_info(
        ctx: Context<UnstakeRequestView>,
        stake_index: u64,
    ) -> Result<UnstakeRequestInfo> {
        instructions::views::get_unstake_request_info_handler(ctx, stake_index)
    }
}
