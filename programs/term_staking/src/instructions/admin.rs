/// Admin instruction handlers.
///
/// Handles capability-gated pool configuration: limits, pause, migration and
/// hand-over of the admin capability.
///
/// ## Security Guarantees
/// - The admin capability must be bound to this pool in both directions
/// - The signer must be the capability's current holder
/// - Every handler except `migrate` requires the current schema version

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{AdminTransferred, EmergencyAction, EmergencyActionKind, PoolLimitsUpdated};
use crate::state::{AdminCap, StakePool};

/// Accounts required for admin operations.
///
/// ## Security Notes
/// - Capability binding is checked before holder identity, so a capability
///   from another pool reports `WrongAdmin` even when its holder signs
#[derive(Accounts)]
pub struct AdminOnly<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        constraint = admin_cap.is_bound_to(&admin_cap.key(), &stake_pool.key(), &stake_pool.admin_cap)
            @ StakingError::WrongAdmin,
        constraint = admin_cap.is_held_by(&authority.key()) @ StakingError::Unauthorized
    )]
    pub admin_cap: Account<'info, AdminCap>,
}

/// Accounts required to hand the admin capability to a new holder.
#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        mut,
        constraint = admin_cap.is_bound_to(&admin_cap.key(), &stake_pool.key(), &stake_pool.admin_cap)
            @ StakingError::WrongAdmin,
        constraint = admin_cap.is_held_by(&authority.key()) @ StakingError::Unauthorized
    )]
    pub admin_cap: Account<'info, AdminCap>,
}

fn emit_limits(stake_pool: &StakePool, timestamp: i64) {
    emit!(PoolLimitsUpdated {
        unstake_delay: stake_pool.unstake_delay,
        early_penalty_rate_bps: stake_pool.early_penalty_rate_bps,
        min_stake_amount: stake_pool.min_stake_amount,
        max_stake_amount: stake_pool.max_stake_amount,
        max_pool_balance: stake_pool.max_pool_balance,
        max_stakes_per_owner: stake_pool.max_stakes_per_owner,
        timestamp,
    });
}

/// Update the unstake delay and early-exit penalty rate.
///
/// Pending requests keep the penalty they were created with; the new delay
/// applies to every later `process_unstake`.
pub fn update_pool_limits_handler(
    ctx: Context<AdminOnly>,
    unstake_delay: i64,
    early_penalty_rate_bps: u64,
) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    msg!(
        "Pool limits - Old: delay={}s, penalty={}bp",
        stake_pool.unstake_delay,
        stake_pool.early_penalty_rate_bps
    );

    stake_pool.set_pool_limits(unstake_delay, early_penalty_rate_bps, clock.unix_timestamp)?;
    emit_limits(stake_pool, clock.unix_timestamp);

    msg!(
        "Pool limits - New: delay={}s, penalty={}bp",
        unstake_delay,
        early_penalty_rate_bps
    );
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Update the pool-wide per-stake amount bounds.
pub fn update_stake_limits_handler(ctx: Context<AdminOnly>, min: u64, max: u64) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    let (old_min, old_max) = (stake_pool.min_stake_amount, stake_pool.max_stake_amount);
    stake_pool.set_stake_limits(min, max, clock.unix_timestamp)?;
    emit_limits(stake_pool, clock.unix_timestamp);

    msg!("Stake limits updated: [{}, {}] -> [{}, {}]", old_min, old_max, min, max);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Update the cap on `total_staked`.
///
/// The new cap cannot be below what is already staked.
pub fn update_pool_balance_limit_handler(ctx: Context<AdminOnly>, new_max: u64) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    let old_max = stake_pool.max_pool_balance;
    stake_pool.set_pool_balance_limit(new_max, clock.unix_timestamp)?;
    emit_limits(stake_pool, clock.unix_timestamp);

    msg!("Pool balance limit updated: {} -> {}", old_max, new_max);
    msg!("Total staked: {}", stake_pool.total_staked);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Update how many stakes one owner may open. Owners already above the new
/// cap keep their stakes but cannot open more.
pub fn update_max_stakes_per_owner_handler(ctx: Context<AdminOnly>, new_max: u64) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    let old_max = stake_pool.max_stakes_per_owner;
    stake_pool.set_max_stakes_per_owner(new_max, clock.unix_timestamp)?;
    emit_limits(stake_pool, clock.unix_timestamp);

    msg!("Max stakes per owner updated: {} -> {}", old_max, new_max);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Set the paused state outside of emergency mode.
///
/// Pausing blocks new stakes and withdrawals; unstake requests stay open.
pub fn set_paused_handler(ctx: Context<AdminOnly>, paused: bool) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    let previous_state = stake_pool.paused;
    stake_pool.set_paused(paused, clock.unix_timestamp)?;

    emit!(EmergencyAction {
        action: if paused {
            EmergencyActionKind::Pause
        } else {
            EmergencyActionKind::Unpause
        },
        amount: 0,
        recipient: Pubkey::default(),
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Staking {} (was {})",
        if paused { "PAUSED" } else { "RESUMED" },
        if previous_state { "paused" } else { "active" }
    );
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Bring a pool created under an older layout up to `CURRENT_VERSION`.
pub fn migrate_handler(ctx: Context<AdminOnly>) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    let previous = stake_pool.migrate(clock.unix_timestamp)?;

    msg!("Pool migrated: schema v{} -> v{}", previous, CURRENT_VERSION);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Hand the admin capability to a new holder.
pub fn transfer_admin_handler(ctx: Context<TransferAdmin>, new_holder: Pubkey) -> Result<()> {
    ctx.accounts.stake_pool.assert_current_version()?;
    require!(new_holder != Pubkey::default(), StakingError::Unauthorized);

    let clock = Clock::get()?;
    let admin_cap_key = ctx.accounts.admin_cap.key();
    let admin_cap = &mut ctx.accounts.admin_cap;

    let previous_holder = admin_cap.holder;
    admin_cap.holder = new_holder;

    emit!(AdminTransferred {
        admin_cap: admin_cap_key,
        previous_holder,
        new_holder,
        timestamp: clock.unix_timestamp,
    });

    msg!("Admin transferred: {} -> {}", previous_holder, new_holder);

    Ok(())
}
