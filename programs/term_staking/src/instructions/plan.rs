//! Plan registry instruction handlers.
//!
//! Plans live in their own PDAs indexed by position. They are appended and
//! edited, never closed.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PlanUpdated;
use crate::state::{AdminCap, Plan, PlanTerms, StakePool};

/// Accounts required to append a plan.
#[derive(Accounts)]
pub struct AddPlan<'info> {
    #[account(mut)]
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

    /// Next slot in the registry.
    #[account(
        init,
        payer = authority,
        space = Plan::LEN,
        seeds = [PLAN_SEED, stake_pool.key().as_ref(), &stake_pool.plan_count.to_le_bytes()],
        bump
    )]
    pub plan: Account<'info, Plan>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to edit an existing plan.
#[derive(Accounts)]
#[instruction(plan_index: u64)]
pub struct UpdatePlan<'info> {
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

    #[account(
        mut,
        seeds = [PLAN_SEED, stake_pool.key().as_ref(), &plan_index.to_le_bytes()],
        bump = plan.bump,
        constraint = plan.pool == stake_pool.key() @ StakingError::PoolMismatch
    )]
    pub plan: Account<'info, Plan>,
}

fn emit_plan(terms: &PlanTerms, timestamp: i64) {
    emit!(PlanUpdated {
        plan_index: terms.index,
        duration: terms.duration,
        apy_bps: terms.apy_bps,
        active: terms.active,
        min_amount: terms.min_amount,
        max_amount: terms.max_amount,
        timestamp,
    });
}

/// Append a plan at the next index.
///
/// # Arguments
/// * `duration` - Lock term in seconds
/// * `apy_bps` - Annual rate in basis points
/// * `active` - Whether the plan accepts stakes immediately
pub fn add_plan_handler(
    ctx: Context<AddPlan>,
    duration: u64,
    apy_bps: u64,
    active: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    let pool_key = ctx.accounts.stake_pool.key();

    let terms = ctx
        .accounts
        .stake_pool
        .register_plan(duration, apy_bps, active, clock.unix_timestamp)?;

    let plan = &mut ctx.accounts.plan;
    plan.pool = pool_key;
    plan.terms = terms;
    plan.created_at = clock.unix_timestamp;
    plan.last_updated = clock.unix_timestamp;
    plan.bump = ctx.bumps.plan;

    emit_plan(&terms, clock.unix_timestamp);

    msg!(
        "Plan {} added: duration={}s, apy={}bp, active={}",
        terms.index,
        duration,
        apy_bps,
        active
    );
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Edit a plan in place. Existing stakes keep the terms they were opened with.
pub fn update_plan_handler(
    ctx: Context<UpdatePlan>,
    plan_index: u64,
    apy_bps: u64,
    active: bool,
    min_amount: u64,
    max_amount: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let stake_pool = &mut ctx.accounts.stake_pool;
    let plan = &mut ctx.accounts.plan;

    msg!(
        "Plan {} - Old: apy={}bp, active={}, bounds=[{}, {}]",
        plan_index,
        plan.terms.apy_bps,
        plan.terms.active,
        plan.terms.min_amount,
        plan.terms.max_amount
    );

    stake_pool.update_plan(
        &mut plan.terms,
        apy_bps,
        active,
        min_amount,
        max_amount,
        clock.unix_timestamp,
    )?;
    plan.last_updated = clock.unix_timestamp;

    emit_plan(&plan.terms, clock.unix_timestamp);

    msg!(
        "Plan {} - New: apy={}bp, active={}, bounds=[{}, {}]",
        plan_index,
        apy_bps,
        active,
        min_amount,
        max_amount
    );
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}
