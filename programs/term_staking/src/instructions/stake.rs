//! Stake instruction handler.
//!
//! Locks tokens into the pool under one plan, opening a new stake record at
//! the owner's next sequential index.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::StakeCreated;
use crate::state::{Plan, StakePool, StakeRecord, StakerLedger};
use crate::vault::deposit_to_vault;

/// Accounts required for staking.
#[derive(Accounts)]
#[instruction(plan_index: u64)]
pub struct Stake<'info> {
    /// The owner locking tokens.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault @ StakingError::VaultMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The plan being staked into.
    #[account(
        seeds = [PLAN_SEED, stake_pool.key().as_ref(), &plan_index.to_le_bytes()],
        bump = plan.bump,
        constraint = plan.pool == stake_pool.key() @ StakingError::PoolMismatch
    )]
    pub plan: Account<'info, Plan>,

    /// Owner's stake counter (created on first stake).
    #[account(
        init_if_needed,
        payer = owner,
        space = StakerLedger::LEN,
        seeds = [STAKER_LEDGER_SEED, stake_pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub staker_ledger: Account<'info, StakerLedger>,

    /// The new stake, at index `staker_ledger.stake_count`.
    #[account(
        init,
        payer = owner,
        space = StakeRecord::LEN,
        seeds = [
            STAKE_RECORD_SEED,
            stake_pool.key().as_ref(),
            owner.key().as_ref(),
            &staker_ledger.stake_count.to_le_bytes()
        ],
        bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// Owner's token account for the staking token.
    #[account(
        mut,
        constraint = owner_token_account.mint == stake_pool.staking_mint @ StakingError::MintMismatch,
        constraint = owner_token_account.owner == owner.key() @ StakingError::TokenOwnerMismatch
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// Pool's staking vault.
    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Stake tokens into the pool.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `plan_index` - Registry index of the plan
/// * `amount` - Amount of tokens to lock
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Stake>, plan_index: u64, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let pool_key = ctx.accounts.stake_pool.key();
    let owner = ctx.accounts.owner.key();

    let staker_ledger = &mut ctx.accounts.staker_ledger;
    staker_ledger.ensure_initialized(pool_key, owner, ctx.bumps.staker_ledger);

    let stake_index = ctx.accounts.stake_pool.open_stake(
        &mut ctx.accounts.staker_ledger,
        &mut ctx.accounts.stake_record,
        &ctx.accounts.plan.terms,
        amount,
        clock.unix_timestamp,
        ctx.bumps.stake_record,
    )?;

    deposit_to_vault(
        &ctx.accounts.owner_token_account,
        &ctx.accounts.staking_vault,
        &ctx.accounts.owner,
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(StakeCreated {
        owner,
        amount,
        plan_index,
        stake_index,
        timestamp: clock.unix_timestamp,
    });

    msg!("Staked {} tokens in plan {} as stake #{}", amount, plan_index, stake_index);
    msg!("Unlocks at: {}", ctx.accounts.stake_record.end_time);
    msg!("Total staked in pool: {}", ctx.accounts.stake_pool.total_staked);

    Ok(())
}
