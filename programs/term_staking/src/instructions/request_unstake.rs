//! Request unstake instruction handler.
//!
//! Starts the withdrawal of one stake: fixes the early-exit penalty and starts
//! the unstake delay. No tokens move here.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::UnstakeRequested;
use crate::state::{StakePool, StakeRecord, StakerLedger, UnstakeRequest};

/// Accounts required for requesting an unstake.
#[derive(Accounts)]
#[instruction(stake_index: u64)]
pub struct RequestUnstake<'info> {
    /// The stake owner.
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        seeds = [STAKER_LEDGER_SEED, stake_pool.key().as_ref(), owner.key().as_ref()],
        bump = staker_ledger.bump,
        constraint = staker_ledger.owner == owner.key() @ StakingError::StakerNotFound
    )]
    pub staker_ledger: Account<'info, StakerLedger>,

    #[account(
        mut,
        seeds = [
            STAKE_RECORD_SEED,
            stake_pool.key().as_ref(),
            owner.key().as_ref(),
            &stake_index.to_le_bytes()
        ],
        bump = stake_record.bump,
        constraint = stake_record.owner == owner.key() @ StakingError::Unauthorized
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// Created here; `init` guarantees one request per stake.
    #[account(
        init,
        payer = owner,
        space = UnstakeRequest::LEN,
        seeds = [
            UNSTAKE_REQUEST_SEED,
            stake_pool.key().as_ref(),
            owner.key().as_ref(),
            &stake_index.to_le_bytes()
        ],
        bump
    )]
    pub unstake_request: Account<'info, UnstakeRequest>,

    pub system_program: Program<'info, System>,
}

/// Request withdrawal of a stake.
///
/// Before maturity the penalty is `amount * early_penalty_rate_bps / 10000`
/// and the stake will not earn a reward, however long the withdrawal waits.
///
/// # Arguments
/// * `ctx` - RequestUnstake accounts context
/// * `stake_index` - Owner-local index of the stake
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<RequestUnstake>, stake_index: u64) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();

    let penalty = ctx.accounts.stake_pool.request_unstake(
        &ctx.accounts.staker_ledger,
        &mut ctx.accounts.stake_record,
        &mut ctx.accounts.unstake_request,
        clock.unix_timestamp,
        ctx.bumps.unstake_request,
    )?;

    emit!(UnstakeRequested {
        owner,
        stake_index,
        penalty,
        timestamp: clock.unix_timestamp,
    });

    let unlocks_at = ctx
        .accounts
        .unstake_request
        .unlocks_at(ctx.accounts.stake_pool.unstake_delay)?;

    msg!("Unstake requested for stake #{}", stake_index);
    msg!("Penalty: {}", penalty);
    msg!("Withdrawable from: {}", unlocks_at);

    Ok(())
}
