//! Process unstake instruction handler.
//!
//! Completes a requested withdrawal once the unstake delay has passed: pays
//! back principal less penalty, pays reward when eligible, and sweeps the
//! penalty into the reward vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Withdrawn;
use crate::state::{StakePool, StakeRecord, UnstakeRequest};
use crate::vault::release_from_vault;

/// Accounts required for processing an unstake.
#[derive(Accounts)]
#[instruction(stake_index: u64)]
pub struct ProcessUnstake<'info> {
    /// The stake owner.
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault @ StakingError::VaultMismatch,
        has_one = reward_vault @ StakingError::RewardVaultMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

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

    #[account(
        seeds = [
            UNSTAKE_REQUEST_SEED,
            stake_pool.key().as_ref(),
            owner.key().as_ref(),
            &stake_index.to_le_bytes()
        ],
        bump = unstake_request.bump
    )]
    pub unstake_request: Account<'info, UnstakeRequest>,

    /// Owner's token account receiving principal and reward.
    #[account(
        mut,
        constraint = owner_token_account.mint == stake_pool.staking_mint @ StakingError::MintMismatch,
        constraint = owner_token_account.owner == owner.key() @ StakingError::TokenOwnerMismatch
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Withdraw a requested stake.
///
/// # Arguments
/// * `ctx` - ProcessUnstake accounts context
/// * `stake_index` - Owner-local index of the stake
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<ProcessUnstake>, stake_index: u64) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();

    let settlement = ctx.accounts.stake_pool.process_unstake(
        &mut ctx.accounts.stake_record,
        &ctx.accounts.unstake_request,
        clock.unix_timestamp,
    )?;

    release_from_vault(
        &ctx.accounts.staking_vault,
        &ctx.accounts.owner_token_account,
        &ctx.accounts.stake_pool,
        &ctx.accounts.token_program,
        settlement.amount_returned,
    )?;
    release_from_vault(
        &ctx.accounts.reward_vault,
        &ctx.accounts.owner_token_account,
        &ctx.accounts.stake_pool,
        &ctx.accounts.token_program,
        settlement.reward,
    )?;
    release_from_vault(
        &ctx.accounts.staking_vault,
        &ctx.accounts.reward_vault,
        &ctx.accounts.stake_pool,
        &ctx.accounts.token_program,
        settlement.penalty,
    )?;

    emit!(Withdrawn {
        owner,
        stake_index,
        amount_returned: settlement.amount_returned,
        reward: settlement.reward,
        penalty: settlement.penalty,
        timestamp: clock.unix_timestamp,
    });

    msg!("Withdrew stake #{}", stake_index);
    msg!(
        "Returned: {}, reward: {}, penalty: {}",
        settlement.amount_returned,
        settlement.reward,
        settlement.penalty
    );
    msg!("Total staked in pool: {}", ctx.accounts.stake_pool.total_staked);

    Ok(())
}
