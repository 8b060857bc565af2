/// Reward pool instruction handlers.
///
/// Handles admin deposits into and withdrawals from the reward vault.
///
/// ## Security Guarantees
/// - Reward vault validation ensures the pool's own PDA vault is used
/// - Mint validation prevents wrong token deposits
/// - Withdrawals cannot exceed the booked reward balance

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{RewardPoolUpdated, RewardPoolWithdrawn};
use crate::state::{AdminCap, StakePool};
use crate::vault::{deposit_to_vault, release_from_vault};

/// Accounts required for moving tokens in or out of the reward vault.
///
/// For deposits `admin_token_account` is the source and must belong to the
/// signer; for withdrawals it is the recipient.
#[derive(Accounts)]
pub struct RewardPool<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = reward_vault @ StakingError::RewardVaultMismatch
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
        constraint = admin_token_account.mint == stake_pool.staking_mint @ StakingError::MintMismatch
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = reward_vault.owner == stake_pool.key() @ StakingError::RewardVaultMismatch
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Fund the reward vault.
///
/// # Arguments
/// * `ctx` - RewardPool accounts context
/// * `amount` - Amount of tokens to deposit
pub fn add_to_reward_pool_handler(ctx: Context<RewardPool>, amount: u64) -> Result<()> {
    require!(
        ctx.accounts.admin_token_account.owner == ctx.accounts.authority.key(),
        StakingError::TokenOwnerMismatch
    );

    let clock = Clock::get()?;
    ctx.accounts
        .stake_pool
        .deposit_rewards(amount, clock.unix_timestamp)?;

    deposit_to_vault(
        &ctx.accounts.admin_token_account,
        &ctx.accounts.reward_vault,
        &ctx.accounts.authority,
        &ctx.accounts.token_program,
        amount,
    )?;

    let reward_balance = ctx.accounts.stake_pool.reward_balance;
    emit!(RewardPoolUpdated {
        amount,
        reward_balance,
        timestamp: clock.unix_timestamp,
    });

    msg!("Reward pool funded with {} tokens", amount);
    msg!("New reward balance: {}", reward_balance);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Withdraw unallocated tokens from the reward vault.
///
/// # Arguments
/// * `ctx` - RewardPool accounts context
/// * `amount` - Amount of tokens to withdraw
pub fn withdraw_from_reward_pool_handler(ctx: Context<RewardPool>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let recipient = ctx.accounts.admin_token_account.key();

    ctx.accounts
        .stake_pool
        .withdraw_rewards(amount, clock.unix_timestamp)?;

    release_from_vault(
        &ctx.accounts.reward_vault,
        &ctx.accounts.admin_token_account,
        &ctx.accounts.stake_pool,
        &ctx.accounts.token_program,
        amount,
    )?;

    let reward_balance = ctx.accounts.stake_pool.reward_balance;
    emit!(RewardPoolWithdrawn {
        amount,
        recipient,
        reward_balance,
        timestamp: clock.unix_timestamp,
    });

    msg!("Withdrew {} tokens from reward pool to {}", amount, recipient);
    msg!("Remaining reward balance: {}", reward_balance);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}
