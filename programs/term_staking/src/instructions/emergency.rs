/// Emergency instruction handlers.
///
/// ## Security Guarantees
/// - Emergency pause blocks staking and withdrawals until resumed
/// - Emergency withdraw is only reachable while in emergency mode
/// - Emergency withdraw bypasses the stake ledger: `total_staked` and stake
///   records are left untouched, so the staking balance can fall below the
///   principal it backs

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{EmergencyAction, EmergencyActionKind};
use crate::instructions::admin::AdminOnly;
use crate::state::{AdminCap, StakePool};
use crate::vault::release_from_vault;

/// Accounts required for an emergency withdrawal.
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault @ StakingError::VaultMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        constraint = admin_cap.is_bound_to(&admin_cap.key(), &stake_pool.key(), &stake_pool.admin_cap)
            @ StakingError::WrongAdmin,
        constraint = admin_cap.is_held_by(&authority.key()) @ StakingError::Unauthorized
    )]
    pub admin_cap: Account<'info, AdminCap>,

    #[account(mut)]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Receives the rescued tokens.
    #[account(
        mut,
        constraint = recipient_token_account.mint == stake_pool.staking_mint @ StakingError::MintMismatch
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Enter emergency mode: sets both the emergency and paused flags.
pub fn emergency_pause_handler(ctx: Context<AdminOnly>) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    stake_pool.enter_emergency(clock.unix_timestamp)?;

    emit!(EmergencyAction {
        action: EmergencyActionKind::EmergencyPause,
        amount: 0,
        recipient: Pubkey::default(),
        timestamp: clock.unix_timestamp,
    });

    msg!("EMERGENCY MODE ENABLED - staking and withdrawals halted");
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Leave emergency mode, clearing both flags.
pub fn resume_from_emergency_handler(ctx: Context<AdminOnly>) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    stake_pool.resume_from_emergency(clock.unix_timestamp)?;

    emit!(EmergencyAction {
        action: EmergencyActionKind::Resume,
        amount: 0,
        recipient: Pubkey::default(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Emergency mode cleared - pool resumed");
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Move tokens straight out of the staking vault to a recipient.
///
/// # Arguments
/// * `ctx` - EmergencyWithdraw accounts context
/// * `amount` - Amount to move; must not exceed the staking balance
pub fn emergency_withdraw_handler(ctx: Context<EmergencyWithdraw>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let recipient = ctx.accounts.recipient_token_account.key();

    ctx.accounts
        .stake_pool
        .emergency_withdraw(amount, clock.unix_timestamp)?;

    release_from_vault(
        &ctx.accounts.staking_vault,
        &ctx.accounts.recipient_token_account,
        &ctx.accounts.stake_pool,
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(EmergencyAction {
        action: EmergencyActionKind::Withdraw,
        amount,
        recipient,
        timestamp: clock.unix_timestamp,
    });

    msg!("EMERGENCY WITHDRAW: {} tokens to {}", amount, recipient);
    msg!("Staking balance now: {}", ctx.accounts.stake_pool.staking_balance);
    msg!("Total staked (unchanged): {}", ctx.accounts.stake_pool.total_staked);
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}
