/// Initialize instruction handler.
///
/// Creates a staking pool for one mint together with its two vaults and the
/// admin capability bound to it.
///
/// ## Security Guarantees
/// - Vaults are PDAs owned by the stake pool
/// - Mint address is locked to pool state permanently
/// - The admin capability is a PDA of the pool, so exactly one exists per pool

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::events::PoolInitialized;
use crate::state::{AdminCap, PoolParams, StakePool};

/// Accounts required for pool initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Becomes the first holder of the admin capability.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The stake pool account to be created.
    /// SECURITY: PDA derived from STAKE_POOL_SEED + mint ensures uniqueness per token.
    #[account(
        init,
        payer = authority,
        space = StakePool::LEN,
        seeds = [STAKE_POOL_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// Admin capability for this pool.
    #[account(
        init,
        payer = authority,
        space = AdminCap::LEN,
        seeds = [ADMIN_CAP_SEED, stake_pool.key().as_ref()],
        bump
    )]
    pub admin_cap: Account<'info, AdminCap>,

    /// The mint of the staked token.
    pub staking_mint: Account<'info, Mint>,

    /// Holds staked principal.
    #[account(
        init,
        payer = authority,
        seeds = [STAKING_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_pool
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Holds reward funds and swept penalties.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new staking pool.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `params` - Unstake delay, penalty rate and stake limits
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Initialize>, params: PoolParams) -> Result<()> {
    let clock = Clock::get()?;
    let pool_key = ctx.accounts.stake_pool.key();
    let admin_cap_key = ctx.accounts.admin_cap.key();
    let authority = ctx.accounts.authority.key();

    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.configure(&params, admin_cap_key, clock.unix_timestamp)?;
    stake_pool.staking_mint = ctx.accounts.staking_mint.key();
    stake_pool.staking_vault = ctx.accounts.staking_vault.key();
    stake_pool.reward_vault = ctx.accounts.reward_vault.key();
    stake_pool.bump = ctx.bumps.stake_pool;
    stake_pool.staking_vault_bump = ctx.bumps.staking_vault;
    stake_pool.reward_vault_bump = ctx.bumps.reward_vault;

    let admin_cap = &mut ctx.accounts.admin_cap;
    admin_cap.pool = pool_key;
    admin_cap.holder = authority;
    admin_cap.bump = ctx.bumps.admin_cap;

    emit!(PoolInitialized {
        pool: pool_key,
        admin_cap: admin_cap_key,
        admin: authority,
        staking_mint: stake_pool.staking_mint,
        timestamp: clock.unix_timestamp,
    });

    msg!("Term staking pool initialized");
    msg!("Admin: {}", authority);
    msg!("Mint: {}", stake_pool.staking_mint);
    msg!(
        "Unstake delay: {}s, early penalty: {}bp",
        params.unstake_delay,
        params.early_penalty_rate_bps
    );
    msg!(
        "Stake bounds: [{}, {}], pool cap: {}, per-owner cap: {}",
        params.min_stake_amount,
        params.max_stake_amount,
        params.max_pool_balance,
        params.max_stakes_per_owner
    );

    Ok(())
}
