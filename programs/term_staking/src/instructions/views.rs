//! Read-only view instructions.
//!
//! Each handler returns its result as Anchor return data and writes nothing,
//! so clients can call them through simulation.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::math::{calculate_penalty, calculate_reward};
use crate::state::{Plan, PlanTerms, StakePool, StakeRecord, StakeState, UnstakeRequest};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    pub schema_version: u8,
    pub admin_cap: Pubkey,
    pub staking_mint: Pubkey,
    pub staking_balance: u64,
    pub reward_balance: u64,
    pub total_staked: u64,
    pub plan_count: u64,
    pub unstake_delay: i64,
    pub early_penalty_rate_bps: u64,
    pub min_stake_amount: u64,
    pub max_stake_amount: u64,
    pub max_pool_balance: u64,
    pub max_stakes_per_owner: u64,
    pub paused: bool,
    pub emergency_mode: bool,
}

impl From<&StakePool> for PoolInfo {
    fn from(pool: &StakePool) -> Self {
        Self {
            schema_version: pool.schema_version,
            admin_cap: pool.admin_cap,
            staking_mint: pool.staking_mint,
            staking_balance: pool.staking_balance,
            reward_balance: pool.reward_balance,
            total_staked: pool.total_staked,
            plan_count: pool.plan_count,
            unstake_delay: pool.unstake_delay,
            early_penalty_rate_bps: pool.early_penalty_rate_bps,
            min_stake_amount: pool.min_stake_amount,
            max_stake_amount: pool.max_stake_amount,
            max_pool_balance: pool.max_pool_balance,
            max_stakes_per_owner: pool.max_stakes_per_owner,
            paused: pool.paused,
            emergency_mode: pool.emergency_mode,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakeInfo {
    pub owner: Pubkey,
    pub index: u64,
    pub amount: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub plan: PlanTerms,
    pub state: StakeState,
}

impl From<&StakeRecord> for StakeInfo {
    fn from(record: &StakeRecord) -> Self {
        Self {
            owner: record.owner,
            index: record.index,
            amount: record.amount,
            start_time: record.start_time,
            end_time: record.end_time,
            plan: record.plan,
            state: record.state,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UnstakeRequestInfo {
    pub owner: Pubkey,
    pub stake_index: u64,
    pub request_time: i64,
    pub penalty_amount: u64,
    /// Earliest time `process_unstake` succeeds under the current delay.
    pub unlocks_at: i64,
}

/// Where a stake stands at the time of the query.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakeStatus {
    pub stake_index: u64,
    pub state: StakeState,
    pub is_matured: bool,
    /// Zero once matured.
    pub seconds_to_maturity: i64,
    /// Penalty an unstake request filed now would carry; zero unless `Staked`.
    pub penalty_if_requested_now: u64,
    /// Reward still payable to the stake. Zero once withdrawn, and zero for a
    /// request that carried a penalty.
    pub reward_if_held_to_maturity: u64,
}

impl StakeStatus {
    /// `request` is the stake's pending unstake request, if any.
    pub fn at(
        record: &StakeRecord,
        request: Option<&UnstakeRequest>,
        pool: &StakePool,
        now: i64,
    ) -> Result<Self> {
        let penalty_if_requested_now = match record.state {
            StakeState::Staked => {
                calculate_penalty(record.amount, pool.early_penalty_rate_bps, record.end_time, now)?
            }
            _ => 0,
        };
        let reward_eligible = match (record.state, request) {
            (StakeState::Staked, _) => true,
            (StakeState::UnstakeRequested, Some(request)) => request.penalty_amount == 0,
            _ => false,
        };
        let reward_if_held_to_maturity = if reward_eligible {
            calculate_reward(record.amount, &record.plan)?
        } else {
            0
        };

        Ok(Self {
            stake_index: record.index,
            state: record.state,
            is_matured: record.is_matured(now),
            seconds_to_maturity: record.end_time.saturating_sub(now).max(0),
            penalty_if_requested_now,
            reward_if_held_to_maturity,
        })
    }
}

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,
}

#[derive(Accounts)]
#[instruction(plan_index: u64)]
pub struct PlanView<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        seeds = [PLAN_SEED, stake_pool.key().as_ref(), &plan_index.to_le_bytes()],
        bump = plan.bump
    )]
    pub plan: Account<'info, Plan>,
}

#[derive(Accounts)]
#[instruction(stake_index: u64)]
pub struct StakeView<'info> {
    /// CHECK: only used as a PDA seed.
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        seeds = [
            STAKE_RECORD_SEED,
            stake_pool.key().as_ref(),
            owner.key().as_ref(),
            &stake_index.to_le_bytes()
        ],
        bump = stake_record.bump
    )]
    pub stake_record: Account<'info, StakeRecord>,
}

#[derive(Accounts)]
#[instruction(stake_index: u64)]
pub struct StakeStatusView<'info> {
    /// CHECK: only used as a PDA seed.
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    #[account(
        seeds = [
            STAKE_RECORD_SEED,
            stake_pool.key().as_ref(),
            owner.key().as_ref(),
            &stake_index.to_le_bytes()
        ],
        bump = stake_record.bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// Required once the stake has left `Staked`.
    #[account(
        constraint = unstake_request.pool == stake_pool.key() @ StakingError::PoolMismatch,
        constraint = unstake_request.owner == owner.key() @ StakingError::Unauthorized,
        constraint = unstake_request.stake_index == stake_index @ StakingError::InvalidStakeIndex
    )]
    pub unstake_request: Option<Account<'info, UnstakeRequest>>,
}

#[derive(Accounts)]
#[instruction(stake_index: u64)]
pub struct UnstakeRequestView<'info> {
    /// CHECK: only used as a PDA seed.
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

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
}

pub fn get_pool_info_handler(ctx: Context<PoolView>) -> Result<PoolInfo> {
    Ok(PoolInfo::from(&*ctx.accounts.stake_pool))
}

pub fn get_plan_info_handler(ctx: Context<PlanView>, plan_index: u64) -> Result<PlanTerms> {
    require!(
        plan_index < ctx.accounts.stake_pool.plan_count,
        StakingError::InvalidPlanIndex
    );
    Ok(ctx.accounts.plan.terms)
}

pub fn get_stake_info_handler(ctx: Context<StakeView>, _stake_index: u64) -> Result<StakeInfo> {
    Ok(StakeInfo::from(&*ctx.accounts.stake_record))
}

pub fn get_stake_status_handler(
    ctx: Context<StakeStatusView>,
    _stake_index: u64,
) -> Result<StakeStatus> {
    let record = &ctx.accounts.stake_record;
    let request = ctx.accounts.unstake_request.as_deref();
    require!(
        record.state != StakeState::UnstakeRequested || request.is_some(),
        StakingError::InvalidStakePeriod
    );

    let clock = Clock::get()?;
    StakeStatus::at(record, request, &ctx.accounts.stake_pool, clock.unix_timestamp)
}

pub fn get_unstake_request_info_handler(
    ctx: Context<UnstakeRequestView>,
    _stake_index: u64,
) -> Result<UnstakeRequestInfo> {
    let request = &ctx.accounts.unstake_request;
    Ok(UnstakeRequestInfo {
        owner: request.owner,
        stake_index: request.stake_index,
        request_time: request.request_time,
        penalty_amount: request.penalty_amount,
        unlocks_at: request.unlocks_at(ctx.accounts.stake_pool.unstake_delay)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::stake_pool::tests::test_pool;
    use crate::state::stake_record::tests::{blank_record, blank_request};
    use crate::state::PoolParams;

    #[test]
    fn status_of_fresh_stake() {
        let pool = test_pool(PoolParams::default());
        let mut record = blank_record();
        record
            .open(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                2,
                10_000_000,
                PlanTerms::new(0, SECONDS_PER_YEAR, 500, true),
                100,
                255,
            )
            .unwrap();

        let status = StakeStatus::at(&record, None, &pool, 100).unwrap();

        assert_eq!(status.stake_index, 2);
        assert_eq!(status.state, StakeState::Staked);
        assert!(!status.is_matured);
        assert_eq!(status.seconds_to_maturity, SECONDS_PER_YEAR as i64);
        // default 5% early penalty
        assert_eq!(status.penalty_if_requested_now, 500_000);
        assert_eq!(status.reward_if_held_to_maturity, 500_000);
    }

    #[test]
    fn status_after_request_and_withdrawal() {
        let pool = test_pool(PoolParams::default());
        let mut record = blank_record();
        record
            .open(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                0,
                10_000,
                PlanTerms::new(0, 100, 500, true),
                0,
                255,
            )
            .unwrap();
        let mut request = blank_request();
        record.request_unstake(&mut request, 500, 150, 254).unwrap();

        let requested = StakeStatus::at(&record, Some(&request), &pool, 150).unwrap();
        assert!(requested.is_matured);
        assert_eq!(requested.seconds_to_maturity, 0);
        assert_eq!(requested.penalty_if_requested_now, 0);
        // matured request without penalty still collects the floor reward
        assert_eq!(requested.reward_if_held_to_maturity, MIN_REWARD);

        record.mark_withdrawn().unwrap();
        let withdrawn = StakeStatus::at(&record, Some(&request), &pool, 200).unwrap();
        assert_eq!(withdrawn.state, StakeState::Withdrawn);
        assert_eq!(withdrawn.reward_if_held_to_maturity, 0);
    }

    #[test]
    fn early_request_shows_no_reward_after_maturity() {
        let pool = test_pool(PoolParams::default());
        let mut record = blank_record();
        record
            .open(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                0,
                10_000_000_000_000,
                PlanTerms::new(0, 90 * SECONDS_PER_DAY, 500, true),
                0,
                255,
            )
            .unwrap();
        let mut request = blank_request();
        let penalty = record.request_unstake(&mut request, 500, 0, 254).unwrap();
        assert_eq!(penalty, 500_000_000_000);

        let status = StakeStatus::at(&record, Some(&request), &pool, 7_776_000).unwrap();

        assert!(status.is_matured);
        assert_eq!(status.reward_if_held_to_maturity, 0);
        let settlement = record.prepare_withdrawal(&request, 0, 7_776_000).unwrap();
        assert_eq!(settlement.reward, status.reward_if_held_to_maturity);
    }

    #[test]
    fn pool_info_mirrors_pool() {
        let mut pool = test_pool(PoolParams::default());
        pool.total_staked = 42;
        pool.emergency_mode = true;

        let info = PoolInfo::from(&pool);

        assert_eq!(info.total_staked, 42);
        assert!(info.emergency_mode);
        assert_eq!(info.schema_version, CURRENT_VERSION);
        assert_eq!(info.unstake_delay, DEFAULT_UNSTAKE_DELAY);
    }
}
