use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{PlanTerms, Settlement, StakeRecord, StakerLedger, UnstakeRequest};

#[account]
pub struct StakePool {
    pub schema_version: u8,
    /// Address of the `AdminCap` bound to this pool.
    pub admin_cap: Pubkey,
    pub staking_mint: Pubkey,
    pub staking_vault: Pubkey,
    pub reward_vault: Pubkey,

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

    pub last_updated: i64,
    pub created_at: i64,

    pub staking_vault_bump: u8,
    pub reward_vault_bump: u8,
    pub bump: u8,
}

/// Runtime parameters supplied at pool creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolParams {
    pub unstake_delay: i64,
    pub early_penalty_rate_bps: u64,
    pub min_stake_amount: u64,
    pub max_stake_amount: u64,
    pub max_pool_balance: u64,
    pub max_stakes_per_owner: u64,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            unstake_delay: DEFAULT_UNSTAKE_DELAY,
            early_penalty_rate_bps: DEFAULT_EARLY_PENALTY_BPS,
            min_stake_amount: 1,
            max_stake_amount: u64::MAX,
            max_pool_balance: u64::MAX,
            max_stakes_per_owner: DEFAULT_MAX_STAKES_PER_OWNER,
        }
    }
}

impl StakePool {
    pub const LEN: usize = 8
        + 1
        + (32 * 4)
        + (8 * 4)
        + (8 * 6)
        + 2
        + (8 * 2)
        + 3;

    /// Applies creation parameters; vault and mint bindings are set by the
    /// caller.
    pub fn configure(&mut self, params: &PoolParams, admin_cap: Pubkey, now: i64) -> Result<()> {
        require!(
            params.min_stake_amount <= params.max_stake_amount,
            StakingError::InvalidStakeLimits
        );
        require!(
            params.early_penalty_rate_bps <= BASIS_POINTS_DENOMINATOR,
            StakingError::InvalidPenaltyRate
        );
        require!(params.unstake_delay >= 0, StakingError::InvalidUnstakeDelay);
        require!(params.max_stakes_per_owner > 0, StakingError::InvalidAmount);

        self.schema_version = CURRENT_VERSION;
        self.admin_cap = admin_cap;
        self.staking_balance = 0;
        self.reward_balance = 0;
        self.total_staked = 0;
        self.plan_count = 0;
        self.unstake_delay = params.unstake_delay;
        self.early_penalty_rate_bps = params.early_penalty_rate_bps;
        self.min_stake_amount = params.min_stake_amount;
        self.max_stake_amount = params.max_stake_amount;
        self.max_pool_balance = params.max_pool_balance;
        self.max_stakes_per_owner = params.max_stakes_per_owner;
        self.paused = false;
        self.emergency_mode = false;
        self.created_at = now;
        self.last_updated = now;
        Ok(())
    }

    pub fn assert_current_version(&self) -> Result<()> {
        require!(
            self.schema_version == CURRENT_VERSION,
            StakingError::VersionMismatch
        );
        Ok(())
    }

    // ========== Plan registry ==========

    /// Reserves the next plan index and returns the terms to store under it.
    pub fn register_plan(
        &mut self,
        duration: u64,
        apy_bps: u64,
        active: bool,
        now: i64,
    ) -> Result<PlanTerms> {
        self.assert_current_version()?;

        let index = self.plan_count;
        self.plan_count = index.checked_add(1).ok_or(StakingError::MathOverflow)?;
        self.last_updated = now;
        Ok(PlanTerms::new(index, duration, apy_bps, active))
    }

    pub fn update_plan(
        &mut self,
        plan: &mut PlanTerms,
        apy_bps: u64,
        active: bool,
        min_amount: u64,
        max_amount: u64,
        now: i64,
    ) -> Result<()> {
        self.assert_current_version()?;
        require!(plan.index < self.plan_count, StakingError::InvalidPlanIndex);

        plan.update(apy_bps, active, min_amount, max_amount)?;
        self.last_updated = now;
        Ok(())
    }

    // ========== Stake lifecycle ==========

    /// Inclusive amount range a new stake on `plan` must fall in.
    pub fn stake_bounds(&self, plan: &PlanTerms) -> (u64, u64) {
        (
            self.min_stake_amount.max(plan.min_amount),
            self.max_stake_amount.min(plan.max_amount),
        )
    }

    /// Checks every precondition for a new stake, in order, without mutating.
    pub fn validate_new_stake(
        &self,
        plan: &PlanTerms,
        amount: u64,
        owner_stake_count: u64,
    ) -> Result<()> {
        require!(!self.paused, StakingError::PoolPaused);
        require!(!self.emergency_mode, StakingError::EmergencyModeActive);
        self.assert_current_version()?;
        require!(amount > 0, StakingError::ZeroAmount);
        require!(plan.index < self.plan_count, StakingError::InvalidPlanIndex);
        require!(plan.active, StakingError::PlanNotActive);

        let (min, max) = self.stake_bounds(plan);
        require!(amount >= min && amount <= max, StakingError::InvalidAmount);

        let new_total = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        require!(
            new_total <= self.max_pool_balance,
            StakingError::PoolLimitExceeded
        );
        require!(
            owner_stake_count < self.max_stakes_per_owner,
            StakingError::MaxStakesReached
        );
        Ok(())
    }

    /// Validates and books a new stake into `record`. Returns its index.
    ///
    /// The token transfer into the staking vault is the caller's job.
    #[allow(clippy::too_many_arguments)]
    pub fn open_stake(
        &mut self,
        ledger: &mut StakerLedger,
        record: &mut StakeRecord,
        plan: &PlanTerms,
        amount: u64,
        now: i64,
        record_bump: u8,
    ) -> Result<u64> {
        self.validate_new_stake(plan, amount, ledger.stake_count)?;

        let staking_balance = self
            .staking_balance
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        let index = ledger.claim_next_index()?;
        record.open(ledger.pool, ledger.owner, index, amount, *plan, now, record_bump)?;

        self.staking_balance = staking_balance;
        self.total_staked = total_staked;
        self.last_updated = now;
        Ok(index)
    }

    pub fn request_unstake(
        &self,
        ledger: &StakerLedger,
        record: &mut StakeRecord,
        request: &mut UnstakeRequest,
        now: i64,
        request_bump: u8,
    ) -> Result<u64> {
        self.assert_current_version()?;
        require!(
            ledger.is_initialized() && ledger.owner == record.owner,
            StakingError::StakerNotFound
        );
        require!(
            record.index < ledger.stake_count,
            StakingError::InvalidStakeIndex
        );

        record.request_unstake(request, self.early_penalty_rate_bps, now, request_bump)
    }

    /// Settles a requested stake. The returned settlement lists the token
    /// movements the caller must perform: `amount_returned` out of the staking
    /// vault, `reward` out of the reward vault, `penalty` from the staking
    /// vault into the reward vault.
    pub fn process_unstake(
        &mut self,
        record: &mut StakeRecord,
        request: &UnstakeRequest,
        now: i64,
    ) -> Result<Settlement> {
        self.assert_current_version()?;
        require!(!self.paused, StakingError::PoolPaused);

        let settlement = record.prepare_withdrawal(request, self.unstake_delay, now)?;

        require!(
            self.reward_balance >= settlement.reward,
            StakingError::InsufficientRewardPool
        );
        require!(settlement.amount_returned > 0, StakingError::InvalidAmount);

        // principal and penalty together are the full stake amount
        let staking_balance = self
            .staking_balance
            .checked_sub(record.amount)
            .ok_or(StakingError::InsufficientStakingBalance)?;
        let total_staked = self
            .total_staked
            .checked_sub(record.amount)
            .ok_or(StakingError::MathUnderflow)?;
        let reward_balance = self
            .reward_balance
            .checked_sub(settlement.reward)
            .ok_or(StakingError::InsufficientRewardPool)?
            .checked_add(settlement.penalty)
            .ok_or(StakingError::MathOverflow)?;

        record.mark_withdrawn()?;

        self.staking_balance = staking_balance;
        self.total_staked = total_staked;
        self.reward_balance = reward_balance;
        self.last_updated = now;
        Ok(settlement)
    }

    // ========== Limits ==========

    pub fn set_pool_limits(
        &mut self,
        unstake_delay: i64,
        early_penalty_rate_bps: u64,
        now: i64,
    ) -> Result<()> {
        self.assert_current_version()?;
        require!(unstake_delay >= 0, StakingError::InvalidUnstakeDelay);
        require!(
            early_penalty_rate_bps <= BASIS_POINTS_DENOMINATOR,
            StakingError::InvalidPenaltyRate
        );

        self.unstake_delay = unstake_delay;
        self.early_penalty_rate_bps = early_penalty_rate_bps;
        self.last_updated = now;
        Ok(())
    }

    pub fn set_stake_limits(&mut self, min: u64, max: u64, now: i64) -> Result<()> {
        self.assert_current_version()?;
        require!(min <= max, StakingError::InvalidStakeLimits);

        self.min_stake_amount = min;
        self.max_stake_amount = max;
        self.last_updated = now;
        Ok(())
    }

    pub fn set_pool_balance_limit(&mut self, new_max: u64, now: i64) -> Result<()> {
        self.assert_current_version()?;
        require!(
            new_max >= self.total_staked,
            StakingError::PoolLimitExceeded
        );

        self.max_pool_balance = new_max;
        self.last_updated = now;
        Ok(())
    }

    pub fn set_max_stakes_per_owner(&mut self, new_max: u64, now: i64) -> Result<()> {
        self.assert_current_version()?;
        require!(new_max > 0, StakingError::InvalidAmount);

        self.max_stakes_per_owner = new_max;
        self.last_updated = now;
        Ok(())
    }

    // ========== Pause and emergency ==========

    pub fn set_paused(&mut self, paused: bool, now: i64) -> Result<()> {
        self.assert_current_version()?;
        if !paused {
            require!(!self.emergency_mode, StakingError::EmergencyModeActive);
        }

        self.paused = paused;
        self.last_updated = now;
        Ok(())
    }

    pub fn enter_emergency(&mut self, now: i64) -> Result<()> {
        self.assert_current_version()?;

        self.emergency_mode = true;
        self.paused = true;
        self.last_updated = now;
        Ok(())
    }

    pub fn resume_from_emergency(&mut self, now: i64) -> Result<()> {
        self.assert_current_version()?;
        require!(self.emergency_mode, StakingError::NotInEmergencyMode);

        self.emergency_mode = false;
        self.paused = false;
        self.last_updated = now;
        Ok(())
    }

    /// Takes tokens straight out of the staking balance.
    ///
    /// Stake records and `total_staked` are left as they are, so afterwards
    /// the staking balance may no longer cover the stakes it backs.
    pub fn emergency_withdraw(&mut self, amount: u64, now: i64) -> Result<()> {
        self.assert_current_version()?;
        require!(self.emergency_mode, StakingError::NotInEmergencyMode);
        require!(amount > 0, StakingError::ZeroAmount);

        self.staking_balance = self
            .staking_balance
            .checked_sub(amount)
            .ok_or(StakingError::InsufficientStakingBalance)?;
        self.last_updated = now;
        Ok(())
    }

    // ========== Reward pool ==========

    pub fn deposit_rewards(&mut self, amount: u64, now: i64) -> Result<()> {
        self.assert_current_version()?;
        require!(amount > 0, StakingError::ZeroAmount);

        self.reward_balance = self
            .reward_balance
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.last_updated = now;
        Ok(())
    }

    pub fn withdraw_rewards(&mut self, amount: u64, now: i64) -> Result<()> {
        self.assert_current_version()?;
        require!(amount > 0, StakingError::ZeroAmount);
        require!(
            self.reward_balance >= amount,
            StakingError::InsufficientRewardPool
        );

        self.reward_balance -= amount;
        self.last_updated = now;
        Ok(())
    }

    // ========== Versioning ==========

    /// Brings an older pool up to `CURRENT_VERSION`. Returns the version it
    /// was migrated from.
    pub fn migrate(&mut self, now: i64) -> Result<u8> {
        require!(
            self.schema_version < CURRENT_VERSION,
            StakingError::AlreadyMigrated
        );

        let previous = self.schema_version;
        self.schema_version = CURRENT_VERSION;
        self.last_updated = now;
        Ok(previous)
    }
}
