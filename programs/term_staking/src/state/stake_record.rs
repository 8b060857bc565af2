use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::math::{calculate_penalty, calculate_reward, checked_end_time};
use crate::state::{PlanTerms, UnstakeRequest};

/// Lifecycle of a stake. States only ever advance in declaration order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakeState {
    Staked,
    UnstakeRequested,
    Withdrawn,
}

/// A single locked position. Never closed; `Withdrawn` records stay as history.
#[account]
pub struct StakeRecord {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub index: u64,
    pub amount: u64,
    pub start_time: i64,
    pub end_time: i64,
    /// Plan terms as they were when the stake was opened.
    pub plan: PlanTerms,
    pub state: StakeState,
    pub bump: u8,
}

/// Token movements owed when a stake is withdrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub amount_returned: u64,
    pub reward: u64,
    pub penalty: u64,
}

impl StakeRecord {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + PlanTerms::LEN + 1 + 1;

    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        pool: Pubkey,
        owner: Pubkey,
        index: u64,
        amount: u64,
        plan: PlanTerms,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        self.end_time = checked_end_time(now, plan.duration)?;
        self.pool = pool;
        self.owner = owner;
        self.index = index;
        self.amount = amount;
        self.start_time = now;
        self.plan = plan;
        self.state = StakeState::Staked;
        self.bump = bump;
        Ok(())
    }

    pub fn is_matured(&self, now: i64) -> bool {
        now >= self.end_time
    }

    /// Counts towards `total_staked` until withdrawn.
    pub fn is_locked(&self) -> bool {
        self.state != StakeState::Withdrawn
    }

    /// Moves the stake to `UnstakeRequested` and fills in its request,
    /// snapshotting the early-exit penalty. Returns the penalty.
    pub fn request_unstake(
        &mut self,
        request: &mut UnstakeRequest,
        penalty_rate_bps: u64,
        now: i64,
        bump: u8,
    ) -> Result<u64> {
        require!(
            self.state == StakeState::Staked,
            StakingError::InvalidStakePeriod
        );

        let penalty = calculate_penalty(self.amount, penalty_rate_bps, self.end_time, now)?;

        request.pool = self.pool;
        request.owner = self.owner;
        request.stake_index = self.index;
        request.request_time = now;
        request.penalty_amount = penalty;
        request.bump = bump;

        self.state = StakeState::UnstakeRequested;
        Ok(penalty)
    }

    /// Works out what a withdrawal at `now` pays without changing anything.
    ///
    /// Reward is only owed when the stake has matured and the request carried
    /// no penalty; a request filed early forfeits reward for good.
    pub fn prepare_withdrawal(
        &self,
        request: &UnstakeRequest,
        unstake_delay: i64,
        now: i64,
    ) -> Result<Settlement> {
        require!(
            self.state == StakeState::UnstakeRequested,
            StakingError::InvalidStakePeriod
        );
        require!(
            request.stake_index == self.index && request.owner == self.owner,
            StakingError::InvalidStakeIndex
        );
        require!(
            now >= request.unlocks_at(unstake_delay)?,
            StakingError::UnstakeDelayNotMet
        );

        let penalty = request.penalty_amount;
        let reward = if self.is_matured(now) && penalty == 0 {
            calculate_reward(self.amount, &self.plan)?
        } else {
            0
        };
        let amount_returned = self
            .amount
            .checked_sub(penalty)
            .ok_or(StakingError::MathUnderflow)?;

        Ok(Settlement {
            amount_returned,
            reward,
            penalty,
        })
    }

    pub fn mark_withdrawn(&mut self) -> Result<()> {
        require!(
            self.state == StakeState::UnstakeRequested,
            StakingError::InvalidStakePeriod
        );
        self.state = StakeState::Withdrawn;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;

    pub(crate) fn blank_record() -> StakeRecord {
        StakeRecord {
            pool: Pubkey::default(),
            owner: Pubkey::default(),
            index: 0,
            amount: 0,
            start_time: 0,
            end_time: 0,
            plan: PlanTerms::new(0, 0, 0, false),
            state: StakeState::Staked,
            bump: 0,
        }
    }

    pub(crate) fn blank_request() -> UnstakeRequest {
        UnstakeRequest {
            pool: Pubkey::default(),
            owner: Pubkey::default(),
            stake_index: 0,
            request_time: 0,
            penalty_amount: 0,
            bump: 0,
        }
    }

    fn opened(amount: u64, duration: u64, now: i64) -> StakeRecord {
        let mut record = blank_record();
        record
            .open(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                4,
                amount,
                PlanTerms::new(0, duration, 500, true),
                now,
                253,
            )
            .unwrap();
        record
    }

    #[test]
    fn open_sets_term_window() {
        let record = opened(1_000, 90 * SECONDS_PER_DAY, 1_000);

        assert_eq!(record.index, 4);
        assert_eq!(record.start_time, 1_000);
        assert_eq!(record.end_time, 1_000 + 7_776_000);
        assert_eq!(record.state, StakeState::Staked);
        assert!(!record.is_matured(7_776_999));
        assert!(record.is_matured(7_777_000));
    }

    #[test]
    fn request_copies_identity_and_penalty() {
        let mut record = opened(10_000, 100, 0);
        let mut request = blank_request();

        let penalty = record.request_unstake(&mut request, 500, 10, 252).unwrap();

        assert_eq!(penalty, 500);
        assert_eq!(record.state, StakeState::UnstakeRequested);
        assert_eq!(request.owner, record.owner);
        assert_eq!(request.pool, record.pool);
        assert_eq!(request.stake_index, 4);
        assert_eq!(request.request_time, 10);
        assert_eq!(request.penalty_amount, 500);
    }

    #[test]
    fn second_request_is_rejected() {
        let mut record = opened(10_000, 100, 0);
        let mut request = blank_request();
        record.request_unstake(&mut request, 500, 10, 252).unwrap();

        let mut again = blank_request();
        assert_eq!(
            record.request_unstake(&mut again, 500, 200, 252).unwrap_err(),
            error!(StakingError::InvalidStakePeriod)
        );
        assert_eq!(request.penalty_amount, 500);
    }

    #[test]
    fn withdrawal_respects_inclusive_delay() {
        let mut record = opened(10_000, 100, 0);
        let mut request = blank_request();
        record.request_unstake(&mut request, 500, 10, 252).unwrap();

        assert_eq!(
            record.prepare_withdrawal(&request, 50, 59).unwrap_err(),
            error!(StakingError::UnstakeDelayNotMet)
        );
        assert!(record.prepare_withdrawal(&request, 50, 60).is_ok());
    }

    #[test]
    fn withdrawal_rejects_another_stakes_request() {
        let mut record = opened(10_000, 100, 0);
        let mut request = blank_request();
        record.request_unstake(&mut request, 500, 10, 252).unwrap();

        let mut other_index = request.clone();
        other_index.stake_index = record.index + 1;
        assert_eq!(
            record.prepare_withdrawal(&other_index, 0, 1_000).unwrap_err(),
            error!(StakingError::InvalidStakeIndex)
        );

        let mut other_owner = request.clone();
        other_owner.owner = Pubkey::new_unique();
        assert_eq!(
            record.prepare_withdrawal(&other_owner, 0, 1_000).unwrap_err(),
            error!(StakingError::InvalidStakeIndex)
        );

        assert_eq!(record.state, StakeState::UnstakeRequested);
        assert!(record.prepare_withdrawal(&request, 0, 1_000).is_ok());
    }

    #[test]
    fn early_request_forfeits_reward_even_after_maturity() {
        let mut record = opened(10_000, 100, 0);
        let mut request = blank_request();
        record.request_unstake(&mut request, 500, 10, 252).unwrap();

        let settlement = record.prepare_withdrawal(&request, 0, 1_000).unwrap();

        assert_eq!(
            settlement,
            Settlement {
                amount_returned: 9_500,
                reward: 0,
                penalty: 500,
            }
        );
    }

    #[test]
    fn withdrawal_of_staked_or_withdrawn_stake_fails() {
        let mut record = opened(10_000, 100, 0);
        let request = blank_request();
        assert_eq!(
            record.prepare_withdrawal(&request, 0, 1_000).unwrap_err(),
            error!(StakingError::InvalidStakePeriod)
        );

        let mut request = blank_request();
        record.request_unstake(&mut request, 500, 200, 252).unwrap();
        record.mark_withdrawn().unwrap();

        assert_eq!(
            record.prepare_withdrawal(&request, 0, 1_000).unwrap_err(),
            error!(StakingError::InvalidStakePeriod)
        );
        assert_eq!(
            record.mark_withdrawn().unwrap_err(),
            error!(StakingError::InvalidStakePeriod)
        );
    }
}
