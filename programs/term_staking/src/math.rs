//! Reward and penalty calculator.
//!
//! Pure functions over a stake's amount, its plan snapshot and the current
//! time. Nothing here touches accounts, so the same code backs both the
//! instruction handlers and the read-only status view.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::PlanTerms;

/// Early-exit penalty owed when an unstake is requested at `now`.
///
/// `floor(amount * penalty_rate_bps / 10000)` before `end_time`, zero at or
/// after maturity.
pub fn calculate_penalty(
    amount: u64,
    penalty_rate_bps: u64,
    end_time: i64,
    now: i64,
) -> Result<u64> {
    if now >= end_time {
        return Ok(0);
    }

    let penalty = (amount as u128)
        .checked_mul(penalty_rate_bps as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_div(BASIS_POINTS_DENOMINATOR as u128)
        .ok_or(StakingError::MathOverflow)?;

    u64::try_from(penalty).map_err(|_| error!(StakingError::MathOverflow))
}

/// Reward paid for a stake withdrawn after maturity without penalty.
///
/// The amount is scaled down first and the plan duration is expressed in
/// whole years:
///
/// `reward = (amount / 10000) * apy_bps * (duration / SECONDS_PER_YEAR)`
///
/// Both divisions truncate, so any plan shorter than a full year yields zero
/// from the formula and falls through to the `MIN_REWARD` floor.
pub fn calculate_reward(amount: u64, plan: &PlanTerms) -> Result<u64> {
    let scaled_amount = amount / REWARD_SCALE;
    let whole_years = plan.duration / SECONDS_PER_YEAR;

    let reward = (scaled_amount as u128)
        .checked_mul(plan.apy_bps as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(whole_years as u128)
        .ok_or(StakingError::MathOverflow)?;

    let reward = u64::try_from(reward).map_err(|_| error!(StakingError::MathOverflow))?;

    if reward == 0 && amount > 0 && plan.apy_bps > 0 {
        return Ok(MIN_REWARD);
    }

    Ok(reward)
}

/// `start + duration` as a unix timestamp.
pub fn checked_end_time(start_time: i64, duration: u64) -> Result<i64> {
    let duration = i64::try_from(duration).map_err(|_| error!(StakingError::MathOverflow))?;
    start_time
        .checked_add(duration)
        .ok_or_else(|| error!(StakingError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = SECONDS_PER_DAY;

    fn plan(duration: u64, apy_bps: u64) -> PlanTerms {
        PlanTerms {
            index: 0,
            duration,
            apy_bps,
            active: true,
            min_amount: 0,
            max_amount: u64::MAX,
        }
    }

    #[test]
    fn penalty_before_maturity_is_floor_of_rate() {
        assert_eq!(calculate_penalty(10_000, 500, 100, 0).unwrap(), 500);
        assert_eq!(calculate_penalty(19_999, 500, 100, 99).unwrap(), 999);
        assert_eq!(calculate_penalty(1, 500, 100, 0).unwrap(), 0);
    }

    #[test]
    fn penalty_is_zero_at_and_after_maturity() {
        assert_eq!(calculate_penalty(10_000, 500, 100, 100).unwrap(), 0);
        assert_eq!(calculate_penalty(10_000, 500, 100, 101).unwrap(), 0);
    }

    #[test]
    fn penalty_handles_large_amounts() {
        let amount = u64::MAX;
        let penalty = calculate_penalty(amount, 10_000, 1, 0).unwrap();
        assert_eq!(penalty, amount);
    }

    #[test]
    fn sub_year_plan_collapses_to_floor() {
        let ninety_days = plan(90 * DAY, 500);
        assert_eq!(
            calculate_reward(10_000_000_000_000, &ninety_days).unwrap(),
            MIN_REWARD
        );

        let almost_a_year = plan(SECONDS_PER_YEAR - 1, 5_000);
        assert_eq!(calculate_reward(u64::MAX, &almost_a_year).unwrap(), MIN_REWARD);
    }

    #[test]
    fn multi_year_plan_scales_with_whole_years() {
        let one_year = plan(SECONDS_PER_YEAR, 500);
        // (10_000_000 / 10_000) * 500 * 1
        assert_eq!(calculate_reward(10_000_000, &one_year).unwrap(), 500_000);

        let two_and_a_half_years = plan(SECONDS_PER_YEAR * 5 / 2, 500);
        // whole years truncate to 2
        assert_eq!(
            calculate_reward(10_000_000, &two_and_a_half_years).unwrap(),
            1_000_000
        );
    }

    #[test]
    fn no_floor_without_amount_or_rate() {
        assert_eq!(calculate_reward(0, &plan(90 * DAY, 500)).unwrap(), 0);
        assert_eq!(calculate_reward(10_000_000, &plan(SECONDS_PER_YEAR, 0)).unwrap(), 0);
    }

    #[test]
    fn amount_below_scale_gets_floor() {
        assert_eq!(
            calculate_reward(REWARD_SCALE - 1, &plan(SECONDS_PER_YEAR, 500)).unwrap(),
            MIN_REWARD
        );
    }

    #[test]
    fn reward_overflow_is_reported() {
        let long_plan = plan(u64::MAX, u64::MAX);
        assert_eq!(
            calculate_reward(u64::MAX, &long_plan).unwrap_err(),
            error!(StakingError::MathOverflow)
        );
    }

    #[test]
    fn end_time_is_start_plus_duration() {
        assert_eq!(checked_end_time(0, 90 * DAY).unwrap(), 7_776_000);
        assert!(checked_end_time(i64::MAX, 1).is_err());
        assert!(checked_end_time(0, u64::MAX).is_err());
    }
}
