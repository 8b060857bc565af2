use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Terms of a staking plan.
///
/// Stored in the registry's `Plan` account and copied by value into every
/// `StakeRecord` created against it, so later edits never reach existing
/// stakes.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanTerms {
    pub index: u64,
    /// Lock term in seconds.
    pub duration: u64,
    pub apy_bps: u64,
    pub active: bool,
    pub min_amount: u64,
    pub max_amount: u64,
}

impl PlanTerms {
    pub const LEN: usize = 8 + 8 + 8 + 1 + 8 + 8;

    /// Fresh plans carry no per-plan amount bounds.
    pub fn new(index: u64, duration: u64, apy_bps: u64, active: bool) -> Self {
        Self {
            index,
            duration,
            apy_bps,
            active,
            min_amount: 0,
            max_amount: u64::MAX,
        }
    }

    pub fn update(
        &mut self,
        apy_bps: u64,
        active: bool,
        min_amount: u64,
        max_amount: u64,
    ) -> Result<()> {
        require!(min_amount <= max_amount, StakingError::InvalidStakeLimits);

        self.apy_bps = apy_bps;
        self.active = active;
        self.min_amount = min_amount;
        self.max_amount = max_amount;
        Ok(())
    }
}

#[account]
pub struct Plan {
    pub pool: Pubkey,
    pub terms: PlanTerms,
    pub created_at: i64,
    pub last_updated: i64,
    pub bump: u8,
}

impl Plan {
    pub const LEN: usize = 8 + 32 + PlanTerms::LEN + 8 + 8 + 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_plan_is_unbounded() {
        let terms = PlanTerms::new(3, 86_400, 500, true);
        assert_eq!(terms.index, 3);
        assert_eq!(terms.min_amount, 0);
        assert_eq!(terms.max_amount, u64::MAX);
    }

    #[test]
    fn update_keeps_index_and_duration() {
        let mut terms = PlanTerms::new(1, 86_400, 500, true);
        terms.update(800, false, 10, 1_000).unwrap();

        assert_eq!(terms.index, 1);
        assert_eq!(terms.duration, 86_400);
        assert_eq!(terms.apy_bps, 800);
        assert!(!terms.active);
        assert_eq!((terms.min_amount, terms.max_amount), (10, 1_000));
    }

    #[test]
    fn update_rejects_inverted_bounds() {
        let mut terms = PlanTerms::new(0, 86_400, 500, true);
        let before = terms;

        assert_eq!(
            terms.update(800, true, 1_000, 10).unwrap_err(),
            error!(StakingError::InvalidStakeLimits)
        );
        assert_eq!(terms, before);
    }
}
