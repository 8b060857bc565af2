use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Pending withdrawal for one stake.
///
/// Written once when the stake leaves `Staked` and never modified afterwards;
/// the PDA is derived from the stake index, so a second request for the same
/// stake cannot be created.
#[account]
pub struct UnstakeRequest {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub stake_index: u64,
    pub request_time: i64,
    /// Principal forfeited, fixed at request time.
    pub penalty_amount: u64,
    pub bump: u8,
}

impl UnstakeRequest {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 1;

    /// Earliest timestamp at which the withdrawal may be processed.
    pub fn unlocks_at(&self, unstake_delay: i64) -> Result<i64> {
        self.request_time
            .checked_add(unstake_delay)
            .ok_or_else(|| error!(StakingError::MathOverflow))
    }
}
