use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Per-owner index counter for a pool.
///
/// `stake_count` is both the number of stakes the owner ever created and the
/// index the next one receives. Indices are never reused.
#[account]
pub struct StakerLedger {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub stake_count: u64,
    pub bump: u8,
}

impl StakerLedger {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 1;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Binds a freshly created ledger. No-op when already bound.
    pub fn ensure_initialized(&mut self, pool: Pubkey, owner: Pubkey, bump: u8) {
        if self.is_initialized() {
            return;
        }
        self.pool = pool;
        self.owner = owner;
        self.stake_count = 0;
        self.bump = bump;
    }

    /// Hands out the next sequential index.
    pub fn claim_next_index(&mut self) -> Result<u64> {
        let index = self.stake_count;
        self.stake_count = index.checked_add(1).ok_or(StakingError::MathOverflow)?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> StakerLedger {
        StakerLedger {
            pool: Pubkey::default(),
            owner: Pubkey::default(),
            stake_count: 0,
            bump: 0,
        }
    }

    #[test]
    fn indices_are_sequential() {
        let mut ledger = empty();
        ledger.ensure_initialized(Pubkey::new_unique(), Pubkey::new_unique(), 254);

        assert_eq!(ledger.claim_next_index().unwrap(), 0);
        assert_eq!(ledger.claim_next_index().unwrap(), 1);
        assert_eq!(ledger.claim_next_index().unwrap(), 2);
        assert_eq!(ledger.stake_count, 3);
    }

    #[test]
    fn reinitializing_keeps_the_counter() {
        let owner = Pubkey::new_unique();
        let mut ledger = empty();
        ledger.ensure_initialized(Pubkey::new_unique(), owner, 254);
        ledger.claim_next_index().unwrap();

        ledger.ensure_initialized(Pubkey::new_unique(), Pubkey::new_unique(), 1);

        assert_eq!(ledger.owner, owner);
        assert_eq!(ledger.stake_count, 1);
        assert_eq!(ledger.bump, 254);
    }
}
