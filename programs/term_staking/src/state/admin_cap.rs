use anchor_lang::prelude::*;

/// Capability granting admin rights over exactly one pool.
///
/// The pool stores the capability's address; the capability stores the pool.
/// A signer is admin when it is the `holder` of the capability bound both ways
/// to the pool it presents.
#[account]
pub struct AdminCap {
    pub pool: Pubkey,
    pub holder: Pubkey,
    pub bump: u8,
}

impl AdminCap {
    pub const LEN: usize = 8 + 32 + 32 + 1;

    pub fn is_held_by(&self, signer: &Pubkey) -> bool {
        self.holder == *signer
    }

    /// `cap_key` is this capability's own address.
    pub fn is_bound_to(
        &self,
        cap_key: &Pubkey,
        pool_key: &Pubkey,
        pool_admin_cap: &Pubkey,
    ) -> bool {
        self.pool == *pool_key && cap_key == pool_admin_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_requires_both_directions() {
        let pool = Pubkey::new_unique();
        let cap_key = Pubkey::new_unique();
        let cap = AdminCap {
            pool,
            holder: Pubkey::new_unique(),
            bump: 255,
        };

        assert!(cap.is_bound_to(&cap_key, &pool, &cap_key));
        // a capability minted for another pool
        assert!(!cap.is_bound_to(&cap_key, &Pubkey::new_unique(), &cap_key));
        // the pool trusts a different capability
        assert!(!cap.is_bound_to(&cap_key, &pool, &Pubkey::new_unique()));
    }

    #[test]
    fn only_holder_may_use_it() {
        let holder = Pubkey::new_unique();
        let cap = AdminCap {
            pool: Pubkey::new_unique(),
            holder,
            bump: 255,
        };

        assert!(cap.is_held_by(&holder));
        assert!(!cap.is_held_by(&Pubkey::new_unique()));
    }
}
