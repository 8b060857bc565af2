//! State structures for the Term Staking program.
//!
//! This module defines all account structures used to store program state.

pub mod admin_cap;
pub mod plan;
pub mod stake_pool;
pub mod stake_record;
pub mod staker_ledger;
pub mod unstake_request;

pub use admin_cap::*;
pub use plan::*;
pub use stake_pool::*;
pub use stake_record::*;
pub use staker_ledger::*;
pub use unstake_request::*;
