//! Instruction handlers for the Term Staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod emergency;
pub mod initialize;
pub mod plan;
pub mod process_unstake;
pub mod request_unstake;
pub mod reward_pool;
pub mod stake;
pub mod views;

pub use admin::*;
pub use emergency::*;
pub use initialize::*;
pub use plan::*;
pub use process_unstake::*;
pub use request_unstake::*;
pub use reward_pool::*;
pub use stake::*;
pub use views::*;
