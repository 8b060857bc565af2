//! Program constants for the Term Staking program.
//!
//! This module defines all constant values used throughout the staking program,
//! including PDA seeds, time periods, basis-point denominators and the schema
//! version gate.

/// Seed for deriving the stake pool PDA
pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";

/// Seed for deriving the admin capability PDA
pub const ADMIN_CAP_SEED: &[u8] = b"admin_cap";

/// Seed for deriving plan PDAs
pub const PLAN_SEED: &[u8] = b"plan";

/// Seed for deriving per-owner staker ledger PDAs
pub const STAKER_LEDGER_SEED: &[u8] = b"staker_ledger";

/// Seed for deriving stake record PDAs
pub const STAKE_RECORD_SEED: &[u8] = b"stake_record";

/// Seed for deriving unstake request PDAs
pub const UNSTAKE_REQUEST_SEED: &[u8] = b"unstake_request";

/// Seed for deriving the staking vault PDA
pub const STAKING_VAULT_SEED: &[u8] = b"staking_vault";

/// Seed for deriving the reward vault PDA
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Divisor applied to the staked amount before the reward multiplication
pub const REWARD_SCALE: u64 = 10_000;

/// Smallest reward paid on an eligible withdrawal with a non-zero rate
pub const MIN_REWARD: u64 = 1;

/// Current account layout version. Pools created under an older layout must
/// be migrated before any versioned instruction accepts them.
pub const CURRENT_VERSION: u8 = 1;

/// Default unstake delay (2 days)
pub const DEFAULT_UNSTAKE_DELAY: i64 = 2 * SECONDS_PER_DAY as i64;

/// Default early-exit penalty (5% = 500 basis points)
pub const DEFAULT_EARLY_PENALTY_BPS: u64 = 500;

/// Default cap on stakes created per owner
pub const DEFAULT_MAX_STAKES_PER_OWNER: u64 = 100;
