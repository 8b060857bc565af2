//! Error types for the Term Staking program.
//!
//! This module defines all custom error codes that can be returned by the program.
//! Each error has a unique code and descriptive message. Codes are assigned
//! sequentially from Anchor's custom error offset, so new variants go at the
//! end of the enum.

use anchor_lang::prelude::*;

/// Custom error codes for the Term Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors ==========

    /// Cannot stake, fund or withdraw a zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// Amount falls outside the allowed bounds for this operation.
    #[msg("Amount is outside the allowed range")]
    InvalidAmount,

    /// Plan index is beyond the end of the plan registry.
    #[msg("Invalid plan index")]
    InvalidPlanIndex,

    /// The plan exists but no longer accepts new stakes.
    #[msg("Plan is not active")]
    PlanNotActive,

    /// Stake index is beyond the owner's stake count.
    #[msg("Invalid stake index")]
    InvalidStakeIndex,

    /// Minimum stake amount exceeds the maximum.
    #[msg("Minimum stake amount must not exceed the maximum")]
    InvalidStakeLimits,

    /// Penalty rate above 10000 basis points.
    #[msg("Penalty rate exceeds 10000 basis points")]
    InvalidPenaltyRate,

    /// Unstake delay must not be negative.
    #[msg("Unstake delay must not be negative")]
    InvalidUnstakeDelay,

    // ========== Stake Lifecycle Errors ==========

    /// No stake ledger exists for this owner.
    #[msg("Staker not found")]
    StakerNotFound,

    /// The stake is not in the state this transition requires.
    #[msg("Stake is not in the required state for this operation")]
    InvalidStakePeriod,

    /// The mandatory wait after the unstake request has not elapsed.
    #[msg("Unstake delay has not elapsed")]
    UnstakeDelayNotMet,

    /// The owner already holds the maximum number of stakes.
    #[msg("Maximum number of stakes per owner reached")]
    MaxStakesReached,

    // ========== Pool State/Balance Errors ==========

    /// Pool is paused.
    #[msg("Pool is paused")]
    PoolPaused,

    /// Pool is in emergency mode.
    #[msg("Pool is in emergency mode")]
    EmergencyModeActive,

    /// The operation requires emergency mode.
    #[msg("Pool is not in emergency mode")]
    NotInEmergencyMode,

    /// Reward balance cannot cover the payout.
    #[msg("Insufficient reward pool balance")]
    InsufficientRewardPool,

    /// Staked total would exceed the pool balance limit.
    #[msg("Pool balance limit exceeded")]
    PoolLimitExceeded,

    /// Staking balance cannot cover the withdrawal.
    #[msg("Insufficient staking balance")]
    InsufficientStakingBalance,

    // ========== Math/Overflow Errors ==========

    /// Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// Arithmetic underflow occurred during calculation.
    #[msg("Arithmetic underflow occurred during calculation")]
    MathUnderflow,

    // ========== Authorization and Version Errors ==========

    /// Signer does not hold the admin capability or stake.
    #[msg("Unauthorized")]
    Unauthorized,

    /// Admin capability is bound to a different pool.
    #[msg("Admin capability does not belong to this pool")]
    WrongAdmin,

    /// Pool schema version differs from the program version.
    #[msg("Pool schema version mismatch")]
    VersionMismatch,

    /// Pool is already at the current schema version.
    #[msg("Pool is already at the current schema version")]
    AlreadyMigrated,

    // ========== Account Validation Errors ==========

    /// The provided mint does not match the pool's staking token.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// The provided vault does not match the pool's staking vault.
    #[msg("Staking vault address mismatch")]
    VaultMismatch,

    /// The provided vault does not match the pool's reward vault.
    #[msg("Reward vault address mismatch")]
    RewardVaultMismatch,

    /// Account does not belong to this pool.
    #[msg("Account does not belong to this pool")]
    PoolMismatch,

    /// Token account owner does not match the expected wallet.
    #[msg("Token account owner mismatch")]
    TokenOwnerMismatch,
}
