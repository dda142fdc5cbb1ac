//! Errors related to the pool operations and state transitions.

use collation_pool_primitives::{
    roles::Role,
    types::{AccountId, Balance},
};
use collation_pool_staking_api::StakingClientError;
use thiserror::Error;

use crate::state::PoolState;

/// Errors that can occur while operating the pool.
///
/// Every error aborts the triggering operation atomically: no ledger or state mutation is
/// applied when any variant is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The caller does not hold the role the operation requires.
    #[error("account {account} does not hold the {role} role")]
    Unauthorized {
        /// The account that attempted the operation.
        account: AccountId,
        /// The role the operation requires.
        role: Role,
    },

    /// The operation is not permitted in the pool's current lifecycle state.
    #[error("operation not permitted while the pool is {state}")]
    InvalidState {
        /// The state the pool was in when the operation was attempted.
        state: PoolState,
    },

    /// A deposit of zero was attempted.
    #[error("deposit amount must be positive")]
    ZeroAmount,

    /// The pool's local state disagrees with the staking system's delegator status.
    ///
    /// This is fatal: the pool's accounting can no longer be trusted and there is no
    /// in-protocol repair path, so the operation halts loudly instead of guessing.
    #[error("pool state {state} disagrees with external delegator status ({is_delegator})")]
    InconsistentExternalState {
        /// The pool's local lifecycle state.
        state: PoolState,
        /// What the staking system reported.
        is_delegator: bool,
    },

    /// The staking system's exit delay has not elapsed yet.
    ///
    /// Recoverable: the caller retries the withdrawal later. Nothing was mutated.
    #[error("revoke is not executable yet; retry the withdrawal later")]
    RevokeNotReady,

    /// A payout was attempted while no shares are outstanding.
    #[error("payout undefined: the pool has no outstanding shares")]
    EmptyPool,

    /// The computed payout exceeds the custody's free balance.
    ///
    /// Unreachable if the accounting is correct; guarded anyway so a bookkeeping bug surfaces
    /// as a rejection instead of a failed transfer.
    #[error("computed payout {payout} exceeds free balance {free}")]
    InsufficientFreeBalance {
        /// The payout the proportional formula produced.
        payout: Balance,
        /// The custody free balance at the time of the attempt.
        free: Balance,
    },

    /// An external staking or custody call failed.
    #[error("staking client error: {0}")]
    StakingClient(#[from] StakingClientError),
}

/// Result type for all pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
