//! Types for the pool parameters.

use collation_pool_primitives::types::Balance;
use serde::{Deserialize, Serialize};

use crate::default::{CANDIDATE_DELEGATION_COUNT, DELEGATION_COUNT, MIN_ACTIVATION};

/// The pool parameters that are fixed at deployment and do not change during any state
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolParams {
    /// The minimum total of member deposits required before the pool places its delegation.
    ///
    /// Below this threshold the pool stays in the collecting state regardless of deposits.
    pub min_activation: Balance,

    /// Upper-bound hint for the number of delegations the target collator already has.
    ///
    /// Passed through to the staking system's `delegate` call.
    pub candidate_delegation_count: u32,

    /// Upper-bound hint for the number of delegations the pool account itself holds.
    ///
    /// Passed through to the staking system's `delegate` call.
    pub delegation_count: u32,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            min_activation: MIN_ACTIVATION,
            candidate_delegation_count: CANDIDATE_DELEGATION_COUNT,
            delegation_count: DELEGATION_COUNT,
        }
    }
}
