//! Default values for the pool parameters.

use collation_pool_primitives::types::Balance;

/// Default minimum total of member deposits below which the pool keeps collecting instead of
/// delegating.
pub(crate) const MIN_ACTIVATION: Balance = 5_000_000_000_000; // 5 units at 12 decimals

/// Default hint for the number of delegations the target collator already has.
///
/// The staking system requires this as an upper-bound hint when placing a new delegation.
pub(crate) const CANDIDATE_DELEGATION_COUNT: u32 = 300;

/// Default hint for the number of delegations the pool account itself holds.
pub(crate) const DELEGATION_COUNT: u32 = 100;
