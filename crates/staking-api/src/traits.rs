//! The external service traits consumed by the pool state machine.

use collation_pool_primitives::types::{AccountId, Balance, CollatorId};

use crate::errors::StakingClientError;

/// Interface to the chain's collator-staking system.
///
/// Mirrors the staking surface the chain exposes to contracts: a delegation is placed with
/// [`delegate`](ParachainStaking::delegate), topped up with
/// [`delegator_bond_more`](ParachainStaking::delegator_bond_more), and exited through the
/// two-step revoke protocol. A scheduled revoke only becomes executable after an opaque delay
/// owned entirely by the staking system; until then
/// [`execute_delegation_request`](ParachainStaking::execute_delegation_request) reverts or
/// no-ops, and [`is_delegator`](ParachainStaking::is_delegator) keeps reporting the delegation
/// as live.
pub trait ParachainStaking {
    /// Returns whether `account` currently holds any live delegation.
    fn is_delegator(&self, account: &AccountId) -> Result<bool, StakingClientError>;

    /// Places a new delegation of `amount` toward `candidate`.
    ///
    /// `candidate_delegation_count` and `delegation_count` are the upper-bound hints the staking
    /// system requires for weighing the call: the former bounds the candidate's current
    /// delegation queue, the latter bounds the delegator's own.
    fn delegate(
        &mut self,
        candidate: &CollatorId,
        amount: Balance,
        candidate_delegation_count: u32,
        delegation_count: u32,
    ) -> Result<(), StakingClientError>;

    /// Increases the caller's existing delegation toward `candidate` by `more`.
    fn delegator_bond_more(
        &mut self,
        candidate: &CollatorId,
        more: Balance,
    ) -> Result<(), StakingClientError>;

    /// Schedules the revocation of the delegation toward `candidate`.
    ///
    /// The revoke only becomes executable after the staking system's exit delay has elapsed.
    fn schedule_revoke_delegation(
        &mut self,
        candidate: &CollatorId,
    ) -> Result<(), StakingClientError>;

    /// Executes a previously scheduled revoke of `delegator`'s delegation toward `candidate`.
    ///
    /// Reverts while the exit delay has not elapsed. Callers must treat a revert here as a
    /// retryable condition and consult [`is_delegator`](ParachainStaking::is_delegator) for the
    /// authoritative outcome.
    fn execute_delegation_request(
        &mut self,
        delegator: &AccountId,
        candidate: &CollatorId,
    ) -> Result<(), StakingClientError>;
}

/// Custody of the pool's own free (unstaked) funds.
///
/// The pool never caches its custody balance; every payout computation reads it fresh through
/// this trait so that accrued rewards returned by the staking system are always included.
pub trait Custody {
    /// Returns the free balance held by `account`.
    fn free_balance(&self, account: &AccountId) -> Result<Balance, StakingClientError>;

    /// Transfers `amount` of free funds to `to`.
    fn transfer(&mut self, to: &AccountId, amount: Balance) -> Result<(), StakingClientError>;
}
