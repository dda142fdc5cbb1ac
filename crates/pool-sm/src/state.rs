//! The states for the Pool State Machine.
//!
//! A pool moves through four states: it collects deposits until the activation threshold is
//! met, stakes the collected funds as one delegation, revokes that delegation through the
//! staking system's delay-gated exit protocol, and finally holds the returned funds for member
//! withdrawals. A reset returns a revoked (or collecting) pool to the start of the cycle
//! without touching the share ledger.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The lifecycle state of the pool's collective delegation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolState {
    /// Accumulating member deposits; no delegation is placed yet.
    #[default]
    Collecting,

    /// The pool's full custody balance is delegated to the target collator.
    Staking,

    /// A revoke of the delegation has been scheduled and its exit delay may not have elapsed.
    Revoking,

    /// The delegation has been fully revoked; custody holds principal plus accrued rewards.
    Revoked,
}

impl PoolState {
    /// Returns whether deposits are accepted in this state.
    ///
    /// Deposits accumulate while collecting and bond onto the live delegation while staking.
    /// They are rejected during and after a revoke, since a new deposit would otherwise be
    /// paid out as if it had earned the pool's rewards.
    pub const fn accepts_deposits(&self) -> bool {
        matches!(self, PoolState::Collecting | PoolState::Staking)
    }

    /// Returns whether the delegation target may be reassigned in this state.
    pub const fn allows_target_change(&self) -> bool {
        matches!(self, PoolState::Collecting | PoolState::Revoked)
    }

    /// Returns whether the external staking system should report the pool as a delegator in
    /// this state.
    ///
    /// [`PoolState::Revoking`] is deliberately absent: while a revoke is pending the
    /// delegator status flips asynchronously, so neither answer is inconsistent.
    pub const fn expects_delegator_status(&self) -> Option<bool> {
        match self {
            PoolState::Collecting | PoolState::Revoked => Some(false),
            PoolState::Staking => Some(true),
            PoolState::Revoking => None,
        }
    }
}

impl Display for PoolState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state_str = match self {
            PoolState::Collecting => "Collecting",
            PoolState::Staking => "Staking",
            PoolState::Revoking => "Revoking",
            PoolState::Revoked => "Revoked",
        };
        write!(f, "{}", state_str)
    }
}
