//! Events emitted by the pool for external consumers.
//!
//! The mutating operations return the event they produced instead of pushing it into a sink;
//! embedders decide whether to log, index, or broadcast them.

use collation_pool_primitives::types::{AccountId, Balance};
use serde::{Deserialize, Serialize};

/// An observable effect of a successful pool operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    /// A member's deposit was credited to the share ledger.
    Deposit {
        /// The member whose shares increased.
        member: AccountId,
        /// The deposited amount, equal to the shares credited.
        amount: Balance,
    },

    /// A member exited the pool and was paid out.
    Withdrawal {
        /// The member whose shares were zeroed.
        member: AccountId,
        /// The address the payout was sent to.
        payout_address: AccountId,
        /// The amount paid out, including the member's pro-rata rewards.
        amount: Balance,
    },
}
