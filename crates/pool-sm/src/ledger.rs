//! The share ledger backing the pool's proportional accounting.
//!
//! One share corresponds to one currency unit deposited as principal. Shares are never
//! adjusted for rewards: a member's payout is computed against the pool's *current* custody
//! balance, so rewards distribute pro-rata by original contribution exactly because the ledger
//! only ever records principal.

use std::collections::BTreeMap;

use collation_pool_primitives::types::{AccountId, Balance};
use serde::{Deserialize, Serialize};

/// Maps each member to their contributed shares and caches the aggregate.
///
/// The cached total always equals the sum over all entries. Entries that reach zero are kept
/// in the map so that a member's history of participation stays observable and a later deposit
/// reuses the same slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLedger {
    shares: BTreeMap<AccountId, Balance>,
    total: Balance,
}

impl ShareLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `member`'s shares and to the aggregate total.
    ///
    /// `amount` must be positive; crediting zero is a caller bug.
    pub fn credit(&mut self, member: AccountId, amount: Balance) {
        debug_assert!(amount > 0, "credit amount must be positive");

        *self.shares.entry(member).or_insert(0) += amount;
        self.total += amount;
    }

    /// Zeroes `member`'s shares and subtracts the prior value from the aggregate total.
    ///
    /// Returns the prior share count. A member with no shares (or no entry at all) yields
    /// zero; that is not an error condition here, it simply produces a zero payout upstream.
    pub fn debit_all(&mut self, member: &AccountId) -> Balance {
        let prior = match self.shares.get_mut(member) {
            Some(shares) => std::mem::take(shares),
            None => 0,
        };
        self.total -= prior;

        prior
    }

    /// Returns `member`'s current share count.
    pub fn shares_of(&self, member: &AccountId) -> Balance {
        self.shares.get(member).copied().unwrap_or(0)
    }

    /// Returns the aggregate share count across all members.
    pub const fn total(&self) -> Balance {
        self.total
    }

    /// Returns whether no shares are outstanding.
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates over all ledger entries, including zeroed ones.
    pub fn entries(&self) -> impl Iterator<Item = (&AccountId, &Balance)> {
        self.shares.iter()
    }
}
