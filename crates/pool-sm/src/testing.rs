//! Testing utilities for the pool state machine.
//!
//! This module provides a deterministic in-memory stand-in for the chain ([`MockChain`])
//! implementing both [`ParachainStaking`] and [`Custody`], together with fixture accounts and
//! pool constructors. It is exposed publicly so that embedders can drive the machine in their
//! own tests without a live staking system.

use collation_pool_params::PoolParams;
use collation_pool_primitives::types::{AccountId, Balance, CollatorId};
use collation_pool_staking_api::{Custody, ParachainStaking, StakingClientError};

use crate::machine::PoolSM;

/// The pool's own custody account used by fixtures.
pub const POOL_ACCOUNT: AccountId = AccountId::new([0xaa; 20]);
/// The collator targeted by fixture pools.
pub const TARGET: CollatorId = AccountId::new([0xc0; 20]);
/// A second collator, for target-change tests.
pub const OTHER_TARGET: CollatorId = AccountId::new([0xc1; 20]);
/// Fixture admin (also a member).
pub const ALICE: AccountId = AccountId::new([0x01; 20]);
/// Fixture member.
pub const BOB: AccountId = AccountId::new([0x02; 20]);
/// Fixture member.
pub const CAROL: AccountId = AccountId::new([0x03; 20]);
/// An account holding no role at all.
pub const MALLORY: AccountId = AccountId::new([0x09; 20]);

/// Number of [`MockChain::roll_forward`] rounds before a scheduled revoke becomes executable.
pub const EXIT_DELAY_ROUNDS: u32 = 2;

/// A deterministic in-memory chain: custody balances plus a single-delegation staking system.
///
/// The mock enforces the same protocol rules the real staking system does: a delegation must
/// exist before it can be bonded onto or revoked, and an executable revoke requires both a
/// scheduled request and an elapsed exit delay. Individual calls can additionally be forced to
/// fail for atomicity tests.
#[derive(Debug, Clone)]
pub struct MockChain {
    free: Balance,
    staked: Balance,
    delegator: bool,
    revoke_pending: bool,
    delay_remaining: u32,
    transfers: Vec<(AccountId, Balance)>,

    /// Force the next `delegate` call to fail.
    pub fail_delegate: bool,
    /// Force the next `delegator_bond_more` call to fail.
    pub fail_bond_more: bool,
    /// Force the next `schedule_revoke_delegation` call to fail.
    pub fail_schedule: bool,
    /// Force the next `transfer` call to fail.
    pub fail_transfer: bool,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// Creates a chain with empty custody and no delegation.
    pub const fn new() -> Self {
        MockChain {
            free: 0,
            staked: 0,
            delegator: false,
            revoke_pending: false,
            delay_remaining: 0,
            transfers: Vec::new(),
            fail_delegate: false,
            fail_bond_more: false,
            fail_schedule: false,
            fail_transfer: false,
        }
    }

    /// Adds `amount` to the pool's free custody, like a payable deposit attaching value.
    pub fn fund(&mut self, amount: Balance) {
        self.free += amount;
    }

    /// Adds `amount` of staking rewards to the delegated position.
    pub fn accrue_rewards(&mut self, amount: Balance) {
        self.staked += amount;
    }

    /// Advances `rounds` rounds of the staking system's clock.
    pub fn roll_forward(&mut self, rounds: u32) {
        self.delay_remaining = self.delay_remaining.saturating_sub(rounds);
    }

    /// Overrides the reported delegator status, to simulate a desynchronized chain.
    pub fn force_delegator_status(&mut self, delegator: bool) {
        self.delegator = delegator;
    }

    /// The pool's current free custody balance.
    pub const fn free(&self) -> Balance {
        self.free
    }

    /// The amount currently held at the collator.
    pub const fn staked(&self) -> Balance {
        self.staked
    }

    /// All transfers executed so far, in order.
    pub fn transfers(&self) -> &[(AccountId, Balance)] {
        &self.transfers
    }
}

impl ParachainStaking for MockChain {
    fn is_delegator(&self, account: &AccountId) -> Result<bool, StakingClientError> {
        Ok(*account == POOL_ACCOUNT && self.delegator)
    }

    fn delegate(
        &mut self,
        _candidate: &CollatorId,
        amount: Balance,
        _candidate_delegation_count: u32,
        _delegation_count: u32,
    ) -> Result<(), StakingClientError> {
        if self.fail_delegate {
            return Err(StakingClientError::Revert("delegate rejected".into()));
        }
        if self.delegator {
            return Err(StakingClientError::Revert("already a delegator".into()));
        }
        if amount > self.free {
            return Err(StakingClientError::Revert("insufficient free balance".into()));
        }

        self.free -= amount;
        self.staked += amount;
        self.delegator = true;

        Ok(())
    }

    fn delegator_bond_more(
        &mut self,
        _candidate: &CollatorId,
        more: Balance,
    ) -> Result<(), StakingClientError> {
        if self.fail_bond_more {
            return Err(StakingClientError::Revert("bond more rejected".into()));
        }
        if !self.delegator {
            return Err(StakingClientError::Revert("no delegation to bond onto".into()));
        }
        if more > self.free {
            return Err(StakingClientError::Revert("insufficient free balance".into()));
        }

        self.free -= more;
        self.staked += more;

        Ok(())
    }

    fn schedule_revoke_delegation(
        &mut self,
        _candidate: &CollatorId,
    ) -> Result<(), StakingClientError> {
        if self.fail_schedule {
            return Err(StakingClientError::Revert("schedule rejected".into()));
        }
        if !self.delegator {
            return Err(StakingClientError::Revert("no delegation to revoke".into()));
        }
        if self.revoke_pending {
            return Err(StakingClientError::Revert("revoke already pending".into()));
        }

        self.revoke_pending = true;
        self.delay_remaining = EXIT_DELAY_ROUNDS;

        Ok(())
    }

    fn execute_delegation_request(
        &mut self,
        _delegator: &AccountId,
        _candidate: &CollatorId,
    ) -> Result<(), StakingClientError> {
        if !self.revoke_pending {
            return Err(StakingClientError::Revert("no pending request".into()));
        }
        if self.delay_remaining > 0 {
            return Err(StakingClientError::Revert("exit delay not elapsed".into()));
        }

        // The staked principal plus any rewards returns to free custody.
        self.free += self.staked;
        self.staked = 0;
        self.delegator = false;
        self.revoke_pending = false;

        Ok(())
    }
}

impl Custody for MockChain {
    fn free_balance(&self, account: &AccountId) -> Result<Balance, StakingClientError> {
        if *account == POOL_ACCOUNT {
            Ok(self.free)
        } else {
            Ok(0)
        }
    }

    fn transfer(&mut self, to: &AccountId, amount: Balance) -> Result<(), StakingClientError> {
        if self.fail_transfer {
            return Err(StakingClientError::Revert("transfer rejected".into()));
        }
        if amount > self.free {
            return Err(StakingClientError::Revert("insufficient free balance".into()));
        }

        self.free -= amount;
        self.transfers.push((*to, amount));

        Ok(())
    }
}

/// Creates a pool with `min_activation`, [`ALICE`] as initial admin and [`BOB`] and [`CAROL`]
/// as members, targeting [`TARGET`].
pub fn test_pool(min_activation: Balance) -> PoolSM {
    let params = PoolParams {
        min_activation,
        ..PoolParams::default()
    };
    let mut pool = PoolSM::new(POOL_ACCOUNT, ALICE, TARGET, params);
    pool.grant_member(&ALICE, BOB).expect("alice is admin");
    pool.grant_member(&ALICE, CAROL).expect("alice is admin");

    pool
}

/// Deposits `amount` for `member`, funding the mock custody first like a payable call.
pub fn fund_and_deposit(
    pool: &mut PoolSM,
    chain: &mut MockChain,
    member: AccountId,
    amount: Balance,
) -> crate::errors::PoolResult<crate::events::PoolEvent> {
    chain.fund(amount);
    pool.deposit(chain, member, amount)
}
