//! The Pool State Machine (PSM).
//!
//! Responsible for converting member deposits into shares of one collective delegation,
//! driving the delegation's lifecycle against the external staking system, and settling each
//! member's proportional payout on exit.
//!
//! All of the states, guards and transition rules are encoded in this structure. Every
//! operation follows the same staged-commit discipline: capability and state guards first,
//! then the external staking/custody calls, and only after those succeed the local ledger and
//! state mutations. An error from any stage therefore leaves the machine exactly as it was.

use collation_pool_params::PoolParams;
use collation_pool_primitives::{
    roles::{Role, RoleTable},
    types::{AccountId, Balance, CollatorId},
};
use collation_pool_staking_api::{Custody, ParachainStaking};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    errors::{PoolError, PoolResult},
    events::PoolEvent,
    ledger::ShareLedger,
    state::PoolState,
};

/// The static configuration for a Pool State Machine.
///
/// These values are set at the creation of the pool and do not change during any state
/// transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCfg {
    /// The account under which the pool holds custody and appears as a delegator.
    pub pool_account: AccountId,

    /// The operational parameters (activation threshold and delegation-count hints).
    pub params: PoolParams,
}

/// The state machine that tracks the pool's collective delegation and member shares.
///
/// This includes some static configuration along with the actual lifecycle state, the share
/// ledger and the role table. The whole struct serializes as the pool's persisted state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSM {
    /// The static configuration for this pool.
    cfg: PoolCfg,

    /// The current lifecycle state.
    state: PoolState,

    /// The external collator the pool delegates to. Mutable only while the pool is not
    /// staked, via [`PoolSM::change_target`].
    target: CollatorId,

    /// The share ledger tracking each member's principal contribution.
    ledger: ShareLedger,

    /// The accounts holding the admin and member capabilities.
    roles: RoleTable,
}

impl PoolSM {
    /// Creates a new pool in [`PoolState::Collecting`] targeting `target`.
    ///
    /// `initial_admin` is granted both the admin and the member role.
    pub fn new(
        pool_account: AccountId,
        initial_admin: AccountId,
        target: CollatorId,
        params: PoolParams,
    ) -> Self {
        Self {
            cfg: PoolCfg {
                pool_account,
                params,
            },
            state: PoolState::Collecting,
            target,
            ledger: ShareLedger::new(),
            roles: RoleTable::new(initial_admin),
        }
    }

    /// The pool's current lifecycle state.
    pub const fn state(&self) -> PoolState {
        self.state
    }

    /// The collator the pool currently targets.
    pub const fn target(&self) -> CollatorId {
        self.target
    }

    /// The share ledger.
    pub const fn ledger(&self) -> &ShareLedger {
        &self.ledger
    }

    /// The static configuration.
    pub const fn cfg(&self) -> &PoolCfg {
        &self.cfg
    }

    /// Returns whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &AccountId) -> bool {
        self.roles.has_role(role, account)
    }

    /// Grants the admin role (and with it the member role) to `new_admin`.
    pub fn grant_admin(&mut self, caller: &AccountId, new_admin: AccountId) -> PoolResult<()> {
        self.require_role(Role::Admin, caller)?;

        self.roles.grant(Role::Admin, new_admin);
        self.roles.grant(Role::Member, new_admin);
        info!(%caller, %new_admin, "granted admin role");

        Ok(())
    }

    /// Grants the member role to `new_member`.
    pub fn grant_member(&mut self, caller: &AccountId, new_member: AccountId) -> PoolResult<()> {
        self.require_role(Role::Admin, caller)?;

        self.roles.grant(Role::Member, new_member);
        info!(%caller, %new_member, "granted member role");

        Ok(())
    }

    /// Revokes the member role from `ex_member`.
    ///
    /// Does not touch the share ledger: any shares the account holds stay recorded and become
    /// withdrawable again if membership is re-granted.
    pub fn remove_member(&mut self, caller: &AccountId, ex_member: &AccountId) -> PoolResult<()> {
        self.require_role(Role::Admin, caller)?;

        self.roles.revoke(Role::Member, ex_member);
        info!(%caller, %ex_member, "revoked member role");

        Ok(())
    }

    /// Deposits `amount` into the pool on behalf of `member`.
    ///
    /// The attached value is assumed to already sit in the pool's custody when this is called,
    /// exactly like a payable entrypoint. Behavior depends on the lifecycle state:
    ///
    /// - [`PoolState::Collecting`]: the deposit accumulates; once the post-deposit total
    ///   reaches the activation threshold the full custody balance is delegated and the pool
    ///   transitions to [`PoolState::Staking`].
    /// - [`PoolState::Staking`]: the deposit is bonded onto the live delegation.
    /// - [`PoolState::Revoking`] / [`PoolState::Revoked`]: rejected.
    pub fn deposit<C>(
        &mut self,
        chain: &mut C,
        member: AccountId,
        amount: Balance,
    ) -> PoolResult<PoolEvent>
    where
        C: ParachainStaking + Custody,
    {
        self.require_role(Role::Member, &member)?;
        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }

        match self.state {
            PoolState::Staking => {
                self.check_delegator_status(chain)?;
                chain.delegator_bond_more(&self.target, amount)?;

                self.ledger.credit(member, amount);
                info!(%member, amount, total = self.ledger.total(), "bonded deposit onto live delegation");
            }
            PoolState::Collecting => {
                let new_total = self.ledger.total() + amount;
                if new_total < self.cfg.params.min_activation {
                    self.ledger.credit(member, amount);
                    debug!(
                        %member,
                        amount,
                        total = new_total,
                        min_activation = self.cfg.params.min_activation,
                        "deposit accumulated below activation threshold"
                    );
                } else {
                    // Delegate everything custody holds, which includes the value attached to
                    // this deposit.
                    let free = chain.free_balance(&self.cfg.pool_account)?;
                    chain.delegate(
                        &self.target,
                        free,
                        self.cfg.params.candidate_delegation_count,
                        self.cfg.params.delegation_count,
                    )?;

                    self.ledger.credit(member, amount);
                    self.state = PoolState::Staking;
                    info!(
                        %member,
                        amount,
                        delegated = free,
                        collator = %self.target,
                        "activation threshold reached; pool is now staking"
                    );
                }
            }
            PoolState::Revoking | PoolState::Revoked => {
                return Err(PoolError::InvalidState { state: self.state });
            }
        }

        Ok(PoolEvent::Deposit { member, amount })
    }

    /// Schedules the revocation of the pool's delegation.
    ///
    /// Admin-only and only legal while staking. The delegation stays live until the staking
    /// system's exit delay elapses; members resolve it by retrying [`PoolSM::withdraw`].
    pub fn schedule_revoke<C>(&mut self, chain: &mut C, caller: &AccountId) -> PoolResult<()>
    where
        C: ParachainStaking,
    {
        self.require_role(Role::Admin, caller)?;
        if self.state != PoolState::Staking {
            return Err(PoolError::InvalidState { state: self.state });
        }

        chain.schedule_revoke_delegation(&self.target)?;

        self.state = PoolState::Revoking;
        info!(%caller, collator = %self.target, "revoke scheduled; pool is now revoking");

        Ok(())
    }

    /// Withdraws `member`'s entire position, paying their proportional share of the pool's
    /// current custody balance (principal plus accrued rewards) to `payout_address`.
    ///
    /// Blocked while staking. While revoking, each attempt polls the staking system's
    /// delay-gated revoke; until the delay elapses the call fails with
    /// [`PoolError::RevokeNotReady`] and nothing is mutated.
    pub fn withdraw<C>(
        &mut self,
        chain: &mut C,
        member: AccountId,
        payout_address: AccountId,
    ) -> PoolResult<PoolEvent>
    where
        C: ParachainStaking + Custody,
    {
        self.require_role(Role::Member, &member)?;

        match self.state {
            PoolState::Staking => {
                return Err(PoolError::InvalidState { state: self.state });
            }
            PoolState::Revoking => self.execute_revoke(chain)?,
            PoolState::Collecting | PoolState::Revoked => {}
        }

        // From here the pool is Collecting or Revoked and must not be a delegator.
        self.check_delegator_status(chain)?;
        if self.ledger.is_empty() {
            return Err(PoolError::EmptyPool);
        }

        let free = chain.free_balance(&self.cfg.pool_account)?;
        let shares = self.ledger.shares_of(&member);
        let payout = proportional_payout(free, shares, self.ledger.total());
        if payout > free {
            error!(
                payout,
                free,
                shares,
                total = self.ledger.total(),
                "payout exceeds custody balance; accounting is corrupt"
            );
            return Err(PoolError::InsufficientFreeBalance { payout, free });
        }

        if payout > 0 {
            chain.transfer(&payout_address, payout)?;
        }

        self.ledger.debit_all(&member);
        info!(
            %member,
            %payout_address,
            payout,
            remaining_shares = self.ledger.total(),
            "member withdrawn"
        );

        Ok(PoolEvent::Withdrawal {
            member,
            payout_address,
            amount: payout,
        })
    }

    /// Reassigns the delegation target.
    ///
    /// Admin-only and only legal while the pool holds no delegation (collecting or revoked).
    pub fn change_target(&mut self, caller: &AccountId, new_target: CollatorId) -> PoolResult<()> {
        self.require_role(Role::Admin, caller)?;
        if !self.state.allows_target_change() {
            return Err(PoolError::InvalidState { state: self.state });
        }

        info!(%caller, old = %self.target, new = %new_target, "delegation target changed");
        self.target = new_target;

        Ok(())
    }

    /// Unconditionally returns the pool to [`PoolState::Collecting`].
    ///
    /// Admin-only. The share ledger and role table are untouched; this only restarts the
    /// lifecycle so fresh deposits can re-trigger staking.
    pub fn reset(&mut self, caller: &AccountId) -> PoolResult<()> {
        self.require_role(Role::Admin, caller)?;

        info!(%caller, from = %self.state, "pool reset to collecting");
        self.state = PoolState::Collecting;

        Ok(())
    }

    /// Returns the pool's current free custody balance.
    pub fn check_free_balance<C>(&self, chain: &C) -> PoolResult<Balance>
    where
        C: Custody,
    {
        Ok(chain.free_balance(&self.cfg.pool_account)?)
    }

    /// Polls the delay-gated revoke and transitions to [`PoolState::Revoked`] once the staking
    /// system confirms the pool is no longer a delegator.
    ///
    /// Idempotent-retriable: the execute primitive is re-invoked on every call and its revert
    /// while the delay is unexpired is the expected outcome, so it is only logged. The
    /// subsequent delegator query is the authoritative readiness signal; while it still
    /// reports a live delegation this fails with [`PoolError::RevokeNotReady`] and mutates
    /// nothing.
    fn execute_revoke<C>(&mut self, chain: &mut C) -> PoolResult<()>
    where
        C: ParachainStaking,
    {
        debug_assert_eq!(self.state, PoolState::Revoking);

        if let Err(e) = chain.execute_delegation_request(&self.cfg.pool_account, &self.target) {
            debug!(%e, "execute revoke attempt rejected; treating as not yet ready");
        }

        if chain.is_delegator(&self.cfg.pool_account)? {
            return Err(PoolError::RevokeNotReady);
        }

        self.state = PoolState::Revoked;
        info!(collator = %self.target, "revoke executed; delegation fully withdrawn");

        Ok(())
    }

    /// Fails with [`PoolError::Unauthorized`] unless `account` holds `role`.
    fn require_role(&self, role: Role, account: &AccountId) -> PoolResult<()> {
        if !self.roles.has_role(role, account) {
            return Err(PoolError::Unauthorized {
                account: *account,
                role,
            });
        }

        Ok(())
    }

    /// Sanity-checks that the staking system's delegator status matches what the current
    /// lifecycle state implies.
    ///
    /// A mismatch means the pool's accounting has desynchronized from the chain. There is no
    /// in-protocol repair path, so this halts the operation with the fatal
    /// [`PoolError::InconsistentExternalState`] instead of reconciling silently.
    fn check_delegator_status<C>(&self, chain: &C) -> PoolResult<()>
    where
        C: ParachainStaking,
    {
        let Some(expected) = self.state.expects_delegator_status() else {
            return Ok(());
        };

        let is_delegator = chain.is_delegator(&self.cfg.pool_account)?;
        if is_delegator != expected {
            error!(
                state = %self.state,
                is_delegator,
                "pool state disagrees with external delegator status"
            );
            return Err(PoolError::InconsistentExternalState {
                state: self.state,
                is_delegator,
            });
        }

        Ok(())
    }
}

/// Computes `floor(free * shares / total)`.
///
/// The multiplication widens to `u128`, so it cannot overflow for any pair of `u64` inputs,
/// and the quotient fits back into `u64` because `shares <= total` implies the result never
/// exceeds `free`.
fn proportional_payout(free: Balance, shares: Balance, total: Balance) -> Balance {
    debug_assert!(total > 0, "payout is undefined for an empty pool");
    debug_assert!(shares <= total, "member cannot hold more than all shares");

    ((free as u128) * (shares as u128) / (total as u128)) as Balance
}
