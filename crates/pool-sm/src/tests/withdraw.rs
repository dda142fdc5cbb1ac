//! Withdrawal and payout behavior, including the delay-gated revoke poll.

use collation_pool_primitives::{roles::Role, types::AccountId};
use collation_pool_staking_api::StakingClientError;

use super::{init_logging, revocable_pool, revoking_pool, staked_pool, MIN_ACTIVATION};
use crate::{
    errors::PoolError,
    events::PoolEvent,
    state::PoolState,
    testing::{fund_and_deposit, test_pool, MockChain, ALICE, BOB, CAROL, MALLORY},
};

/// Address members direct their payouts to in these tests.
const PAYOUT: AccountId = AccountId::new([0x77; 20]);

#[test]
fn withdraw_blocked_while_staking() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = staked_pool(&mut chain);

    let err = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap_err();

    assert_eq!(
        err,
        PoolError::InvalidState {
            state: PoolState::Staking
        }
    );
    assert_eq!(pool.ledger().total(), 6);
}

#[test]
fn withdraw_before_delay_elapses_fails_not_ready() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = revoking_pool(&mut chain);

    let err = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap_err();

    assert_eq!(err, PoolError::RevokeNotReady);
    assert_eq!(pool.state(), PoolState::Revoking);
    assert_eq!(pool.ledger().total(), 6);
    assert!(chain.transfers().is_empty());
}

#[test]
fn revoke_poll_is_idempotent_while_delay_unexpired() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = revoking_pool(&mut chain);
    let before = pool.clone();

    for _ in 0..5 {
        let err = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap_err();
        assert_eq!(err, PoolError::RevokeNotReady);
        assert_eq!(pool, before, "a not-ready poll must not mutate anything");
    }
}

#[test]
fn withdraw_after_delay_pays_proportional_share_with_rewards() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = revoking_pool(&mut chain);
    // Custody grows to 8 via rewards earned while staked.
    chain.accrue_rewards(2);
    chain.roll_forward(crate::testing::EXIT_DELAY_ROUNDS);

    let event = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap();

    assert_eq!(
        event,
        PoolEvent::Withdrawal {
            member: ALICE,
            payout_address: PAYOUT,
            amount: 4 // floor(8 * 3 / 6)
        }
    );
    assert_eq!(pool.state(), PoolState::Revoked);
    assert_eq!(pool.ledger().shares_of(&ALICE), 0);
    assert_eq!(pool.ledger().total(), 3);
    assert_eq!(chain.transfers(), &[(PAYOUT, 4)]);
    assert_eq!(chain.free(), 4);
}

#[test]
fn subsequent_withdraw_pays_remaining_custody() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = revoking_pool(&mut chain);
    chain.accrue_rewards(2);
    chain.roll_forward(crate::testing::EXIT_DELAY_ROUNDS);
    pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap();

    let event = pool.withdraw(&mut chain, BOB, PAYOUT).unwrap();

    assert_eq!(
        event,
        PoolEvent::Withdrawal {
            member: BOB,
            payout_address: PAYOUT,
            amount: 4 // floor(4 * 3 / 3)
        }
    );
    assert_eq!(pool.ledger().total(), 0);
    assert_eq!(chain.free(), 0);
}

#[test]
fn withdraw_from_empty_pool_is_rejected() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = test_pool(MIN_ACTIVATION);

    let err = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap_err();

    assert_eq!(err, PoolError::EmptyPool);
}

#[test]
fn withdraw_with_zero_shares_pays_nothing() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = test_pool(MIN_ACTIVATION);
    fund_and_deposit(&mut pool, &mut chain, ALICE, 3).unwrap();

    // CAROL is a member but never deposited.
    let event = pool.withdraw(&mut chain, CAROL, PAYOUT).unwrap();

    assert_eq!(
        event,
        PoolEvent::Withdrawal {
            member: CAROL,
            payout_address: PAYOUT,
            amount: 0
        }
    );
    assert!(chain.transfers().is_empty());
    assert_eq!(pool.ledger().total(), 3);
}

#[test]
fn withdraw_while_collecting_returns_principal() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = test_pool(MIN_ACTIVATION);
    fund_and_deposit(&mut pool, &mut chain, ALICE, 3).unwrap();

    let event = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap();

    assert_eq!(
        event,
        PoolEvent::Withdrawal {
            member: ALICE,
            payout_address: PAYOUT,
            amount: 3
        }
    );
    assert_eq!(pool.state(), PoolState::Collecting);
    assert_eq!(pool.ledger().total(), 0);
}

#[test]
fn withdraw_without_membership_is_rejected() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = test_pool(MIN_ACTIVATION);

    let err = pool.withdraw(&mut chain, MALLORY, PAYOUT).unwrap_err();

    assert_eq!(
        err,
        PoolError::Unauthorized {
            account: MALLORY,
            role: Role::Member
        }
    );
}

#[test]
fn failed_transfer_leaves_ledger_untouched() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = test_pool(MIN_ACTIVATION);
    fund_and_deposit(&mut pool, &mut chain, ALICE, 3).unwrap();

    chain.fail_transfer = true;
    let err = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap_err();

    assert_eq!(
        err,
        PoolError::StakingClient(StakingClientError::Revert("transfer rejected".into()))
    );
    assert_eq!(pool.ledger().shares_of(&ALICE), 3);
    assert_eq!(pool.ledger().total(), 3);
}

#[test]
fn withdraw_with_desynced_chain_faults() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = test_pool(MIN_ACTIVATION);
    fund_and_deposit(&mut pool, &mut chain, ALICE, 3).unwrap();

    // The chain claims the pool delegates even though it is only collecting.
    chain.force_delegator_status(true);
    let err = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap_err();

    assert_eq!(
        err,
        PoolError::InconsistentExternalState {
            state: PoolState::Collecting,
            is_delegator: true
        }
    );
    assert_eq!(pool.ledger().total(), 3);
}

#[test]
fn revoked_transition_survives_even_if_first_payout_fails() {
    init_logging();
    let mut chain = MockChain::new();
    let mut pool = revocable_pool(&mut chain);

    // The revoke itself executes on chain; a payout failure afterwards must not undo the
    // locally recorded Revoked state, which now matches external reality.
    chain.fail_transfer = true;
    let err = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap_err();

    assert_eq!(
        err,
        PoolError::StakingClient(StakingClientError::Revert("transfer rejected".into()))
    );
    assert_eq!(pool.state(), PoolState::Revoked);
    assert_eq!(pool.ledger().shares_of(&ALICE), 3);

    // A retry completes the withdrawal.
    chain.fail_transfer = false;
    let event = pool.withdraw(&mut chain, ALICE, PAYOUT).unwrap();
    assert_eq!(
        event,
        PoolEvent::Withdrawal {
            member: ALICE,
            payout_address: PAYOUT,
            amount: 3
        }
    );
}
