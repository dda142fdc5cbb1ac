//! Tests for the Pool State Machine.
//!
//! The scenario tests drive the machine against the [`MockChain`] from the crate's `testing`
//! module; the property tests check the accounting invariants over arbitrary deposit
//! schedules.

mod withdraw;

use std::sync::Once;

use collation_pool_common::logging::{self, LoggerConfig};
use collation_pool_primitives::types::Balance;

use crate::{
    machine::PoolSM,
    state::PoolState,
    testing::{fund_and_deposit, test_pool, MockChain, ALICE, BOB, EXIT_DELAY_ROUNDS},
};

// ===== Test Constants =====

/// Activation threshold used by most scenario tests, small enough to reason about by hand.
const MIN_ACTIVATION: Balance = 5;

static INIT_LOGGING: Once = Once::new();

/// Initializes test logging once per test binary.
fn init_logging() {
    INIT_LOGGING.call_once(|| {
        logging::init(LoggerConfig::with_base_name("pool-sm-tests"));
    });
}

// ===== Fixture Pipelines =====

/// A pool that has crossed the activation threshold: ALICE and BOB deposited 3 each.
fn staked_pool(chain: &mut MockChain) -> PoolSM {
    let mut pool = test_pool(MIN_ACTIVATION);
    fund_and_deposit(&mut pool, chain, ALICE, 3).expect("deposit below threshold");
    fund_and_deposit(&mut pool, chain, BOB, 3).expect("activating deposit");
    assert_eq!(pool.state(), PoolState::Staking);

    pool
}

/// A staked pool whose revoke has been scheduled but whose exit delay has not elapsed.
fn revoking_pool(chain: &mut MockChain) -> PoolSM {
    let mut pool = staked_pool(chain);
    pool.schedule_revoke(chain, &ALICE).expect("admin revoke");
    assert_eq!(pool.state(), PoolState::Revoking);

    pool
}

/// A revoking pool whose exit delay has fully elapsed.
fn revocable_pool(chain: &mut MockChain) -> PoolSM {
    let pool = revoking_pool(chain);
    chain.roll_forward(EXIT_DELAY_ROUNDS);

    pool
}
