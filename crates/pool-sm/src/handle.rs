//! A single-writer handle around the pool state machine.
//!
//! Pool operations assume serialized execution: no caller may observe a half-updated share
//! table or lifecycle flag. [`SharedPool`] realizes that execution model for embedders that
//! drive the machine from multiple tasks, by funneling every access through one mutex.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::machine::PoolSM;

/// A cloneable, thread-safe handle to a [`PoolSM`].
///
/// Each [`with`](SharedPool::with) call runs the given closure under the lock, so a whole
/// operation (guards, external calls, local mutation) executes before any other caller can
/// observe intermediate state.
#[derive(Clone, Debug)]
pub struct SharedPool(Arc<Mutex<PoolSM>>);

impl SharedPool {
    /// Wraps `pool` in a shared handle.
    pub fn new(pool: PoolSM) -> Self {
        SharedPool(Arc::new(Mutex::new(pool)))
    }

    /// Runs `f` with exclusive access to the pool.
    pub fn with<R>(&self, f: impl FnOnce(&mut PoolSM) -> R) -> R {
        let mut pool = self.0.lock();
        f(&mut pool)
    }
}

#[cfg(test)]
mod tests {
    use collation_pool_params::PoolParams;
    use collation_pool_primitives::types::AccountId;

    use super::*;
    use crate::state::PoolState;

    #[test]
    fn handle_serializes_access_across_threads() {
        let admin = AccountId::new([1u8; 20]);
        let pool = SharedPool::new(PoolSM::new(
            AccountId::new([0xfe; 20]),
            admin,
            AccountId::new([0xc0; 20]),
            PoolParams::default(),
        ));

        let handles: Vec<_> = (2u8..10)
            .map(|byte| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    pool.with(|sm| sm.grant_member(&admin, AccountId::new([byte; 20])))
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        pool.with(|sm| {
            assert_eq!(sm.state(), PoolState::Collecting);
            // 8 granted members plus the initial admin.
            assert!((2u8..10)
                .all(|byte| sm.has_role(
                    collation_pool_primitives::roles::Role::Member,
                    &AccountId::new([byte; 20])
                )));
        });
    }
}
