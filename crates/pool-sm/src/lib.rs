//! The Pool State Machine (PSM).
//!
//! A collation pool gathers deposits from multiple members into a single collective delegation
//! toward one external collator and tracks each member's proportional share of that position.
//! This crate encodes the pool's whole lifecycle — collecting deposits, actively staking,
//! revoking the delegation through the staking system's delay-gated exit protocol, and paying
//! members out — together with the share ledger that makes the proportional accounting exact.
//!
//! The machine itself is a plain owned struct ([`machine::PoolSM`]); all chain effects go
//! through the traits in `collation-pool-staking-api`, which keeps every operation
//! deterministic and unit-testable against the mock chain in [`testing`]. Embedders that need
//! the serialized single-writer execution model can wrap the machine in a [`handle::SharedPool`].

pub mod errors;
pub mod events;
pub mod handle;
pub mod ledger;
pub mod machine;
pub mod state;
pub mod testing;

#[cfg(test)]
mod tests;

pub use errors::{PoolError, PoolResult};
pub use events::PoolEvent;
pub use handle::SharedPool;
pub use ledger::ShareLedger;
pub use machine::{PoolCfg, PoolSM};
pub use state::PoolState;
