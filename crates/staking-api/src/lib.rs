//! Trait definitions for the external services the pool depends on.
//!
//! The pool never holds its delegation directly: it drives an external staking system (the
//! chain's collator-staking pallet) through [`ParachainStaking`] and moves its own free funds
//! through [`Custody`]. Both are modeled as fallible synchronous calls; implementations wrap
//! whatever transport actually reaches the chain. Any error aborts the pool operation that made
//! the call before the pool mutates its own state.

pub mod errors;
pub mod traits;

pub use errors::StakingClientError;
pub use traits::{Custody, ParachainStaking};
