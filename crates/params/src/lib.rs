//! This crate contains the operational parameters that dictate when the pool activates its
//! delegation and how it talks to the external staking system.

pub mod default;
pub mod types;

pub use types::PoolParams;
