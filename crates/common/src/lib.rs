//! Reusable utilities for the collation pool crates, such as initializing the
//! tracing framework.

pub mod logging;

// Re-export tracing crate for convenience.
pub use tracing;
