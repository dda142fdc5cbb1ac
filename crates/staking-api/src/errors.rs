//! Errors surfaced by implementations of the external service traits.

use thiserror::Error;

/// Errors that a staking or custody call can fail with.
///
/// A [`Revert`](StakingClientError::Revert) means the chain processed the call and rejected it;
/// a [`Connection`](StakingClientError::Connection) means the call never reached the chain.
/// The pool treats both the same way: the triggering operation is aborted with no local
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingClientError {
    /// The call was rejected by the chain.
    #[error("staking call reverted: {0}")]
    Revert(String),

    /// The staking service could not be reached.
    #[error("staking service unreachable: {0}")]
    Connection(String),
}
