//! Resolver error types.
use alloy::primitives::{Address, U256};
use thiserror::Error;

/// An oracle id that has no registered adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("oracle {oracle_id} not supported (supported oracles: {})", .supported.join(","))]
pub struct UnsupportedOracle {
    /// The oracle id read from the oracle contract.
    pub oracle_id: String,
    /// Every registered oracle id, sorted.
    pub supported: Vec<String>,
}

/// Errors raised while building an adapter registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two adapters were registered for the same oracle id.
    #[error("duplicate adapter for oracle {0}")]
    DuplicateOracleId(String),
}

/// Errors raised while aggregating a call batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The values of the calls in the batch do not fit in a `uint256`.
    #[error("total value of {calls} calls overflows uint256")]
    ValueOverflow {
        /// Number of calls in the batch.
        calls: usize,
    },
}

/// Errors returned by [`Resolver::resolve`](crate::Resolver::resolve).
///
/// `E` is the error type of the [`ChainClient`](crate::ChainClient). Whenever a variant holds an
/// `E`, it is the failure exactly as the client returned it.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// The call reverted with an error that is neither `OracleDataRequired` nor `FeeRequired`.
    #[error(transparent)]
    Reverted(E),
    /// No revert payload could be found in the simulation failure.
    #[error("could not extract revert data: {0}")]
    MissingRevertData(#[source] E),
    /// The call batch could not be aggregated.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    /// The oracle that raised `OracleDataRequired` has no registered adapter.
    #[error(transparent)]
    UnsupportedOracle(#[from] UnsupportedOracle),
    /// Reading `oracleId()` from the oracle failed.
    #[error("failed to read oracle id of {oracle}: {source}")]
    OracleId {
        /// The oracle contract.
        oracle: Address,
        /// The client failure.
        #[source]
        source: E,
    },
    /// An adapter failed to fetch offchain data.
    #[error("adapter for oracle {oracle_id} failed to fetch offchain data: {error}")]
    Adapter {
        /// The oracle id of the adapter.
        oracle_id: String,
        /// The adapter failure.
        error: eyre::Report,
    },
    /// `FeeRequired` was raised while the batch held no fulfillment call to attach the fee to.
    #[error("fee of {fee} required but there is no fulfillment call to pay it: {failure}")]
    UnattributedFee {
        /// The required fee.
        fee: U256,
        /// The simulation failure that carried `FeeRequired`.
        failure: E,
    },
    /// The call batch did not simulate successfully within the iteration limit.
    #[error("call did not resolve within {0} simulations")]
    IterationLimit(usize),
}

impl<E> ResolveError<E> {
    /// Returns the client failure held by this error, if any.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Reverted(failure)
            | Self::MissingRevertData(failure)
            | Self::OracleId { source: failure, .. }
            | Self::UnattributedFee { failure, .. } => Some(failure),
            Self::Aggregate(_)
            | Self::UnsupportedOracle(_)
            | Self::Adapter { .. }
            | Self::IterationLimit(_) => None,
        }
    }
}
