//! Revert data extraction and decoding of ERC-7412 errors.
//!
//! Simulated calls fail with whatever error type the chain client uses. The revert payload is
//! usually buried in that error, for example inside the JSON-RPC error response of an `eth_call`.
//! [`ExtractRevertData`] is the strategy used to dig it out, [`CauseChain`] is the default one.

use crate::contracts::IERC7412::{self, IERC7412Errors};
use alloy::{
    primitives::{Address, Bytes, U256},
    rpc::json_rpc::ErrorPayload,
    sol_types::SolInterface,
    transports::TransportError,
};
use std::{error::Error, fmt, iter};
use tracing::error;

/// Strategy to locate the raw revert payload inside a call failure.
pub trait ExtractRevertData<E>: Send + Sync {
    /// Returns the revert payload of `failure`, if it carries one.
    fn extract_revert_data(&self, failure: &E) -> Option<Bytes>;
}

impl<E, F> ExtractRevertData<E> for F
where
    F: Fn(&E) -> Option<Bytes> + Send + Sync,
{
    fn extract_revert_data(&self, failure: &E) -> Option<Bytes> {
        self(failure)
    }
}

/// Walks an error and its [`Error::source`] chain and returns the revert payload of the first
/// alloy error that carries one.
///
/// Recognizes [`alloy::contract::Error`] and [`TransportError`] JSON-RPC error responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CauseChain;

impl<E> ExtractRevertData<E> for CauseChain
where
    E: Error + 'static,
{
    fn extract_revert_data(&self, failure: &E) -> Option<Bytes> {
        iter::successors(Some(failure as &(dyn Error + 'static)), |&err| err.source())
            .find_map(revert_data_of)
    }
}

fn revert_data_of(err: &(dyn Error + 'static)) -> Option<Bytes> {
    if let Some(err) = err.downcast_ref::<alloy::contract::Error>() {
        return err.as_revert_data();
    }
    err.downcast_ref::<TransportError>()
        .and_then(|err| err.as_error_resp())
        .and_then(ErrorPayload::as_revert_data)
}

/// Returns the revert payload carried by `failure`.
///
/// If there is none, `failure` is logged and handed back unchanged.
pub fn revert_data<E>(failure: E) -> Result<Bytes, E>
where
    E: Error + 'static,
{
    match CauseChain.extract_revert_data(&failure) {
        Some(data) => Ok(data),
        None => {
            error!(%failure, "Could not find revert data in error.");
            Err(failure)
        }
    }
}

/// A call failure decoded against the ERC-7412 errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleFailure {
    /// `OracleDataRequired(address,bytes)`.
    OracleDataRequired {
        /// The oracle that needs data.
        oracle: Address,
        /// The query the oracle needs data for.
        query: Bytes,
    },
    /// `FeeRequired(uint256)`.
    FeeRequired {
        /// The fee to attach to the fulfillment call.
        fee: U256,
    },
    /// Any other revert. Holds the raw payload.
    Unrecognized(Bytes),
}

impl OracleFailure {
    /// Decodes a raw revert payload.
    pub fn decode(data: &Bytes) -> Self {
        match IERC7412Errors::abi_decode(data) {
            Ok(IERC7412Errors::OracleDataRequired(IERC7412::OracleDataRequired {
                oracleContract,
                oracleQuery,
            })) => Self::OracleDataRequired { oracle: oracleContract, query: oracleQuery },
            Ok(IERC7412Errors::FeeRequired(IERC7412::FeeRequired { feeAmount })) => {
                Self::FeeRequired { fee: feeAmount }
            }
            Err(_) => Self::Unrecognized(data.clone()),
        }
    }
}

impl fmt::Display for OracleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OracleDataRequired { oracle, query } => {
                write!(f, "OracleDataRequired({oracle}, {query})")
            }
            Self::FeeRequired { fee } => write!(f, "FeeRequired({fee})"),
            Self::Unrecognized(data) => write!(f, "unrecognized revert {data}"),
        }
    }
}

/// Extracts the revert payload of `failure` with `extractor` and decodes it.
///
/// Returns `None` if the payload could not be located, which usually means the client wraps its
/// errors differently than `extractor` expects.
pub fn classify<E>(extractor: &dyn ExtractRevertData<E>, failure: &E) -> Option<OracleFailure>
where
    E: fmt::Debug,
{
    let Some(data) = extractor.extract_revert_data(failure) else {
        error!(?failure, "Could not extract revert data from call failure.");
        return None;
    };
    Some(OracleFailure::decode(&data))
}
