//! Calls and the call batch built up while resolving oracle requirements.

use crate::contracts::IERC7412;
use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::SolCall,
};
use serde::{Deserialize, Serialize};

sol! {
    /// A single intended call.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Call {
        /// The call target.
        address target;
        /// Amount of native value to send to the target.
        uint256 value;
        /// The calldata bytes.
        bytes data;
    }
}

impl Call {
    /// Creates a call to `target` with `data` and no value.
    pub fn new(target: Address, data: impl Into<Bytes>) -> Self {
        Self { target, value: U256::ZERO, data: data.into() }
    }

    /// Sets the native value sent with the call.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Creates the `fulfillOracleQuery(query, data)` call for `oracle`.
    pub fn fulfillment(oracle: Address, query: Bytes, data: Bytes) -> Self {
        Self::new(
            oracle,
            IERC7412::fulfillOracleQueryCall { oracleQuery: query, signedOffchainData: data }
                .abi_encode(),
        )
    }
}

/// An oracle query that had to be fulfilled before the batch could succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    /// The oracle contract that raised `OracleDataRequired`.
    pub oracle: Address,
    /// The query the oracle needs data for.
    pub query: Bytes,
}

/// Why a call is part of a [`CallBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOrigin {
    /// The call the batch is being resolved for.
    Original,
    /// A fulfillment call inserted for the given request.
    Fulfillment(OracleRequest),
}

/// An ordered batch of calls.
///
/// The last call is always the original call. Every call before it is a fulfillment call, in the
/// order the oracle requirements were discovered.
#[derive(Debug, Clone)]
pub struct CallBatch {
    calls: Vec<Call>,
    origins: Vec<CallOrigin>,
    /// The most recently inserted fulfillment. Fees are attributed to it.
    last_fulfillment: Option<OracleRequest>,
}

impl CallBatch {
    /// Creates a batch that only contains `call`.
    pub fn new(call: Call) -> Self {
        Self { calls: vec![call], origins: vec![CallOrigin::Original], last_fulfillment: None }
    }

    /// The calls in execution order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Why each call in [`Self::calls`] is part of the batch.
    pub fn origins(&self) -> &[CallOrigin] {
        &self.origins
    }

    /// Number of calls in the batch.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Always `false`, the original call is never removed.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// The original call.
    pub fn original(&self) -> &Call {
        // the batch is never empty and the original call is always last
        &self.calls[self.calls.len() - 1]
    }

    /// Inserts a fulfillment call for `request` right before the original call.
    pub fn insert_fulfillment(&mut self, request: OracleRequest, data: Bytes) -> &Call {
        let index = self.calls.len() - 1;
        self.calls.insert(index, Call::fulfillment(request.oracle, request.query.clone(), data));
        self.origins.insert(index, CallOrigin::Fulfillment(request.clone()));
        self.last_fulfillment = Some(request);
        &self.calls[index]
    }

    /// Sets `fee` as the value of the most recently inserted fulfillment call.
    ///
    /// The fee replaces any value set by a previous `FeeRequired`. Returns `None` if the batch
    /// holds no fulfillment call.
    pub fn attach_fee(&mut self, fee: U256) -> Option<&Call> {
        let request = self.last_fulfillment.as_ref()?;
        let index = self.origins.iter().rposition(
            |origin| matches!(origin, CallOrigin::Fulfillment(inserted) if inserted == request),
        )?;
        self.calls[index].value = fee;
        Some(&self.calls[index])
    }
}
