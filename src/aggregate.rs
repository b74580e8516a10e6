//! Aggregation of a call batch into a single call.

use crate::{
    call::Call, constants::TRUSTED_MULTICALL_FORWARDER_ADDRESS,
    contracts::ITrustedMulticallForwarder, error::AggregateError,
};
use alloy::{
    primitives::{Address, U256},
    sol_types::SolCall,
};

/// Combines an ordered batch of calls into one call that executes them in order, atomically.
///
/// When a call in the batch reverts, the aggregated call must revert with that call's revert
/// data, otherwise oracle requirements raised inside the batch can not be decoded.
pub trait Aggregate: Send + Sync {
    /// Aggregates `calls`.
    fn aggregate(&self, calls: &[Call]) -> Result<Call, AggregateError>;
}

impl<F> Aggregate for F
where
    F: Fn(&[Call]) -> Call + Send + Sync,
{
    fn aggregate(&self, calls: &[Call]) -> Result<Call, AggregateError> {
        Ok(self(calls))
    }
}

/// Aggregates through the `TrustedMulticallForwarder` `aggregate3Value`.
///
/// Every call is sent with `allowFailure = false`, so the aggregated call reverts with the revert
/// data of the first failing call. The aggregated value is the sum of all call values.
///
/// The forwarder is an ERC-2771 trusted forwarder: targets that trust it see the sender of the
/// aggregated call as `msg.sender`. Plain Multicall3 does not work here, it replaces the revert
/// data of a failing call with its own `Error(string)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustedMulticallForwarder {
    address: Address,
}

impl Default for TrustedMulticallForwarder {
    fn default() -> Self {
        Self::new(TRUSTED_MULTICALL_FORWARDER_ADDRESS)
    }
}

impl TrustedMulticallForwarder {
    /// Create a new aggregator for the forwarder deployed at `address`.
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// The forwarder address.
    pub const fn address(&self) -> Address {
        self.address
    }
}

impl Aggregate for TrustedMulticallForwarder {
    fn aggregate(&self, calls: &[Call]) -> Result<Call, AggregateError> {
        let value = calls
            .iter()
            .try_fold(U256::ZERO, |total, call| total.checked_add(call.value))
            .ok_or(AggregateError::ValueOverflow { calls: calls.len() })?;
        let calls = calls
            .iter()
            .map(|call| ITrustedMulticallForwarder::Call3Value {
                target: call.target,
                allowFailure: false,
                value: call.value,
                callData: call.data.clone(),
            })
            .collect();

        Ok(Call::new(
            self.address,
            ITrustedMulticallForwarder::aggregate3ValueCall { calls }.abi_encode(),
        )
        .with_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes};

    #[test]
    fn forwarder_aggregate() {
        let first = Call::new(address!("0000000000000000000000000000000000000001"), bytes!("01"))
            .with_value(U256::from(2));
        let second = Call::new(address!("0000000000000000000000000000000000000002"), bytes!("02"))
            .with_value(U256::from(3));

        let aggregated = TrustedMulticallForwarder::default()
            .aggregate(&[first.clone(), second.clone()])
            .unwrap();
        assert_eq!(aggregated.target, TRUSTED_MULTICALL_FORWARDER_ADDRESS);
        assert_eq!(aggregated.value, U256::from(5));

        let decoded =
            ITrustedMulticallForwarder::aggregate3ValueCall::abi_decode(&aggregated.data).unwrap();
        assert_eq!(decoded.calls.len(), 2);
        for (call3, call) in decoded.calls.iter().zip([first, second]) {
            assert_eq!(call3.target, call.target);
            assert_eq!(call3.value, call.value);
            assert_eq!(call3.callData, call.data);
            assert!(!call3.allowFailure);
        }
    }

    #[test]
    fn forwarder_value_overflow() {
        let call = Call::new(Address::ZERO, bytes!("01")).with_value(U256::MAX);
        let err = TrustedMulticallForwarder::default()
            .aggregate(&[call.clone(), call.with_value(U256::from(1))])
            .unwrap_err();
        assert_eq!(err, AggregateError::ValueOverflow { calls: 2 });
    }

    #[test]
    fn closure_aggregate() {
        let last = |calls: &[Call]| calls[calls.len() - 1].clone();
        let call = Call::new(Address::ZERO, bytes!("ff"));
        assert_eq!(last.aggregate(&[call.clone()]).unwrap(), call);
    }
}
