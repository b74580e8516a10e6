//! Contract interfaces used while resolving oracle requirements.

use alloy::sol;

sol! {
    /// ERC-7412 oracle interface.
    ///
    /// See: https://eips.ethereum.org/EIPS/eip-7412
    #[sol(rpc)]
    interface IERC7412 {
        /// Raised when a call needs offchain data for `oracleQuery` that `oracleContract` has not
        /// been given yet.
        #[derive(Debug, PartialEq, Eq)]
        error OracleDataRequired(address oracleContract, bytes oracleQuery);

        /// Raised when fulfilling an oracle query requires a fee to be paid.
        #[derive(Debug, PartialEq, Eq)]
        error FeeRequired(uint256 feeAmount);

        /// Returns the identifier of the offchain oracle network, right padded with zero bytes.
        function oracleId() external view returns (bytes32);

        /// Supplies signed offchain data for a pending oracle query.
        function fulfillOracleQuery(bytes calldata oracleQuery, bytes calldata signedOffchainData)
            external
            payable;
    }
}

sol! {
    /// Synthetix `TrustedMulticallForwarder`, a Multicall3 variant that is an ERC-2771 trusted
    /// forwarder.
    ///
    /// Unlike Multicall3 it bubbles up the revert data of a failing call, and appends the original
    /// `msg.sender` to the calldata of every call.
    #[derive(Debug, PartialEq, Eq)]
    interface ITrustedMulticallForwarder {
        /// A call that forwards native value.
        struct Call3Value {
            address target;
            bool allowFailure;
            uint256 value;
            bytes callData;
        }

        /// Result of a single call in the batch.
        struct Result {
            bool success;
            bytes returnData;
        }

        /// Executes every call in order, forwarding `value` to each. If a call with
        /// `allowFailure = false` reverts, reverts with that call's revert data. Reverts if
        /// `msg.value` differs from the sum of values.
        function aggregate3Value(Call3Value[] calldata calls)
            external
            payable
            returns (Result[] memory returnData);
    }
}
