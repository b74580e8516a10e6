//! Chain access needed by the resolver.

use crate::{call::Call, contracts::IERC7412};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, B256},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use tracing::trace;

/// Read-only chain access used by the resolver.
///
/// Neither method may change chain state.
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    /// The error returned by the client. Simulation reverts are reported through it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Simulates `call` against the latest state.
    async fn simulate(&self, call: &Call) -> Result<(), Self::Error>;

    /// Calls `oracleId()` on `oracle`.
    async fn oracle_id(&self, oracle: Address) -> Result<B256, Self::Error>;
}

/// A [`ChainClient`] backed by an alloy [`Provider`].
#[derive(Debug, Clone)]
pub struct ProviderClient<P> {
    provider: P,
    from: Option<Address>,
}

impl<P> ProviderClient<P> {
    /// Create a new client.
    pub fn new(provider: P) -> Self {
        Self { provider, from: None }
    }

    /// Sets the sender used for simulations.
    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait::async_trait]
impl<P: Provider> ChainClient for ProviderClient<P> {
    type Error = alloy::contract::Error;

    async fn simulate(&self, call: &Call) -> Result<(), Self::Error> {
        let mut tx = TransactionRequest::default()
            .with_to(call.target)
            .with_value(call.value)
            .with_input(call.data.clone());
        if let Some(from) = self.from {
            tx = tx.with_from(from);
        }

        trace!(to = %call.target, value = %call.value, "Simulating call.");
        self.provider.call(tx).await?;
        Ok(())
    }

    async fn oracle_id(&self, oracle: Address) -> Result<B256, Self::Error> {
        IERC7412::new(oracle, &self.provider).oracleId().call().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revert::revert_data;
    use alloy::{
        primitives::{Bytes, address, b256, bytes},
        providers::{ProviderBuilder, mock::Asserter},
        rpc::json_rpc::ErrorPayload,
    };

    const ORACLE: Address = address!("0000000000000000000000000000000000000011");

    #[tokio::test]
    async fn simulate_revert_carries_revert_data() {
        let asserter = Asserter::new();
        let client = ProviderClient::new(
            ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_mocked_client(asserter.clone()),
        );

        let raw = serde_json::value::to_raw_value("0xc0ffee").unwrap();
        asserter.push_failure(ErrorPayload {
            code: 3,
            message: "execution reverted".into(),
            data: Some(raw),
        });

        let err = client.simulate(&Call::new(ORACLE, Bytes::new())).await.unwrap_err();
        assert_eq!(revert_data(err).unwrap(), bytes!("c0ffee"));
    }

    #[tokio::test]
    async fn simulate_success() {
        let asserter = Asserter::new();
        let client = ProviderClient::new(
            ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_mocked_client(asserter.clone()),
        );

        asserter.push_success(&Bytes::new());
        client.simulate(&Call::new(ORACLE, Bytes::new())).await.unwrap();
    }

    #[tokio::test]
    async fn read_oracle_id() {
        let asserter = Asserter::new();
        let client = ProviderClient::new(
            ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_mocked_client(asserter.clone()),
        );

        let id = b256!("5059544800000000000000000000000000000000000000000000000000000000");
        asserter.push_success(&Bytes::from(id.to_vec()));
        assert_eq!(client.oracle_id(ORACLE).await.unwrap(), id);
    }
}
