//! ERC-7412 resolution loop.
//!
//! A call that depends on offchain oracle data reverts with `OracleDataRequired` until the data
//! has been supplied earlier in the same transaction. [`Resolver::resolve`] simulates the call,
//! fetches whatever the revert asks for, prepends the matching `fulfillOracleQuery` calls, and
//! repeats until the aggregated batch simulates successfully.

use crate::{
    adapter::{AdapterRegistry, OracleAdapter},
    aggregate::Aggregate,
    call::{Call, CallBatch, OracleRequest},
    client::ChainClient,
    config::ResolverConfig,
    error::{RegistryError, ResolveError},
    metrics::ResolverMetrics,
    revert::{CauseChain, ExtractRevertData, OracleFailure, classify},
};
use alloy::primitives::{Address, B256, Bytes};
use std::{fmt, sync::Arc};
use tracing::{debug, instrument, trace, warn};

/// Resolves ERC-7412 oracle requirements of calls.
///
/// A resolver is immutable once built and can serve concurrent resolutions.
pub struct Resolver<C: ChainClient> {
    registry: AdapterRegistry<C>,
    aggregator: Arc<dyn Aggregate>,
    extractor: Arc<dyn ExtractRevertData<C::Error>>,
    config: ResolverConfig,
    metrics: ResolverMetrics,
}

impl<C: ChainClient> fmt::Debug for Resolver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: ChainClient> Resolver<C> {
    /// Create a new resolver.
    ///
    /// Fails if two adapters serve the same oracle id.
    pub fn new(
        adapters: impl IntoIterator<Item = Arc<dyn OracleAdapter<C>>>,
        aggregator: impl Aggregate + 'static,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            registry: AdapterRegistry::new(adapters)?,
            aggregator: Arc::new(aggregator),
            extractor: Arc::new(CauseChain),
            config: ResolverConfig::default(),
            metrics: ResolverMetrics::default(),
        })
    }

    /// Sets the resolver configuration.
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the strategy used to find revert data in simulation failures.
    ///
    /// Defaults to [`CauseChain`].
    pub fn with_revert_data_extractor(
        mut self,
        extractor: impl ExtractRevertData<C::Error> + 'static,
    ) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// The adapter registry.
    pub fn registry(&self) -> &AdapterRegistry<C> {
        &self.registry
    }

    /// Resolves the oracle data and fees `call` depends on.
    ///
    /// Returns the aggregated call that simulated successfully. Nothing is submitted.
    #[instrument(skip_all, fields(to = %call.target))]
    pub async fn resolve(&self, client: &C, call: Call) -> Result<Call, ResolveError<C::Error>> {
        let mut batch = CallBatch::new(call);

        let max_iterations = self.config.max_iterations.get();
        for iteration in 1..=max_iterations {
            let aggregated = self.aggregator.aggregate(batch.calls())?;

            trace!(iteration, calls = batch.len(), "Simulating call batch.");
            let failure = match client.simulate(&aggregated).await {
                Ok(()) => {
                    debug!(iteration, calls = batch.len(), "Call batch resolved.");
                    self.metrics.iterations.record(iteration as f64);
                    return Ok(aggregated);
                }
                Err(failure) => failure,
            };

            let Some(decoded) = classify(self.extractor.as_ref(), &failure) else {
                return Err(ResolveError::MissingRevertData(failure));
            };
            debug!(iteration, %decoded, "Call batch reverted.");

            match decoded {
                OracleFailure::OracleDataRequired { oracle, query } => {
                    let request = OracleRequest { oracle, query };
                    let data = self.fetch_offchain_data(client, &request).await?;
                    batch.insert_fulfillment(request, data);
                    self.metrics.fulfillments.increment(1);
                }
                OracleFailure::FeeRequired { fee } => {
                    let Some(fulfillment) = batch.attach_fee(fee) else {
                        warn!(%fee, "Fee required without a fulfillment call.");
                        return Err(ResolveError::UnattributedFee { fee, failure });
                    };
                    debug!(oracle = %fulfillment.target, %fee, "Attached fee to fulfillment.");
                    self.metrics.fees.increment(1);
                }
                OracleFailure::Unrecognized(_) => return Err(ResolveError::Reverted(failure)),
            }
        }

        warn!(max_iterations, "Call batch did not resolve.");
        Err(ResolveError::IterationLimit(max_iterations))
    }

    /// Reads the oracle id of the requesting oracle and asks its adapter for the offchain data.
    async fn fetch_offchain_data(
        &self,
        client: &C,
        request: &OracleRequest,
    ) -> Result<Bytes, ResolveError<C::Error>> {
        let oracle_id = self.read_oracle_id(client, request.oracle).await?;

        let adapter = self.registry.get(&oracle_id).inspect_err(|_| {
            self.metrics.unsupported_oracles.increment(1);
        })?;

        debug!(%oracle_id, oracle = %request.oracle, query = %request.query, "Fetching oracle data.");
        adapter
            .fetch_offchain_data(client, request.oracle, &request.query)
            .await
            .map_err(|error| ResolveError::Adapter { oracle_id, error })
    }

    async fn read_oracle_id(
        &self,
        client: &C,
        oracle: Address,
    ) -> Result<String, ResolveError<C::Error>> {
        let id = client
            .oracle_id(oracle)
            .await
            .map_err(|source| ResolveError::OracleId { oracle, source })?;
        Ok(oracle_id_to_string(id))
    }
}

/// Decodes a `bytes32` oracle id, dropping the zero padding on the right.
pub fn oracle_id_to_string(id: B256) -> String {
    let len = id.iter().rposition(|byte| *byte != 0).map_or(0, |last| last + 1);
    String::from_utf8_lossy(&id[..len]).into_owned()
}
