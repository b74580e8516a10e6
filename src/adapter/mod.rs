//! Oracle adapters.
//!
//! An adapter knows how to produce the offchain data one oracle network expects in
//! `fulfillOracleQuery`. Adapters are keyed by the id the oracle contract returns from `oracleId()`.

mod http;
pub use http::{HttpAdapter, HttpAdapterConfig};

use crate::error::{RegistryError, UnsupportedOracle};
use alloy::primitives::{Address, Bytes};
use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::Arc,
};

/// Fetches offchain data for an oracle network.
///
/// `C` is the chain client the resolver runs with, handed to the adapter in case it needs to read
/// chain state while building its data.
#[async_trait::async_trait]
pub trait OracleAdapter<C: ?Sized>: Send + Sync {
    /// The oracle id this adapter serves.
    fn oracle_id(&self) -> &str;

    /// Returns the data to pass as `signedOffchainData` to `fulfillOracleQuery` of `oracle` for
    /// `query`.
    async fn fetch_offchain_data(
        &self,
        client: &C,
        oracle: Address,
        query: &Bytes,
    ) -> eyre::Result<Bytes>;
}

/// Adapters keyed by oracle id.
pub struct AdapterRegistry<C: ?Sized> {
    adapters: HashMap<String, Arc<dyn OracleAdapter<C>>>,
}

impl<C: ?Sized> fmt::Debug for AdapterRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry").field("oracles", &self.oracle_ids()).finish()
    }
}

impl<C: ?Sized> AdapterRegistry<C> {
    /// Creates a registry from `adapters`.
    ///
    /// Fails if two adapters share an oracle id.
    pub fn new(
        adapters: impl IntoIterator<Item = Arc<dyn OracleAdapter<C>>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = HashMap::new();
        for adapter in adapters {
            match registry.entry(adapter.oracle_id().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(RegistryError::DuplicateOracleId(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(adapter);
                }
            }
        }
        Ok(Self { adapters: registry })
    }

    /// Returns the adapter for `oracle_id`.
    pub fn get(&self, oracle_id: &str) -> Result<&Arc<dyn OracleAdapter<C>>, UnsupportedOracle> {
        self.adapters.get(oracle_id).ok_or_else(|| UnsupportedOracle {
            oracle_id: oracle_id.to_string(),
            supported: self.oracle_ids(),
        })
    }

    /// Registered oracle ids, sorted.
    pub fn oracle_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.adapters.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether no adapter is registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
