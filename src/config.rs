//! Resolver configuration.
use crate::{
    adapter::HttpAdapterConfig,
    constants::{DEFAULT_MAX_ITERATIONS, TRUSTED_MULTICALL_FORWARDER_ADDRESS},
};
use alloy::primitives::Address;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{num::NonZeroUsize, path::Path};
use url::Url;

/// Configuration of a [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum number of simulations before resolution is abandoned. Must be at least one.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: NonZeroUsize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

impl ResolverConfig {
    /// Sets the maximum number of simulations.
    pub fn with_max_iterations(mut self, max_iterations: NonZeroUsize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

fn default_max_iterations() -> NonZeroUsize {
    DEFAULT_MAX_ITERATIONS
}

fn default_multicall() -> Address {
    TRUSTED_MULTICALL_FORWARDER_ADDRESS
}

/// Configuration of the `erc7412` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc7412Config {
    /// The RPC endpoint used for simulations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<Url>,
    /// Address of the `TrustedMulticallForwarder` used to aggregate calls.
    #[serde(default = "default_multicall")]
    pub multicall: Address,
    /// Resolver configuration.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// HTTP oracle adapters.
    #[serde(default)]
    pub adapters: Vec<HttpAdapterConfig>,
}

impl Default for Erc7412Config {
    fn default() -> Self {
        Self {
            rpc_url: None,
            multicall: TRUSTED_MULTICALL_FORWARDER_ADDRESS,
            resolver: ResolverConfig::default(),
            adapters: Vec::new(),
        }
    }
}

impl Erc7412Config {
    /// Sets the RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: Url) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    /// Sets the `TrustedMulticallForwarder` address.
    pub fn with_multicall(mut self, multicall: Address) -> Self {
        self.multicall = multicall;
        self
    }

    /// Sets the maximum number of simulations.
    pub fn with_max_iterations(mut self, max_iterations: NonZeroUsize) -> Self {
        self.resolver.max_iterations = max_iterations;
        self
    }

    /// Adds HTTP adapters. Adapters for an oracle id that is already configured replace the
    /// configured one.
    pub fn with_adapters(mut self, adapters: impl IntoIterator<Item = HttpAdapterConfig>) -> Self {
        for adapter in adapters {
            self.adapters.retain(|configured| configured.oracle_id != adapter.oracle_id);
            self.adapters.push(adapter);
        }
        self
    }

    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
