//! # ERC-7412 CLI
use crate::{
    adapter::{HttpAdapter, HttpAdapterConfig},
    aggregate::TrustedMulticallForwarder,
    call::Call,
    client::ProviderClient,
    config::Erc7412Config,
    resolver::Resolver,
};
use alloy::{
    primitives::{Address, Bytes, U256},
    providers::ProviderBuilder,
};
use clap::Parser;
use eyre::OptionExt;
use std::{num::NonZeroUsize, path::PathBuf};
use tracing::info;
use url::Url;

/// Resolves the ERC-7412 oracle data a call depends on and prints the aggregated call.
#[derive(Debug, Parser)]
#[command(author, version, about = "ERC-7412 resolver", long_about = None)]
pub struct Args {
    /// The configuration file.
    #[arg(long, value_name = "CONFIG", env = "ERC7412_CONFIG")]
    pub config: Option<PathBuf>,
    /// The RPC endpoint used to simulate calls.
    ///
    /// Must be a valid HTTP or HTTPS URL pointing to an Ethereum JSON-RPC endpoint.
    #[arg(long = "rpc-url", value_name = "RPC_ENDPOINT", env = "ERC7412_RPC_URL")]
    pub rpc_url: Option<Url>,
    /// The target of the call.
    #[arg(long, value_name = "ADDRESS")]
    pub to: Address,
    /// The calldata of the call.
    #[arg(long, value_name = "HEX", default_value = "0x")]
    pub data: Bytes,
    /// The native value sent with the call.
    #[arg(long, value_name = "WEI", default_value_t = U256::ZERO)]
    pub value: U256,
    /// The sender used for simulations.
    #[arg(long, value_name = "ADDRESS")]
    pub from: Option<Address>,
    /// The address of the `TrustedMulticallForwarder` used to aggregate calls.
    #[arg(long, value_name = "ADDRESS")]
    pub multicall: Option<Address>,
    /// Maximum number of simulations before giving up. Must be at least one.
    #[arg(long = "max-iterations", value_name = "NUM")]
    pub max_iterations: Option<NonZeroUsize>,
    /// An HTTP oracle adapter, as `ORACLE_ID=URL`.
    #[arg(long = "adapter", value_name = "ORACLE_ID=URL", value_parser = parse_adapter)]
    pub adapters: Vec<HttpAdapterConfig>,
}

impl Args {
    /// Merges the configuration file with the CLI arguments. Arguments take precedence.
    pub fn to_config(&self) -> eyre::Result<Erc7412Config> {
        let mut config = match &self.config {
            Some(path) => Erc7412Config::load_from_file(path)?,
            None => Erc7412Config::default(),
        };

        if let Some(rpc_url) = &self.rpc_url {
            config = config.with_rpc_url(rpc_url.clone());
        }
        if let Some(multicall) = self.multicall {
            config = config.with_multicall(multicall);
        }
        if let Some(max_iterations) = self.max_iterations {
            config = config.with_max_iterations(max_iterations);
        }

        Ok(config.with_adapters(self.adapters.iter().cloned()))
    }

    /// Resolve the call and print the aggregated call as JSON.
    pub async fn run(self) -> eyre::Result<()> {
        let config = self.to_config()?;
        let rpc_url = config
            .rpc_url
            .clone()
            .ok_or_eyre("missing RPC endpoint, pass --rpc-url or set rpc_url in the config")?;

        let mut client = ProviderClient::new(ProviderBuilder::new().connect_http(rpc_url));
        if let Some(from) = self.from {
            client = client.with_from(from);
        }

        let adapters = HttpAdapter::from_configs(config.adapters.iter().cloned());
        let resolver = Resolver::new(adapters, TrustedMulticallForwarder::new(config.multicall))?
            .with_config(config.resolver);

        info!(oracles = ?resolver.registry().oracle_ids(), to = %self.to, "Resolving call.");
        let resolved =
            resolver.resolve(&client, Call::new(self.to, self.data).with_value(self.value)).await?;

        println!("{}", serde_json::to_string_pretty(&resolved)?);
        Ok(())
    }
}

/// Parses an adapter in the format of "oracle_id=url".
fn parse_adapter(arg: &str) -> eyre::Result<HttpAdapterConfig> {
    let (oracle_id, url) = arg.split_once('=').ok_or_eyre("expected oracle_id=url argument")?;

    Ok(HttpAdapterConfig { oracle_id: oracle_id.to_string(), url: url.parse()? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn parse_args() {
        let args = Args::try_parse_from([
            "erc7412",
            "--rpc-url",
            "http://localhost:8545",
            "--to",
            "0x0000000000000000000000000000000000000011",
            "--data",
            "0xdeadbeef",
            "--adapter",
            "PYTH=https://erc7412.example.com/pyth",
            "--max-iterations",
            "4",
        ])
        .unwrap();

        assert_eq!(args.to, address!("0000000000000000000000000000000000000011"));
        assert_eq!(args.value, U256::ZERO);

        let config = args.to_config().unwrap();
        assert_eq!(config.rpc_url.unwrap().as_str(), "http://localhost:8545/");
        assert_eq!(config.resolver.max_iterations.get(), 4);
        assert_eq!(config.adapters.len(), 1);
        assert_eq!(config.adapters[0].oracle_id, "PYTH");
    }

    #[test]
    fn parse_zero_max_iterations() {
        let args = Args::try_parse_from([
            "erc7412",
            "--to",
            "0x0000000000000000000000000000000000000011",
            "--max-iterations",
            "0",
        ]);
        assert!(args.is_err());
    }

    #[test]
    fn parse_invalid_adapter() {
        assert!(parse_adapter("PYTH").is_err());
        assert!(parse_adapter("PYTH=not a url").is_err());
    }
}
