//! # ERC-7412
//!
//! Resolves the offchain oracle data and fees a contract call depends on into a single aggregated
//! call that can be submitted as is.
//!
//! See: <https://eips.ethereum.org/EIPS/eip-7412>

pub mod adapter;
pub mod aggregate;
pub mod call;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod metrics;
pub mod resolver;
pub mod revert;

pub use adapter::{AdapterRegistry, HttpAdapter, OracleAdapter};
pub use aggregate::{Aggregate, TrustedMulticallForwarder};
pub use call::{Call, CallBatch};
pub use client::{ChainClient, ProviderClient};
pub use error::{AggregateError, RegistryError, ResolveError, UnsupportedOracle};
pub use resolver::Resolver;
pub use revert::{CauseChain, ExtractRevertData, OracleFailure, revert_data};
