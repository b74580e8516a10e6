//! Resolver constants.

use alloy::primitives::{Address, address};
use std::num::NonZeroUsize;

/// Synthetix `TrustedMulticallForwarder` deployment address, the same across all supported chains.
///
/// See: <https://github.com/Synthetixio/trusted-multicall-forwarder>
pub const TRUSTED_MULTICALL_FORWARDER_ADDRESS: Address =
    address!("E2C5658cC5C448B48141168f3e475dF8f65A1e3e");

/// Default upper bound on the number of simulations per resolution.
pub const DEFAULT_MAX_ITERATIONS: NonZeroUsize = NonZeroUsize::new(32).unwrap();
