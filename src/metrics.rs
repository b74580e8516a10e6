//! Resolver metrics

use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// Metrics for a [`Resolver`](crate::Resolver).
#[derive(Metrics, Clone)]
#[metrics(scope = "erc7412")]
pub struct ResolverMetrics {
    /// Number of fulfillment calls inserted.
    pub fulfillments: Counter,
    /// Number of fees attached to fulfillment calls.
    pub fees: Counter,
    /// Number of lookups for oracles without an adapter.
    pub unsupported_oracles: Counter,
    /// Number of simulations needed for a successful resolution.
    pub iterations: Histogram,
}
