//! # ERC-7412 resolver
//!
//! Resolves the offchain oracle data a contract call depends on.
use clap::Parser;
use erc7412::cli::Args;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // logs go to stderr, stdout carries the resolved call
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    Args::parse().run().await
}
