//! # Hydrate
//!
//! Reads a JSON, YAML or TOML document stream from a file or stdin, replaces
//! secret references with values from AWS SSM Parameter Store and writes the
//! result to stdout. Diagnostics go to stderr.
//!
//! Output is written only after every document hydrated successfully, so a
//! failed run never leaves a half-hydrated file behind a shell redirect.

use anyhow::Context;
use clap::Parser;
use hydrate::cli::Cli;
use hydrate::constants::{DEBUG_LOG_FILTER, DEFAULT_LOG_FILTER};
use hydrate::provider::aws::AwsParameterStore;
use hydrate::{HydrateConfig, HydrateError, Hydrator, SecretResolver};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

#[tokio::main]
async fn main() {
    // Err means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    debug!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    if let Err(e) = run(&cli).await {
        // Hydration errors already spell out their causes
        match e.downcast_ref::<HydrateError>() {
            Some(hydrate_error) => error!("{hydrate_error}"),
            None => error!("{e:#}"),
        }
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let fallback = if debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = HydrateConfig::from_cli(cli)?;
    debug!("Configuration: {:?}", config);

    let input = config.input.read().await?;

    let provider = AwsParameterStore::new(&config.region).await;
    let resolver = SecretResolver::new(Arc::new(provider), config.resolver.clone());
    let hydrator = Hydrator::new(resolver);

    let output = hydrator
        .hydrate_stream(&input, config.format, config.mode)
        .await?;
    debug!(
        "Hydrated {} with {} secret(s)",
        config.format,
        hydrator.resolver().cache().len()
    );

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(&output)
        .await
        .context("Failed to write output")?;
    stdout.flush().await.context("Failed to write output")?;
    Ok(())
}
