//! # Configuration
//!
//! Run configuration assembled from command-line flags with environment
//! variable fallbacks.
//!
//! The hydration engine only ever sees [`ResolverConfig`]; everything else is
//! consumed by the binary's wiring.

use crate::cli::Cli;
use crate::codec::Format;
use crate::constants::{AWS_DEFAULT_REGION_ENV, AWS_REGION_ENV, BASE_PATH_ENV};
use crate::error::HydrateError;
use crate::hydrate::Mode;
use anyhow::Context;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Secret resolver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Absolute prefix joined onto relative secret keys
    pub base_path: Option<String>,
}

impl ResolverConfig {
    /// Configure a base path
    ///
    /// `""` and `"."` mean no base path. Anything else is made absolute and
    /// cleaned, so `app/sit1/` becomes `/app/sit1`.
    #[must_use]
    pub fn with_base_path(path: &str) -> Self {
        let base_path = match path.trim() {
            "" | "." => None,
            path => Some(crate::resolver::path::clean(path)),
        };
        Self { base_path }
    }
}

/// Where the input document stream is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Read the whole input into memory
    pub async fn read(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut buffer = Vec::new();
                tokio::io::stdin()
                    .read_to_end(&mut buffer)
                    .await
                    .context("Failed to read stdin")?;
                Ok(buffer)
            }
            Input::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display())),
        }
    }
}

/// Fully resolved configuration for one `hydrate` run
#[derive(Debug, Clone)]
pub struct HydrateConfig {
    pub input: Input,
    pub format: Format,
    pub mode: Mode,
    pub region: String,
    pub resolver: ResolverConfig,
    pub debug: bool,
}

impl HydrateConfig {
    /// Build configuration from parsed flags and the process environment
    pub fn from_cli(cli: &Cli) -> Result<Self, HydrateError> {
        Self::from_cli_with_env(cli, |key| std::env::var(key).ok())
    }

    /// Build configuration from parsed flags, reading fallbacks through `env`
    pub fn from_cli_with_env<F>(cli: &Cli, env: F) -> Result<Self, HydrateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = if cli.input == "-" {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(&cli.input))
        };

        let format = match (cli.format.as_deref(), &input) {
            (Some(name), _) => name.parse()?,
            (None, Input::File(path)) => Format::from_path(&path.to_string_lossy()).ok_or_else(|| {
                HydrateError::configuration(format!(
                    "can't detect the format of {:?}, use --format=[json|yaml|toml]",
                    path.display()
                ))
            })?,
            (None, Input::Stdin) => Format::Yaml,
        };

        let region = cli
            .region
            .clone()
            .or_else(|| env_var_non_empty(&env, AWS_DEFAULT_REGION_ENV))
            .or_else(|| env_var_non_empty(&env, AWS_REGION_ENV))
            .ok_or_else(|| {
                HydrateError::configuration(format!(
                    "--region=[us-west-2] or ${AWS_DEFAULT_REGION_ENV} must be provided"
                ))
            })?;

        let resolver = cli
            .base_path
            .clone()
            .or_else(|| env_var_non_empty(&env, BASE_PATH_ENV))
            .map_or_else(ResolverConfig::default, |path| {
                ResolverConfig::with_base_path(&path)
            });

        let mode = if cli.k8s { Mode::Kubernetes } else { Mode::Plain };

        Ok(Self {
            input,
            format,
            mode,
            region,
            resolver,
            debug: cli.debug,
        })
    }
}

/// Read environment variable, treating empty values as unset
fn env_var_non_empty<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).filter(|value| !value.trim().is_empty())
}
