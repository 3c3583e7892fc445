//! # Hydrate
//!
//! Injects secrets from AWS SSM Parameter Store into JSON, YAML and TOML
//! documents, including Kubernetes `Secret` and `ConfigMap` manifests.
//!
//! ## Secret References
//!
//! String values of the following shapes are replaced by the secret they
//! point to; everything else passes through untouched:
//!
//! - `$SECRET:/custom/parameter/path`: explicit parameter path
//! - `$$` or `$SECRET`: the value's own key, joined onto the base path
//!
//! ## Library Usage
//!
//! ```no_run
//! use hydrate::{Format, Hydrator, Mode, ResolverConfig, SecretResolver};
//! use hydrate::provider::aws::AwsParameterStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), hydrate::HydrateError> {
//! let provider = Arc::new(AwsParameterStore::new("us-west-2").await);
//! let resolver = SecretResolver::new(provider, ResolverConfig::with_base_path("/app/sit1"));
//! let hydrator = Hydrator::new(resolver);
//!
//! let output = hydrator
//!     .hydrate_stream(br#"{"db_password": "$$"}"#, Format::Json, Mode::Plain)
//!     .await?;
//! # let _ = output;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod hydrate;
pub mod provider;
pub mod resolver;

pub use codec::Format;
pub use config::{HydrateConfig, Input, ResolverConfig};
pub use document::{Document, Map};
pub use error::HydrateError;
pub use hydrate::{Hydrator, Mode};
pub use provider::{ProviderError, SecretProvider};
pub use resolver::SecretResolver;
