//! # Secret Resolver
//!
//! Turns a secret key into its value.
//!
//! ## Path Normalization
//!
//! - **Relative key** (`db_password`): joined onto the configured base path,
//!   e.g. `/app/sit1/db_password`. Without a base path this is a configuration
//!   error, since the key would be ambiguous.
//! - **Absolute key** (`/shared/api_key`): cleaned of `.`, `..` and duplicate
//!   separators. If a base path is set and the key lies outside it, a warning
//!   is logged and the lookup proceeds.
//!
//! Keys are otherwise taken verbatim, surrounding whitespace included.
//!
//! Every normalized path is fetched from the provider at most once per
//! resolver; later lookups are served from the [`SecretCache`].

use crate::config::ResolverConfig;
use crate::error::HydrateError;
use crate::provider::SecretProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod cache;
pub(crate) mod path;

pub use cache::SecretCache;

pub struct SecretResolver {
    provider: Arc<dyn SecretProvider>,
    base_path: Option<String>,
    cache: SecretCache,
}

impl std::fmt::Debug for SecretResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretResolver")
            .field("base_path", &self.base_path)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl SecretResolver {
    pub fn new(provider: Arc<dyn SecretProvider>, config: ResolverConfig) -> Self {
        Self {
            provider,
            base_path: config.base_path,
            cache: SecretCache::new(),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    #[must_use]
    pub fn cache(&self) -> &SecretCache {
        &self.cache
    }

    /// Normalize `key` into the absolute parameter path that will be fetched
    pub fn normalize(&self, key: &str) -> Result<String, HydrateError> {
        if key.trim().is_empty() {
            return Err(HydrateError::configuration(
                "empty secret key, expected a parameter name or path",
            ));
        }

        if key.starts_with('/') {
            let key = path::clean(key);
            if let Some(base) = self.base_path.as_deref() {
                if !path::is_under(&key, base) {
                    warn!("{:?} secret key doesn't match the base path {:?}", key, base);
                }
            }
            return Ok(key);
        }

        match self.base_path.as_deref() {
            Some(base) => Ok(path::join(base, key)),
            None => Err(HydrateError::configuration(format!(
                "{key:?} doesn't look like a valid parameter path, did you provide a base path, ie. --path=/app/sit1/ ?"
            ))),
        }
    }

    /// Resolve `key` to its secret value
    pub async fn resolve(&self, key: &str) -> Result<String, HydrateError> {
        let path = self.normalize(key)?;

        if let Some(value) = self.cache.get(&path) {
            debug!("Using cached value for {:?}", path);
            return Ok(value);
        }

        self.cache
            .get_or_try_fetch(&path, || async {
                info!("Fetching {:?} secret from the parameter store", path);
                self.provider
                    .get_parameter(&path)
                    .await
                    .map_err(|source| HydrateError::Resolution {
                        key: path.clone(),
                        source,
                    })
            })
            .await
    }
}
