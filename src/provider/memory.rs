//! # In-Memory Provider
//!
//! A [`SecretProvider`] backed by a map, with per-path call counters so tests
//! can assert how often the resolver reached the backend.

use crate::provider::{ProviderError, SecretProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryProvider {
    parameters: Mutex<HashMap<String, String>>,
    denied: Mutex<Vec<String>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl std::fmt::Debug for InMemoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.parameters.lock().map(|p| p.len()).unwrap_or_default();
        f.debug_struct("InMemoryProvider")
            .field("parameters", &count)
            .finish_non_exhaustive()
    }
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider from `(path, value)` pairs
    pub fn with_parameters<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let provider = Self::new();
        for (path, value) in parameters {
            provider.insert(path, value);
        }
        provider
    }

    /// Store or overwrite a parameter
    pub fn insert(&self, path: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut parameters) = self.parameters.lock() {
            parameters.insert(path.into(), value.into());
        }
    }

    /// Make every lookup of `path` fail with [`ProviderError::AccessDenied`]
    pub fn deny(&self, path: impl Into<String>) {
        if let Ok(mut denied) = self.denied.lock() {
            denied.push(path.into());
        }
    }

    /// Number of lookups made for `path`
    #[must_use]
    pub fn calls(&self, path: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(path).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Number of lookups made across all paths
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.values().sum())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SecretProvider for InMemoryProvider {
    async fn get_parameter(&self, path: &str) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(path.to_string()).or_default() += 1;
        }

        let denied = self
            .denied
            .lock()
            .map(|denied| denied.iter().any(|p| p == path))
            .unwrap_or_default();
        if denied {
            return Err(ProviderError::AccessDenied(path.to_string()));
        }

        self.parameters
            .lock()
            .map_err(|e| ProviderError::Backend(anyhow::anyhow!("parameter store poisoned: {e}")))?
            .get(path)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(path.to_string()))
    }
}
