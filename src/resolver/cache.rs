//! # Secret Cache
//!
//! Append-only map from normalized parameter path to fetched value.
//!
//! Each path owns a [`OnceCell`], so concurrent lookups of the same path wait
//! on a single fetch instead of racing to the provider. A failed fetch leaves
//! the cell empty. Values are wiped from memory when the cache is dropped.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use zeroize::Zeroizing;

type Slot = Arc<OnceCell<Zeroizing<String>>>;

#[derive(Default)]
pub struct SecretCache {
    entries: Mutex<HashMap<String, Slot>>,
}

impl std::fmt::Debug for SecretCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCache")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}

impl SecretCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, path: &str) -> Slot {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(path.to_string()).or_default())
    }

    /// Cached value for `path`, if it has been fetched
    #[must_use]
    pub fn get(&self, path: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(path)
            .and_then(|slot| slot.get())
            .map(|value| value.as_str().to_owned())
    }

    /// Return the cached value for `path`, running `fetch` only if no value is cached
    pub async fn get_or_try_fetch<F, Fut, E>(&self, path: &str, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let slot = self.slot(path);
        let value = slot
            .get_or_try_init(|| async move { fetch().await.map(Zeroizing::new) })
            .await?;
        Ok(value.as_str().to_owned())
    }

    /// Number of fetched values
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|slot| slot.initialized()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
