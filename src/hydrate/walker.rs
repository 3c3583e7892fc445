//! # Document Walker
//!
//! Recursive in-place hydration of a document map.
//!
//! String values are classified with the reference grammar and replaced by
//! their secret; nested maps are walked with the key appended to the path.
//! Lists and other scalars are left alone, so a reference inside a list
//! element is not hydrated. The first error aborts the walk.

use crate::document::{Document, Map};
use crate::error::HydrateError;
use crate::hydrate::reference::SecretReference;
use crate::resolver::SecretResolver;
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

/// Resolve a single scalar found under `current_key`
///
/// Returns `Ok(None)` for plain values.
pub(crate) async fn resolve_scalar(
    resolver: &SecretResolver,
    raw: &str,
    current_key: &str,
) -> Result<Option<String>, HydrateError> {
    match SecretReference::classify(raw, current_key).lookup_key() {
        Some(key) => resolver.resolve(key).await.map(Some),
        None => Ok(None),
    }
}

/// Hydrate every reference in `map`; `path` is the key chain from the document root
pub(crate) fn hydrate_map<'a>(
    resolver: &'a SecretResolver,
    map: &'a mut Map,
    path: &'a [String],
) -> BoxFuture<'a, Result<(), HydrateError>> {
    async move {
        for (key, value) in map.iter_mut() {
            match value {
                Document::String(raw) => {
                    let resolved = resolve_scalar(resolver, raw, key).await.map_err(|e| {
                        let mut field = path.to_vec();
                        field.push(key.clone());
                        HydrateError::in_field(&field, e)
                    })?;
                    if let Some(secret) = resolved {
                        *raw = secret;
                    }
                }
                Document::Map(nested) => {
                    let mut nested_path = path.to_vec();
                    nested_path.push(key.clone());
                    hydrate_map(resolver, nested, &nested_path).await?;
                }
                Document::List(_) => {
                    debug!("Not descending into list at {:?}", key);
                }
                Document::Null
                | Document::Bool(_)
                | Document::Number(_)
                | Document::Datetime(_) => {}
            }
        }
        Ok(())
    }
    .boxed()
}
