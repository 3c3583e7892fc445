//! Common test utilities for hydration integration tests
//!
//! Builds a [`Hydrator`] backed by an in-memory parameter store so tests can
//! assert both the hydrated output and how often each parameter was fetched.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use hydrate::provider::memory::InMemoryProvider;
use hydrate::{Format, Hydrator, Map, ResolverConfig, SecretProvider, SecretResolver};
use std::sync::Arc;

/// Parameters used across the README examples
pub const EXAMPLE_PARAMETERS: [(&str, &str); 3] = [
    ("/custom/parameter/path", "a"),
    ("/prefix/db_passwd", "bb"),
    ("/prefix/db_pwd", "ccc"),
];

/// Hydrator with base path `base_path` over the given parameters
pub fn hydrator_with(
    base_path: &str,
    parameters: &[(&str, &str)],
) -> (Arc<InMemoryProvider>, Hydrator) {
    let provider = Arc::new(InMemoryProvider::with_parameters(
        parameters.iter().copied(),
    ));
    let resolver = SecretResolver::new(
        Arc::clone(&provider) as Arc<dyn SecretProvider>,
        ResolverConfig::with_base_path(base_path),
    );
    (provider, Hydrator::new(resolver))
}

/// Decode every document of `text` in `format`
pub fn documents(format: Format, text: &str) -> Vec<Map> {
    format
        .decode(text.as_bytes())
        .expect("test fixture should decode")
}
