//! # Hydration Engine
//!
//! Replaces secret references in decoded documents with values from the
//! configured [`SecretProvider`](crate::provider::SecretProvider).
//!
//! ## Modes
//!
//! - **Plain**: every string value in the document tree is checked against
//!   the reference grammar, nested maps included, lists excluded.
//! - **Kubernetes**: `Secret` and `ConfigMap` manifests have their `data`,
//!   `stringData` and `binaryData` entries hydrated with the right encoding;
//!   documents without a `kind` fall back to plain mode.
//!
//! Hydration is all-or-nothing per document: on error the caller's document
//! is left exactly as it was.

use crate::codec::Format;
use crate::document::Map;
use crate::error::HydrateError;
use crate::resolver::SecretResolver;
use tracing::debug;

pub mod kubernetes;
pub mod reference;
mod walker;

pub use kubernetes::{Encoding, ManifestKind};
pub use reference::SecretReference;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Plain,
    Kubernetes,
}

#[derive(Debug)]
pub struct Hydrator {
    resolver: SecretResolver,
}

impl Hydrator {
    pub fn new(resolver: SecretResolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &SecretResolver {
        &self.resolver
    }

    /// Hydrate a single document in place
    pub async fn hydrate_document(&self, doc: &mut Map, mode: Mode) -> Result<(), HydrateError> {
        let mut working = doc.clone();
        match mode {
            Mode::Plain => walker::hydrate_map(&self.resolver, &mut working, &[]).await?,
            Mode::Kubernetes => kubernetes::hydrate_manifest(&self.resolver, &mut working).await?,
        }
        *doc = working;
        Ok(())
    }

    /// Decode `input`, hydrate every document in order and encode the result
    ///
    /// Nothing is returned unless every document hydrates.
    pub async fn hydrate_stream(
        &self,
        input: &[u8],
        format: Format,
        mode: Mode,
    ) -> Result<Vec<u8>, HydrateError> {
        let mut documents = format.decode(input)?;
        debug!("Decoded {} {} document(s)", documents.len(), format);

        for doc in &mut documents {
            self.hydrate_document(doc, mode).await?;
        }

        format.encode(&documents)
    }
}
