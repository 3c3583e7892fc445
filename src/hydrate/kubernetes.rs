//! # Kubernetes Manifests
//!
//! Hydrates `Secret` and `ConfigMap` objects field group by field group.
//!
//! ## Field Groups
//!
//! | Kind        | `data`  | `stringData` | `binaryData` |
//! |-------------|---------|--------------|--------------|
//! | `Secret`    | base64  | plain        | base64       |
//! | `ConfigMap` | plain   | plain        | base64       |
//!
//! Entries whose key ends in `.json`, `.yaml`, `.yml` or `.toml` are treated
//! as embedded files: decoded, walked like a plain document and re-encoded.
//! Any other entry is a single value and goes through the reference grammar
//! with the entry key as the self-key.
//!
//! A document without a `kind` is hydrated like a plain document.

use crate::codec::Format;
use crate::constants::{
    BINARY_DATA_FIELD, DATA_FIELD, KIND_FIELD, METADATA_FIELD, STRING_DATA_FIELD,
};
use crate::document::{Document, Map};
use crate::error::HydrateError;
use crate::hydrate::walker::{hydrate_map, resolve_scalar};
use crate::resolver::SecretResolver;
use base64::{engine::general_purpose, Engine as _};
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::Resource;
use std::borrow::Cow;
use tracing::{debug, info, warn};

const UNNAMED: &str = "<unnamed>";

/// How values in a field group are stored on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Base64,
}

impl Encoding {
    /// Raw bytes of a stored value
    ///
    /// Whitespace inside base64 text is ignored, so line-wrapped values decode.
    pub fn decode(self, value: &str) -> Result<Cow<'_, [u8]>, base64::DecodeError> {
        match self {
            Encoding::Plain => Ok(Cow::Borrowed(value.as_bytes())),
            Encoding::Base64 => {
                let compact: String = value
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                general_purpose::STANDARD.decode(compact).map(Cow::Owned)
            }
        }
    }

    /// Stored form of raw bytes
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Plain => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Base64 => general_purpose::STANDARD.encode(bytes),
        }
    }

    fn is_base64(self) -> bool {
        self == Encoding::Base64
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldGroup {
    name: &'static str,
    encoding: Encoding,
}

const SECRET_FIELDS: [FieldGroup; 3] = [
    FieldGroup {
        name: DATA_FIELD,
        encoding: Encoding::Base64,
    },
    FieldGroup {
        name: STRING_DATA_FIELD,
        encoding: Encoding::Plain,
    },
    FieldGroup {
        name: BINARY_DATA_FIELD,
        encoding: Encoding::Base64,
    },
];

const CONFIG_MAP_FIELDS: [FieldGroup; 3] = [
    FieldGroup {
        name: DATA_FIELD,
        encoding: Encoding::Plain,
    },
    FieldGroup {
        name: STRING_DATA_FIELD,
        encoding: Encoding::Plain,
    },
    FieldGroup {
        name: BINARY_DATA_FIELD,
        encoding: Encoding::Base64,
    },
];

/// Manifest kinds with field-group handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    ConfigMap,
    Secret,
}

impl ManifestKind {
    /// Match a manifest `kind`; `None` for anything unsupported
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        if kind == ConfigMap::KIND {
            Some(ManifestKind::ConfigMap)
        } else if kind == Secret::KIND {
            Some(ManifestKind::Secret)
        } else {
            None
        }
    }

    /// Lowercase label used in logs and errors
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ManifestKind::ConfigMap => "configmap",
            ManifestKind::Secret => "secret",
        }
    }

    fn field_groups(self) -> &'static [FieldGroup] {
        match self {
            ManifestKind::ConfigMap => &CONFIG_MAP_FIELDS,
            ManifestKind::Secret => &SECRET_FIELDS,
        }
    }
}

/// Hydrate a document that may be a Kubernetes manifest
pub(crate) async fn hydrate_manifest(
    resolver: &SecretResolver,
    doc: &mut Map,
) -> Result<(), HydrateError> {
    // A non-string kind counts as absent
    let kind = doc
        .get(KIND_FIELD)
        .and_then(Document::as_str)
        .unwrap_or_default()
        .to_string();

    if kind.is_empty() {
        debug!("Document has no kind, hydrating as a plain document");
        return hydrate_map(resolver, doc, &[]).await;
    }

    let manifest_kind =
        ManifestKind::from_kind(&kind).ok_or(HydrateError::UnsupportedKind { kind })?;
    let name = manifest_name(doc);

    for group in manifest_kind.field_groups() {
        let Some(entries) = doc.get_mut(group.name).and_then(Document::as_map_mut) else {
            continue;
        };

        for (key, value) in entries.iter_mut() {
            let raw = match value {
                Document::String(raw) => raw,
                other => {
                    warn!(
                        "k8s {}/{}: skipping {}.{} (not a string, found {})",
                        manifest_kind.label(),
                        name,
                        group.name,
                        key,
                        other.type_name()
                    );
                    continue;
                }
            };

            let hydrated = hydrate_entry(resolver, manifest_kind, &name, group, key, raw)
                .await
                .map_err(|source| HydrateError::InManifest {
                    kind: manifest_kind.label().to_string(),
                    name: name.clone(),
                    key: key.clone(),
                    source: Box::new(source),
                })?;

            if let Some(replacement) = hydrated {
                *raw = replacement;
            }
        }
    }

    Ok(())
}

fn manifest_name(doc: &Map) -> String {
    doc.get(METADATA_FIELD)
        .and_then(Document::as_map)
        .and_then(|metadata| metadata.get("name"))
        .and_then(Document::as_str)
        .unwrap_or(UNNAMED)
        .to_string()
}

/// Hydrate one field group entry, returning its new stored value if it changed
async fn hydrate_entry(
    resolver: &SecretResolver,
    kind: ManifestKind,
    name: &str,
    group: &FieldGroup,
    key: &str,
    raw: &str,
) -> Result<Option<String>, HydrateError> {
    let content = group
        .encoding
        .decode(raw)
        .map_err(|source| HydrateError::Encoding {
            field: format!("{}.{}", group.name, key),
            source,
        })?;

    if let Some(format) = Format::from_path(key) {
        info!(
            "k8s {}/{}: {} ({} {} file, base64-encoded: {})",
            kind.label(),
            name,
            key,
            group.name,
            format,
            group.encoding.is_base64()
        );

        let mut documents = format.decode(&content)?;
        for document in &mut documents {
            hydrate_map(resolver, document, &[]).await?;
        }
        let encoded = format.encode(&documents)?;
        return Ok(Some(group.encoding.encode(&encoded)));
    }

    info!(
        "k8s {}/{}: {} ({} value, base64-encoded: {})",
        kind.label(),
        name,
        key,
        group.name,
        group.encoding.is_base64()
    );

    let Ok(text) = std::str::from_utf8(&content) else {
        debug!("{}.{} holds binary data, leaving it as is", group.name, key);
        return Ok(None);
    };

    Ok(resolve_scalar(resolver, text, key)
        .await?
        .map(|secret| group.encoding.encode(secret.as_bytes())))
}
