//! # Errors
//!
//! Error taxonomy for the hydration engine.
//!
//! Leaf variants describe what went wrong; `InField` and `InManifest` wrap a
//! leaf with the document path or manifest entry it happened in. Use
//! [`HydrateError::root`] to look past the wrappers.

use crate::codec::Format;
use crate::provider::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HydrateError {
    /// Invalid or ambiguous configuration, e.g. a relative key with no base path
    #[error("{0}")]
    Configuration(String),

    /// Manifest `kind` is neither `ConfigMap` nor `Secret`
    #[error("k8s object is of kind={kind:?} (supported: ConfigMap, Secret)")]
    UnsupportedKind { kind: String },

    /// A base64-encoded field could not be decoded
    #[error("failed to base64-decode {field:?}: {source}")]
    Encoding {
        field: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Provider lookup failed for the requested key
    #[error("failed to fetch {key:?} parameter: {source}")]
    Resolution {
        key: String,
        #[source]
        source: ProviderError,
    },

    /// A structured document could not be decoded or encoded
    #[error("failed to {operation} {format}: {message}")]
    Format {
        format: Format,
        operation: &'static str,
        message: String,
    },

    #[error("failed to hydrate {path:?} field: {source}")]
    InField {
        path: String,
        #[source]
        source: Box<HydrateError>,
    },

    #[error("k8s {kind}/{name}: failed to hydrate {key}: {source}")]
    InManifest {
        kind: String,
        name: String,
        key: String,
        #[source]
        source: Box<HydrateError>,
    },
}

impl HydrateError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        HydrateError::Configuration(message.into())
    }

    pub(crate) fn decode(format: Format, err: impl std::fmt::Display) -> Self {
        HydrateError::Format {
            format,
            operation: "decode",
            message: err.to_string(),
        }
    }

    pub(crate) fn encode(format: Format, err: impl std::fmt::Display) -> Self {
        HydrateError::Format {
            format,
            operation: "encode",
            message: err.to_string(),
        }
    }

    pub(crate) fn in_field<S: AsRef<str>>(path: &[S], source: HydrateError) -> Self {
        HydrateError::InField {
            path: path
                .iter()
                .map(|segment| segment.as_ref())
                .collect::<Vec<&str>>()
                .join("."),
            source: Box::new(source),
        }
    }

    /// The underlying error, with field/manifest context stripped
    #[must_use]
    pub fn root(&self) -> &HydrateError {
        match self {
            HydrateError::InField { source, .. } | HydrateError::InManifest { source, .. } => {
                source.root()
            }
            other => other,
        }
    }

    /// Whether the root cause is a missing parameter in the provider
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root(),
            HydrateError::Resolution {
                source: ProviderError::NotFound(_),
                ..
            }
        )
    }
}
