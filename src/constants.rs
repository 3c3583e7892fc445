//! # Constants
//!
//! Shared constants used throughout hydrate.
//!
//! These values represent the reference grammar markers, the Kubernetes field
//! groups and the environment variables consulted by the CLI.

/// Marker resolving the enclosing key under the base path
pub const SELF_KEY_MARKER: &str = "$$";

/// Long form of [`SELF_KEY_MARKER`]
pub const SECRET_MARKER: &str = "$SECRET";

/// Prefix for explicit-path references, e.g. `$SECRET:/app/sit1/db_password`
pub const SECRET_PATH_PREFIX: &str = "$SECRET:";

/// Manifest discriminator field
pub const KIND_FIELD: &str = "kind";

/// Manifest metadata field (only `metadata.name` is read, for diagnostics)
pub const METADATA_FIELD: &str = "metadata";

/// Kubernetes `data` field group
pub const DATA_FIELD: &str = "data";

/// Kubernetes `stringData` field group (always plain text)
pub const STRING_DATA_FIELD: &str = "stringData";

/// Kubernetes `binaryData` field group (always base64-encoded)
pub const BINARY_DATA_FIELD: &str = "binaryData";

/// Primary AWS region environment variable
pub const AWS_DEFAULT_REGION_ENV: &str = "AWS_DEFAULT_REGION";

/// Fallback AWS region environment variable
pub const AWS_REGION_ENV: &str = "AWS_REGION";

/// Base path environment variable (same as `--path`)
pub const BASE_PATH_ENV: &str = "HYDRATE_BASE_PATH";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "hydrate=info";

/// Log filter used with `--debug` when `RUST_LOG` is not set
pub const DEBUG_LOG_FILTER: &str = "hydrate=debug";
