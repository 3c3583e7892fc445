//! # Provider Modules
//!
//! Secret backends the resolver fetches parameters from.
//!
//! Each provider implements [`SecretProvider`]:
//! - [`aws::AwsParameterStore`] for AWS Systems Manager Parameter Store
//! - [`memory::InMemoryProvider`] for tests and local dry runs

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a secret backend
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("parameter not found")]
    NotFound(String),

    #[error("access denied")]
    AccessDenied(String),

    /// Transient or unclassified backend failure
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Provider trait for secret backends
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Fetch the plaintext value stored at an absolute parameter path
    ///
    /// Secure values must be returned decrypted.
    async fn get_parameter(&self, path: &str) -> Result<String, ProviderError>;
}

// Provider implementations
pub mod aws;
pub mod memory;
