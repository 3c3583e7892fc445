//! # AWS Parameter Store Client
//!
//! Client for reading parameters from AWS Systems Manager Parameter Store.
//!
//! `SecureString` parameters are decrypted on read (`WithDecryption=true`).
//! Lookups are never retried here: the SDK's own retry policy applies and a
//! missing parameter is reported as [`ProviderError::NotFound`].

use crate::provider::{ProviderError, SecretProvider};
use async_trait::async_trait;
use aws_sdk_ssm::error::ProvideErrorMetadata;
use aws_sdk_ssm::Client as SsmClient;
use tracing::{debug, info};

/// Error code returned by AWS when the caller lacks `ssm:GetParameter`
const ACCESS_DENIED_CODE: &str = "AccessDeniedException";

/// AWS Parameter Store provider implementation
pub struct AwsParameterStore {
    client: SsmClient,
    region: String,
}

impl std::fmt::Debug for AwsParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsParameterStore")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsParameterStore {
    /// Create a new AWS Parameter Store client for `region`
    pub async fn new(region: &str) -> Self {
        let sdk_config = super::load_sdk_config(region).await;
        info!("Using AWS SSM Parameter Store in region {}", region);
        Self::from_client(SsmClient::new(&sdk_config), region)
    }

    /// Wrap an already configured SSM client
    #[must_use]
    pub fn from_client(client: SsmClient, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl SecretProvider for AwsParameterStore {
    async fn get_parameter(&self, path: &str) -> Result<String, ProviderError> {
        debug!("GetParameter {} (region {})", path, self.region);

        match self
            .client
            .get_parameter()
            .name(path)
            .with_decryption(true) // Decrypt SecureString parameters
            .send()
            .await
        {
            Ok(response) => response
                .parameter()
                .and_then(|parameter| parameter.value())
                .map(str::to_string)
                .ok_or_else(|| ProviderError::NotFound(path.to_string())),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_parameter_not_found() {
                    Err(ProviderError::NotFound(path.to_string()))
                } else if service_error.code() == Some(ACCESS_DENIED_CODE) {
                    Err(ProviderError::AccessDenied(path.to_string()))
                } else {
                    Err(ProviderError::Backend(anyhow::anyhow!(
                        "AWS Parameter Store GetParameter failed: {service_error}"
                    )))
                }
            }
        }
    }
}
