//! # AWS Providers
//!
//! AWS SDK configuration shared by the AWS-backed providers.
//!
//! Credentials come from the default provider chain (environment, shared
//! profile, web identity / IRSA, instance metadata), so the same binary works
//! on a laptop, in CI and inside an EKS pod.

use aws_config::SdkConfig;
use tracing::info;

mod parameter_store;

pub use parameter_store::AwsParameterStore;

/// Create AWS SDK config using default credential chain
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    info!("Loading AWS configuration for region {}", region);
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await
}
