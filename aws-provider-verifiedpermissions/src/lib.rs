//! Amazon Verified Permissions service package.
//!
//! Provides the `aws_verifiedpermissions_policy_store` and
//! `aws_verifiedpermissions_schema` resources and the
//! `aws_verifiedpermissions_policy_store` data source. Register them with
//! [`VerifiedPermissionsPackage`]:
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! use std::sync::Arc;
//!
//! use aws_provider_framework::{ProviderConfig, Registry};
//! use aws_provider_names::{ServiceNames, VERIFIED_PERMISSIONS};
//! use aws_provider_verifiedpermissions::VerifiedPermissionsPackage;
//!
//! let names = Arc::new(ServiceNames::load()?);
//! let config = ProviderConfig::from_value(serde_json::json!({"region": "us-east-1"}))?;
//! let sdk_config = config.load_sdk_config().await;
//! let client_config = config.client_config(&names, sdk_config, VERIFIED_PERMISSIONS)?;
//!
//! let mut registry = Registry::new();
//! registry.register(&VerifiedPermissionsPackage::from_client_config(
//!     &client_config,
//!     Arc::clone(&names),
//! )?)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod find;
pub mod policy_store;
pub mod policy_store_data_source;
pub mod schema;
pub mod service_package;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use api::{ApiError, AwsVerifiedPermissionsClient, VerifiedPermissionsApi};
pub use policy_store::ResourcePolicyStore;
pub use policy_store_data_source::DataSourcePolicyStore;
pub use schema::ResourceSchema;
pub use service_package::{new_client, VerifiedPermissionsPackage};
