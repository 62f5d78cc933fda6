//! Provider configuration
//!
//! [`ProviderConfig`] is deserialized from the provider block the host hands
//! over. It loads the shared AWS SDK configuration and resolves per-service
//! endpoint overrides into the [`AwsClientConfig`] each service package builds
//! its client from.

use std::collections::BTreeMap;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_provider_names::{NamesError, ServiceNames};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::conns::AwsClientConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid provider configuration: {0}")]
    InvalidProviderConfig(#[from] serde_json::Error),

    #[error("invalid endpoint URL for {service} ({url}): {source}")]
    InvalidEndpoint {
        service: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint service: {0}")]
    UnknownEndpointService(#[source] NamesError),

    #[error("endpoint for {provider_package} is set more than once ({first}, {second})")]
    DuplicateEndpoint {
        provider_package: String,
        first: String,
        second: String,
    },

    #[error("client configuration is missing {0}")]
    MissingClientConfig(&'static str),

    #[error("client configuration entry {0} has an unexpected type")]
    InvalidClientConfig(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Endpoint overrides keyed by any service alias, e.g. `verifiedpermissions`.
    pub endpoints: BTreeMap<String, String>,
    /// Ignore `TF_AWS_*_ENDPOINT` and deprecated endpoint environment variables.
    pub skip_endpoint_env_vars: bool,
}

impl ProviderConfig {
    /// Deserialize and check a provider configuration object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value)?;

        for (service, url) in &config.endpoints {
            Url::parse(url).map_err(|source| ConfigError::InvalidEndpoint {
                service: service.clone(),
                url: url.clone(),
                source,
            })?;
        }

        Ok(config)
    }

    /// Explicit endpoint overrides keyed by provider package.
    pub fn resolved_endpoints(
        &self,
        names: &ServiceNames,
    ) -> Result<BTreeMap<String, String>, ConfigError> {
        let mut resolved: BTreeMap<String, (String, String)> = BTreeMap::new();

        for (alias, url) in &self.endpoints {
            let package = names
                .provider_package_for_alias(alias)
                .map_err(ConfigError::UnknownEndpointService)?;

            if let Some((first, _)) = resolved.get(package) {
                return Err(ConfigError::DuplicateEndpoint {
                    provider_package: package.to_string(),
                    first: first.clone(),
                    second: alias.clone(),
                });
            }
            resolved.insert(package.to_string(), (alias.clone(), url.clone()));
        }

        Ok(resolved
            .into_iter()
            .map(|(package, (_, url))| (package, url))
            .collect())
    }

    /// Endpoint override for one provider package: explicit configuration
    /// first, then the `TF_AWS_*` variable, then the deprecated variable.
    pub fn endpoint_for(
        &self,
        names: &ServiceNames,
        provider_package: &str,
    ) -> Result<Option<String>, ConfigError> {
        if let Some(url) = self.resolved_endpoints(names)?.remove(provider_package) {
            return Ok(Some(url));
        }

        if self.skip_endpoint_env_vars {
            return Ok(None);
        }

        if let Some(var) = names.tf_aws_env_var(provider_package) {
            if let Some(url) = non_empty_env(var) {
                log::debug!("Using endpoint for {} from {}", provider_package, var);
                return Ok(Some(url));
            }
        }

        if let Some(var) = names.deprecated_env_var(provider_package) {
            if let Some(url) = non_empty_env(var) {
                log::warn!(
                    "The environment variable {} is deprecated; use {} instead",
                    var,
                    names.tf_aws_env_var(provider_package).unwrap_or("AWS_ENDPOINT_URL")
                );
                return Ok(Some(url));
            }
        }

        Ok(None)
    }

    /// Load the shared SDK configuration from the default credential chain.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            log::debug!("Using configured region {}", region);
            loader = loader.region(aws_config::Region::new(region.clone()));
        }

        if let Some(profile) = &self.profile {
            log::debug!("Using configured profile {}", profile);
            loader = loader.profile_name(profile);
        }

        loader.load().await
    }

    /// Client configuration for one provider package.
    pub fn client_config(
        &self,
        names: &ServiceNames,
        sdk_config: SdkConfig,
        provider_package: &str,
    ) -> Result<AwsClientConfig, ConfigError> {
        let config = AwsClientConfig::new(sdk_config);

        Ok(match self.endpoint_for(names, provider_package)? {
            Some(endpoint) => config.with_endpoint(endpoint),
            None => config,
        })
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    const NAMES: &str = "\
ProviderPackageActual,ProviderPackageCorrect,Aliases,ProviderNameUpper,SdkCrate,HumanFriendly,Brand,Exclude,NotImplemented,EndpointOnly,DeprecatedEnvVar,TfAwsEnvVar,Note
,verifiedpermissions,avp,VerifiedPermissions,aws-sdk-verifiedpermissions,Verified Permissions,Amazon,,,,AVP_TEST_DEPRECATED_ENDPOINT,TF_AWS_AVP_TEST_ENDPOINT,
";

    fn names() -> ServiceNames {
        ServiceNames::from_csv(NAMES.as_bytes()).unwrap()
    }

    fn clear_env() {
        std::env::remove_var("TF_AWS_AVP_TEST_ENDPOINT");
        std::env::remove_var("AVP_TEST_DEPRECATED_ENDPOINT");
    }

    #[test]
    fn test_from_value_defaults() {
        let config = ProviderConfig::from_value(json!({})).unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_from_value_rejects_unknown_fields_and_bad_urls() {
        assert!(matches!(
            ProviderConfig::from_value(json!({"regoin": "us-east-1"})),
            Err(ConfigError::InvalidProviderConfig(_))
        ));
        assert!(matches!(
            ProviderConfig::from_value(json!({"endpoints": {"avp": "not a url"}})),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoints_resolve_through_aliases() {
        let config = ProviderConfig::from_value(json!({
            "endpoints": {"avp": "http://localhost:4566"}
        }))
        .unwrap();
        let resolved = config.resolved_endpoints(&names()).unwrap();
        assert_eq!(
            resolved.get("verifiedpermissions").map(String::as_str),
            Some("http://localhost:4566")
        );
    }

    #[test]
    fn test_duplicate_and_unknown_endpoints() {
        let config = ProviderConfig::from_value(json!({
            "endpoints": {"avp": "http://a", "verifiedpermissions": "http://b"}
        }))
        .unwrap();
        assert!(matches!(
            config.resolved_endpoints(&names()),
            Err(ConfigError::DuplicateEndpoint { .. })
        ));

        let config = ProviderConfig::from_value(json!({"endpoints": {"nope": "http://a"}})).unwrap();
        assert!(matches!(
            config.resolved_endpoints(&names()),
            Err(ConfigError::UnknownEndpointService(_))
        ));
    }

    #[test]
    #[serial]
    fn test_endpoint_precedence() {
        clear_env();
        let names = names();
        let mut config = ProviderConfig::default();
        assert_eq!(config.endpoint_for(&names, "verifiedpermissions").unwrap(), None);

        std::env::set_var("AVP_TEST_DEPRECATED_ENDPOINT", "http://deprecated");
        assert_eq!(
            config.endpoint_for(&names, "verifiedpermissions").unwrap().as_deref(),
            Some("http://deprecated")
        );

        std::env::set_var("TF_AWS_AVP_TEST_ENDPOINT", "http://tf-aws");
        assert_eq!(
            config.endpoint_for(&names, "verifiedpermissions").unwrap().as_deref(),
            Some("http://tf-aws")
        );

        config
            .endpoints
            .insert("verifiedpermissions".into(), "http://explicit".into());
        assert_eq!(
            config.endpoint_for(&names, "verifiedpermissions").unwrap().as_deref(),
            Some("http://explicit")
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_skip_endpoint_env_vars() {
        clear_env();
        std::env::set_var("TF_AWS_AVP_TEST_ENDPOINT", "http://tf-aws");
        let config = ProviderConfig {
            skip_endpoint_env_vars: true,
            ..ProviderConfig::default()
        };
        assert_eq!(config.endpoint_for(&names(), "verifiedpermissions").unwrap(), None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_client_config_carries_endpoint() {
        clear_env();
        let config = ProviderConfig::from_value(json!({
            "endpoints": {"verifiedpermissions": "http://localhost:4566"}
        }))
        .unwrap();
        let client_config = config
            .client_config(&names(), SdkConfig::builder().build(), "verifiedpermissions")
            .unwrap();
        assert!(client_config.sdk_config().is_ok());
        assert_eq!(client_config.endpoint().unwrap(), Some("http://localhost:4566"));
    }
}
