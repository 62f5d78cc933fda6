//! Client factory configuration
//!
//! Service packages build their API client from an [`AwsClientConfig`]: a
//! mapping holding the shared SDK configuration under [`AWS_SDK_CONFIG_KEY`]
//! and an optional endpoint override under [`ENDPOINT_KEY`].

use std::collections::HashMap;

use aws_config::SdkConfig;

use crate::config::ConfigError;

pub const AWS_SDK_CONFIG_KEY: &str = "aws_sdk_config";
pub const ENDPOINT_KEY: &str = "endpoint";

#[derive(Debug, Clone)]
pub enum ConfigValue {
    SdkConfig(Box<SdkConfig>),
    String(String),
}

#[derive(Debug, Clone, Default)]
pub struct AwsClientConfig {
    values: HashMap<String, ConfigValue>,
}

impl AwsClientConfig {
    pub fn new(sdk_config: SdkConfig) -> Self {
        let mut config = Self::default();
        config.insert(AWS_SDK_CONFIG_KEY, ConfigValue::SdkConfig(Box::new(sdk_config)));
        config
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.insert(ENDPOINT_KEY, ConfigValue::String(endpoint.into()));
        self
    }

    pub fn insert(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// The pre-built shared SDK configuration.
    pub fn sdk_config(&self) -> Result<&SdkConfig, ConfigError> {
        match self.values.get(AWS_SDK_CONFIG_KEY) {
            Some(ConfigValue::SdkConfig(config)) => Ok(config),
            Some(_) => Err(ConfigError::InvalidClientConfig(AWS_SDK_CONFIG_KEY)),
            None => Err(ConfigError::MissingClientConfig(AWS_SDK_CONFIG_KEY)),
        }
    }

    /// The endpoint override, if one is set and non-empty.
    pub fn endpoint(&self) -> Result<Option<&str>, ConfigError> {
        match self.values.get(ENDPOINT_KEY) {
            Some(ConfigValue::String(endpoint)) if endpoint.trim().is_empty() => Ok(None),
            Some(ConfigValue::String(endpoint)) => Ok(Some(endpoint.as_str())),
            Some(_) => Err(ConfigError::InvalidClientConfig(ENDPOINT_KEY)),
            None => Ok(None),
        }
    }
}
