//! Verified Permissions API surface used by the resources
//!
//! Resources talk to [`VerifiedPermissionsApi`] rather than the SDK client so
//! the request/response translation stays in one place.
//! [`AwsVerifiedPermissionsClient`] implements it over
//! `aws_sdk_verifiedpermissions::Client`.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_verifiedpermissions::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_verifiedpermissions::primitives::{DateTime, DateTimeFormat};
use aws_sdk_verifiedpermissions::types::{SchemaDefinition, ValidationMode, ValidationSettings};
use aws_sdk_verifiedpermissions::Client;
use thiserror::Error;

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{code}: {message}")]
    ResourceNotFound { code: String, message: String },

    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("building request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            code: RESOURCE_NOT_FOUND.to_string(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}

impl<E, R> From<SdkError<E, R>> for ApiError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    fn from(err: SdkError<E, R>) -> Self {
        if let SdkError::ServiceError(context) = &err {
            let service_err = context.err();
            let code = service_err.code().unwrap_or("Unknown").to_string();
            let message = service_err
                .message()
                .map_or_else(|| service_err.to_string(), ToString::to_string);

            if code == RESOURCE_NOT_FOUND {
                return Self::ResourceNotFound { code, message };
            }
            return Self::Service { code, message };
        }

        Self::Transport(Box::new(err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutSchemaOutput {
    pub policy_store_id: String,
    pub namespaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSchemaOutput {
    pub policy_store_id: String,
    /// Cedar JSON schema document. Empty when the service returned none.
    pub schema: String,
    pub namespaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyStoreInput {
    pub description: Option<String>,
    /// `OFF` or `STRICT`.
    pub validation_mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePolicyStoreOutput {
    pub policy_store_id: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyStore {
    pub policy_store_id: String,
    pub arn: String,
    pub description: Option<String>,
    pub validation_mode: Option<String>,
    /// RFC 3339.
    pub created_date: String,
    pub last_updated_date: String,
}

#[async_trait]
pub trait VerifiedPermissionsApi: Send + Sync {
    /// Replace the schema of a policy store with a Cedar JSON document.
    async fn put_schema(&self, policy_store_id: &str, cedar_json: &str)
        -> ApiResult<PutSchemaOutput>;

    async fn get_schema(&self, policy_store_id: &str) -> ApiResult<GetSchemaOutput>;

    async fn create_policy_store(
        &self,
        input: &PolicyStoreInput,
    ) -> ApiResult<CreatePolicyStoreOutput>;

    async fn get_policy_store(&self, policy_store_id: &str) -> ApiResult<PolicyStore>;

    async fn update_policy_store(
        &self,
        policy_store_id: &str,
        input: &PolicyStoreInput,
    ) -> ApiResult<()>;

    async fn delete_policy_store(&self, policy_store_id: &str) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct AwsVerifiedPermissionsClient {
    client: Client,
}

impl AwsVerifiedPermissionsClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn validation_settings(mode: &str) -> ApiResult<ValidationSettings> {
    ValidationSettings::builder()
        .mode(ValidationMode::from(mode))
        .build()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn format_date(date: &DateTime) -> String {
    date.fmt(DateTimeFormat::DateTime)
        .unwrap_or_else(|_| date.to_string())
}

#[async_trait]
impl VerifiedPermissionsApi for AwsVerifiedPermissionsClient {
    async fn put_schema(
        &self,
        policy_store_id: &str,
        cedar_json: &str,
    ) -> ApiResult<PutSchemaOutput> {
        let output = self
            .client
            .put_schema()
            .policy_store_id(policy_store_id)
            .definition(SchemaDefinition::CedarJson(cedar_json.to_string()))
            .send()
            .await?;

        Ok(PutSchemaOutput {
            policy_store_id: output.policy_store_id().to_string(),
            namespaces: output.namespaces().to_vec(),
        })
    }

    async fn get_schema(&self, policy_store_id: &str) -> ApiResult<GetSchemaOutput> {
        let output = self
            .client
            .get_schema()
            .policy_store_id(policy_store_id)
            .send()
            .await?;

        Ok(GetSchemaOutput {
            policy_store_id: output.policy_store_id().to_string(),
            schema: output.schema().to_string(),
            namespaces: output.namespaces().to_vec(),
        })
    }

    async fn create_policy_store(
        &self,
        input: &PolicyStoreInput,
    ) -> ApiResult<CreatePolicyStoreOutput> {
        let output = self
            .client
            .create_policy_store()
            .validation_settings(validation_settings(&input.validation_mode)?)
            .set_description(input.description.clone())
            .send()
            .await?;

        Ok(CreatePolicyStoreOutput {
            policy_store_id: output.policy_store_id().to_string(),
            arn: output.arn().to_string(),
        })
    }

    async fn get_policy_store(&self, policy_store_id: &str) -> ApiResult<PolicyStore> {
        let output = self
            .client
            .get_policy_store()
            .policy_store_id(policy_store_id)
            .send()
            .await?;

        Ok(PolicyStore {
            policy_store_id: output.policy_store_id().to_string(),
            arn: output.arn().to_string(),
            description: output.description().map(ToString::to_string),
            validation_mode: output
                .validation_settings()
                .map(|settings| settings.mode().as_str().to_string()),
            created_date: format_date(output.created_date()),
            last_updated_date: format_date(output.last_updated_date()),
        })
    }

    async fn update_policy_store(
        &self,
        policy_store_id: &str,
        input: &PolicyStoreInput,
    ) -> ApiResult<()> {
        self.client
            .update_policy_store()
            .policy_store_id(policy_store_id)
            .validation_settings(validation_settings(&input.validation_mode)?)
            .set_description(input.description.clone())
            .send()
            .await?;
        Ok(())
    }

    async fn delete_policy_store(&self, policy_store_id: &str) -> ApiResult<()> {
        self.client
            .delete_policy_store()
            .policy_store_id(policy_store_id)
            .send()
            .await?;
        Ok(())
    }
}
