//! `aws_verifiedpermissions_policy_store`

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use aws_provider_framework::messages::{
    problem_diagnostic, ERR_ACTION_CREATING, ERR_ACTION_DELETING, ERR_ACTION_READING,
    ERR_ACTION_UPDATING,
};
use aws_provider_framework::{
    decode, encode, Attribute, AttributeType, Diagnostic, Diagnostics, Metadata, Resource, Schema,
    SingleNestedBlock, StringValidator,
};
use aws_provider_names::{ServiceNames, VERIFIED_PERMISSIONS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{PolicyStoreInput, VerifiedPermissionsApi};
use crate::find::find_policy_store_by_id;

pub const RES_NAME_POLICY_STORE: &str = "Policy Store";

pub const VALIDATION_MODES: [&str; 2] = ["OFF", "STRICT"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    pub mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStoreModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub policy_store_id: Option<String>,
    #[serde(default)]
    pub validation_settings: Option<ValidationSettings>,
}

impl PolicyStoreModel {
    fn input(&self) -> Result<PolicyStoreInput, Diagnostics> {
        let settings = self.validation_settings.as_ref().ok_or_else(|| {
            Diagnostics::from(
                Diagnostic::error(
                    "Missing Configuration for Required Block",
                    "Must set a configuration value for the validation_settings block.",
                )
                .with_attribute("validation_settings"),
            )
        })?;

        Ok(PolicyStoreInput {
            description: self.description.clone(),
            validation_mode: settings.mode.clone(),
        })
    }
}

pub struct ResourcePolicyStore {
    conn: Arc<dyn VerifiedPermissionsApi>,
    names: Arc<ServiceNames>,
}

impl ResourcePolicyStore {
    pub fn new(conn: Arc<dyn VerifiedPermissionsApi>, names: Arc<ServiceNames>) -> Self {
        Self { conn, names }
    }

    fn problem(&self, action: &str, id: &str, err: &dyn Display) -> Diagnostics {
        problem_diagnostic(
            &self.names,
            VERIFIED_PERMISSIONS,
            action,
            RES_NAME_POLICY_STORE,
            id,
            err,
        )
        .into()
    }
}

#[async_trait]
impl Resource for ResourcePolicyStore {
    fn metadata(&self) -> Metadata {
        Metadata {
            type_name: "aws_verifiedpermissions_policy_store",
        }
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_description("Manages an Amazon Verified Permissions policy store.")
            .with_attribute("id", Attribute::id())
            .with_attribute("arn", Attribute::computed(AttributeType::String))
            .with_attribute("description", Attribute::optional(AttributeType::String))
            .with_attribute(
                "policy_store_id",
                Attribute::computed(AttributeType::String),
            )
            .with_block(
                "validation_settings",
                SingleNestedBlock::new().is_required().with_attribute(
                    "mode",
                    Attribute::required_string()
                        .with_validator(StringValidator::OneOf(VALIDATION_MODES.to_vec())),
                ),
            )
    }

    async fn create(&self, plan: Value) -> Result<Value, Diagnostics> {
        let mut plan: PolicyStoreModel = decode(plan)?;
        let input = plan.input()?;

        let output = self
            .conn
            .create_policy_store(&input)
            .await
            .map_err(|err| self.problem(ERR_ACTION_CREATING, "", &err))?;

        log::debug!("Created Verified Permissions Policy Store {}", output.policy_store_id);

        plan.id = Some(output.policy_store_id.clone());
        plan.policy_store_id = Some(output.policy_store_id);
        plan.arn = Some(output.arn);

        encode(&plan)
    }

    async fn read(&self, state: Value) -> Result<Option<Value>, Diagnostics> {
        let mut state: PolicyStoreModel = decode(state)?;
        let id = state.id.clone().unwrap_or_default();

        let output = match find_policy_store_by_id(self.conn.as_ref(), &id).await {
            Ok(output) => output,
            Err(err) if err.is_not_found() => {
                log::warn!(
                    "Verified Permissions Policy Store ({}) not found, removing from state",
                    id
                );
                return Ok(None);
            }
            Err(err) => return Err(self.problem(ERR_ACTION_READING, &id, &err)),
        };

        state.arn = Some(output.arn);
        state.description = output.description;
        state.policy_store_id = Some(output.policy_store_id);
        state.validation_settings = output
            .validation_mode
            .map(|mode| ValidationSettings { mode });

        encode(&state).map(Some)
    }

    async fn update(&self, state: Value, plan: Value) -> Result<Value, Diagnostics> {
        let state: PolicyStoreModel = decode(state)?;
        let mut plan: PolicyStoreModel = decode(plan)?;
        let id = state.id.clone().unwrap_or_default();

        plan.id = state.id.clone();
        plan.arn.clone_from(&state.arn);
        plan.policy_store_id.clone_from(&state.policy_store_id);

        if plan.description != state.description
            || plan.validation_settings != state.validation_settings
        {
            let input = plan.input()?;
            self.conn
                .update_policy_store(&id, &input)
                .await
                .map_err(|err| self.problem(ERR_ACTION_UPDATING, &id, &err))?;
        }

        encode(&plan)
    }

    async fn delete(&self, state: Value) -> Result<(), Diagnostics> {
        let state: PolicyStoreModel = decode(state)?;
        let id = state.id.unwrap_or_default();

        log::debug!("deleting Verified Permissions Policy Store (id: {})", id);

        match self.conn.delete_policy_store(&id).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(self.problem(ERR_ACTION_DELETING, &id, &err)),
        }
    }
}
