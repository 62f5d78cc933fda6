//! `aws_verifiedpermissions_schema`
//!
//! The schema of a policy store. The service has no delete operation for
//! schemas, so deleting the resource overwrites the definition with `{}`.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use aws_provider_framework::messages::{
    problem_diagnostic, ERR_ACTION_CREATING, ERR_ACTION_DELETING, ERR_ACTION_READING,
    ERR_ACTION_UPDATING,
};
use aws_provider_framework::{
    decode, encode, Attribute, AttributeType, Diagnostic, Diagnostics, JsonProvider, Metadata,
    Resource, Schema, SingleNestedBlock, StringValidator,
};
use aws_provider_names::{ServiceNames, VERIFIED_PERMISSIONS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::VerifiedPermissionsApi;
use crate::find::find_schema_by_policy_store_id;

pub const RES_NAME_POLICY_STORE_SCHEMA: &str = "Schema";

/// Definition written to a policy store when the schema resource is deleted.
pub const EMPTY_SCHEMA_DEFINITION: &str = "{}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub definition: Option<Definition>,
    #[serde(default)]
    pub namespaces: Option<BTreeSet<String>>,
    #[serde(default)]
    pub policy_store_id: String,
}

impl SchemaModel {
    /// Identifier used in problem messages.
    fn display_id(&self) -> &str {
        if self.policy_store_id.is_empty() {
            self.id.as_deref().unwrap_or_default()
        } else {
            &self.policy_store_id
        }
    }
}

pub struct ResourceSchema {
    conn: Arc<dyn VerifiedPermissionsApi>,
    names: Arc<ServiceNames>,
}

impl ResourceSchema {
    pub fn new(conn: Arc<dyn VerifiedPermissionsApi>, names: Arc<ServiceNames>) -> Self {
        Self { conn, names }
    }

    fn problem(&self, action: &str, id: &str, err: &dyn Display) -> Diagnostics {
        problem_diagnostic(
            &self.names,
            VERIFIED_PERMISSIONS,
            action,
            RES_NAME_POLICY_STORE_SCHEMA,
            id,
            err,
        )
        .into()
    }
}

fn expand_definition(model: &SchemaModel) -> Result<&str, Diagnostics> {
    match &model.definition {
        Some(definition) => Ok(&definition.value),
        None => Err(Diagnostic::error(
            "Missing Configuration for Required Block",
            "Must set a configuration value for the definition block.",
        )
        .with_attribute("definition")
        .into()),
    }
}

/// Normalize the schema document returned by the service.
fn flatten_definition(schema: &str) -> Result<Definition, Diagnostics> {
    let data = JsonProvider::parse_to_value(schema)
        .map_err(|err| Diagnostic::error("unable to unmarshal schema", err.to_string()))?;

    let value = JsonProvider::stringify_value(&data)
        .map_err(|err| Diagnostic::error("unable to marshal schema", err.to_string()))?;

    Ok(Definition { value })
}

#[async_trait]
impl Resource for ResourceSchema {
    fn metadata(&self) -> Metadata {
        Metadata {
            type_name: "aws_verifiedpermissions_schema",
        }
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_description("Manages the schema of an Amazon Verified Permissions policy store.")
            .with_attribute("id", Attribute::id())
            .with_attribute(
                "namespaces",
                Attribute::computed(AttributeType::string_set()),
            )
            .with_attribute(
                "policy_store_id",
                Attribute::required_string().requires_replace(),
            )
            .with_block(
                "definition",
                SingleNestedBlock::new().is_required().with_attribute(
                    "value",
                    Attribute::required_string().with_validator(StringValidator::Json),
                ),
            )
    }

    async fn create(&self, plan: Value) -> Result<Value, Diagnostics> {
        let mut plan: SchemaModel = decode(plan)?;
        let definition = expand_definition(&plan)?;

        let output = self
            .conn
            .put_schema(&plan.policy_store_id, definition)
            .await
            .map_err(|err| self.problem(ERR_ACTION_CREATING, &plan.policy_store_id, &err))?;

        plan.id = Some(output.policy_store_id);
        plan.namespaces = Some(output.namespaces.into_iter().collect());

        encode(&plan)
    }

    async fn read(&self, state: Value) -> Result<Option<Value>, Diagnostics> {
        let mut state: SchemaModel = decode(state)?;
        let id = state.id.clone().unwrap_or_default();

        let output = match find_schema_by_policy_store_id(self.conn.as_ref(), &id).await {
            Ok(output) => output,
            Err(err) if err.is_not_found() => {
                log::warn!(
                    "Verified Permissions Policy Store Schema ({}) not found, removing from state",
                    id
                );
                return Ok(None);
            }
            Err(err) => return Err(self.problem(ERR_ACTION_READING, state.display_id(), &err)),
        };

        state.policy_store_id = output.policy_store_id;
        state.namespaces = Some(output.namespaces.into_iter().collect());
        state.definition = Some(flatten_definition(&output.schema)?);

        encode(&state).map(Some)
    }

    async fn update(&self, state: Value, plan: Value) -> Result<Value, Diagnostics> {
        self.schema()
            .check_in_place_update(&state, &plan)
            .into_result(())?;

        let state: SchemaModel = decode(state)?;
        let mut plan: SchemaModel = decode(plan)?;

        if plan.id.is_none() {
            plan.id.clone_from(&state.id);
        }

        if plan.definition == state.definition {
            plan.namespaces = state.namespaces;
            return encode(&plan);
        }

        let id = state.id.clone().unwrap_or_default();
        let definition = expand_definition(&plan)?;

        self.conn
            .put_schema(&id, definition)
            .await
            .map_err(|err| self.problem(ERR_ACTION_UPDATING, state.display_id(), &err))?;

        let output = find_schema_by_policy_store_id(self.conn.as_ref(), &id)
            .await
            .map_err(|err| self.problem(ERR_ACTION_UPDATING, state.display_id(), &err))?;

        plan.namespaces = Some(output.namespaces.into_iter().collect());

        encode(&plan)
    }

    async fn delete(&self, state: Value) -> Result<(), Diagnostics> {
        let state: SchemaModel = decode(state)?;
        let id = state.id.clone().unwrap_or_default();

        log::debug!("deleting Verified Permissions Policy Store Schema (id: {})", id);

        match self.conn.put_schema(&id, EMPTY_SCHEMA_DEFINITION).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(self.problem(ERR_ACTION_DELETING, state.display_id(), &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_flatten_definition_normalizes() {
        let definition = flatten_definition("{ \"b\": 2,\n  \"a\": {\"x\": []} }").unwrap();
        assert_eq!(definition.value, r#"{"a":{"x":[]},"b":2}"#);
    }

    #[test]
    fn test_flatten_definition_reports_parse_errors() {
        let diags = flatten_definition("{nope").unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "unable to unmarshal schema");
        assert!(!diag.detail.is_empty());
    }

    #[test]
    fn test_model_decodes_planned_state() {
        let model: SchemaModel = decode(json!({
            "id": null,
            "policy_store_id": "ps-1",
            "definition": {"value": "{}"},
            "namespaces": null
        }))
        .unwrap();
        assert_eq!(model.policy_store_id, "ps-1");
        assert_eq!(model.display_id(), "ps-1");
        assert!(model.id.is_none());
    }

    #[test]
    fn test_display_id_falls_back_to_id() {
        let model = SchemaModel {
            id: Some("ps-9".into()),
            ..SchemaModel::default()
        };
        assert_eq!(model.display_id(), "ps-9");
    }

    #[test]
    fn test_expand_definition_requires_block() {
        let diags = expand_definition(&SchemaModel::default()).unwrap_err();
        assert_eq!(
            diags.iter().next().unwrap().attribute.as_deref(),
            Some("definition")
        );
    }

    proptest! {
        #[test]
        fn prop_flatten_definition_is_stable(keys in proptest::collection::btree_map("[a-z]{1,6}", 0i64..100, 0..6)) {
            let document = serde_json::to_string_pretty(&keys).unwrap();
            let once = flatten_definition(&document).unwrap();
            let twice = flatten_definition(&once.value).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
