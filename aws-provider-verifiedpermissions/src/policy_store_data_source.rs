//! `aws_verifiedpermissions_policy_store` data source

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_provider_framework::messages::{problem_diagnostic, ERR_ACTION_READING};
use aws_provider_framework::{
    decode, encode, Attribute, AttributeType, DataSource, Diagnostics, Metadata, Schema,
};
use aws_provider_names::{ServiceNames, VERIFIED_PERMISSIONS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::VerifiedPermissionsApi;
use crate::find::find_policy_store_by_id;
use crate::policy_store::{ValidationSettings, RES_NAME_POLICY_STORE};

pub const DS_NAME_POLICY_STORE: &str = RES_NAME_POLICY_STORE;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStoreDataSourceModel {
    pub id: String,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_updated_date: Option<String>,
    #[serde(default)]
    pub validation_settings: Vec<ValidationSettings>,
}

pub struct DataSourcePolicyStore {
    conn: Arc<dyn VerifiedPermissionsApi>,
    names: Arc<ServiceNames>,
}

impl DataSourcePolicyStore {
    pub fn new(conn: Arc<dyn VerifiedPermissionsApi>, names: Arc<ServiceNames>) -> Self {
        Self { conn, names }
    }
}

#[async_trait]
impl DataSource for DataSourcePolicyStore {
    fn metadata(&self) -> Metadata {
        Metadata {
            type_name: "aws_verifiedpermissions_policy_store",
        }
    }

    fn schema(&self) -> Schema {
        let validation_settings = AttributeType::List(Box::new(AttributeType::Object(
            BTreeMap::from([("mode".to_string(), AttributeType::String)]),
        )));

        Schema::new()
            .with_attribute("id", Attribute::required_string())
            .with_attribute("arn", Attribute::computed(AttributeType::String))
            .with_attribute("created_date", Attribute::computed(AttributeType::String))
            .with_attribute("description", Attribute::computed(AttributeType::String))
            .with_attribute(
                "last_updated_date",
                Attribute::computed(AttributeType::String),
            )
            .with_attribute(
                "validation_settings",
                Attribute::computed(validation_settings),
            )
    }

    async fn read(&self, config: Value) -> Result<Value, Diagnostics> {
        let mut data: PolicyStoreDataSourceModel = decode(config)?;

        let output = find_policy_store_by_id(self.conn.as_ref(), &data.id)
            .await
            .map_err(|err| {
                Diagnostics::from(problem_diagnostic(
                    &self.names,
                    VERIFIED_PERMISSIONS,
                    ERR_ACTION_READING,
                    DS_NAME_POLICY_STORE,
                    &data.id,
                    &err,
                ))
            })?;

        data.arn = Some(output.arn);
        data.created_date = Some(output.created_date);
        data.description = output.description;
        data.last_updated_date = Some(output.last_updated_date);
        data.validation_settings = output
            .validation_mode
            .map(|mode| ValidationSettings { mode })
            .into_iter()
            .collect();

        encode(&data)
    }
}
