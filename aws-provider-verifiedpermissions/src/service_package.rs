use std::sync::Arc;

use aws_provider_framework::{
    AwsClientConfig, ConfigError, DataSource, FrameworkDataSource, FrameworkResource, Resource,
    SdkDataSource, SdkResource, ServicePackage,
};
use aws_provider_names::{ServiceNames, VERIFIED_PERMISSIONS};
use aws_sdk_verifiedpermissions::Client;

use crate::api::{AwsVerifiedPermissionsClient, VerifiedPermissionsApi};
use crate::policy_store::{ResourcePolicyStore, RES_NAME_POLICY_STORE};
use crate::policy_store_data_source::{DataSourcePolicyStore, DS_NAME_POLICY_STORE};
use crate::schema::{ResourceSchema, RES_NAME_POLICY_STORE_SCHEMA};

/// Build a Verified Permissions client from the shared SDK configuration,
/// binding the endpoint override when one is set.
pub fn new_client(config: &AwsClientConfig) -> Result<Client, ConfigError> {
    let sdk_config = config.sdk_config()?;
    let mut builder = aws_sdk_verifiedpermissions::config::Builder::from(sdk_config);

    if let Some(endpoint) = config.endpoint()? {
        log::debug!("Using Verified Permissions endpoint {}", endpoint);
        builder = builder.endpoint_url(endpoint);
    }

    Ok(Client::from_conf(builder.build()))
}

pub struct VerifiedPermissionsPackage {
    conn: Arc<dyn VerifiedPermissionsApi>,
    names: Arc<ServiceNames>,
}

impl VerifiedPermissionsPackage {
    pub fn new(conn: Arc<dyn VerifiedPermissionsApi>, names: Arc<ServiceNames>) -> Self {
        Self { conn, names }
    }

    pub fn from_client_config(
        config: &AwsClientConfig,
        names: Arc<ServiceNames>,
    ) -> Result<Self, ConfigError> {
        let client = new_client(config)?;
        Ok(Self::new(
            Arc::new(AwsVerifiedPermissionsClient::new(client)),
            names,
        ))
    }
}

impl ServicePackage for VerifiedPermissionsPackage {
    fn framework_data_sources(&self) -> Vec<FrameworkDataSource> {
        let conn = Arc::clone(&self.conn);
        let names = Arc::clone(&self.names);

        vec![FrameworkDataSource {
            factory: Arc::new(move || -> Box<dyn DataSource> {
                Box::new(DataSourcePolicyStore::new(
                    Arc::clone(&conn),
                    Arc::clone(&names),
                ))
            }),
            name: DS_NAME_POLICY_STORE,
        }]
    }

    fn framework_resources(&self) -> Vec<FrameworkResource> {
        let (conn, names) = (Arc::clone(&self.conn), Arc::clone(&self.names));
        let policy_store = FrameworkResource {
            factory: Arc::new(move || -> Box<dyn Resource> {
                Box::new(ResourcePolicyStore::new(
                    Arc::clone(&conn),
                    Arc::clone(&names),
                ))
            }),
            name: RES_NAME_POLICY_STORE,
        };

        let (conn, names) = (Arc::clone(&self.conn), Arc::clone(&self.names));
        let schema = FrameworkResource {
            factory: Arc::new(move || -> Box<dyn Resource> {
                Box::new(ResourceSchema::new(Arc::clone(&conn), Arc::clone(&names)))
            }),
            name: RES_NAME_POLICY_STORE_SCHEMA,
        };

        vec![policy_store, schema]
    }

    fn sdk_data_sources(&self) -> Vec<SdkDataSource> {
        Vec::new()
    }

    fn sdk_resources(&self) -> Vec<SdkResource> {
        Vec::new()
    }

    fn service_package_name(&self) -> &'static str {
        VERIFIED_PERMISSIONS
    }
}
