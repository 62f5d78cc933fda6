//! Service package registration
//!
//! Each AWS service contributes a [`ServicePackage`] listing constructors for
//! its resources and data sources. The host builds a [`Registry`] from the
//! packages it ships and looks resources up by type name.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::resource::{DataSource, Resource};

pub type ResourceFactory = Arc<dyn Fn() -> Box<dyn Resource> + Send + Sync>;
pub type DataSourceFactory = Arc<dyn Fn() -> Box<dyn DataSource> + Send + Sync>;

/// A resource implemented against the [`Resource`] capability set.
#[derive(Clone)]
pub struct FrameworkResource {
    pub factory: ResourceFactory,
    /// Human-readable resource name, e.g. "Schema".
    pub name: &'static str,
}

#[derive(Clone)]
pub struct FrameworkDataSource {
    pub factory: DataSourceFactory,
    pub name: &'static str,
}

/// A legacy-style resource registered under an explicit type name.
#[derive(Clone)]
pub struct SdkResource {
    pub factory: ResourceFactory,
    pub type_name: &'static str,
    pub name: &'static str,
}

#[derive(Clone)]
pub struct SdkDataSource {
    pub factory: DataSourceFactory,
    pub type_name: &'static str,
    pub name: &'static str,
}

pub trait ServicePackage: Send + Sync {
    fn framework_data_sources(&self) -> Vec<FrameworkDataSource>;

    fn framework_resources(&self) -> Vec<FrameworkResource>;

    fn sdk_data_sources(&self) -> Vec<SdkDataSource>;

    fn sdk_resources(&self) -> Vec<SdkResource>;

    /// Provider package name of the service, e.g. `verifiedpermissions`.
    fn service_package_name(&self) -> &'static str;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("resource type {type_name} from service package {service_package} is already registered by {existing}")]
    DuplicateResource {
        type_name: String,
        service_package: &'static str,
        existing: &'static str,
    },

    #[error("data source type {type_name} from service package {service_package} is already registered by {existing}")]
    DuplicateDataSource {
        type_name: String,
        service_package: &'static str,
        existing: &'static str,
    },
}

#[derive(Clone)]
struct Registered<F> {
    service_package: &'static str,
    name: &'static str,
    factory: F,
}

/// Type name → constructor lookup for every registered service package.
#[derive(Clone, Default)]
pub struct Registry {
    resources: BTreeMap<String, Registered<ResourceFactory>>,
    data_sources: BTreeMap<String, Registered<DataSourceFactory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every resource and data source of a service package. Type names
    /// must be unique across packages and within the package. A rejected
    /// package leaves the registry unchanged.
    pub fn register(&mut self, package: &dyn ServicePackage) -> Result<(), RegistryError> {
        let service_package = package.service_package_name();
        let mut staged = self.clone();

        for resource in package.framework_resources() {
            let type_name = (resource.factory)().metadata().type_name;
            staged.insert_resource(service_package, type_name, resource.name, resource.factory)?;
        }

        for resource in package.sdk_resources() {
            staged.insert_resource(
                service_package,
                resource.type_name,
                resource.name,
                resource.factory,
            )?;
        }

        for data_source in package.framework_data_sources() {
            let type_name = (data_source.factory)().metadata().type_name;
            staged.insert_data_source(
                service_package,
                type_name,
                data_source.name,
                data_source.factory,
            )?;
        }

        for data_source in package.sdk_data_sources() {
            staged.insert_data_source(
                service_package,
                data_source.type_name,
                data_source.name,
                data_source.factory,
            )?;
        }

        *self = staged;
        log::debug!(
            "Registered service package {}: {} resources, {} data sources",
            service_package,
            self.resources.len(),
            self.data_sources.len()
        );
        Ok(())
    }

    fn insert_resource(
        &mut self,
        service_package: &'static str,
        type_name: &str,
        name: &'static str,
        factory: ResourceFactory,
    ) -> Result<(), RegistryError> {
        if let Some(existing) = self.resources.get(type_name) {
            return Err(RegistryError::DuplicateResource {
                type_name: type_name.to_string(),
                service_package,
                existing: existing.service_package,
            });
        }

        log::trace!("Registering resource {} ({})", type_name, name);
        self.resources.insert(
            type_name.to_string(),
            Registered {
                service_package,
                name,
                factory,
            },
        );
        Ok(())
    }

    fn insert_data_source(
        &mut self,
        service_package: &'static str,
        type_name: &str,
        name: &'static str,
        factory: DataSourceFactory,
    ) -> Result<(), RegistryError> {
        if let Some(existing) = self.data_sources.get(type_name) {
            return Err(RegistryError::DuplicateDataSource {
                type_name: type_name.to_string(),
                service_package,
                existing: existing.service_package,
            });
        }

        log::trace!("Registering data source {} ({})", type_name, name);
        self.data_sources.insert(
            type_name.to_string(),
            Registered {
                service_package,
                name,
                factory,
            },
        );
        Ok(())
    }

    /// Construct the resource registered under a type name.
    pub fn resource(&self, type_name: &str) -> Option<Box<dyn Resource>> {
        self.resources.get(type_name).map(|r| (r.factory)())
    }

    pub fn data_source(&self, type_name: &str) -> Option<Box<dyn DataSource>> {
        self.data_sources.get(type_name).map(|d| (d.factory)())
    }

    pub fn resource_type_names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    pub fn data_source_type_names(&self) -> Vec<&str> {
        self.data_sources.keys().map(String::as_str).collect()
    }

    /// Human-readable name and owning service package of a resource type.
    pub fn resource_name(&self, type_name: &str) -> Option<(&'static str, &'static str)> {
        self.resources
            .get(type_name)
            .map(|r| (r.name, r.service_package))
    }

    pub fn data_source_name(&self, type_name: &str) -> Option<(&'static str, &'static str)> {
        self.data_sources
            .get(type_name)
            .map(|d| (d.name, d.service_package))
    }
}
