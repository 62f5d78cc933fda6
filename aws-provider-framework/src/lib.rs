//! Resource framework contract for AWS provider service packages.
//!
//! Service packages implement [`Resource`] and [`DataSource`] for each type
//! they support and expose them through a [`ServicePackage`]. The host builds
//! a [`Registry`] from the packages it ships, loads a [`ProviderConfig`], and
//! hands each package an [`AwsClientConfig`] to construct its API client.
//!
//! Shared pieces:
//! - [`Diagnostics`], the error and warning list every operation reports
//! - [`FindError`], the finder error separating "not found" from "empty result"
//! - [`messages`], the standard `"{action} {service} {resource} ({id})"` text
//! - [`JsonProvider`], JSON normalization for free-form document attributes

pub mod config;
pub mod conns;
pub mod diag;
pub mod find;
pub mod json;
pub mod messages;
pub mod registry;
pub mod resource;
pub mod schema;

pub use config::{ConfigError, ProviderConfig};
pub use conns::{AwsClientConfig, ConfigValue};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use find::{not_found, BoxError, FindError};
pub use json::JsonProvider;
pub use registry::{
    FrameworkDataSource, FrameworkResource, Registry, RegistryError, SdkDataSource, SdkResource,
    ServicePackage,
};
pub use resource::{decode, encode, import_state_passthrough_id, DataSource, Metadata, Resource};
pub use schema::{Attribute, AttributeType, Schema, SingleNestedBlock, StringValidator};
