//! Resource and data source capabilities
//!
//! The host drives every resource through the same capability set: Metadata,
//! Schema, Create, Read, Update, Delete and Import. State crosses the boundary
//! as a JSON object laid out per the resource's [`Schema`]; implementations
//! decode it into a typed model with [`decode`] and write it back with
//! [`encode`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::diag::{Diagnostic, Diagnostics};
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Type name the host addresses the resource by, e.g.
    /// `aws_verifiedpermissions_schema`.
    pub type_name: &'static str,
}

#[async_trait]
pub trait Resource: Send + Sync {
    fn metadata(&self) -> Metadata;

    fn schema(&self) -> Schema;

    /// Check a configuration before planning. Defaults to schema validation.
    fn validate_config(&self, config: &Value) -> Diagnostics {
        self.schema().validate(config)
    }

    /// Create the remote resource from the planned state and return the new
    /// state.
    async fn create(&self, plan: Value) -> Result<Value, Diagnostics>;

    /// Refresh state from the remote resource. `Ok(None)` means the resource
    /// no longer exists and should be removed from state.
    async fn read(&self, state: Value) -> Result<Option<Value>, Diagnostics>;

    async fn update(&self, state: Value, plan: Value) -> Result<Value, Diagnostics>;

    async fn delete(&self, state: Value) -> Result<(), Diagnostics>;

    /// Turn an import identifier into a minimal state for a following read.
    async fn import_state(&self, id: &str) -> Result<Value, Diagnostics> {
        Ok(import_state_passthrough_id(id))
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn metadata(&self) -> Metadata;

    fn schema(&self) -> Schema;

    fn validate_config(&self, config: &Value) -> Diagnostics {
        self.schema().validate(config)
    }

    async fn read(&self, config: Value) -> Result<Value, Diagnostics>;
}

/// State holding only `id`, set verbatim from an import identifier.
pub fn import_state_passthrough_id(id: &str) -> Value {
    json!({ "id": id })
}

/// Decode host state or plan into a typed model.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Diagnostics> {
    serde_json::from_value(value).map_err(|err| {
        Diagnostic::error(
            "Value Conversion Error",
            format!("An unexpected error was encountered trying to convert the value into the resource model: {err}"),
        )
        .into()
    })
}

/// Encode a typed model as host state.
pub fn encode<T: Serialize>(model: &T) -> Result<Value, Diagnostics> {
    serde_json::to_value(model).map_err(|err| {
        Diagnostic::error(
            "Value Conversion Error",
            format!("An unexpected error was encountered trying to convert the resource model into state: {err}"),
        )
        .into()
    })
}
