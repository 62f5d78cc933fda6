//! In-memory Verified Permissions API for tests.
//!
//! Policy store ids are assigned sequentially (`ps-1`, `ps-2`, ...). Schema
//! namespaces are the top-level keys of the stored Cedar JSON document.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{
    ApiError, ApiResult, CreatePolicyStoreOutput, GetSchemaOutput, PolicyStore, PolicyStoreInput,
    PutSchemaOutput, VerifiedPermissionsApi,
};

const TIMESTAMP: &str = "2024-01-01T00:00:00Z";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub put_schema: usize,
    pub get_schema: usize,
    pub create_policy_store: usize,
    pub get_policy_store: usize,
    pub update_policy_store: usize,
    pub delete_policy_store: usize,
}

#[derive(Debug, Default)]
struct State {
    next_id: usize,
    stores: BTreeMap<String, PolicyStore>,
    schemas: BTreeMap<String, String>,
    calls: CallCounts,
    put_schema_log: Vec<(String, String)>,
    fail_next: Option<Failure>,
}

#[derive(Debug)]
struct Failure {
    /// `None` fails whichever call comes next.
    operation: Option<&'static str>,
    code: String,
    message: String,
}

#[derive(Debug, Default)]
pub struct FakeVerifiedPermissions {
    state: Mutex<State>,
}

impl FakeVerifiedPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Add a policy store directly and return its id.
    pub fn add_policy_store(&self, validation_mode: &str, description: Option<&str>) -> String {
        let mut state = self.lock();
        insert_store(
            &mut state,
            &PolicyStoreInput {
                description: description.map(ToString::to_string),
                validation_mode: validation_mode.to_string(),
            },
        )
        .policy_store_id
    }

    /// Store a schema document verbatim, bypassing validation.
    pub fn insert_raw_schema(&self, policy_store_id: &str, schema: &str) {
        let mut state = self.lock();
        if !state.stores.contains_key(policy_store_id) {
            state.stores.insert(
                policy_store_id.to_string(),
                new_store(policy_store_id, None, "OFF"),
            );
        }
        state
            .schemas
            .insert(policy_store_id.to_string(), schema.to_string());
    }

    pub fn schema(&self, policy_store_id: &str) -> Option<String> {
        self.lock().schemas.get(policy_store_id).cloned()
    }

    pub fn policy_store(&self, policy_store_id: &str) -> Option<PolicyStore> {
        self.lock().stores.get(policy_store_id).cloned()
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls.clone()
    }

    /// Every `(policy_store_id, document)` sent to `put_schema`, in order.
    pub fn put_schema_log(&self) -> Vec<(String, String)> {
        self.lock().put_schema_log.clone()
    }

    /// Make the next API call fail with the given service error code.
    pub fn fail_next_with(&self, code: &str, message: &str) {
        self.lock().fail_next = Some(Failure {
            operation: None,
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    /// Make the next call of one operation (e.g. `"GetSchema"`) fail, letting
    /// other operations through until then.
    pub fn fail_next_call_with(&self, operation: &'static str, code: &str, message: &str) {
        self.lock().fail_next = Some(Failure {
            operation: Some(operation),
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    /// Remove a policy store and its schema behind the resources' back.
    pub fn remove_policy_store(&self, policy_store_id: &str) {
        let mut state = self.lock();
        state.stores.remove(policy_store_id);
        state.schemas.remove(policy_store_id);
    }
}

fn new_store(id: &str, description: Option<String>, validation_mode: &str) -> PolicyStore {
    PolicyStore {
        policy_store_id: id.to_string(),
        arn: format!("arn:aws:verifiedpermissions::123456789012:policy-store/{id}"),
        description,
        validation_mode: Some(validation_mode.to_string()),
        created_date: TIMESTAMP.to_string(),
        last_updated_date: TIMESTAMP.to_string(),
    }
}

fn insert_store(state: &mut State, input: &PolicyStoreInput) -> PolicyStore {
    state.next_id += 1;
    let id = format!("ps-{}", state.next_id);
    let store = new_store(&id, input.description.clone(), &input.validation_mode);
    state.stores.insert(id, store.clone());
    store
}

fn take_failure(state: &mut State, operation: &str) -> ApiResult<()> {
    let targeted = state
        .fail_next
        .as_ref()
        .is_some_and(|failure| failure.operation.filter(|op| *op != operation).is_none());
    if !targeted {
        return Ok(());
    }

    match state.fail_next.take() {
        Some(Failure { code, message, .. }) if code == "ResourceNotFoundException" => {
            Err(ApiError::not_found(message))
        }
        Some(Failure { code, message, .. }) => Err(ApiError::Service { code, message }),
        None => Ok(()),
    }
}

fn store_not_found(policy_store_id: &str) -> ApiError {
    ApiError::not_found(format!("policy store {policy_store_id} not found"))
}

fn namespaces(document: &str) -> ApiResult<Vec<String>> {
    match serde_json::from_str::<Value>(document) {
        Ok(Value::Object(map)) => Ok(map.keys().cloned().collect()),
        Ok(_) => Err(ApiError::Service {
            code: "ValidationException".to_string(),
            message: "schema must be a JSON object".to_string(),
        }),
        Err(err) => Err(ApiError::Service {
            code: "ValidationException".to_string(),
            message: format!("invalid schema: {err}"),
        }),
    }
}

#[async_trait]
impl VerifiedPermissionsApi for FakeVerifiedPermissions {
    async fn put_schema(
        &self,
        policy_store_id: &str,
        cedar_json: &str,
    ) -> ApiResult<PutSchemaOutput> {
        let mut state = self.lock();
        state.calls.put_schema += 1;
        state
            .put_schema_log
            .push((policy_store_id.to_string(), cedar_json.to_string()));
        take_failure(&mut state, "PutSchema")?;

        if !state.stores.contains_key(policy_store_id) {
            return Err(store_not_found(policy_store_id));
        }

        let namespaces = namespaces(cedar_json)?;
        state
            .schemas
            .insert(policy_store_id.to_string(), cedar_json.to_string());

        Ok(PutSchemaOutput {
            policy_store_id: policy_store_id.to_string(),
            namespaces,
        })
    }

    async fn get_schema(&self, policy_store_id: &str) -> ApiResult<GetSchemaOutput> {
        let mut state = self.lock();
        state.calls.get_schema += 1;
        take_failure(&mut state, "GetSchema")?;

        let schema = state
            .schemas
            .get(policy_store_id)
            .cloned()
            .ok_or_else(|| store_not_found(policy_store_id))?;

        Ok(GetSchemaOutput {
            policy_store_id: policy_store_id.to_string(),
            namespaces: namespaces(&schema).unwrap_or_default(),
            schema,
        })
    }

    async fn create_policy_store(
        &self,
        input: &PolicyStoreInput,
    ) -> ApiResult<CreatePolicyStoreOutput> {
        let mut state = self.lock();
        state.calls.create_policy_store += 1;
        take_failure(&mut state, "CreatePolicyStore")?;

        let store = insert_store(&mut state, input);
        Ok(CreatePolicyStoreOutput {
            policy_store_id: store.policy_store_id,
            arn: store.arn,
        })
    }

    async fn get_policy_store(&self, policy_store_id: &str) -> ApiResult<PolicyStore> {
        let mut state = self.lock();
        state.calls.get_policy_store += 1;
        take_failure(&mut state, "GetPolicyStore")?;

        state
            .stores
            .get(policy_store_id)
            .cloned()
            .ok_or_else(|| store_not_found(policy_store_id))
    }

    async fn update_policy_store(
        &self,
        policy_store_id: &str,
        input: &PolicyStoreInput,
    ) -> ApiResult<()> {
        let mut state = self.lock();
        state.calls.update_policy_store += 1;
        take_failure(&mut state, "UpdatePolicyStore")?;

        let store = state
            .stores
            .get_mut(policy_store_id)
            .ok_or_else(|| store_not_found(policy_store_id))?;
        store.description.clone_from(&input.description);
        store.validation_mode = Some(input.validation_mode.clone());
        Ok(())
    }

    async fn delete_policy_store(&self, policy_store_id: &str) -> ApiResult<()> {
        let mut state = self.lock();
        state.calls.delete_policy_store += 1;
        take_failure(&mut state, "DeletePolicyStore")?;

        if state.stores.remove(policy_store_id).is_none() {
            return Err(store_not_found(policy_store_id));
        }
        state.schemas.remove(policy_store_id);
        Ok(())
    }
}
