use std::sync::Arc;

use anyhow::Result;
use aws_provider_framework::{Diagnostics, JsonProvider, Resource};
use aws_provider_names::ServiceNames;
use aws_provider_verifiedpermissions::testing::FakeVerifiedPermissions;
use aws_provider_verifiedpermissions::ResourceSchema;
use rstest::rstest;
use serde_json::{json, Value};

fn setup() -> (Arc<FakeVerifiedPermissions>, ResourceSchema, String) {
    let fake = Arc::new(FakeVerifiedPermissions::new());
    let store_id = fake.add_policy_store("STRICT", None);
    let names = Arc::new(ServiceNames::load().expect("embedded service data should load"));
    let resource = ResourceSchema::new(fake.clone(), names);
    (fake, resource, store_id)
}

fn plan(store_id: &str, definition: &str) -> Value {
    json!({
        "id": null,
        "policy_store_id": store_id,
        "definition": {"value": definition},
        "namespaces": null
    })
}

#[test_log::test(tokio::test)]
async fn test_create_then_read_round_trips_definition() -> Result<()> {
    let (_fake, resource, store_id) = setup();
    assert_eq!(store_id, "ps-1");

    let state = resource.create(plan("ps-1", r#"{"a":1}"#)).await?;
    assert_eq!(state["id"], "ps-1");
    assert_eq!(state["namespaces"], json!(["a"]));

    let read = resource.read(state).await?.expect("schema should exist");
    assert_eq!(read["id"], "ps-1");
    assert_eq!(read["policy_store_id"], "ps-1");
    assert!(JsonProvider::equivalent(
        read["definition"]["value"].as_str().unwrap_or_default(),
        r#"{"a":1}"#
    ));
    Ok(())
}

#[rstest]
#[case(r#"{"a":1}"#)]
#[case("{\n  \"Orders\": {\"entityTypes\": {}, \"actions\": {}},\n  \"Billing\": {\"entityTypes\": {}, \"actions\": {}}\n}")]
#[case(r#"{"ns":{"entityTypes":{"User":{"shape":{"type":"Record","attributes":{}}}},"actions":{"view":{}}}}"#)]
#[tokio::test]
async fn test_read_definition_is_json_equivalent(#[case] definition: &str) -> Result<()> {
    let (_fake, resource, store_id) = setup();

    let state = resource.create(plan(&store_id, definition)).await?;
    let read = resource.read(state).await?.expect("schema should exist");

    let stored = read["definition"]["value"].as_str().unwrap_or_default();
    assert!(JsonProvider::equivalent(stored, definition));
    assert_eq!(stored, JsonProvider::normalize(definition)?);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_update_with_unchanged_definition_makes_no_calls() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;
    let before = fake.calls();

    let mut next = state.clone();
    next["namespaces"] = Value::Null;
    let updated = resource.update(state.clone(), next).await?;

    assert_eq!(fake.calls(), before);
    assert_eq!(updated["namespaces"], state["namespaces"]);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_update_with_new_definition_writes_once_then_reads_once() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;
    let before = fake.calls();

    let mut next = state.clone();
    next["definition"] = json!({"value": r#"{"b":{},"c":{}}"#});
    let updated = resource.update(state, next).await?;

    let after = fake.calls();
    assert_eq!(after.put_schema, before.put_schema + 1);
    assert_eq!(after.get_schema, before.get_schema + 1);
    assert_eq!(updated["namespaces"], json!(["b", "c"]));
    assert_eq!(fake.put_schema_log().last().map(|(id, _)| id.as_str()), Some("ps-1"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_delete_writes_empty_definition() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;

    resource.delete(state.clone()).await?;

    let (id, document) = fake.put_schema_log().pop().expect("delete should write");
    assert_eq!(id, "ps-1");
    assert_eq!(document, "{}");
    assert_eq!(fake.schema("ps-1").as_deref(), Some("{}"));

    // Deleted schemas still read back, as the empty document.
    let read = resource.read(state).await?.expect("schema should exist");
    assert_eq!(read["definition"]["value"], "{}");
    assert_eq!(read["namespaces"], json!([]));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_delete_after_policy_store_removed_succeeds() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;

    fake.remove_policy_store("ps-1");
    resource.delete(state).await?;
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_read_of_missing_store_removes_state() -> Result<()> {
    let (_fake, resource, _store_id) = setup();
    let read = resource.read(json!({"id": "ps-404"})).await?;
    assert!(read.is_none());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_read_of_empty_schema_is_an_error() {
    let (fake, resource, _store_id) = setup();
    fake.insert_raw_schema("ps-1", "");

    let err = resource
        .read(json!({"id": "ps-1", "policy_store_id": "ps-1"}))
        .await
        .expect_err("empty schema should fail");
    assert_eq!(
        err.iter().next().map(|d| d.summary.as_str()),
        Some("reading Amazon Verified Permissions Schema (ps-1): empty result")
    );
}

#[test_log::test(tokio::test)]
async fn test_read_of_malformed_schema_is_an_error() {
    let (fake, resource, _store_id) = setup();
    fake.insert_raw_schema("ps-1", "{not json");

    let err = resource
        .read(json!({"id": "ps-1"}))
        .await
        .expect_err("malformed schema should fail");
    assert_eq!(
        err.iter().next().map(|d| d.summary.as_str()),
        Some("unable to unmarshal schema")
    );
}

#[test_log::test(tokio::test)]
async fn test_create_failure_is_decorated() {
    let (fake, resource, _store_id) = setup();
    fake.fail_next_with("ValidationException", "bad schema");

    let err = resource
        .create(plan("ps-1", r#"{"a":1}"#))
        .await
        .expect_err("create should fail");
    let diag = err.iter().next().expect("one diagnostic");
    assert_eq!(
        diag.summary,
        "creating Amazon Verified Permissions Schema (ps-1): ValidationException: bad schema"
    );
    assert_eq!(diag.detail, "ValidationException: bad schema");
}

fn first_summary(err: &Diagnostics) -> Option<&str> {
    err.iter().next().map(|d| d.summary.as_str())
}

#[rstest]
#[case(r#"{"a":1}"#)]
#[case(r#"{"b":{}}"#)]
#[tokio::test]
async fn test_update_cannot_move_schema_to_another_store(#[case] definition: &str) -> Result<()> {
    let (fake, resource, store_id) = setup();
    fake.add_policy_store("OFF", None);
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;
    let before = fake.calls();

    let mut next = state.clone();
    next["policy_store_id"] = json!("ps-2");
    next["definition"] = json!({"value": definition});
    let err = resource
        .update(state, next)
        .await
        .expect_err("changing the policy store should fail");

    let diag = err.iter().next().expect("one diagnostic");
    assert_eq!(diag.summary, "Attribute Requires Replacement");
    assert_eq!(diag.attribute.as_deref(), Some("policy_store_id"));
    assert_eq!(fake.calls(), before);
    assert_eq!(fake.schema("ps-1").as_deref(), Some(r#"{"a":1}"#));
    assert_eq!(fake.schema("ps-2"), None);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_update_write_failure_is_decorated() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;
    fake.fail_next_with("ValidationException", "bad schema");

    let mut next = state.clone();
    next["definition"] = json!({"value": r#"{"b":{}}"#});
    let err = resource.update(state, next).await.expect_err("update should fail");

    assert_eq!(
        first_summary(&err),
        Some("updating Amazon Verified Permissions Schema (ps-1): ValidationException: bad schema")
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_update_with_missing_schema_on_refresh_is_an_error() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;
    fake.fail_next_call_with("GetSchema", "ResourceNotFoundException", "gone");

    let mut next = state.clone();
    next["definition"] = json!({"value": r#"{"b":{}}"#});
    let err = resource.update(state, next).await.expect_err("update should fail");

    assert_eq!(
        first_summary(&err),
        Some("updating Amazon Verified Permissions Schema (ps-1): couldn't find resource")
    );
    // The write went through before the refresh failed.
    assert_eq!(fake.schema("ps-1").as_deref(), Some(r#"{"b":{}}"#));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_delete_service_failure_is_decorated() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;
    fake.fail_next_with("AccessDeniedException", "denied");

    let err = resource.delete(state).await.expect_err("delete should fail");

    assert_eq!(
        first_summary(&err),
        Some("deleting Amazon Verified Permissions Schema (ps-1): AccessDeniedException: denied")
    );
    assert_eq!(fake.schema("ps-1").as_deref(), Some(r#"{"a":1}"#));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_read_service_failure_keeps_state() -> Result<()> {
    let (fake, resource, store_id) = setup();
    let state = resource.create(plan(&store_id, r#"{"a":1}"#)).await?;
    fake.fail_next_with("ThrottlingException", "slow down");

    let err = resource.read(state).await.expect_err("read should fail");

    assert_eq!(
        first_summary(&err),
        Some("reading Amazon Verified Permissions Schema (ps-1): ThrottlingException: slow down")
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_import_then_read() -> Result<()> {
    let (_fake, resource, store_id) = setup();
    resource.create(plan(&store_id, r#"{"a":1}"#)).await?;

    let imported = resource.import_state("ps-1").await?;
    assert_eq!(imported, json!({"id": "ps-1"}));

    let read = resource.read(imported).await?.expect("schema should exist");
    assert_eq!(read["policy_store_id"], "ps-1");
    assert_eq!(read["definition"]["value"], r#"{"a":1}"#);
    Ok(())
}

#[test_log::test]
fn test_configuration_validation() {
    let (_fake, resource, _store_id) = setup();

    assert!(resource
        .validate_config(&json!({"policy_store_id": "ps-1", "definition": {"value": "{}"}}))
        .is_empty());

    let diags = resource.validate_config(&json!({
        "policy_store_id": "ps-1",
        "definition": {"value": "{nope"}
    }));
    assert_eq!(
        diags.iter().next().map(|d| d.summary.as_str()),
        Some("Invalid JSON String Value")
    );

    let diags = resource.validate_config(&json!({"policy_store_id": "ps-1"}));
    assert_eq!(
        diags.iter().next().map(|d| d.summary.as_str()),
        Some("Missing Configuration for Required Block")
    );
}
