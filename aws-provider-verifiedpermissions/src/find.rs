use aws_provider_framework::FindError;

use crate::api::{GetSchemaOutput, PolicyStore, VerifiedPermissionsApi};

fn find_error(err: crate::api::ApiError) -> FindError {
    if err.is_not_found() {
        FindError::not_found(err)
    } else {
        FindError::other(err)
    }
}

pub async fn find_schema_by_policy_store_id(
    conn: &dyn VerifiedPermissionsApi,
    id: &str,
) -> Result<GetSchemaOutput, FindError> {
    let output = conn.get_schema(id).await.map_err(find_error)?;

    if output.schema.is_empty() {
        return Err(FindError::EmptyResult);
    }

    Ok(output)
}

pub async fn find_policy_store_by_id(
    conn: &dyn VerifiedPermissionsApi,
    id: &str,
) -> Result<PolicyStore, FindError> {
    let output = conn.get_policy_store(id).await.map_err(find_error)?;

    if output.policy_store_id.is_empty() {
        return Err(FindError::EmptyResult);
    }

    Ok(output)
}
