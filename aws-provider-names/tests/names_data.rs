use aws_provider_names::{NamesError, ServiceNames, S3, VERIFIED_PERMISSIONS};

fn names() -> ServiceNames {
    ServiceNames::load().expect("embedded names data should load")
}

#[test_log::test]
fn embedded_table_loads() {
    let names = names();
    assert!(!names.is_empty());
    assert!(names.get(VERIFIED_PERMISSIONS).is_some());
}

#[test_log::test]
fn verified_permissions_metadata() {
    let names = names();
    assert_eq!(
        names.full_human_friendly(VERIFIED_PERMISSIONS).unwrap(),
        "Amazon Verified Permissions"
    );
    assert_eq!(
        names.provider_name_upper(VERIFIED_PERMISSIONS).unwrap(),
        "VerifiedPermissions"
    );
    assert_eq!(
        names.sdk_crate(VERIFIED_PERMISSIONS).unwrap(),
        "aws-sdk-verifiedpermissions"
    );
    assert_eq!(
        names.tf_aws_env_var(VERIFIED_PERMISSIONS),
        Some("TF_AWS_VERIFIEDPERMISSIONS_ENDPOINT")
    );
}

#[test_log::test]
fn every_alias_resolves_to_its_own_entry() {
    let names = names();
    for package in names.provider_packages() {
        let datum = names.get(package).unwrap();
        assert_eq!(datum.aliases.first().map(String::as_str), Some(package));
        for alias in &datum.aliases {
            assert_eq!(
                names.provider_package_for_alias(alias).unwrap(),
                package,
                "alias {alias} should resolve to {package}"
            );
        }
    }
}

#[test_log::test]
fn alias_and_canonical_share_a_record() {
    let names = names();
    let canonical = names.provider_package_for_alias("s3api").unwrap();
    assert_eq!(canonical, S3);
    assert_eq!(
        names.human_friendly("s3api").unwrap(),
        names.human_friendly(S3).unwrap()
    );
}

#[test_log::test]
fn excluded_and_unimplemented_services_are_absent() {
    let names = names();
    assert!(names.get("importexport").is_none());
    assert!(names.get("amplifybackend").is_none());
    assert!(names.get("dynamodbstreams").is_some_and(|d| d.endpoint_only));
}

#[test_log::test]
fn unknown_service_is_not_found() {
    let names = names();
    assert!(matches!(
        names.human_friendly("not-a-service"),
        Err(NamesError::NotFound(_))
    ));
    assert!(matches!(
        names.provider_package_for_alias("not-a-service"),
        Err(NamesError::UnknownAlias(_))
    ));
}
