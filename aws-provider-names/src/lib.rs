//! AWS service name data for the AWS provider.
//!
//! This crate exposes:
//! - service and endpoint identifier constants ([`consts`])
//! - partition, region and DNS helpers ([`partition`])
//! - [`ServiceNames`], an immutable lookup table built from the embedded
//!   `data/names_data.csv` file
//!
//! The table is built once by the host and shared by reference
//! (`Arc<ServiceNames>`) with every consumer. It is very important that the
//! information in `names_data.csv` be exactly correct because client
//! construction and error messages rely on it.

pub mod consts;
pub mod data;
mod error;
pub mod partition;

use std::collections::BTreeMap;
use std::io::Read;

use data::{read_all_service_data, NamesData, ServiceRecord};

pub use consts::*;
pub use error::{NamesError, Result};
pub use partition::{dns_suffix_for_partition, partition_for_region, reverse_dns};

/// Descriptive data for one service, keyed by its provider package in
/// [`ServiceNames`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDatum {
    /// All names the service answers to. The provider package is always first.
    pub aliases: Vec<String>,
    pub brand: String,
    pub deprecated_env_var: String,
    pub endpoint_only: bool,
    /// AWS SDK for Rust crate, e.g. `aws-sdk-verifiedpermissions`.
    pub sdk_crate: String,
    pub human_friendly: String,
    pub provider_name_upper: String,
    pub tf_aws_env_var: String,
}

impl From<&ServiceRecord> for ServiceDatum {
    fn from(record: &ServiceRecord) -> Self {
        let mut aliases = vec![record.provider_package().to_string()];
        aliases.extend(record.aliases());

        Self {
            aliases,
            brand: record.brand().to_string(),
            deprecated_env_var: record.deprecated_env_var().to_string(),
            endpoint_only: record.endpoint_only(),
            sdk_crate: record.sdk_crate().to_string(),
            human_friendly: record.human_friendly().to_string(),
            provider_name_upper: record.provider_name_upper().to_string(),
            tf_aws_env_var: record.tf_aws_env_var().to_string(),
        }
    }
}

/// A provider package and its non-canonical aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub provider_package: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNameUpper {
    pub provider_package: String,
    pub provider_name_upper: String,
}

/// Immutable service metadata table.
#[derive(Debug, Clone, Default)]
pub struct ServiceNames {
    data: BTreeMap<String, ServiceDatum>,
}

impl ServiceNames {
    /// Build the table from the embedded `names_data.csv`.
    pub fn load() -> Result<Self> {
        let raw = NamesData::names_data()?;
        Self::from_csv(&raw[..])
    }

    /// Build the table from any reader producing the `names_data.csv` layout.
    ///
    /// Excluded rows are skipped, as are not-implemented rows unless they are
    /// endpoint-only.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut data = BTreeMap::new();

        for record in read_all_service_data(reader)? {
            if record.exclude() {
                continue;
            }

            if record.not_implemented() && !record.endpoint_only() {
                continue;
            }

            data.insert(
                record.provider_package().to_string(),
                ServiceDatum::from(&record),
            );
        }

        log::debug!("Loaded service data for {} services", data.len());
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Exact lookup by provider package.
    pub fn get(&self, service: &str) -> Option<&ServiceDatum> {
        self.data.get(service)
    }

    /// Resolve any alias (including the provider package itself) to its
    /// provider package.
    ///
    /// Entries are scanned in provider package order; the first entry listing
    /// the alias wins.
    pub fn provider_package_for_alias(&self, service_alias: &str) -> Result<&str> {
        self.data
            .iter()
            .find(|(_, datum)| datum.aliases.iter().any(|alias| alias == service_alias))
            .map(|(package, _)| package.as_str())
            .ok_or_else(|| NamesError::UnknownAlias(service_alias.to_string()))
    }

    /// Exact lookup, falling back to alias resolution.
    fn resolve(&self, service: &str) -> Option<&ServiceDatum> {
        self.data.get(service).or_else(|| {
            self.provider_package_for_alias(service)
                .ok()
                .and_then(|package| self.data.get(package))
        })
    }

    pub fn provider_packages(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.data
            .values()
            .flat_map(|datum| datum.aliases.iter().map(String::as_str))
            .collect()
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.data
            .iter()
            .map(|(package, datum)| Endpoint {
                provider_package: package.clone(),
                aliases: datum
                    .aliases
                    .iter()
                    .filter(|alias| *alias != package)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    pub fn service_names_upper(&self) -> Vec<ServiceNameUpper> {
        self.data
            .iter()
            .map(|(package, datum)| ServiceNameUpper {
                provider_package: package.clone(),
                provider_name_upper: datum.provider_name_upper.clone(),
            })
            .collect()
    }

    pub fn provider_name_upper(&self, service: &str) -> Result<&str> {
        self.data
            .get(service)
            .map(|datum| datum.provider_name_upper.as_str())
            .ok_or_else(|| NamesError::NotFound(service.to_string()))
    }

    pub fn deprecated_env_var(&self, service: &str) -> Option<&str> {
        self.data
            .get(service)
            .map(|datum| datum.deprecated_env_var.as_str())
            .filter(|var| !var.is_empty())
    }

    pub fn tf_aws_env_var(&self, service: &str) -> Option<&str> {
        self.data
            .get(service)
            .map(|datum| datum.tf_aws_env_var.as_str())
            .filter(|var| !var.is_empty())
    }

    /// Human-friendly name prefixed with the brand, e.g.
    /// "Amazon Verified Permissions".
    pub fn full_human_friendly(&self, service: &str) -> Result<String> {
        let datum = self
            .resolve(service)
            .ok_or_else(|| NamesError::NotFound(service.to_string()))?;

        if datum.brand.is_empty() {
            return Ok(datum.human_friendly.clone());
        }

        Ok(format!("{} {}", datum.brand, datum.human_friendly))
    }

    pub fn human_friendly(&self, service: &str) -> Result<&str> {
        self.resolve(service)
            .map(|datum| datum.human_friendly.as_str())
            .ok_or_else(|| NamesError::NotFound(service.to_string()))
    }

    /// AWS SDK for Rust crate serving a provider package.
    pub fn sdk_crate(&self, provider_package: &str) -> Result<&str> {
        self.data
            .get(provider_package)
            .map(|datum| datum.sdk_crate.as_str())
            .ok_or_else(|| NamesError::SdkCrateNotFound(provider_package.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FIXTURE: &str = "\
ProviderPackageActual,ProviderPackageCorrect,Aliases,ProviderNameUpper,SdkCrate,HumanFriendly,Brand,Exclude,NotImplemented,EndpointOnly,DeprecatedEnvVar,TfAwsEnvVar,Note
,acm,,ACM,aws-sdk-acm,ACM (Certificate Manager),AWS,,,,,TF_AWS_ACM_ENDPOINT,
logs,cloudwatchlogs,cloudwatchlog;cloudwatchlogs,Logs,aws-sdk-cloudwatchlogs,CloudWatch Logs,,,,,CLOUDWATCHLOGS_ENDPOINT,TF_AWS_LOGS_ENDPOINT,
,legacy,,Legacy,,Legacy,AWS,x,,,,,
,notyet,,NotYet,aws-sdk-notyet,Not Yet,AWS,,x,,,,
,streams,,Streams,aws-sdk-streams,Streams,Amazon,,x,x,,,
";

    fn fixture() -> ServiceNames {
        ServiceNames::from_csv(FIXTURE.as_bytes()).expect("fixture should parse")
    }

    #[test]
    fn test_excluded_and_not_implemented_rows_are_skipped() {
        let names = fixture();
        assert_eq!(names.provider_packages(), vec!["acm", "logs", "streams"]);
        assert!(names.get("legacy").is_none());
        assert!(names.get("notyet").is_none());
        assert!(names.get("streams").is_some_and(|d| d.endpoint_only));
    }

    #[test]
    fn test_canonical_key_is_first_alias() {
        let names = fixture();
        let logs = names.get("logs").unwrap();
        assert_eq!(logs.aliases, vec!["logs", "cloudwatchlog", "cloudwatchlogs"]);
    }

    #[rstest]
    #[case("logs", "logs")]
    #[case("cloudwatchlog", "logs")]
    #[case("cloudwatchlogs", "logs")]
    #[case("acm", "acm")]
    fn test_provider_package_for_alias(#[case] alias: &str, #[case] expected: &str) {
        assert_eq!(fixture().provider_package_for_alias(alias).unwrap(), expected);
    }

    #[test]
    fn test_unknown_alias_is_not_found() {
        let err = fixture().provider_package_for_alias("nope").unwrap_err();
        assert!(matches!(err, NamesError::UnknownAlias(ref a) if a == "nope"));
        assert_eq!(err.to_string(), "unable to find service for service alias nope");
    }

    #[test]
    fn test_alias_lookup_matches_canonical_lookup() {
        let names = fixture();
        assert_eq!(
            names.human_friendly("cloudwatchlogs").unwrap(),
            names.human_friendly("logs").unwrap()
        );
        assert_eq!(
            names.full_human_friendly("cloudwatchlog").unwrap(),
            names.full_human_friendly("logs").unwrap()
        );
    }

    #[test]
    fn test_full_human_friendly_with_and_without_brand() {
        let names = fixture();
        assert_eq!(
            names.full_human_friendly("acm").unwrap(),
            "AWS ACM (Certificate Manager)"
        );
        assert_eq!(names.full_human_friendly("logs").unwrap(), "CloudWatch Logs");
        assert!(names.full_human_friendly("nope").is_err());
    }

    #[test]
    fn test_exact_key_lookups_do_not_use_aliases() {
        let names = fixture();
        assert_eq!(names.provider_name_upper("logs").unwrap(), "Logs");
        assert!(names.provider_name_upper("cloudwatchlogs").is_err());
        assert_eq!(names.sdk_crate("acm").unwrap(), "aws-sdk-acm");
        assert!(matches!(
            names.sdk_crate("cloudwatchlogs"),
            Err(NamesError::SdkCrateNotFound(_))
        ));
    }

    #[test]
    fn test_env_vars() {
        let names = fixture();
        assert_eq!(names.tf_aws_env_var("logs"), Some("TF_AWS_LOGS_ENDPOINT"));
        assert_eq!(names.deprecated_env_var("logs"), Some("CLOUDWATCHLOGS_ENDPOINT"));
        assert_eq!(names.deprecated_env_var("acm"), None);
        assert_eq!(names.tf_aws_env_var("nope"), None);
    }

    #[test]
    fn test_endpoints_exclude_canonical_alias() {
        let endpoints = fixture().endpoints();
        let logs = endpoints
            .iter()
            .find(|e| e.provider_package == "logs")
            .unwrap();
        assert_eq!(logs.aliases, vec!["cloudwatchlog", "cloudwatchlogs"]);

        let acm = endpoints.iter().find(|e| e.provider_package == "acm").unwrap();
        assert!(acm.aliases.is_empty());
    }

    #[test]
    fn test_aliases_and_names_upper() {
        let names = fixture();
        let aliases = names.aliases();
        assert!(aliases.contains(&"cloudwatchlog"));
        assert!(aliases.contains(&"acm"));

        let upper = names.service_names_upper();
        assert!(upper
            .iter()
            .any(|s| s.provider_package == "acm" && s.provider_name_upper == "ACM"));
    }
}
