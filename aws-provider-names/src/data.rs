//! Embedded service data
//!
//! `data/names_data.csv` is embedded into the binary at compile time. Each row
//! describes one AWS service; see [`ServiceRecord`] for the columns.

use std::io::Read;

use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::{NamesError, Result};

/// File name of the service data asset inside the embedded folder.
pub const NAMES_DATA_FILE: &str = "names_data.csv";

/// Embedded service name data
#[derive(RustEmbed)]
#[folder = "data"]
#[include = "*.csv"]
pub struct NamesData;

impl NamesData {
    /// Raw bytes of the service data table.
    pub fn names_data() -> Result<std::borrow::Cow<'static, [u8]>> {
        Self::get(NAMES_DATA_FILE)
            .map(|file| file.data)
            .ok_or(NamesError::MissingAsset(NAMES_DATA_FILE))
    }
}

/// One row of the service data table.
///
/// Flag columns are considered set when they hold any non-blank value. Columns
/// not listed here (such as `Note`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRecord {
    provider_package_actual: String,
    provider_package_correct: String,
    aliases: String,
    provider_name_upper: String,
    sdk_crate: String,
    human_friendly: String,
    brand: String,
    exclude: String,
    not_implemented: String,
    endpoint_only: String,
    deprecated_env_var: String,
    tf_aws_env_var: String,
}

impl ServiceRecord {
    /// The canonical provider package: the actual package if one is recorded,
    /// otherwise the correct one.
    pub fn provider_package(&self) -> &str {
        if self.provider_package_actual.trim().is_empty() {
            self.provider_package_correct.trim()
        } else {
            self.provider_package_actual.trim()
        }
    }

    pub fn aliases(&self) -> Vec<String> {
        self.aliases
            .split(';')
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn provider_name_upper(&self) -> &str {
        self.provider_name_upper.trim()
    }

    pub fn sdk_crate(&self) -> &str {
        self.sdk_crate.trim()
    }

    pub fn human_friendly(&self) -> &str {
        self.human_friendly.trim()
    }

    pub fn brand(&self) -> &str {
        self.brand.trim()
    }

    pub fn exclude(&self) -> bool {
        flag(&self.exclude)
    }

    pub fn not_implemented(&self) -> bool {
        flag(&self.not_implemented)
    }

    pub fn endpoint_only(&self) -> bool {
        flag(&self.endpoint_only)
    }

    pub fn deprecated_env_var(&self) -> &str {
        self.deprecated_env_var.trim()
    }

    pub fn tf_aws_env_var(&self) -> &str {
        self.tf_aws_env_var.trim()
    }
}

fn flag(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Read every row of a service data table.
pub fn read_all_service_data<R: Read>(reader: R) -> Result<Vec<ServiceRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: ServiceRecord = row?;
        records.push(record);
    }

    log::trace!("Read {} service data rows", records.len());
    Ok(records)
}
