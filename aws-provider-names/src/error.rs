//! Error types for service name lookups.

use thiserror::Error;

/// Errors produced while loading or querying service name data.
#[derive(Debug, Error)]
pub enum NamesError {
    /// The tabular service data could not be parsed.
    #[error("reading CSV into service data: {0}")]
    Csv(#[from] csv::Error),

    /// The embedded asset was not compiled into the binary.
    #[error("embedded service data asset {0} not found")]
    MissingAsset(&'static str),

    /// No entry lists the given alias.
    #[error("unable to find service for service alias {0}")]
    UnknownAlias(String),

    /// No entry exists for the given service.
    #[error("no service data found for {0}")]
    NotFound(String),

    /// No entry exists for the given provider package when resolving its SDK crate.
    #[error("getting AWS SDK for Rust crate, {0} not found")]
    SdkCrateNotFound(String),
}

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, NamesError>;
