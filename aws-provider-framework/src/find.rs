//! Finder errors
//!
//! Finders look a remote resource up by identifier. They separate a missing
//! resource ([`FindError::NotFound`]), which callers turn into state removal,
//! from a response that arrived without its payload
//! ([`FindError::EmptyResult`]), which is always a hard failure.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum FindError {
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        last_error: Option<BoxError>,
    },

    #[error("empty result")]
    EmptyResult,

    #[error(transparent)]
    Other(BoxError),
}

impl FindError {
    pub fn not_found(last_error: impl Into<BoxError>) -> Self {
        Self::NotFound {
            message: "couldn't find resource".to_string(),
            last_error: Some(last_error.into()),
        }
    }

    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Whether a finder result failed because the resource does not exist.
pub fn not_found<T>(result: &Result<T, FindError>) -> bool {
    matches!(result, Err(err) if err.is_not_found())
}
