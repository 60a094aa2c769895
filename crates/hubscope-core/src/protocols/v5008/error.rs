use thiserror::Error;

use crate::protocols::common::FieldError;

/// Errors returned by V5008 decoding.
///
/// Unrecognized message ids are not errors for this family; they decode to
/// the `UNKNOWN` variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum V5008Error {
    #[error(transparent)]
    Field(#[from] FieldError),
}
