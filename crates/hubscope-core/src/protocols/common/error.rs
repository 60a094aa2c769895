use thiserror::Error;

/// Errors returned by the shared field readers.
///
/// # Examples
/// ```
/// use hubscope_core::protocols::common::FieldError;
/// use hubscope_core::protocols::v5008::{V5008Error, parse_v5008};
///
/// let err = parse_v5008(&[0xBA, 0x04]).unwrap_err();
/// assert_eq!(
///     err,
///     V5008Error::Field(FieldError::TooShort { needed: 6, actual: 2 })
/// );
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
