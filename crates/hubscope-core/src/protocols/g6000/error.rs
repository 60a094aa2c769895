use thiserror::Error;

use crate::protocols::common::FieldError;

/// Errors returned by G6000 decoding.
///
/// Unlike V5008, an unrecognized leading byte or response sub-id fails the
/// message.
///
/// # Examples
/// ```
/// use hubscope_core::protocols::g6000::{G6000Error, parse_g6000};
///
/// let err = parse_g6000(&[0xFF, 0x00]).unwrap_err();
/// assert!(matches!(err, G6000Error::UnknownMessageType { .. }));
/// assert!(err.to_string().contains("FF"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum G6000Error {
    #[error("unknown message type: {id}")]
    UnknownMessageType { id: String },
    #[error("unknown sub-message id {sub_id} for message type {id}")]
    UnknownSubType { id: String, sub_id: String },
    #[error(transparent)]
    Field(#[from] FieldError),
}
