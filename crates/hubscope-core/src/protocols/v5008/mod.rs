//! V5008 (legacy hub) protocol decoding.
//!
//! The first byte selects one of seven shapes: module heart beat, RFID tag
//! update, temperature/humidity, noise level, door status, device info and
//! color-set response. Repeated sections stop when the declared count is
//! reached or when the payload cannot hold one more full section; neither
//! case is an error.
//!
//! Unrecognized ids decode to `UNKNOWN` rather than failing. A fixed field
//! past the end of the payload fails with `TooShort`.

pub mod error;
pub mod layout;
pub mod message;
pub mod parser;

pub use error::V5008Error;
pub use message::V5008Message;
pub use parser::parse_v5008;
