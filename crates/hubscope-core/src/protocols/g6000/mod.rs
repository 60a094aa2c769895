//! G6000 hub protocol decoding.
//!
//! Five shapes keyed on the first byte: hub heart beat, short and long tag
//! id updates, and the two command responses (`E9FF`, `E7FF`) which also
//! require the `FF` sub-id in the second byte. Anything else fails with
//! `UnknownMessageType` or `UnknownSubType`.

pub mod error;
pub mod layout;
pub mod message;
pub mod parser;

pub use error::G6000Error;
pub use message::G6000Message;
pub use parser::parse_g6000;
