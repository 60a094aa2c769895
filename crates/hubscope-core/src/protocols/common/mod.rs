//! Field readers shared by the hub protocols.
//!
//! Both binary families mix the same primitive encodings: unsigned
//! big-endian integers, raw hex slices, dotted IPv4, colon-delimited MAC,
//! a calendar timestamp with no validation, and a textual fixed-point
//! decimal. `fields` holds the pure formatters, `reader` applies them at
//! byte offsets with bounds checks.

pub mod error;
pub(crate) mod fields;
pub(crate) mod reader;

pub use error::FieldError;
pub(crate) use reader::HubReader;
