//! Hub protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `message`: the decoded record types
//! - `parser`: per-shape builders, dispatched on the leading byte
//! - `error`: explicit, actionable errors
//!
//! Field access and the shared numeric/text conventions live in `common`.
//! Parsers are pure and contain no I/O.

pub mod common;
pub mod g6000;
pub mod v5008;
