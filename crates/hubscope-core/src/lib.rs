//! HubScope core library: binary payload decoding for IoT hub telemetry.
//!
//! Hubs publish opaque byte buffers on pub/sub topics. This crate classifies
//! the topic into a device family and decodes the buffer into a typed,
//! serializable record:
//! - `V5008`: legacy hub protocol, seven shapes, unknown ids degrade to
//!   `UNKNOWN`.
//! - `G6000`: newer hub protocol, five shapes, unknown ids are errors.
//! - `V6800`: JSON payloads; classified only.
//!
//! Decoding is pure and synchronous. It holds no state between calls and
//! performs no I/O, so decoders may run concurrently on different messages.
//!
//! Invariants:
//! - `raw_hex` always carries the full uppercase hex of the input.
//! - Repeated sections keep wire order and stop at the declared count or at
//!   the last full section, whichever comes first.
//! - Module and hub identifiers are emitted as decimal text.
//!
//! # Examples
//! ```
//! use hubscope_core::decode_hex;
//!
//! let message = decode_hex("V5008Upload/2437871205", "CB01000030390C")?;
//! assert_eq!(message.message_type(), "HEART_BEAT");
//!
//! let json = serde_json::to_value(&message).unwrap();
//! assert_eq!(json["sections"][0]["mod_id"], "12345");
//! # Ok::<(), hubscope_core::DecodeError>(())
//! ```

use serde::Serialize;

mod decode;
pub mod protocols;
mod replay;
mod topic;

pub use decode::{DecodeError, DecodedMessage, MessageBody, decode, decode_hex};
pub use replay::{PayloadRecord, ReplayError, parse_records, replay_file, replay_records};
pub use topic::{
    HubFamily, LISTEN_TOPICS, TOPIC_CMD, TOPIC_DATA, TOPIC_V5008_DOWNLOAD, TOPIC_V5008_UPLOAD,
    TOPIC_V6800_DOWNLOAD, TOPIC_V6800_UPLOAD, classify_topic,
};

/// Current replay report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no record carries a receive time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decoded capture, one entry per input record in arrival order.
///
/// # Examples
/// ```
/// use hubscope_core::make_stub_report;
///
/// let report = make_stub_report("capture.jsonl", 3);
/// assert_eq!(report.report_version, hubscope_core::REPORT_VERSION);
/// assert!(report.entries.is_empty());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 receive time of the last timed record.
    pub generated_at: String,
    pub input: InputInfo,
    pub summary: ReplaySummary,
    pub entries: Vec<ReplayEntry>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the replay.
    pub path: String,
    /// Number of records read from the input.
    pub records: u64,
}

/// Decode outcome counts.
///
/// # Examples
/// ```
/// use hubscope_core::ReplaySummary;
///
/// let summary = ReplaySummary::default();
/// assert_eq!(summary.decoded + summary.failed, 0);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaySummary {
    pub decoded: u64,
    pub failed: u64,
}

/// Outcome for a single record. Exactly one of `message` and `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayEntry {
    /// Zero-based position in the input.
    pub index: u64,
    pub topic: String,
    /// Uppercase payload hex, kept for failed records too.
    pub raw_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<DecodedMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build a report with base fields filled and no entries.
pub fn make_stub_report(input_path: &str, records: u64) -> ReplayReport {
    ReplayReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "hubscope".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            records,
        },
        summary: ReplaySummary::default(),
        entries: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_omits_absent_fields() {
        let entry = ReplayEntry {
            index: 0,
            topic: "G6000/1".to_string(),
            raw_hex: "FF0102".to_string(),
            received_at: None,
            message: None,
            error: Some("unknown message type: FF".to_string()),
        };
        let value = serde_json::to_value(&entry).expect("entry json");
        assert!(value.get("received_at").is_none());
        assert!(value.get("message").is_none());
        assert_eq!(value["error"], "unknown message type: FF");
        assert_eq!(value["raw_hex"], "FF0102");
    }

    #[test]
    fn report_nests_decoded_message() {
        let mut report = make_stub_report("capture.jsonl", 1);
        report.entries.push(ReplayEntry {
            index: 0,
            topic: "V5008Upload/1".to_string(),
            raw_hex: "7F".to_string(),
            received_at: Some(DEFAULT_GENERATED_AT.to_string()),
            message: Some(decode_hex("V5008Upload/1", "7F").expect("decode")),
            error: None,
        });
        let value = serde_json::to_value(&report).expect("report json");
        assert_eq!(value["tool"]["name"], "hubscope");
        assert_eq!(value["entries"][0]["message"]["message_type"], "UNKNOWN");
        assert_eq!(value["entries"][0]["message"]["raw_hex"], "7F");
    }
}
