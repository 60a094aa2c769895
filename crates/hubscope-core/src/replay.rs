//! Ordered replay of captured hub messages.
//!
//! A capture is JSON Lines, one `{"topic", "payload", "ts"}` record per
//! message in arrival order. Records are decoded one at a time; a record
//! that fails to decode is reported in its entry and never stops the replay.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, warn};

use crate::decode::decode_hex;
use crate::{ReplayEntry, ReplayReport, ReplaySummary, make_stub_report};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid record on line {line}: {message}")]
    Record { line: usize, message: String },
}

/// One captured message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayloadRecord {
    pub topic: String,
    /// Payload as hex text.
    pub payload: String,
    /// Receive time in unix seconds, when the capture recorded one.
    #[serde(default)]
    pub ts: Option<f64>,
}

/// Parse JSON Lines text into records. Blank lines are skipped; line numbers
/// in errors are 1-based.
pub fn parse_records(text: &str) -> Result<Vec<PayloadRecord>, ReplayError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|err| ReplayError::Record {
                line: idx + 1,
                message: err.to_string(),
            })
        })
        .collect()
}

pub fn replay_file(path: &Path) -> Result<ReplayReport, ReplayError> {
    let text = fs::read_to_string(path)?;
    let records = parse_records(&text)?;
    Ok(replay_records(&path.display().to_string(), &records))
}

/// Decode `records` in order and collect one entry per record.
pub fn replay_records(input_path: &str, records: &[PayloadRecord]) -> ReplayReport {
    let mut report = make_stub_report(input_path, records.len() as u64);
    let mut summary = ReplaySummary::default();

    for (index, record) in records.iter().enumerate() {
        let received_at = ts_to_rfc3339(record.ts);
        let entry = match decode_hex(&record.topic, &record.payload) {
            Ok(message) => {
                summary.decoded += 1;
                ReplayEntry {
                    index: index as u64,
                    topic: record.topic.clone(),
                    raw_hex: message.raw_hex.clone(),
                    received_at,
                    message: Some(message),
                    error: None,
                }
            }
            Err(err) => {
                warn!(index, topic = %record.topic, error = %err, "failed to decode payload");
                summary.failed += 1;
                ReplayEntry {
                    index: index as u64,
                    topic: record.topic.clone(),
                    raw_hex: record.payload.trim().to_ascii_uppercase(),
                    received_at,
                    message: None,
                    error: Some(err.to_string()),
                }
            }
        };
        report.entries.push(entry);
    }

    report.generated_at = report
        .entries
        .iter()
        .rev()
        .find_map(|entry| entry.received_at.clone())
        .unwrap_or_else(|| crate::DEFAULT_GENERATED_AT.to_string());
    debug!(
        decoded = summary.decoded,
        failed = summary.failed,
        "replay finished"
    );
    report.summary = summary;
    report
}

fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
