use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::protocols::g6000::{G6000Error, G6000Message, parse_g6000};
use crate::protocols::v5008::{V5008Error, V5008Message, parse_v5008};
use crate::topic::{HubFamily, classify_topic};

/// Errors returned by [`decode`] and [`decode_hex`].
///
/// Every error is scoped to a single payload; callers log it and move on to
/// the next message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("unsupported topic: {topic}")]
    UnsupportedTopic { topic: String },
    #[error("unsupported device family: {family}")]
    UnsupportedFamily { family: HubFamily },
    #[error("V5008 decode failed: {0}")]
    V5008(#[from] V5008Error),
    #[error("G6000 decode failed: {0}")]
    G6000(#[from] G6000Error),
}

/// A decoded payload together with its uppercase hex text.
///
/// Serializes as one flat object: `raw_hex`, `message_type`, then the shape
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedMessage {
    pub raw_hex: String,
    #[serde(flatten)]
    pub body: MessageBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageBody {
    V5008(V5008Message),
    G6000(G6000Message),
}

impl DecodedMessage {
    pub fn family(&self) -> HubFamily {
        match self.body {
            MessageBody::V5008(_) => HubFamily::V5008,
            MessageBody::G6000(_) => HubFamily::G6000,
        }
    }

    pub fn message_type(&self) -> &'static str {
        match &self.body {
            MessageBody::V5008(message) => message.message_type(),
            MessageBody::G6000(message) => message.message_type(),
        }
    }

    /// Wire layout of the decoded shape, for operators reading raw dumps.
    pub fn msg_format(&self) -> Option<&'static str> {
        match &self.body {
            MessageBody::V5008(message) => message.msg_format(),
            MessageBody::G6000(message) => Some(message.msg_format()),
        }
    }
}

/// Decode one payload received on `topic`.
///
/// # Examples
/// ```
/// use hubscope_core::decode;
///
/// let message = decode("V5008Upload/1", &[0x7F, 0x01])?;
/// assert_eq!(message.message_type(), "UNKNOWN");
/// assert_eq!(message.raw_hex, "7F01");
/// # Ok::<(), hubscope_core::DecodeError>(())
/// ```
pub fn decode(topic: &str, payload: &[u8]) -> Result<DecodedMessage, DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::InvalidInput {
            reason: "empty payload".to_string(),
        });
    }
    let family = classify_topic(topic).ok_or_else(|| DecodeError::UnsupportedTopic {
        topic: topic.to_string(),
    })?;

    let body = match family {
        HubFamily::V5008 => MessageBody::V5008(parse_v5008(payload)?),
        HubFamily::G6000 => MessageBody::G6000(parse_g6000(payload)?),
        HubFamily::V6800 => return Err(DecodeError::UnsupportedFamily { family }),
    };
    let message = DecodedMessage {
        raw_hex: hex::encode_upper(payload),
        body,
    };
    debug!(
        topic,
        family = family.name(),
        message_type = message.message_type(),
        bytes = payload.len(),
        "decoded payload"
    );
    Ok(message)
}

/// Decode a payload given as hex text (either case, surrounding whitespace
/// ignored).
pub fn decode_hex(topic: &str, hex_text: &str) -> Result<DecodedMessage, DecodeError> {
    let payload = hex::decode(hex_text.trim()).map_err(|err| DecodeError::InvalidInput {
        reason: format!("payload is not hex: {}", err),
    })?;
    decode(topic, &payload)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_v5008_unknown_keeps_raw_hex() {
        let message = decode("V5008Upload/1", &[0x7F, 0xAB, 0x01]).unwrap();
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({"raw_hex": "7FAB01", "message_type": "UNKNOWN"})
        );
        assert_eq!(message.family(), HubFamily::V5008);
    }

    #[test]
    fn decode_g6000_unknown_fails() {
        let err = decode("G6000/1", &[0xFF, 0x00]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::G6000(G6000Error::UnknownMessageType { ref id }) if id == "FF"
        ));
        assert!(err.to_string().contains("FF"));
    }

    #[test]
    fn decode_rejects_empty_payload() {
        let err = decode("V5008Upload/1", &[]).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidInput { .. }));
    }

    #[test]
    fn decode_rejects_unknown_topic() {
        let err = decode("other/1", &[0xCB]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnsupportedTopic {
                topic: "other/1".to_string()
            }
        );
    }

    #[test]
    fn decode_rejects_json_family() {
        let err = decode("V6800Upload/1", b"{}").unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnsupportedFamily {
                family: HubFamily::V6800
            }
        );
    }

    #[test]
    fn decode_hex_accepts_lowercase() {
        let message = decode_hex("V5008Upload/1", " ba040000006401\n").unwrap();
        assert_eq!(message.raw_hex, "BA040000006401");
        assert_eq!(message.message_type(), "DR_UPDATE");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["mod_id"], json!("100"));
        assert_eq!(value["dr_status"], json!(1));
    }

    #[test]
    fn decode_hex_rejects_odd_length() {
        let err = decode_hex("V5008Upload/1", "CB0").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidInput { .. }));
    }

    #[test]
    fn decode_hex_rejects_non_hex() {
        let err = decode_hex("G6000/1", "ZZ").unwrap_err();
        assert!(err.to_string().contains("not hex"));
    }

    #[test]
    fn device_update_serializes_sub_type() {
        let message = decode_hex("V5008Upload/1", "EF020100000000010A").unwrap();
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "raw_hex": "EF020100000000010A",
                "message_type": "DEVICE_UPDATE",
                "sub_type": "module",
                "sections": [{"mod_add": 1, "fw_version": "266"}]
            })
        );
    }

    #[test]
    fn msg_format_describes_decoded_shape() {
        let gateway = decode_hex(
            "V5008Upload/1",
            "EF01139000010203C0A8010AFFFFFF00C0A80101AABBCCDDEEFF",
        )
        .unwrap();
        assert!(gateway.msg_format().unwrap().starts_with("[EF][01]"));

        let response = decode_hex("G6000/1", "E9FFC0A801640000303900000000210600000005").unwrap();
        assert!(response.msg_format().unwrap().starts_with("[E9FF]"));

        let unknown = decode_hex("V5008Upload/1", "7F").unwrap();
        assert_eq!(unknown.msg_format(), None);
    }

    #[test]
    fn decoded_message_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DecodedMessage>();
        assert_send_sync::<DecodeError>();
    }
}
