use serde::Serialize;

use super::layout;

/// One decoded G6000 message, tagged by `message_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "message_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum G6000Message {
    HeartBeat(HeartBeat),
    TagUpdate(TagUpdate),
    CmdSetCfgResponse(CfgResponse),
    CmdSetTimestampResponse(TimestampResponse),
}

impl G6000Message {
    pub fn message_type(&self) -> &'static str {
        match self {
            G6000Message::HeartBeat(_) => "HEART_BEAT",
            G6000Message::TagUpdate(_) => "TAG_UPDATE",
            G6000Message::CmdSetCfgResponse(_) => "CMD_SET_CFG_RESPONSE",
            G6000Message::CmdSetTimestampResponse(_) => "CMD_SET_TIMESTAMP_RESPONSE",
        }
    }

    pub fn msg_format(&self) -> &'static str {
        match self {
            G6000Message::HeartBeat(_) => layout::FORMAT_HEART_BEAT,
            G6000Message::TagUpdate(_) => layout::FORMAT_TAG_UPDATE,
            G6000Message::CmdSetCfgResponse(_) => layout::FORMAT_CFG_RESPONSE,
            G6000Message::CmdSetTimestampResponse(_) => layout::FORMAT_TIMESTAMP_RESPONSE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartBeat {
    pub hub_id: String,
    pub hub_fw: String,
    pub hub_ip: String,
    pub reserved: String,
    pub output_power: u8,
    pub freq_seconds: u8,
    pub msg_no: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagUpdate {
    pub tag_num: u8,
    pub tags: Vec<TagRead>,
    pub timestamp: String,
    pub msg_no: String,
}

/// A tag seen by one antenna. `tag_id` is 4 or 8 bytes of raw hex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRead {
    pub tag_id: String,
    pub antenna: u8,
}

/// Acknowledgement of a configuration write (output power, report interval).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CfgResponse {
    pub hub_ip: String,
    pub hub_id: String,
    pub reserved: String,
    pub output_power: u8,
    pub freq_seconds: u8,
    pub msg_no: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampResponse {
    pub hub_ip: String,
    pub hub_id: String,
    pub timestamp: String,
    pub msg_no: String,
}
