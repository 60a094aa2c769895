use tracing::trace;

use super::error::G6000Error;
use super::layout;
use super::message::{
    CfgResponse, G6000Message, HeartBeat, TagRead, TagUpdate, TimestampResponse,
};
use crate::protocols::common::HubReader;

/// Decode a G6000 payload.
///
/// Fails with [`G6000Error::UnknownMessageType`] for an unrecognized first
/// byte and [`G6000Error::UnknownSubType`] when a command response is not
/// followed by the `FF` sub-id.
pub fn parse_g6000(payload: &[u8]) -> Result<G6000Message, G6000Error> {
    let reader = HubReader::new(payload);
    let message_id = reader.read_u8(layout::MESSAGE_ID_OFFSET)?;

    match message_id {
        id if layout::HEART_BEAT_IDS.contains(&id) => {
            Ok(G6000Message::HeartBeat(parse_heart_beat(&reader)?))
        }
        layout::TAG_UPDATE_SHORT_ID => Ok(G6000Message::TagUpdate(parse_tag_update(
            &reader,
            layout::SHORT_TAG_ID_LEN,
        )?)),
        layout::TAG_UPDATE_LONG_ID => Ok(G6000Message::TagUpdate(parse_tag_update(
            &reader,
            layout::LONG_TAG_ID_LEN,
        )?)),
        layout::CMD_SET_CFG_RESPONSE_ID => {
            require_response_sub_id(&reader, message_id)?;
            Ok(G6000Message::CmdSetCfgResponse(parse_cfg_response(&reader)?))
        }
        layout::CMD_SET_TIMESTAMP_RESPONSE_ID => {
            require_response_sub_id(&reader, message_id)?;
            Ok(G6000Message::CmdSetTimestampResponse(
                parse_timestamp_response(&reader)?,
            ))
        }
        other => Err(G6000Error::UnknownMessageType {
            id: format!("{:02X}", other),
        }),
    }
}

fn require_response_sub_id(reader: &HubReader<'_>, message_id: u8) -> Result<(), G6000Error> {
    let sub_id = reader.read_u8(layout::SUB_ID_OFFSET)?;
    if sub_id != layout::RESPONSE_SUB_ID {
        return Err(G6000Error::UnknownSubType {
            id: format!("{:02X}", message_id),
            sub_id: format!("{:02X}", sub_id),
        });
    }
    Ok(())
}

fn parse_heart_beat(reader: &HubReader<'_>) -> Result<HeartBeat, G6000Error> {
    Ok(HeartBeat {
        hub_id: reader.read_decimal_id(layout::HEART_BEAT_HUB_ID_RANGE)?,
        hub_fw: reader.read_decimal_id(layout::HEART_BEAT_HUB_FW_RANGE)?,
        hub_ip: reader.read_ipv4(layout::HEART_BEAT_HUB_IP_OFFSET)?,
        reserved: reader.hex_slice(layout::HEART_BEAT_RESERVED_RANGE),
        output_power: reader.read_u8(layout::HEART_BEAT_OUTPUT_POWER_OFFSET)?,
        freq_seconds: reader.read_u8(layout::HEART_BEAT_FREQ_SECONDS_OFFSET)?,
        msg_no: reader.hex_slice(layout::HEART_BEAT_MSG_NO_RANGE),
    })
}

/// Tag records are `tag_id_len` bytes of id followed by one antenna byte.
/// The timestamp and `msg_no` follow the last record actually decoded.
fn parse_tag_update(reader: &HubReader<'_>, tag_id_len: usize) -> Result<TagUpdate, G6000Error> {
    let tag_num = reader.read_u8(layout::TAG_NUM_OFFSET)?;
    let record_len = tag_id_len + layout::ANTENNA_LEN;

    let mut tags = Vec::with_capacity(usize::from(tag_num));
    let mut offset = layout::TAGS_OFFSET;
    while tags.len() < usize::from(tag_num) && reader.fits(offset, record_len) {
        tags.push(TagRead {
            tag_id: reader.hex_slice(offset..offset + tag_id_len),
            antenna: reader.read_u8(offset + tag_id_len)?,
        });
        offset += record_len;
    }
    if tags.len() < usize::from(tag_num) {
        trace!(tag_num, decoded = tags.len(), "tag records truncated");
    }

    let timestamp = reader.read_timestamp(offset)?;
    let msg_no_start = offset + layout::TIMESTAMP_LEN;
    let msg_no = reader.hex_slice(msg_no_start..msg_no_start + layout::MSG_NO_LEN);

    Ok(TagUpdate {
        tag_num,
        tags,
        timestamp,
        msg_no,
    })
}

fn parse_cfg_response(reader: &HubReader<'_>) -> Result<CfgResponse, G6000Error> {
    Ok(CfgResponse {
        hub_ip: reader.read_ipv4(layout::RESPONSE_HUB_IP_OFFSET)?,
        hub_id: reader.read_decimal_id(layout::RESPONSE_HUB_ID_RANGE)?,
        reserved: reader.hex_slice(layout::CFG_RESERVED_RANGE),
        output_power: reader.read_u8(layout::CFG_OUTPUT_POWER_OFFSET)?,
        freq_seconds: reader.read_u8(layout::CFG_FREQ_SECONDS_OFFSET)?,
        msg_no: reader.hex_slice(layout::CFG_MSG_NO_RANGE),
    })
}

fn parse_timestamp_response(reader: &HubReader<'_>) -> Result<TimestampResponse, G6000Error> {
    Ok(TimestampResponse {
        hub_ip: reader.read_ipv4(layout::RESPONSE_HUB_IP_OFFSET)?,
        hub_id: reader.read_decimal_id(layout::RESPONSE_HUB_ID_RANGE)?,
        timestamp: reader.read_timestamp(layout::TIMESTAMP_RESPONSE_TIMESTAMP_OFFSET)?,
        msg_no: reader.hex_slice(layout::TIMESTAMP_RESPONSE_MSG_NO_RANGE),
    })
}
