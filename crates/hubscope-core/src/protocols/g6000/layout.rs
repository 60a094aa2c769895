//! G6000 wire layout. Offsets are in bytes.

use std::ops::Range;

pub const MESSAGE_ID_OFFSET: usize = 0;
pub const SUB_ID_OFFSET: usize = 1;

pub const HEART_BEAT_IDS: [u8; 2] = [0xCC, 0xCB];
pub const TAG_UPDATE_SHORT_ID: u8 = 0xAB;
pub const TAG_UPDATE_LONG_ID: u8 = 0xCF;
pub const CMD_SET_CFG_RESPONSE_ID: u8 = 0xE9;
pub const CMD_SET_TIMESTAMP_RESPONSE_ID: u8 = 0xE7;
pub const RESPONSE_SUB_ID: u8 = 0xFF;

// HEART_BEAT: [CCCC|CBCB][hub_id(4B)][hub_fw(4B)][hub_ip(4B)][reserved(4B)][output_power][freq_seconds][msg_no(4B)]
pub const HEART_BEAT_HUB_ID_RANGE: Range<usize> = 2..6;
pub const HEART_BEAT_HUB_FW_RANGE: Range<usize> = 6..10;
pub const HEART_BEAT_HUB_IP_OFFSET: usize = 10;
pub const HEART_BEAT_RESERVED_RANGE: Range<usize> = 14..18;
pub const HEART_BEAT_OUTPUT_POWER_OFFSET: usize = 18;
pub const HEART_BEAT_FREQ_SECONDS_OFFSET: usize = 19;
pub const HEART_BEAT_MSG_NO_RANGE: Range<usize> = 20..24;

// TAG_UPDATE: [AB|CF][tag_num] [tag_id antenna] x tag_num [timestamp(7B)][msg_no(4B)]
pub const TAG_NUM_OFFSET: usize = 1;
pub const TAGS_OFFSET: usize = 2;
pub const SHORT_TAG_ID_LEN: usize = 4;
pub const LONG_TAG_ID_LEN: usize = 8;
pub const ANTENNA_LEN: usize = 1;
pub const TIMESTAMP_LEN: usize = 7;
pub const MSG_NO_LEN: usize = 4;

// CMD_SET_CFG_RESPONSE: [E9FF][hub_ip(4B)][hub_id(4B)][reserved(4B)][output_power][freq_seconds][msg_no(4B)]
pub const RESPONSE_HUB_IP_OFFSET: usize = 2;
pub const RESPONSE_HUB_ID_RANGE: Range<usize> = 6..10;
pub const CFG_RESERVED_RANGE: Range<usize> = 10..14;
pub const CFG_OUTPUT_POWER_OFFSET: usize = 14;
pub const CFG_FREQ_SECONDS_OFFSET: usize = 15;
pub const CFG_MSG_NO_RANGE: Range<usize> = 16..20;

// CMD_SET_TIMESTAMP_RESPONSE: [E7FF][hub_ip(4B)][hub_id(4B)][timestamp(7B)][msg_no(4B)]
pub const TIMESTAMP_RESPONSE_TIMESTAMP_OFFSET: usize = 10;
pub const TIMESTAMP_RESPONSE_MSG_NO_RANGE: Range<usize> = 17..21;

// Operator-facing wire descriptors, one per shape.
pub const FORMAT_HEART_BEAT: &str = "[CCCC|CBCB][hub_id(4B)][hub_fw(4B)][hub_ip(4B)][reserved(4B)][output_power][freq_seconds][msg_no(4B)]";
pub const FORMAT_TAG_UPDATE: &str = "[AB|CF][tag_num][tag_id(4B|8B) antenna] x tag_num[year(2B)][month][day][hour][minute][second][msg_no(4B)]";
pub const FORMAT_CFG_RESPONSE: &str =
    "[E9FF][hub_ip(4B)][hub_id(4B)][reserved(4B)][output_power][freq_seconds][msg_no(4B)]";
pub const FORMAT_TIMESTAMP_RESPONSE: &str = "[E7FF][hub_ip(4B)][hub_id(4B)][year(2B)][month][day][hour][minute][second][msg_no(4B)]";
