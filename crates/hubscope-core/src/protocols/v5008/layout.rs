//! V5008 wire layout. Offsets are in bytes.

use std::ops::Range;

pub const MESSAGE_ID_OFFSET: usize = 0;

pub const HEART_BEAT_IDS: [u8; 2] = [0xCB, 0xCC];
pub const TAG_UPDATE_ID: u8 = 0xBB;
pub const TH_UPDATE_IDS: std::ops::RangeInclusive<u8> = 0x01..=0x05;
pub const NS_UPDATE_IDS: std::ops::RangeInclusive<u8> = 0x0A..=0x0C;
pub const DR_UPDATE_ID: u8 = 0xBA;
pub const DEVICE_UPDATE_ID: u8 = 0xEF;
pub const COLOR_SET_RESPONSE_ID: u8 = 0xAA;

// HEART_BEAT: [CB|CC] [mod_add mod_id(4B) u_num] x 5
pub const HEART_BEAT_SECTIONS_OFFSET: usize = 1;
pub const HEART_BEAT_SECTION_LEN: usize = 6;
pub const HEART_BEAT_MAX_SECTIONS: usize = 5;

// Module section fields, relative to the section start.
pub const SECTION_MOD_ADD_OFFSET: usize = 0;
pub const SECTION_MOD_ID_RANGE: Range<usize> = 1..5;
pub const SECTION_U_NUM_OFFSET: usize = 5;

// TAG_UPDATE: [BB][mod_add][mod_id(4B)][reserved][u_num][tag_num] [u_no u_alarm u_tag(4B)] x tag_num
pub const TAG_MOD_ADD_OFFSET: usize = 1;
pub const TAG_MOD_ID_RANGE: Range<usize> = 2..6;
pub const TAG_RESERVED_RANGE: Range<usize> = 6..7;
pub const TAG_U_NUM_OFFSET: usize = 7;
pub const TAG_NUM_OFFSET: usize = 8;
pub const TAG_SECTIONS_OFFSET: usize = 9;
pub const TAG_SECTION_LEN: usize = 6;
pub const TAG_U_NO_OFFSET: usize = 0;
pub const TAG_U_ALARM_OFFSET: usize = 1;
pub const TAG_U_TAG_RANGE: Range<usize> = 2..6;

// TH_UPDATE / NS_UPDATE: the message id doubles as mod_add.
pub const SENSOR_MOD_ADD_OFFSET: usize = 0;
pub const SENSOR_MOD_ID_RANGE: Range<usize> = 1..5;
pub const SENSOR_SECTIONS_OFFSET: usize = 5;

// [th_add th_temp(int frac) th_hum(int frac)] x 6
pub const TH_SECTION_LEN: usize = 5;
pub const TH_MAX_SECTIONS: usize = 6;
pub const TH_ADD_RANGE: Range<usize> = 0..1;
pub const TH_TEMP_OFFSET: usize = 1;
pub const TH_HUM_OFFSET: usize = 3;

// [ns_add ns_level(4B)] x 3
pub const NS_SECTION_LEN: usize = 5;
pub const NS_MAX_SECTIONS: usize = 3;
pub const NS_ADD_RANGE: Range<usize> = 0..1;
pub const NS_LEVEL_RANGE: Range<usize> = 1..5;
pub const NS_LEVEL_SCALE: f64 = 100.0;

// DR_UPDATE: [BA][mod_add][mod_id(4B)][dr_status]
pub const DR_MOD_ADD_OFFSET: usize = 1;
pub const DR_MOD_ID_RANGE: Range<usize> = 2..6;
pub const DR_STATUS_OFFSET: usize = 6;

// DEVICE_UPDATE: [EF][sub_type] ...
pub const DEVICE_SUB_TYPE_OFFSET: usize = 1;
pub const DEVICE_SUB_TYPE_GATEWAY: u8 = 0x01;
pub const DEVICE_SUB_TYPE_MODULE: u8 = 0x02;

// [EF][01][hub_type(2B)][hub_fw(4B)][ip(4B)][mask(4B)][gateway(4B)][mac(6B)]
pub const GATEWAY_HUB_TYPE_RANGE: Range<usize> = 2..4;
pub const GATEWAY_HUB_FW_RANGE: Range<usize> = 4..8;
pub const GATEWAY_IP_OFFSET: usize = 8;
pub const GATEWAY_MASK_OFFSET: usize = 12;
pub const GATEWAY_GATEWAY_OFFSET: usize = 16;
pub const GATEWAY_MAC_OFFSET: usize = 20;

// [EF][02][mod_add fw_version(6B)] x n
pub const MODULE_SECTIONS_OFFSET: usize = 2;
pub const MODULE_SECTION_LEN: usize = 7;
pub const MODULE_FW_RANGE: Range<usize> = 1..7;

// COLOR_SET_RESPONSE: [AA][hub_id(4B)][cmd_result][cmd_code][mod_add] [u_no u_color] x n
pub const COLOR_HUB_ID_RANGE: Range<usize> = 1..5;
pub const COLOR_CMD_RESULT_RANGE: Range<usize> = 5..6;
pub const COLOR_CMD_CODE_RANGE: Range<usize> = 6..7;
pub const COLOR_MOD_ADD_OFFSET: usize = 7;
pub const COLOR_SECTIONS_OFFSET: usize = 8;
pub const COLOR_SECTION_LEN: usize = 2;

// Operator-facing wire descriptors, one per shape.
pub const FORMAT_HEART_BEAT: &str = "[CB|CC][mod_add mod_id(4B) u_num] x 5";
pub const FORMAT_TAG_UPDATE: &str =
    "[BB][mod_add][mod_id(4B)][reserved][u_num][tag_num][u_no u_alarm u_tag(4B)] x tag_num";
pub const FORMAT_TH_UPDATE: &str = "[mod_add][mod_id(4B)][th_add th_temp(2B) th_hum(2B)] x 6";
pub const FORMAT_NS_UPDATE: &str = "[mod_add][mod_id(4B)][ns_add ns_level(4B)] x 3";
pub const FORMAT_DR_UPDATE: &str = "[BA][mod_add][mod_id(4B)][dr_status]";
pub const FORMAT_GATEWAY: &str =
    "[EF][01][hub_type(2B)][hub_fw(4B)][hub_ip(4B)][hub_mask(4B)][hub_gateway(4B)][hub_mac(6B)]";
pub const FORMAT_MODULE_FIRMWARE: &str = "[EF][02][mod_add fw_version(6B)] x n";
pub const FORMAT_COLOR_SET_RESPONSE: &str =
    "[AA][hub_id(4B)][cmd_result][cmd_code][mod_add][u_no u_color] x n";
