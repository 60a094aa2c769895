use tracing::trace;

use super::error::V5008Error;
use super::layout;
use super::message::{
    ColorSetResponse, DeviceUpdate, DrUpdate, GatewayInfo, HeartBeat, ModuleFirmware,
    ModuleSection, ModuleVersion, NsSection, NsUpdate, TagUpdate, ThSection, ThUpdate, UnitColor,
    UnitTag, V5008Message,
};
use crate::protocols::common::HubReader;

/// Decode a V5008 payload.
///
/// Dispatches on the first byte. Unrecognized ids (and unrecognized
/// `DEVICE_UPDATE` sub-types) yield [`V5008Message::Unknown`]; only a fixed
/// field that runs past the end of the payload is an error.
pub fn parse_v5008(payload: &[u8]) -> Result<V5008Message, V5008Error> {
    let reader = HubReader::new(payload);
    let message_id = reader.read_u8(layout::MESSAGE_ID_OFFSET)?;

    let message = match message_id {
        id if layout::HEART_BEAT_IDS.contains(&id) => {
            V5008Message::HeartBeat(parse_heart_beat(&reader)?)
        }
        layout::TAG_UPDATE_ID => V5008Message::TagUpdate(parse_tag_update(&reader)?),
        id if layout::TH_UPDATE_IDS.contains(&id) => {
            V5008Message::ThUpdate(parse_th_update(&reader)?)
        }
        id if layout::NS_UPDATE_IDS.contains(&id) => {
            V5008Message::NsUpdate(parse_ns_update(&reader)?)
        }
        layout::DR_UPDATE_ID => V5008Message::DrUpdate(parse_dr_update(&reader)?),
        layout::DEVICE_UPDATE_ID => match parse_device_update(&reader)? {
            Some(update) => V5008Message::DeviceUpdate(update),
            None => V5008Message::Unknown,
        },
        layout::COLOR_SET_RESPONSE_ID => {
            V5008Message::ColorSetResponse(parse_color_set_response(&reader)?)
        }
        _ => V5008Message::Unknown,
    };
    Ok(message)
}

fn parse_heart_beat(reader: &HubReader<'_>) -> Result<HeartBeat, V5008Error> {
    let mut sections = Vec::with_capacity(layout::HEART_BEAT_MAX_SECTIONS);
    let mut offset = layout::HEART_BEAT_SECTIONS_OFFSET;
    while sections.len() < layout::HEART_BEAT_MAX_SECTIONS
        && reader.fits(offset, layout::HEART_BEAT_SECTION_LEN)
    {
        sections.push(read_module_section(reader, offset)?);
        offset += layout::HEART_BEAT_SECTION_LEN;
    }
    if sections.len() < layout::HEART_BEAT_MAX_SECTIONS {
        trace!(decoded = sections.len(), "heart beat sections truncated");
    }
    Ok(HeartBeat { sections })
}

fn read_module_section(reader: &HubReader<'_>, base: usize) -> Result<ModuleSection, V5008Error> {
    Ok(ModuleSection {
        mod_add: reader.read_u8(base + layout::SECTION_MOD_ADD_OFFSET)?,
        mod_id: reader.read_decimal_id(shift(layout::SECTION_MOD_ID_RANGE, base))?,
        u_num: reader.read_u8(base + layout::SECTION_U_NUM_OFFSET)?,
    })
}

fn parse_tag_update(reader: &HubReader<'_>) -> Result<TagUpdate, V5008Error> {
    let mod_add = reader.read_u8(layout::TAG_MOD_ADD_OFFSET)?;
    let mod_id = reader.read_decimal_id(layout::TAG_MOD_ID_RANGE)?;
    let reserved = reader.hex_slice(layout::TAG_RESERVED_RANGE);
    let u_num = reader.read_u8(layout::TAG_U_NUM_OFFSET)?;
    let tag_num = reader.read_u8(layout::TAG_NUM_OFFSET)?;

    let mut sections = Vec::with_capacity(usize::from(tag_num));
    let mut offset = layout::TAG_SECTIONS_OFFSET;
    while sections.len() < usize::from(tag_num) && reader.fits(offset, layout::TAG_SECTION_LEN) {
        sections.push(UnitTag {
            u_no: reader.read_u8(offset + layout::TAG_U_NO_OFFSET)?,
            u_alarm: reader.read_u8(offset + layout::TAG_U_ALARM_OFFSET)?,
            u_tag: reader.hex_slice(shift(layout::TAG_U_TAG_RANGE, offset)),
        });
        offset += layout::TAG_SECTION_LEN;
    }
    if sections.len() < usize::from(tag_num) {
        trace!(tag_num, decoded = sections.len(), "tag sections truncated");
    }

    Ok(TagUpdate {
        mod_add,
        mod_id,
        reserved,
        u_num,
        tag_num,
        sections,
    })
}

fn parse_th_update(reader: &HubReader<'_>) -> Result<ThUpdate, V5008Error> {
    let mod_add = reader.read_u8(layout::SENSOR_MOD_ADD_OFFSET)?;
    let mod_id = reader.read_decimal_id(layout::SENSOR_MOD_ID_RANGE)?;

    let mut sections = Vec::with_capacity(layout::TH_MAX_SECTIONS);
    let mut offset = layout::SENSOR_SECTIONS_OFFSET;
    while sections.len() < layout::TH_MAX_SECTIONS && reader.fits(offset, layout::TH_SECTION_LEN) {
        sections.push(ThSection {
            th_add: reader.read_decimal_id(shift(layout::TH_ADD_RANGE, offset))?,
            th_temp: reader.read_fixed_point(offset + layout::TH_TEMP_OFFSET)?,
            th_hum: reader.read_fixed_point(offset + layout::TH_HUM_OFFSET)?,
        });
        offset += layout::TH_SECTION_LEN;
    }

    Ok(ThUpdate {
        mod_add,
        mod_id,
        sections,
    })
}

fn parse_ns_update(reader: &HubReader<'_>) -> Result<NsUpdate, V5008Error> {
    let mod_add = reader.read_u8(layout::SENSOR_MOD_ADD_OFFSET)?;
    let mod_id = reader.read_decimal_id(layout::SENSOR_MOD_ID_RANGE)?;

    let mut sections = Vec::with_capacity(layout::NS_MAX_SECTIONS);
    let mut offset = layout::SENSOR_SECTIONS_OFFSET;
    while sections.len() < layout::NS_MAX_SECTIONS && reader.fits(offset, layout::NS_SECTION_LEN) {
        let raw_level = reader.read_uint(shift(layout::NS_LEVEL_RANGE, offset))?;
        sections.push(NsSection {
            ns_add: reader.hex_slice(shift(layout::NS_ADD_RANGE, offset)),
            ns_level: raw_level as f64 / layout::NS_LEVEL_SCALE,
        });
        offset += layout::NS_SECTION_LEN;
    }

    Ok(NsUpdate {
        mod_add,
        mod_id,
        sections,
    })
}

fn parse_dr_update(reader: &HubReader<'_>) -> Result<DrUpdate, V5008Error> {
    Ok(DrUpdate {
        mod_add: reader.read_u8(layout::DR_MOD_ADD_OFFSET)?,
        mod_id: reader.read_decimal_id(layout::DR_MOD_ID_RANGE)?,
        dr_status: reader.read_u8(layout::DR_STATUS_OFFSET)?,
    })
}

/// Returns `Ok(None)` for sub-types other than gateway and module.
fn parse_device_update(reader: &HubReader<'_>) -> Result<Option<DeviceUpdate>, V5008Error> {
    let sub_type = reader.read_u8(layout::DEVICE_SUB_TYPE_OFFSET)?;
    match sub_type {
        layout::DEVICE_SUB_TYPE_GATEWAY => Ok(Some(DeviceUpdate::Gateway(GatewayInfo {
            hub_type: reader.read_decimal_id(layout::GATEWAY_HUB_TYPE_RANGE)?,
            hub_fw: reader.read_decimal_id(layout::GATEWAY_HUB_FW_RANGE)?,
            hub_ip: reader.read_ipv4(layout::GATEWAY_IP_OFFSET)?,
            hub_mask: reader.read_ipv4(layout::GATEWAY_MASK_OFFSET)?,
            hub_gateway: reader.read_ipv4(layout::GATEWAY_GATEWAY_OFFSET)?,
            hub_mac: reader.read_mac(layout::GATEWAY_MAC_OFFSET)?,
        }))),
        layout::DEVICE_SUB_TYPE_MODULE => {
            let mut sections = Vec::new();
            let mut offset = layout::MODULE_SECTIONS_OFFSET;
            while reader.fits(offset, layout::MODULE_SECTION_LEN) {
                sections.push(ModuleVersion {
                    mod_add: reader.read_u8(offset)?,
                    fw_version: reader.read_decimal_id(shift(layout::MODULE_FW_RANGE, offset))?,
                });
                offset += layout::MODULE_SECTION_LEN;
            }
            Ok(Some(DeviceUpdate::Module(ModuleFirmware { sections })))
        }
        other => {
            trace!(sub_type = other, "unrecognized device update sub-type");
            Ok(None)
        }
    }
}

fn parse_color_set_response(reader: &HubReader<'_>) -> Result<ColorSetResponse, V5008Error> {
    let hub_id = reader.read_decimal_id(layout::COLOR_HUB_ID_RANGE)?;
    let cmd_result = reader.hex_slice(layout::COLOR_CMD_RESULT_RANGE);
    let cmd_code = reader.hex_slice(layout::COLOR_CMD_CODE_RANGE);
    let mod_add = reader.read_u8(layout::COLOR_MOD_ADD_OFFSET)?;

    let mut sections = Vec::new();
    let mut offset = layout::COLOR_SECTIONS_OFFSET;
    while reader.fits(offset, layout::COLOR_SECTION_LEN) {
        sections.push(UnitColor {
            u_no: reader.read_u8(offset)?,
            u_color: reader.read_u8(offset + 1)?,
        });
        offset += layout::COLOR_SECTION_LEN;
    }

    Ok(ColorSetResponse {
        hub_id,
        cmd_result,
        cmd_code,
        mod_add,
        sections,
    })
}

fn shift(range: std::ops::Range<usize>, base: usize) -> std::ops::Range<usize> {
    range.start + base..range.end + base
}

#[cfg(test)]
mod tests {
    use super::parse_v5008;
    use crate::protocols::common::FieldError;
    use crate::protocols::v5008::error::V5008Error;
    use crate::protocols::v5008::message::{DeviceUpdate, V5008Message};

    fn bytes(hex_text: &str) -> Vec<u8> {
        hex::decode(hex_text).unwrap()
    }

    #[test]
    fn parse_heart_beat_full() {
        let payload = bytes(concat!(
            "CB",
            "01000030390C",
            "0200003A9806",
            "030000000000",
            "040000000000",
            "050000000000",
        ));
        let message = parse_v5008(&payload).unwrap();
        let V5008Message::HeartBeat(beat) = message else {
            panic!("expected heart beat");
        };
        assert_eq!(beat.sections.len(), 5);
        assert_eq!(beat.sections[0].mod_add, 1);
        assert_eq!(beat.sections[0].mod_id, "12345");
        assert_eq!(beat.sections[0].u_num, 12);
        assert_eq!(beat.sections[1].mod_id, "15000");
        assert_eq!(beat.sections[4].mod_add, 5);
    }

    #[test]
    fn parse_heart_beat_ignores_trailing_bytes() {
        let mut hex_text = String::from("CC");
        for _ in 0..6 {
            hex_text.push_str("010000000106");
        }
        let message = parse_v5008(&bytes(&hex_text)).unwrap();
        let V5008Message::HeartBeat(beat) = message else {
            panic!("expected heart beat");
        };
        assert_eq!(beat.sections.len(), 5);
    }

    #[test]
    fn parse_heart_beat_truncated() {
        let payload = bytes("CB01000030390C02000030");
        let message = parse_v5008(&payload).unwrap();
        let V5008Message::HeartBeat(beat) = message else {
            panic!("expected heart beat");
        };
        assert_eq!(beat.sections.len(), 1);
    }

    #[test]
    fn parse_tag_update_truncated_sections() {
        let payload = bytes(concat!(
            "BB", "02", "000030D4", "00", "10", "03",
            "0100DEADBEEF",
            "0501CAFEF00D",
            "0900AB",
        ));
        let message = parse_v5008(&payload).unwrap();
        let V5008Message::TagUpdate(update) = message else {
            panic!("expected tag update");
        };
        assert_eq!(update.mod_add, 2);
        assert_eq!(update.mod_id, "12500");
        assert_eq!(update.reserved, "00");
        assert_eq!(update.u_num, 16);
        assert_eq!(update.tag_num, 3);
        assert_eq!(update.sections.len(), 2);
        assert_eq!(update.sections[0].u_tag, "DEADBEEF");
        assert_eq!(update.sections[1].u_no, 5);
        assert_eq!(update.sections[1].u_alarm, 1);
        assert_eq!(update.sections[1].u_tag, "CAFEF00D");
    }

    #[test]
    fn parse_tag_update_respects_declared_count() {
        let payload = bytes(concat!(
            "BB", "01", "00000001", "00", "06", "01",
            "0100DEADBEEF",
            "0200DEADBEEF",
        ));
        let V5008Message::TagUpdate(update) = parse_v5008(&payload).unwrap() else {
            panic!("expected tag update");
        };
        assert_eq!(update.sections.len(), 1);
    }

    #[test]
    fn parse_th_update_fixed_point() {
        let payload = bytes(concat!(
            "03", "00003039",
            "0A", "170A", "2D05",
            "0B", "1764", "2D7B",
        ));
        let V5008Message::ThUpdate(update) = parse_v5008(&payload).unwrap() else {
            panic!("expected th update");
        };
        assert_eq!(update.mod_add, 3);
        assert_eq!(update.mod_id, "12345");
        assert_eq!(update.sections.len(), 2);
        assert_eq!(update.sections[0].th_add, "10");
        assert_eq!(update.sections[0].th_temp, 23.10);
        assert_eq!(update.sections[0].th_hum, 45.05);
        assert_eq!(update.sections[1].th_temp, 23.100);
        assert_eq!(update.sections[1].th_hum, 45.123);
    }

    #[test]
    fn parse_ns_update_divides_by_hundred() {
        let payload = bytes(concat!(
            "0B", "00000007",
            "01", "00001234",
            "02", "000003E8",
            "03", "00000000",
        ));
        let V5008Message::NsUpdate(update) = parse_v5008(&payload).unwrap() else {
            panic!("expected ns update");
        };
        assert_eq!(update.mod_add, 0x0B);
        assert_eq!(update.mod_id, "7");
        assert_eq!(update.sections.len(), 3);
        assert_eq!(update.sections[0].ns_add, "01");
        assert_eq!(update.sections[0].ns_level, 46.6);
        assert_eq!(update.sections[1].ns_level, 10.0);
        assert_eq!(update.sections[2].ns_level, 0.0);
    }

    #[test]
    fn sensor_addresses_keep_their_text_forms() {
        let ns = parse_v5008(&bytes("0B000000070A00001234")).unwrap();
        let ns = serde_json::to_value(&ns).unwrap();
        assert_eq!(ns["sections"][0]["ns_add"], "0A");
        assert_eq!(ns["sections"][0]["ns_level"], 46.6);

        let th = parse_v5008(&bytes("01000000010A170A2D05")).unwrap();
        let th = serde_json::to_value(&th).unwrap();
        assert_eq!(th["sections"][0]["th_add"], "10");
    }

    #[test]
    fn parse_dr_update() {
        let payload = bytes("BA040000006401");
        let V5008Message::DrUpdate(update) = parse_v5008(&payload).unwrap() else {
            panic!("expected dr update");
        };
        assert_eq!(update.mod_add, 4);
        assert_eq!(update.mod_id, "100");
        assert_eq!(update.dr_status, 1);
    }

    #[test]
    fn parse_dr_update_short_header() {
        let payload = bytes("BA04000000");
        let err = parse_v5008(&payload).unwrap_err();
        assert!(matches!(
            err,
            V5008Error::Field(FieldError::TooShort { needed: 6, actual: 5 })
        ));
    }

    #[test]
    fn parse_device_gateway() {
        let payload = bytes(concat!(
            "EF", "01", "1390", "00010203", "C0A8010A", "FFFFFF00", "C0A80101",
            "AABBCCDDEEFF",
        ));
        let V5008Message::DeviceUpdate(DeviceUpdate::Gateway(info)) =
            parse_v5008(&payload).unwrap()
        else {
            panic!("expected gateway update");
        };
        assert_eq!(info.hub_type, "5008");
        assert_eq!(info.hub_fw, "66051");
        assert_eq!(info.hub_ip, "192.168.1.10");
        assert_eq!(info.hub_mask, "255.255.255.0");
        assert_eq!(info.hub_gateway, "192.168.1.1");
        assert_eq!(info.hub_mac, "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn parse_device_modules_until_short() {
        let payload = bytes(concat!(
            "EF", "02",
            "01", "000000000102",
            "02", "000000000103",
            "03", "0000",
        ));
        let V5008Message::DeviceUpdate(DeviceUpdate::Module(modules)) =
            parse_v5008(&payload).unwrap()
        else {
            panic!("expected module update");
        };
        assert_eq!(modules.sections.len(), 2);
        assert_eq!(modules.sections[0].mod_add, 1);
        assert_eq!(modules.sections[0].fw_version, "258");
        assert_eq!(modules.sections[1].fw_version, "259");
    }

    #[test]
    fn parse_device_unknown_sub_type() {
        let payload = bytes("EF07AABB");
        assert_eq!(parse_v5008(&payload).unwrap(), V5008Message::Unknown);
    }

    #[test]
    fn parse_color_set_response() {
        let payload = bytes(concat!("AA", "00003039", "A1", "E1", "02", "0101", "0203", "04"));
        let V5008Message::ColorSetResponse(response) = parse_v5008(&payload).unwrap() else {
            panic!("expected color set response");
        };
        assert_eq!(response.hub_id, "12345");
        assert_eq!(response.cmd_result, "A1");
        assert_eq!(response.cmd_code, "E1");
        assert_eq!(response.mod_add, 2);
        assert_eq!(response.sections.len(), 2);
        assert_eq!(response.sections[1].u_no, 2);
        assert_eq!(response.sections[1].u_color, 3);
    }

    #[test]
    fn parse_unknown_id() {
        let payload = bytes("7F0102");
        let message = parse_v5008(&payload).unwrap();
        assert_eq!(message, V5008Message::Unknown);
        assert_eq!(message.message_type(), "UNKNOWN");
    }

    #[test]
    fn parse_empty_payload() {
        let err = parse_v5008(&[]).unwrap_err();
        assert!(err.to_string().contains("payload too short"));
    }
}
