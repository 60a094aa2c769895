use serde::Serialize;

use super::layout;

/// One decoded V5008 message.
///
/// Serializes with a `message_type` tag (`HEART_BEAT`, `TAG_UPDATE`, ...)
/// next to the shape fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "message_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum V5008Message {
    HeartBeat(HeartBeat),
    TagUpdate(TagUpdate),
    ThUpdate(ThUpdate),
    NsUpdate(NsUpdate),
    DrUpdate(DrUpdate),
    DeviceUpdate(DeviceUpdate),
    ColorSetResponse(ColorSetResponse),
    Unknown,
}

impl V5008Message {
    pub fn message_type(&self) -> &'static str {
        match self {
            V5008Message::HeartBeat(_) => "HEART_BEAT",
            V5008Message::TagUpdate(_) => "TAG_UPDATE",
            V5008Message::ThUpdate(_) => "TH_UPDATE",
            V5008Message::NsUpdate(_) => "NS_UPDATE",
            V5008Message::DrUpdate(_) => "DR_UPDATE",
            V5008Message::DeviceUpdate(_) => "DEVICE_UPDATE",
            V5008Message::ColorSetResponse(_) => "COLOR_SET_RESPONSE",
            V5008Message::Unknown => "UNKNOWN",
        }
    }

    /// Wire layout descriptor for the decoded shape; `None` for `UNKNOWN`.
    pub fn msg_format(&self) -> Option<&'static str> {
        let format = match self {
            V5008Message::HeartBeat(_) => layout::FORMAT_HEART_BEAT,
            V5008Message::TagUpdate(_) => layout::FORMAT_TAG_UPDATE,
            V5008Message::ThUpdate(_) => layout::FORMAT_TH_UPDATE,
            V5008Message::NsUpdate(_) => layout::FORMAT_NS_UPDATE,
            V5008Message::DrUpdate(_) => layout::FORMAT_DR_UPDATE,
            V5008Message::DeviceUpdate(DeviceUpdate::Gateway(_)) => layout::FORMAT_GATEWAY,
            V5008Message::DeviceUpdate(DeviceUpdate::Module(_)) => {
                layout::FORMAT_MODULE_FIRMWARE
            }
            V5008Message::ColorSetResponse(_) => layout::FORMAT_COLOR_SET_RESPONSE,
            V5008Message::Unknown => return None,
        };
        Some(format)
    }
}

/// Module presence report, up to five modules in slot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartBeat {
    pub sections: Vec<ModuleSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSection {
    pub mod_add: u8,
    /// Module serial as decimal text.
    pub mod_id: String,
    pub u_num: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagUpdate {
    pub mod_add: u8,
    pub mod_id: String,
    pub reserved: String,
    pub u_num: u8,
    /// Declared tag count; `sections` may hold fewer when the payload is short.
    pub tag_num: u8,
    pub sections: Vec<UnitTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitTag {
    pub u_no: u8,
    pub u_alarm: u8,
    /// Raw tag identifier (uppercase hex).
    pub u_tag: String,
}

/// Temperature/humidity readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThUpdate {
    pub mod_add: u8,
    pub mod_id: String,
    pub sections: Vec<ThSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThSection {
    /// Sensor address as decimal text.
    pub th_add: String,
    pub th_temp: f64,
    pub th_hum: f64,
}

/// Noise level readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NsUpdate {
    pub mod_add: u8,
    pub mod_id: String,
    pub sections: Vec<NsSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NsSection {
    /// Sensor address as raw uppercase hex.
    pub ns_add: String,
    /// Raw 32-bit level divided by 100.
    pub ns_level: f64,
}

/// Door/relay status change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrUpdate {
    pub mod_add: u8,
    pub mod_id: String,
    pub dr_status: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "sub_type", rename_all = "lowercase")]
pub enum DeviceUpdate {
    Gateway(GatewayInfo),
    Module(ModuleFirmware),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayInfo {
    pub hub_type: String,
    pub hub_fw: String,
    pub hub_ip: String,
    pub hub_mask: String,
    pub hub_gateway: String,
    pub hub_mac: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleFirmware {
    pub sections: Vec<ModuleVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleVersion {
    pub mod_add: u8,
    pub fw_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSetResponse {
    pub hub_id: String,
    /// `A1` on success, `A0` on failure.
    pub cmd_result: String,
    pub cmd_code: String,
    pub mod_add: u8,
    pub sections: Vec<UnitColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitColor {
    pub u_no: u8,
    pub u_color: u8,
}
