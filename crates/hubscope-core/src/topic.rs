//! Topic classification.
//!
//! Hubs publish on topics whose first segment names the device family
//! (`V5008Upload/<hub_id>`, `G6000...`, `V6800Upload/<hub_id>`).

use serde::Serialize;

pub const TOPIC_V5008_UPLOAD: &str = "V5008Upload/";
pub const TOPIC_V6800_UPLOAD: &str = "V6800Upload/";
pub const TOPIC_V5008_DOWNLOAD: &str = "V5008Download/";
pub const TOPIC_V6800_DOWNLOAD: &str = "V6800Download/";
pub const TOPIC_DATA: &str = "dig/iot/data/";
pub const TOPIC_CMD: &str = "dig/iot/cmd/";

/// Default subscription filters for a monitoring session.
pub const LISTEN_TOPICS: [&str; 3] = ["V5008Upload/#", "V6800Upload/#", "dig/iot/cmd/#"];

/// Device family selected from a topic prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HubFamily {
    /// Legacy binary hub protocol.
    V5008,
    /// Newer binary hub protocol.
    G6000,
    /// JSON payloads; classified but not decoded here.
    V6800,
}

impl HubFamily {
    pub fn name(self) -> &'static str {
        match self {
            HubFamily::V5008 => "v5008",
            HubFamily::G6000 => "g6000",
            HubFamily::V6800 => "v6800",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            HubFamily::V5008 => "V5008",
            HubFamily::G6000 => "G6000",
            HubFamily::V6800 => "V6800",
        }
    }
}

impl std::fmt::Display for HubFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Select the device family for `topic`, or `None` when no prefix matches.
///
/// # Examples
/// ```
/// use hubscope_core::{HubFamily, classify_topic};
///
/// assert_eq!(classify_topic("V5008Upload/2437871205"), Some(HubFamily::V5008));
/// assert_eq!(classify_topic("sensors/other"), None);
/// ```
pub fn classify_topic(topic: &str) -> Option<HubFamily> {
    [HubFamily::V5008, HubFamily::G6000, HubFamily::V6800]
        .into_iter()
        .find(|family| topic.starts_with(family.prefix()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_prefixes() {
        assert_eq!(classify_topic(TOPIC_V5008_UPLOAD), Some(HubFamily::V5008));
        assert_eq!(classify_topic(TOPIC_V5008_DOWNLOAD), Some(HubFamily::V5008));
        assert_eq!(classify_topic(TOPIC_V6800_UPLOAD), Some(HubFamily::V6800));
        assert_eq!(classify_topic(TOPIC_V6800_DOWNLOAD), Some(HubFamily::V6800));
        assert_eq!(classify_topic("G6000/hub/1"), Some(HubFamily::G6000));
    }

    #[test]
    fn classify_is_case_sensitive_prefix() {
        assert_eq!(classify_topic("v5008Upload/1"), None);
        assert_eq!(classify_topic("upload/V5008"), None);
        assert_eq!(classify_topic(TOPIC_DATA), None);
        assert_eq!(classify_topic(TOPIC_CMD), None);
        assert_eq!(classify_topic(""), None);
    }

    #[test]
    fn listen_topics_cover_uploads() {
        assert!(LISTEN_TOPICS.iter().any(|t| t.starts_with(TOPIC_V5008_UPLOAD)));
        assert!(LISTEN_TOPICS.iter().any(|t| t.starts_with(TOPIC_CMD)));
    }

    #[test]
    fn family_serializes_lowercase() {
        let value = serde_json::to_value(HubFamily::G6000).unwrap();
        assert_eq!(value, serde_json::json!("g6000"));
        assert_eq!(HubFamily::V5008.to_string(), "v5008");
    }
}
