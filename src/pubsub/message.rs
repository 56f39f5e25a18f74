use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transport envelope for bus payloads. The identifier and timestamp
/// describe the envelope, never the payload: the payload bytes are
/// carried unchanged and are self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub event_id: String,
    #[serde(rename = "data", with = "base64_bytes")]
    pub raw_data: Vec<u8>,
    #[serde(rename = "at")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Wrap a payload with a fresh identifier and the current time.
    pub fn new(raw_data: Vec<u8>) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            raw_data,
            timestamp: Utc::now(),
        }
    }

    /// Unwrap the payload. Pure projection, never fails.
    pub fn into_payload(self) -> Vec<u8> {
        self.raw_data
    }
}

/// On the JSON wire the payload travels as a base64 string, matching
/// how the envelope is consumed by non-Rust subscribers.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
