use ais_core::VesselMessage;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Sent by the producer after the last message, the consumer stops on it.
pub const END_OF_STREAM: &str = "__END__";

/// One newline-delimited JSON frame on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AisFrame {
    pub message: String,
    #[serde(default)]
    pub mmsi: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub payload: String,
}

impl From<&VesselMessage> for AisFrame {
    fn from(value: &VesselMessage) -> Self {
        AisFrame {
            message: "AIVDM".into(),
            mmsi: Some(value.mmsi.to_string()),
            timestamp: Some(value.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)),
            payload: value.payload.clone(),
        }
    }
}

/// Accepts RFC 3339 and offset-less ISO 8601 timestamps, the latter are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|t| t.and_utc())
        })
}
