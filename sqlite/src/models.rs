use ais_core::TrackPoint;
use chrono::{DateTime, SecondsFormat, Utc};
use snafu::ResultExt;

use crate::{Error, Result, error::TimestampSnafu};

#[derive(Debug, sqlx::FromRow)]
pub struct TrackPointRow {
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}

/// Fixed width so that text ordering equals time ordering.
pub fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .context(TimestampSnafu { value })
}

impl TryFrom<TrackPointRow> for TrackPoint {
    type Error = Error;

    fn try_from(value: TrackPointRow) -> Result<Self> {
        Ok(TrackPoint {
            timestamp: decode_timestamp(&value.timestamp)?,
            latitude: value.latitude,
            longitude: value.longitude,
            speed: value.speed,
        })
    }
}
