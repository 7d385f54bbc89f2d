use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    MmsiError, NavigationStatus, PositionReport, ValidationError, error::MmsiSnafu,
    haversine_distance,
};

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MAX_SPEED_KNOTS: f64 = 102.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mmsi(u32);

/// A message as it leaves the generator, the pair `(mmsi, timestamp)` identifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselMessage {
    pub mmsi: Mmsi,
    pub timestamp: DateTime<Utc>,
    pub payload: String,
}

/// A received message ready to be persisted, valid or not.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAisRecord {
    pub mmsi: Option<Mmsi>,
    pub timestamp: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub status: Option<NavigationStatus>,
    pub payload: String,
    pub is_valid: bool,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AisRecord {
    pub id: i64,
    pub mmsi: Option<Mmsi>,
    pub timestamp: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub status: Option<NavigationStatus>,
    pub payload: String,
    pub is_valid: bool,
    pub error_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VesselStats {
    /// Nautical miles.
    pub distance: f64,
    /// Knots.
    pub avg_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselSummary {
    pub mmsi: Mmsi,
    pub distance: f64,
    pub avg_speed: f64,
    pub track: Vec<TrackPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

impl Mmsi {
    pub const MAX: u32 = 999_999_999;

    pub fn new(value: u32) -> Result<Mmsi, MmsiError> {
        if value > Self::MAX {
            MmsiSnafu {
                value: value.to_string(),
            }
            .fail()
        } else {
            Ok(Mmsi(value))
        }
    }

    /// A random nine-digit MMSI, the leading digit is never zero.
    pub fn random(rng: &mut impl Rng) -> Mmsi {
        Mmsi(rng.random_range(100_000_000..=Self::MAX))
    }

    pub fn into_inner(self) -> u32 {
        self.0
    }

    #[cfg(feature = "test")]
    pub fn test_new(value: u32) -> Mmsi {
        Mmsi(value)
    }
}

impl FromStr for Mmsi {
    type Err = MmsiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 9 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return MmsiSnafu { value: s }.fail();
        }
        s.parse::<u32>()
            .map(Mmsi)
            .map_err(|_| MmsiSnafu { value: s }.build())
    }
}

impl TryFrom<String> for Mmsi {
    type Error = MmsiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mmsi> for String {
    fn from(value: Mmsi) -> Self {
        value.to_string()
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:09}", self.0)
    }
}

impl NewAisRecord {
    /// Builds the record for a successfully decoded report, validating its fields.
    ///
    /// An unparsable frame timestamp, given as `Err` with the raw text, is reported as a
    /// violation alongside any range violations.
    pub fn decoded(
        report: &PositionReport,
        timestamp: Result<DateTime<Utc>, String>,
        payload: String,
    ) -> NewAisRecord {
        let mut violations = validate_report(report);
        let timestamp = match timestamp {
            Ok(t) => Some(t),
            Err(value) => {
                violations.push(ValidationError::Timestamp { value });
                None
            }
        };

        NewAisRecord {
            mmsi: Mmsi::new(report.mmsi).ok(),
            timestamp,
            latitude: Some(report.latitude),
            longitude: Some(report.longitude),
            speed: Some(report.speed),
            course: Some(report.course),
            status: Some(report.status),
            payload,
            is_valid: violations.is_empty(),
            error_message: join_violations(&violations),
        }
    }

    pub fn undecodable(
        mmsi: Option<Mmsi>,
        timestamp: Option<DateTime<Utc>>,
        payload: String,
        reason: String,
    ) -> NewAisRecord {
        NewAisRecord {
            mmsi,
            timestamp,
            latitude: None,
            longitude: None,
            speed: None,
            course: None,
            status: None,
            payload,
            is_valid: false,
            error_message: reason,
        }
    }

    #[cfg(feature = "test")]
    pub fn test_default(mmsi: Mmsi, timestamp: DateTime<Utc>) -> NewAisRecord {
        NewAisRecord {
            mmsi: Some(mmsi),
            timestamp: Some(timestamp),
            latitude: Some(51.9225),
            longitude: Some(4.4792),
            speed: Some(10.0),
            course: Some(45.0),
            status: Some(NavigationStatus::UnderWayUsingEngine),
            payload: "!AIVDM,1,1,,A,test,0*00".into(),
            is_valid: true,
            error_message: String::new(),
        }
    }
}

impl VesselStats {
    /// Expects the track to be ordered by timestamp.
    pub fn from_track(track: &[TrackPoint]) -> VesselStats {
        if track.is_empty() {
            return VesselStats::default();
        }

        let distance = track
            .windows(2)
            .map(|w| {
                haversine_distance(w[0].latitude, w[0].longitude, w[1].latitude, w[1].longitude)
            })
            .sum();
        let avg_speed = track.iter().map(|p| p.speed).sum::<f64>() / track.len() as f64;

        VesselStats {
            distance,
            avg_speed,
        }
    }
}

impl VesselSummary {
    pub fn new(mmsi: Mmsi, track: Vec<TrackPoint>) -> VesselSummary {
        let VesselStats {
            distance,
            avg_speed,
        } = VesselStats::from_track(&track);

        VesselSummary {
            mmsi,
            distance,
            avg_speed,
            track,
        }
    }
}

/// Checks every range rule and returns all violations, in field order.
pub fn validate_report(report: &PositionReport) -> Vec<ValidationError> {
    let mut violations = Vec::new();

    if report.mmsi > Mmsi::MAX {
        violations.push(ValidationError::Mmsi { value: report.mmsi });
    }
    if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&report.latitude) {
        violations.push(ValidationError::Latitude {
            value: report.latitude,
        });
    }
    if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&report.longitude) {
        violations.push(ValidationError::Longitude {
            value: report.longitude,
        });
    }
    if !(0.0..=MAX_SPEED_KNOTS).contains(&report.speed) {
        violations.push(ValidationError::Speed {
            value: report.speed,
        });
    }

    violations
}

pub fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
