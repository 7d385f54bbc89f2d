use chrono::{DateTime, Utc};
use snafu::{Location, Snafu};

use crate::Mmsi;

pub type CoreResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module(core_error), visibility(pub))]
pub enum Error {
    #[snafu(display("No route from '{origin}' to '{destination}': {reason}"))]
    RouteUnavailable {
        #[snafu(implicit)]
        location: Location,
        origin: String,
        destination: String,
        reason: String,
    },
    #[snafu(display("No records exist for vessel '{mmsi}'"))]
    UnknownVessel {
        #[snafu(implicit)]
        location: Location,
        mmsi: Mmsi,
    },
    #[snafu(display("Invalid date range"))]
    InvalidDateRange {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: DateRangeError,
    },
    #[snafu(display("A storage operation failed"))]
    Storage {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("Start of date range '{start}' is after its end '{end}'"))]
pub struct DateRangeError {
    #[snafu(implicit)]
    location: Location,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("'{value}' is not a valid MMSI"))]
pub struct MmsiError {
    #[snafu(implicit)]
    location: Location,
    value: String,
}

/// A single range rule violated by a decoded position report.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(module, visibility(pub))]
pub enum ValidationError {
    #[snafu(display("Invalid mmsi"))]
    Mmsi { value: u32 },
    #[snafu(display("Invalid latitude"))]
    Latitude { value: f64 },
    #[snafu(display("Invalid longitude"))]
    Longitude { value: f64 },
    #[snafu(display("Invalid speed"))]
    Speed { value: f64 },
    #[snafu(display("Invalid timestamp"))]
    Timestamp { value: String },
}

impl Error {
    pub fn is_route_unavailable(&self) -> bool {
        matches!(self, Error::RouteUnavailable { .. })
    }
}
