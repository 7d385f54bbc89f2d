use std::{path::PathBuf, time::Duration};

use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to read port catalog '{}'", path.display()))]
    ReadCatalog {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Malformed port catalog"))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: csv::Error,
    },
    #[snafu(display(
        "Port '{name}' has coordinates outside the valid range, lat: '{latitude}', lon: '{longitude}'"
    ))]
    InvalidPort {
        #[snafu(implicit)]
        location: Location,
        name: String,
        latitude: f64,
        longitude: f64,
    },
    #[snafu(display("Port catalog needs at least 2 ports, found '{size}'"))]
    InsufficientCatalog {
        #[snafu(implicit)]
        location: Location,
        size: usize,
    },
    #[snafu(display("All '{pairs}' port pairs of the catalog are already used"))]
    PortPairsExhausted {
        #[snafu(implicit)]
        location: Location,
        pairs: usize,
    },
    #[snafu(display(
        "Invalid voyage parameters, speed: '{speed_knots}' knots, interval: '{interval:?}'"
    ))]
    InvalidParameters {
        #[snafu(implicit)]
        location: Location,
        speed_knots: f64,
        interval: Duration,
    },
    #[snafu(display("Router leg length must be positive, got '{value}'"))]
    InvalidLegLength {
        #[snafu(implicit)]
        location: Location,
        value: f64,
    },
}

impl From<csv::Error> for Error {
    #[track_caller]
    fn from(error: csv::Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        Error::Csv { location, error }
    }
}
