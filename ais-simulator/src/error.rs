use std::net::SocketAddr;

use snafu::{Location, Snafu};
use tokio_util::codec::LinesCodecError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Speed factor must be -1 or positive, got '{factor}'"))]
    SpeedFactor {
        #[snafu(implicit)]
        location: Location,
        factor: f64,
    },
    #[snafu(display("Failed to prepare voyages"))]
    Engine {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: engine::Error,
    },
    #[snafu(display("Domain error"))]
    Core {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: ais_core::Error,
    },
    #[snafu(display("Failed to set up storage"))]
    Storage {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlite::Error,
    },
    #[snafu(display("None of the '{requested}' requested voyages could be planned"))]
    NoVoyages {
        #[snafu(implicit)]
        location: Location,
        requested: usize,
    },
    #[snafu(display("Failed to bind stream address '{address}'"))]
    Bind {
        #[snafu(implicit)]
        location: Location,
        address: SocketAddr,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to accept a consumer connection"))]
    Accept {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to connect to the producer at '{address}'"))]
    Connect {
        #[snafu(implicit)]
        location: Location,
        address: SocketAddr,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to serialize frame"))]
    Serialize {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("Stream transport failed"))]
    Transport {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: LinesCodecError,
    },
    #[snafu(display(
        "Stream closed before the end-of-stream marker after '{received}' messages"
    ))]
    StreamClosed {
        #[snafu(implicit)]
        location: Location,
        received: usize,
    },
    #[snafu(display("A streaming task failed to complete"))]
    Join {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: tokio::task::JoinError,
    },
}

impl From<engine::Error> for Error {
    #[track_caller]
    fn from(error: engine::Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        Error::Engine { location, error }
    }
}

impl From<ais_core::Error> for Error {
    #[track_caller]
    fn from(error: ais_core::Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        Error::Core { location, error }
    }
}

impl From<LinesCodecError> for Error {
    #[track_caller]
    fn from(error: LinesCodecError) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        Error::Transport { location, error }
    }
}

impl Error {
    /// The stream ended or broke before the producer signalled its end.
    pub fn is_incomplete_run(&self) -> bool {
        matches!(self, Error::StreamClosed { .. } | Error::Transport { .. })
    }
}
