use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to open the database"))]
    Connection {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::Error,
    },
    #[snafu(display("Failed to run migrations"))]
    Migrate {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::migrate::MigrateError,
    },
    #[snafu(display("A query related error occured"))]
    Query {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: sqlx::Error,
    },
    #[snafu(display("Stored timestamp could not be parsed '{value}'"))]
    Timestamp {
        #[snafu(implicit)]
        location: Location,
        value: String,
        #[snafu(source)]
        error: chrono::ParseError,
    },
    #[snafu(display("Stored mmsi is invalid"))]
    Mmsi {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: ais_core::MmsiError,
    },
    #[snafu(display("Stored navigation status is out of range '{value}'"))]
    NavigationStatus {
        #[snafu(implicit)]
        location: Location,
        value: i64,
    },
}

impl From<sqlx::Error> for Error {
    #[track_caller]
    fn from(error: sqlx::Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        Error::Query { location, error }
    }
}

impl From<Error> for ais_core::Error {
    #[track_caller]
    fn from(value: Error) -> Self {
        let location = std::panic::Location::caller();
        let location = Location::new(location.file(), location.line(), location.column());
        ais_core::Error::Storage {
            location,
            error: Box::new(value),
        }
    }
}
