#![deny(rust_2018_idioms)]

//! Implements encoding and decoding of AIS position reports (message types 1, 2 and 3)
//! carried in single fragment NMEA `!AIVDM` sentences.

mod aivdm;
mod armor;
mod error;
mod models;

pub use aivdm::Aivdm;
pub use error::{DecodeError, EncodeError};
pub use models::*;
