#![deny(rust_2018_idioms)]

//! Domain types, ports and errors shared by the simulator crates.

mod date_range;
mod domain;
mod error;
mod geo;
mod ports;

pub use ais_codec::{
    Aivdm, DecodeError, EncodeError, MessageKind, NavigationStatus, PositionReport,
};
pub use date_range::*;
pub use domain::*;
pub use error::*;
pub use geo::*;
pub use ports::*;
