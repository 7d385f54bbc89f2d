#![deny(rust_2018_idioms)]

//! Voyage synthesis: port catalog, routing, position interpolation and message generation.

mod catalog;
mod error;
mod generator;
mod planner;
mod router;

pub use catalog::*;
pub use error::*;
pub use generator::*;
pub use planner::*;
pub use router::*;
