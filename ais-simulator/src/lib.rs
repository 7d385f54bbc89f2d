#![deny(rust_2018_idioms)]

//! Synthesizes vessel voyages, streams them as AIS frames over TCP and ingests the stream into
//! the store.

pub mod consumer;
pub mod error;
pub mod fleet;
pub mod ingest;
pub mod models;
pub mod producer;
pub mod settings;
pub mod startup;

pub use error::{Error, Result};
