#![deny(rust_2018_idioms)]

mod adapter;
mod error;
mod models;
mod queries;
mod settings;
#[cfg(feature = "test")]
mod test_db;

pub use adapter::SqliteAdapter;
pub use error::{Error, Result};
pub use settings::SqliteSettings;
#[cfg(feature = "test")]
pub use test_db::TestDb;
