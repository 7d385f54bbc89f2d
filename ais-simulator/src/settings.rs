use std::{net::SocketAddr, path::PathBuf, time::Duration};

use config::{Config, ConfigError, File};
use serde::Deserialize;
use sqlite::SqliteSettings;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Local,
    Development,
    Test,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub sqlite: SqliteSettings,
    pub port_catalog: PathBuf,
    pub num_vessels: usize,
    pub speed_knots: f64,
    #[serde(with = "humantime_serde")]
    pub sampling_interval: Duration,
    /// `-1` streams without delay, a positive factor speeds up playback relative to
    /// `sampling_interval`.
    pub speed_factor: f64,
    pub stream_address: SocketAddr,
    pub route_leg_nautical_miles: f64,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let environment = match std::env::var("APP_ENVIRONMENT") {
            Ok(v) => v
                .parse::<Environment>()
                .map_err(|e| ConfigError::Message(format!("invalid APP_ENVIRONMENT '{v}': {e}")))?,
            Err(_) => Environment::default(),
        };

        Settings::for_environment(environment)
    }

    pub fn for_environment(environment: Environment) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.to_string().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("AIS_SIMULATOR").separator("__"))
            .set_override("environment", environment.to_string())?
            .build()?
            .try_deserialize()
    }
}

impl From<&LogLevel> for tracing::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
