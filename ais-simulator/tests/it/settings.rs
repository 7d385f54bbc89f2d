use std::time::Duration;

use ais_simulator::settings::{Environment, Settings};

#[test]
fn test_every_environment_has_loadable_settings() {
    for environment in [
        Environment::Local,
        Environment::Development,
        Environment::Test,
        Environment::Production,
    ] {
        let settings = Settings::for_environment(environment).unwrap();
        assert_eq!(settings.environment, environment);
        assert!(settings.num_vessels > 0);
    }
}

#[test]
fn test_test_settings_stream_in_burst_mode_from_memory() {
    let settings = Settings::for_environment(Environment::Test).unwrap();

    assert!(settings.sqlite.is_in_memory());
    assert_eq!(settings.speed_factor, -1.0);
    assert_eq!(settings.sampling_interval, Duration::from_secs(30 * 60));
    assert_eq!(settings.stream_address.port(), 0);
    assert_eq!(settings.seed, Some(42));
}

#[test]
fn test_environment_parses_case_insensitively() {
    assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
    assert_eq!("PRODUCTION".parse::<Environment>().unwrap(), Environment::Production);
    assert!("staging".parse::<Environment>().is_err());
}
