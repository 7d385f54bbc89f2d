use ais_simulator::{settings::Settings, startup::App};
use tracing::{Level, event, span};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[tokio::main]
async fn main() {
    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to load settings: {e}");
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(Level::from(&settings.log_level)).into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let span = span!(Level::TRACE, "ais_simulator", environment = %settings.environment);
    let _enter = span.enter();

    event!(Level::INFO, "starting ais_simulator...");

    let report = match App::build(&settings).await {
        Ok(app) => {
            event!(Level::INFO, address = %app.stream_address(), "streaming");
            app.run().await
        }
        Err(e) => Err(e),
    };

    match report {
        Ok(report) => {
            for s in &report.summaries {
                event!(
                    Level::INFO,
                    mmsi = %s.mmsi,
                    distance_nm = s.distance,
                    avg_speed_knots = s.avg_speed,
                    points = s.track.len(),
                    "vessel summary"
                );
            }
            event!(
                Level::INFO,
                vessels = report.vessels,
                sent = report.sent,
                received = report.consumer.received,
                inserted = report.consumer.inserted,
                invalid = report.consumer.invalid,
                duplicates = report.consumer.duplicates,
                failed = report.consumer.failed,
                "simulation complete"
            );
        }
        Err(e) if e.is_incomplete_run() => {
            event!(Level::ERROR, "incomplete run: {e:?}");
            std::process::exit(1);
        }
        Err(e) => {
            event!(Level::ERROR, "simulation failed: {e:?}");
            std::process::exit(1);
        }
    }
}
