use std::{panic, sync::LazyLock};

use ais_core::{Aivdm, MessageKind, Mmsi, NavigationStatus, PositionReport, VesselMessage};
use ais_simulator::{ingest::Ingestor, models::AisFrame};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use futures::Future;
use sqlite::{SqliteAdapter, TestDb};
use tracing_subscriber::FmtSubscriber;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    let _ = tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    );
});

pub struct TestHelper {
    pub db: TestDb,
    pub ingestor: Ingestor<SqliteAdapter, Aivdm>,
}

pub async fn test<T, Fut>(test: T)
where
    T: FnOnce(TestHelper) -> Fut + panic::UnwindSafe + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    LazyLock::force(&TRACING);

    let db = TestDb::new().await;
    let helper = TestHelper {
        db: db.clone(),
        ingestor: Ingestor::new(db.db.clone(), Aivdm),
    };

    test(helper).await;

    db.db.close().await;
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn report(mmsi: u32, latitude: f64, longitude: f64, speed: f64) -> PositionReport {
    PositionReport {
        kind: MessageKind::PositionReport,
        mmsi,
        latitude,
        longitude,
        speed,
        course: 45.0,
        status: NavigationStatus::UnderWayUsingEngine,
    }
}

pub fn frame(report: &PositionReport, timestamp: &str) -> AisFrame {
    AisFrame {
        message: "AIVDM".into(),
        mmsi: Some(report.mmsi.to_string()),
        timestamp: Some(timestamp.into()),
        payload: Aivdm.encode(report).unwrap(),
    }
}

/// One encoded message per offset, in minutes from [`start`].
pub fn vessel_messages(mmsi: u32, minutes: &[i64]) -> Vec<VesselMessage> {
    minutes
        .iter()
        .map(|m| VesselMessage {
            mmsi: Mmsi::test_new(mmsi),
            timestamp: start() + TimeDelta::minutes(*m),
            payload: Aivdm
                .encode(&report(mmsi, 51.0 + *m as f64 / 100.0, 4.0, 10.0))
                .unwrap(),
        })
        .collect()
}
