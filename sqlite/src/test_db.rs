use ais_core::{AisRecord, Mmsi, NavigationStatus};
use num_traits::FromPrimitive;
use snafu::ResultExt;

use crate::{
    Error, Result, SqliteAdapter, SqliteSettings,
    error::{MmsiSnafu, NavigationStatusSnafu},
    models::decode_timestamp,
};

/// Wrapper with additional methods inteded for testing purposes.
#[derive(Debug, Clone)]
pub struct TestDb {
    pub db: SqliteAdapter,
}

#[derive(Debug, sqlx::FromRow)]
struct AisRecordRow {
    id: i64,
    mmsi: Option<String>,
    timestamp: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    speed: Option<f64>,
    course: Option<f64>,
    status: Option<i64>,
    payload: String,
    is_valid: bool,
    error_message: String,
}

impl TestDb {
    /// Fresh migrated in-memory database.
    pub async fn new() -> TestDb {
        let db = SqliteAdapter::new(&SqliteSettings::in_memory())
            .await
            .unwrap();
        db.do_migrations().await.unwrap();
        TestDb { db }
    }

    pub async fn all_ais_records(&self) -> Vec<AisRecord> {
        sqlx::query_as::<_, AisRecordRow>(
            r#"
SELECT
    id,
    mmsi,
    timestamp,
    latitude,
    longitude,
    speed,
    course,
    status,
    payload,
    is_valid,
    error_message
FROM
    ais_messages
ORDER BY
    id ASC
            "#,
        )
        .fetch_all(&self.db.pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| AisRecord::try_from(r).unwrap())
        .collect()
    }

    pub async fn ais_records_of_vessel(&self, mmsi: Mmsi) -> Vec<AisRecord> {
        self.all_ais_records()
            .await
            .into_iter()
            .filter(|r| r.mmsi == Some(mmsi))
            .collect()
    }
}

impl TryFrom<AisRecordRow> for AisRecord {
    type Error = Error;

    fn try_from(value: AisRecordRow) -> Result<Self> {
        Ok(AisRecord {
            id: value.id,
            mmsi: value
                .mmsi
                .map(|m| m.parse::<Mmsi>())
                .transpose()
                .context(MmsiSnafu)?,
            timestamp: value
                .timestamp
                .as_deref()
                .map(decode_timestamp)
                .transpose()?,
            latitude: value.latitude,
            longitude: value.longitude,
            speed: value.speed,
            course: value.course,
            status: value
                .status
                .map(|s| {
                    NavigationStatus::from_i64(s)
                        .ok_or_else(|| NavigationStatusSnafu { value: s }.build())
                })
                .transpose()?,
            payload: value.payload,
            is_valid: value.is_valid,
            error_message: value.error_message,
        })
    }
}
