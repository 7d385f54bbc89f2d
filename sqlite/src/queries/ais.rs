use ais_core::{
    AisInboundPort, CoreResult, DateRange, InsertOutcome, Mmsi, NewAisRecord, TrackPoint,
    VesselOutboundPort, VesselStats, VesselSummary, core_error::UnknownVesselSnafu,
};
use async_trait::async_trait;
use snafu::ResultExt;
use tracing::{debug, instrument};

use crate::{
    Result, SqliteAdapter,
    error::MmsiSnafu,
    models::{TrackPointRow, encode_timestamp},
};

impl SqliteAdapter {
    #[instrument(skip_all, fields(mmsi = ?record.mmsi, timestamp = ?record.timestamp))]
    pub(crate) async fn add_ais_record_impl(&self, record: &NewAisRecord) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
INSERT INTO
    ais_messages (
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
    )
VALUES
    (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
ON CONFLICT (mmsi, timestamp) DO NOTHING
            "#,
        )
        .bind(record.mmsi.map(|m| m.to_string()))
        .bind(record.timestamp.as_ref().map(encode_timestamp))
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(record.speed)
        .bind(record.course)
        .bind(record.status.map(|s| s as i64))
        .bind(&record.payload)
        .bind(record.is_valid)
        .bind(&record.error_message)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!("ignored duplicate record");
            Ok(InsertOutcome::Duplicate)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    pub(crate) async fn mmsi_exists_impl(&self, mmsi: Mmsi) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, i64>(
            r#"
SELECT
    EXISTS (
        SELECT
            1
        FROM
            ais_messages
        WHERE
            mmsi = ?1
    )
            "#,
        )
        .bind(mmsi.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists != 0)
    }

    pub(crate) async fn track_impl(
        &self,
        mmsi: Mmsi,
        range: Option<&DateRange>,
    ) -> Result<Vec<TrackPoint>> {
        let rows = sqlx::query_as::<_, TrackPointRow>(
            r#"
SELECT
    timestamp,
    latitude,
    longitude,
    speed
FROM
    ais_messages
WHERE
    mmsi = ?1
    AND is_valid = 1
    AND timestamp IS NOT NULL
    AND latitude IS NOT NULL
    AND longitude IS NOT NULL
    AND speed IS NOT NULL
    AND (
        ?2 IS NULL
        OR timestamp >= ?2
    )
    AND (
        ?3 IS NULL
        OR timestamp <= ?3
    )
ORDER BY
    timestamp ASC
            "#,
        )
        .bind(mmsi.to_string())
        .bind(range.map(|r| encode_timestamp(r.start())))
        .bind(range.map(|r| encode_timestamp(r.end())))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TrackPoint::try_from).collect()
    }

    pub(crate) async fn distinct_mmsis_impl(&self) -> Result<Vec<String>> {
        Ok(sqlx::query_scalar::<_, String>(
            r#"
SELECT DISTINCT
    mmsi
FROM
    ais_messages
WHERE
    mmsi IS NOT NULL
ORDER BY
    mmsi ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl AisInboundPort for SqliteAdapter {
    async fn add_ais_record(&self, record: &NewAisRecord) -> CoreResult<InsertOutcome> {
        Ok(self.add_ais_record_impl(record).await?)
    }
}

#[async_trait]
impl VesselOutboundPort for SqliteAdapter {
    async fn mmsi_exists(&self, mmsi: Mmsi) -> CoreResult<bool> {
        Ok(self.mmsi_exists_impl(mmsi).await?)
    }

    async fn vessel_track(&self, mmsi: Mmsi) -> CoreResult<Vec<TrackPoint>> {
        Ok(self.track_impl(mmsi, None).await?)
    }

    async fn vessel_stats(
        &self,
        mmsi: Mmsi,
        range: Option<&DateRange>,
    ) -> CoreResult<VesselStats> {
        if !self.mmsi_exists_impl(mmsi).await? {
            return UnknownVesselSnafu { mmsi }.fail();
        }
        let track = self.track_impl(mmsi, range).await?;
        Ok(VesselStats::from_track(&track))
    }

    async fn vessel_summaries(&self) -> CoreResult<Vec<VesselSummary>> {
        let mut summaries = Vec::new();
        for mmsi in self.distinct_mmsis_impl().await? {
            let mmsi = mmsi.parse::<Mmsi>().context(MmsiSnafu)?;
            let track = self.track_impl(mmsi, None).await?;
            summaries.push(VesselSummary::new(mmsi, track));
        }
        Ok(summaries)
    }
}
