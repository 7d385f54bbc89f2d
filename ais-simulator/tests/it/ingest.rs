use ais_core::{Mmsi, VesselOutboundPort};
use ais_simulator::{ingest::IngestOutcome, models::AisFrame};

use crate::helper::{frame, report, start, test};

#[tokio::test]
async fn test_valid_report_is_stored_as_valid() {
    test(|helper| async move {
        let frame = frame(
            &report(123456789, 51.9225, 4.4792, 10.0),
            "2025-01-01T00:00:00",
        );

        let outcome = helper.ingestor.ingest(&frame).await.unwrap();

        assert_eq!(outcome, IngestOutcome::Valid);
        let records = helper.db.all_ais_records().await;
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(record.is_valid);
        assert_eq!(record.error_message, "");
        assert_eq!(record.mmsi, Some(Mmsi::test_new(123456789)));
        assert_eq!(record.timestamp, Some(start()));
        assert!((record.latitude.unwrap() - 51.9225).abs() < 1e-4);
        assert!((record.longitude.unwrap() - 4.4792).abs() < 1e-4);
        assert_eq!(record.speed, Some(10.0));
        assert_eq!(record.payload, frame.payload);
    })
    .await;
}

#[tokio::test]
async fn test_out_of_range_latitude_is_stored_as_invalid() {
    test(|helper| async move {
        let frame = frame(&report(123456789, 91.0, 4.4792, 10.0), "2025-01-01T00:00:00");

        let outcome = helper.ingestor.ingest(&frame).await.unwrap();

        assert_eq!(outcome, IngestOutcome::Invalid);
        let records = helper.db.all_ais_records().await;
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_valid);
        assert_eq!(records[0].error_message, "Invalid latitude");
    })
    .await;
}

#[tokio::test]
async fn test_invalid_records_are_left_out_of_the_track() {
    test(|helper| async move {
        let valid = frame(&report(123456789, 51.0, 4.0, 10.0), "2025-01-01T00:00:00");
        let invalid = frame(&report(123456789, 51.0, 4.0, 102.3), "2025-01-01T00:05:00");

        helper.ingestor.ingest(&valid).await.unwrap();
        helper.ingestor.ingest(&invalid).await.unwrap();

        let track = helper
            .db
            .db
            .vessel_track(Mmsi::test_new(123456789))
            .await
            .unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(helper.db.all_ais_records().await.len(), 2);
    })
    .await;
}

#[tokio::test]
async fn test_undecodable_payload_is_stored_with_reason() {
    test(|helper| async move {
        let frame = AisFrame {
            message: "AIVDM".into(),
            mmsi: Some("123456789".into()),
            timestamp: Some("2025-01-01T00:00:00".into()),
            payload: "invalid_payload".into(),
        };

        let outcome = helper.ingestor.ingest(&frame).await.unwrap();

        assert_eq!(outcome, IngestOutcome::Invalid);
        let records = helper.db.all_ais_records().await;
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(!record.is_valid);
        assert!(!record.error_message.is_empty());
        assert_eq!(record.mmsi, Some(Mmsi::test_new(123456789)));
        assert_eq!(record.timestamp, Some(start()));
        assert_eq!(record.latitude, None);
        assert_eq!(record.payload, "invalid_payload");
    })
    .await;
}

#[tokio::test]
async fn test_malformed_frame_is_stored_raw() {
    test(|helper| async move {
        let outcome = helper.ingestor.ingest_line("{not json").await.unwrap();

        assert_eq!(outcome, IngestOutcome::Invalid);
        let records = helper.db.all_ais_records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payload, "{not json");
        assert_eq!(records[0].mmsi, None);
        assert_eq!(records[0].timestamp, None);
        assert!(records[0].error_message.starts_with("Malformed frame"));
    })
    .await;
}

#[tokio::test]
async fn test_unparsable_timestamp_is_a_violation() {
    test(|helper| async move {
        let frame = frame(&report(123456789, 51.0, 4.0, 10.0), "yesterday");

        let outcome = helper.ingestor.ingest(&frame).await.unwrap();

        assert_eq!(outcome, IngestOutcome::Invalid);
        let records = helper.db.all_ais_records().await;
        assert_eq!(records[0].error_message, "Invalid timestamp");
        assert_eq!(records[0].timestamp, None);
    })
    .await;
}

#[tokio::test]
async fn test_violations_are_joined() {
    test(|helper| async move {
        let frame = frame(&report(123456789, 91.0, 181.0, 102.3), "2025-01-01T00:00:00");

        helper.ingestor.ingest(&frame).await.unwrap();

        let records = helper.db.all_ais_records().await;
        assert_eq!(
            records[0].error_message,
            "Invalid latitude; Invalid longitude; Invalid speed"
        );
    })
    .await;
}

#[tokio::test]
async fn test_repeated_frame_is_a_duplicate() {
    test(|helper| async move {
        let frame = frame(&report(123456789, 51.0, 4.0, 10.0), "2025-01-01T00:00:00");

        let first = helper.ingestor.ingest(&frame).await.unwrap();
        let second = helper.ingestor.ingest(&frame).await.unwrap();

        assert_eq!(first, IngestOutcome::Valid);
        assert_eq!(second, IngestOutcome::Duplicate);
        assert_eq!(helper.db.all_ais_records().await.len(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_naive_and_rfc3339_timestamps_are_the_same_instant() {
    test(|helper| async move {
        let report = report(123456789, 51.0, 4.0, 10.0);

        helper
            .ingestor
            .ingest(&frame(&report, "2025-01-01T00:00:00"))
            .await
            .unwrap();
        let outcome = helper
            .ingestor
            .ingest(&frame(&report, "2025-01-01T00:00:00.000000Z"))
            .await
            .unwrap();

        assert_eq!(outcome, IngestOutcome::Duplicate);
    })
    .await;
}
