use ais_core::{AisCodec, AisInboundPort, CoreResult, InsertOutcome, Mmsi, NewAisRecord};
use tracing::{Level, event};

use crate::models::{AisFrame, parse_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Valid,
    Invalid,
    Duplicate,
}

/// Decodes, validates and stores received frames. Invalid messages are stored too, with the
/// reason they were rejected.
pub struct Ingestor<S, C> {
    store: S,
    codec: C,
}

impl<S: AisInboundPort, C: AisCodec> Ingestor<S, C> {
    pub fn new(store: S, codec: C) -> Ingestor<S, C> {
        Ingestor { store, codec }
    }

    /// Lines that are not a JSON frame are stored as invalid with the raw line as payload.
    pub async fn ingest_line(&self, line: &str) -> CoreResult<IngestOutcome> {
        match serde_json::from_str::<AisFrame>(line) {
            Ok(frame) => self.ingest(&frame).await,
            Err(e) => {
                let record = NewAisRecord::undecodable(
                    None,
                    None,
                    line.to_string(),
                    format!("Malformed frame: {e}"),
                );
                self.persist(record).await
            }
        }
    }

    pub async fn ingest(&self, frame: &AisFrame) -> CoreResult<IngestOutcome> {
        let timestamp = match frame.timestamp.as_deref() {
            None => Err(String::new()),
            Some(raw) => parse_timestamp(raw).ok_or_else(|| raw.to_string()),
        };
        let frame_mmsi = frame.mmsi.as_deref().and_then(|m| m.parse::<Mmsi>().ok());

        let record = match self.codec.decode(&frame.payload) {
            Ok(report) => {
                let mut record = NewAisRecord::decoded(&report, timestamp, frame.payload.clone());
                record.mmsi = record.mmsi.or(frame_mmsi);
                record
            }
            Err(e) => NewAisRecord::undecodable(
                frame_mmsi,
                timestamp.ok(),
                frame.payload.clone(),
                e.to_string(),
            ),
        };

        self.persist(record).await
    }

    async fn persist(&self, record: NewAisRecord) -> CoreResult<IngestOutcome> {
        let outcome = match self.store.add_ais_record(&record).await? {
            InsertOutcome::Duplicate => IngestOutcome::Duplicate,
            InsertOutcome::Inserted if record.is_valid => IngestOutcome::Valid,
            InsertOutcome::Inserted => IngestOutcome::Invalid,
        };

        match outcome {
            IngestOutcome::Valid => {}
            IngestOutcome::Invalid => event!(
                Level::WARN,
                mmsi = ?record.mmsi,
                reason = %record.error_message,
                "stored invalid message"
            ),
            IngestOutcome::Duplicate => event!(
                Level::DEBUG,
                mmsi = ?record.mmsi,
                timestamp = ?record.timestamp,
                "skipped duplicate message"
            ),
        }

        Ok(outcome)
    }
}
