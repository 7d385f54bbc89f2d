use async_trait::async_trait;

use crate::*;

/// Produces a navigable path between two ports.
pub trait SeaRouter: Send + Sync {
    fn route(&self, origin: &Port, destination: &Port) -> CoreResult<RoutePlan>;
}

pub trait AisCodec: Send + Sync {
    fn encode(&self, report: &PositionReport) -> Result<String, EncodeError>;
    fn decode(&self, sentence: &str) -> Result<PositionReport, DecodeError>;
}

#[async_trait]
pub trait AisInboundPort: Send + Sync {
    /// Records with an already stored `(mmsi, timestamp)` are not inserted.
    async fn add_ais_record(&self, record: &NewAisRecord) -> CoreResult<InsertOutcome>;
}

#[async_trait]
pub trait VesselOutboundPort: Send + Sync {
    /// Whether any record, valid or not, exists for the vessel.
    async fn mmsi_exists(&self, mmsi: Mmsi) -> CoreResult<bool>;
    /// Valid positions ascending by timestamp.
    async fn vessel_track(&self, mmsi: Mmsi) -> CoreResult<Vec<TrackPoint>>;
    async fn vessel_stats(&self, mmsi: Mmsi, range: Option<&DateRange>)
    -> CoreResult<VesselStats>;
    async fn vessel_summaries(&self) -> CoreResult<Vec<VesselSummary>>;
}

impl AisCodec for Aivdm {
    fn encode(&self, report: &PositionReport) -> Result<String, EncodeError> {
        Aivdm::encode(self, report)
    }

    fn decode(&self, sentence: &str) -> Result<PositionReport, DecodeError> {
        Aivdm::decode(self, sentence)
    }
}
