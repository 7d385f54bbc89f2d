use ais_core::{
    AisCodec, MessageKind, NavigationStatus, Position, PositionReport, VesselIdentity,
    VesselMessage, initial_bearing,
};
use tracing::warn;

/// Turns a vessel's positions into encoded position reports.
pub struct VesselMessageGenerator<C> {
    codec: C,
}

impl<C: AisCodec> VesselMessageGenerator<C> {
    pub fn new(codec: C) -> VesselMessageGenerator<C> {
        VesselMessageGenerator { codec }
    }

    /// Positions that fail to encode are skipped, the order of the rest is kept.
    pub fn generate(
        &self,
        identity: &VesselIdentity,
        positions: &[Position],
    ) -> Vec<VesselMessage> {
        let courses = courses(positions);

        positions
            .iter()
            .zip(courses)
            .filter_map(|(position, course)| {
                let report = PositionReport {
                    kind: MessageKind::PositionReport,
                    mmsi: identity.mmsi.into_inner(),
                    latitude: position.latitude,
                    longitude: position.longitude,
                    speed: identity.speed_knots,
                    course,
                    status: NavigationStatus::UnderWayUsingEngine,
                };

                match self.codec.encode(&report) {
                    Ok(payload) => Some(VesselMessage {
                        mmsi: identity.mmsi,
                        timestamp: position.timestamp,
                        payload,
                    }),
                    Err(e) => {
                        warn!(
                            mmsi = %identity.mmsi,
                            timestamp = %position.timestamp,
                            "failed to encode position report: {e:?}"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

/// Bearing from each position towards the next, the last position keeps the previous course.
fn courses(positions: &[Position]) -> Vec<f64> {
    let mut courses = positions
        .windows(2)
        .map(|w| initial_bearing(w[0].latitude, w[0].longitude, w[1].latitude, w[1].longitude))
        .collect::<Vec<_>>();

    if !positions.is_empty() {
        courses.push(courses.last().copied().unwrap_or(0.0));
    }

    courses
}
