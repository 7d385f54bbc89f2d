use crate::Mmsi;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselIdentity {
    pub mmsi: Mmsi,
    pub speed_knots: f64,
}
