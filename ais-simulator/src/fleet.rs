use std::{collections::HashSet, time::Duration};

use ais_core::{
    AisCodec, CoreResult, Mmsi, Port, SeaRouter, VesselIdentity, VesselMessage,
    VesselOutboundPort,
};
use chrono::{DateTime, Utc};
use engine::{PortCatalog, RoutePlanner, VesselMessageGenerator, interpolate};
use rand::{Rng, rngs::StdRng};
use tracing::{Level, event, instrument};

use crate::{Result, error::NoVoyagesSnafu};

/// Draws nine-digit MMSIs until one is neither in the store nor already handed out in `taken`.
pub async fn generate_unique_mmsi<S: VesselOutboundPort>(
    store: &S,
    taken: &mut HashSet<Mmsi>,
    rng: &mut impl Rng,
) -> CoreResult<Mmsi> {
    loop {
        let mmsi = Mmsi::random(rng);
        if taken.contains(&mmsi) || store.mmsi_exists(mmsi).await? {
            continue;
        }
        taken.insert(mmsi);
        return Ok(mmsi);
    }
}

#[derive(Debug, Clone)]
pub struct Voyage {
    pub identity: VesselIdentity,
    pub origin: Port,
    pub destination: Port,
    pub messages: Vec<VesselMessage>,
}

pub struct FleetPlanner<R, C> {
    catalog: PortCatalog,
    planner: RoutePlanner<R>,
    generator: VesselMessageGenerator<C>,
    speed_knots: f64,
    interval: Duration,
}

impl<R: SeaRouter, C: AisCodec> FleetPlanner<R, C> {
    pub fn new(
        catalog: PortCatalog,
        router: R,
        codec: C,
        speed_knots: f64,
        interval: Duration,
    ) -> FleetPlanner<R, C> {
        FleetPlanner {
            catalog,
            planner: RoutePlanner::new(router),
            generator: VesselMessageGenerator::new(codec),
            speed_knots,
            interval,
        }
    }

    /// Plans one voyage per vessel, each on its own port pair, all departing at `start`.
    ///
    /// Vessels whose route cannot be planned are skipped, it is an error only when none is left.
    #[instrument(skip(self, store, rng))]
    pub async fn build<S: VesselOutboundPort>(
        &self,
        store: &S,
        num_vessels: usize,
        start: DateTime<Utc>,
        rng: &mut StdRng,
    ) -> Result<Vec<Voyage>> {
        let mut used_pairs = HashSet::new();
        let mut taken = HashSet::new();
        let mut voyages = Vec::with_capacity(num_vessels);

        for _ in 0..num_vessels {
            let (origin, destination) = self.catalog.select_port_pair(&mut used_pairs, rng)?;

            let plan = match self.planner.plan_route(&origin, &destination) {
                Ok(plan) => plan,
                Err(e) if e.is_route_unavailable() => {
                    event!(Level::WARN, "skipping vessel: {e}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let identity = VesselIdentity {
                mmsi: generate_unique_mmsi(store, &mut taken, rng).await?,
                speed_knots: self.speed_knots,
            };
            let positions = interpolate(&plan, self.speed_knots, self.interval, start)?;
            let messages = self.generator.generate(&identity, &positions);

            event!(
                Level::INFO,
                mmsi = %identity.mmsi,
                origin = %origin.name,
                destination = %destination.name,
                messages = messages.len(),
                "planned voyage"
            );

            voyages.push(Voyage {
                identity,
                origin,
                destination,
                messages,
            });
        }

        if voyages.is_empty() {
            return NoVoyagesSnafu {
                requested: num_vessels,
            }
            .fail();
        }

        Ok(voyages)
    }
}
