use ais_core::{
    CoreResult, MAX_LATITUDE, Port, RoutePlan, SeaRouter, Waypoint,
    core_error::RouteUnavailableSnafu, haversine_distance, intermediate_point,
};

use crate::{Result, error::InvalidLegLengthSnafu};

/// Routes along the great circle between two ports, splitting it into legs no longer than
/// `max_leg_nautical_miles`.
///
/// Land masses are not considered.
#[derive(Debug, Clone, Copy)]
pub struct GreatCircleRouter {
    max_leg_nautical_miles: f64,
}

impl GreatCircleRouter {
    pub fn new(max_leg_nautical_miles: f64) -> Result<GreatCircleRouter> {
        if max_leg_nautical_miles.is_finite() && max_leg_nautical_miles > 0.0 {
            Ok(GreatCircleRouter {
                max_leg_nautical_miles,
            })
        } else {
            InvalidLegLengthSnafu {
                value: max_leg_nautical_miles,
            }
            .fail()
        }
    }
}

impl SeaRouter for GreatCircleRouter {
    fn route(&self, origin: &Port, destination: &Port) -> CoreResult<RoutePlan> {
        let distance = haversine_distance(
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
        );

        if distance < 1e-9 {
            return Ok(RoutePlan {
                waypoints: vec![origin.waypoint(), destination.waypoint()],
            });
        }
        if is_antipodal(origin, destination) {
            return RouteUnavailableSnafu {
                origin: &origin.name,
                destination: &destination.name,
                reason: "ports are antipodal, the great circle is undefined",
            }
            .fail();
        }

        let legs = (distance / self.max_leg_nautical_miles).ceil().max(1.0) as usize;

        let mut waypoints = Vec::with_capacity(legs + 1);
        waypoints.push(origin.waypoint());
        for i in 1..legs {
            let (latitude, longitude) = intermediate_point(
                origin.latitude,
                origin.longitude,
                destination.latitude,
                destination.longitude,
                i as f64 / legs as f64,
            );
            waypoints.push(Waypoint {
                latitude,
                longitude,
            });
        }
        waypoints.push(destination.waypoint());

        Ok(RoutePlan { waypoints })
    }
}

fn is_antipodal(a: &Port, b: &Port) -> bool {
    let opposite_latitude = (a.latitude + b.latitude).abs() < 1e-9;
    let opposite_longitude = ((a.longitude - b.longitude).abs() - 180.0).abs() < 1e-9;
    opposite_latitude && (opposite_longitude || a.latitude.abs() == MAX_LATITUDE)
}
