use std::time::Duration;

use ais_core::{
    CoreResult, METERS_PER_SECOND_PER_KNOT, Port, Position, RoutePlan, SeaRouter,
    core_error::RouteUnavailableSnafu, haversine_meters,
};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::{Result, error::InvalidParametersSnafu};

pub struct RoutePlanner<R> {
    router: R,
}

impl<R: SeaRouter> RoutePlanner<R> {
    pub fn new(router: R) -> RoutePlanner<R> {
        RoutePlanner { router }
    }

    /// Not retried, a plan with fewer than two waypoints is treated as no route.
    pub fn plan_route(&self, origin: &Port, destination: &Port) -> CoreResult<RoutePlan> {
        let plan = self.router.route(origin, destination)?;
        if plan.waypoints.len() < 2 {
            return RouteUnavailableSnafu {
                origin: &origin.name,
                destination: &destination.name,
                reason: format!("router produced {} waypoint(s)", plan.waypoints.len()),
            }
            .fail();
        }

        debug!(
            origin = %origin.name,
            destination = %destination.name,
            waypoints = plan.waypoints.len(),
            "planned route"
        );
        Ok(plan)
    }
}

/// Samples positions along `plan` every `interval` for a vessel holding `speed_knots`.
///
/// The first position is at `start` on the first waypoint, the last at or before the arrival
/// time. Latitude and longitude are interpolated linearly within each segment, longitude along
/// the shorter way around the antimeridian.
pub fn interpolate(
    plan: &RoutePlan,
    speed_knots: f64,
    interval: Duration,
    start: DateTime<Utc>,
) -> Result<Vec<Position>> {
    if !(speed_knots.is_finite() && speed_knots > 0.0) || interval.is_zero() {
        return InvalidParametersSnafu {
            speed_knots,
            interval,
        }
        .fail();
    }

    let Some(first) = plan.waypoints.first() else {
        return Ok(vec![]);
    };
    if plan.waypoints.len() == 1 {
        return Ok(vec![Position {
            latitude: first.latitude,
            longitude: first.longitude,
            timestamp: start,
        }]);
    }

    let speed_mps = speed_knots * METERS_PER_SECOND_PER_KNOT;
    let segment_seconds = plan
        .waypoints
        .windows(2)
        .map(|w| {
            haversine_meters(w[0].latitude, w[0].longitude, w[1].latitude, w[1].longitude)
                / speed_mps
        })
        .collect::<Vec<_>>();
    let total_seconds = segment_seconds.iter().sum::<f64>();
    let interval_seconds = interval.as_secs_f64();

    let mut positions = Vec::new();
    let mut segment = 0;
    let mut segment_start = 0.0;
    let mut step: u32 = 0;

    loop {
        let elapsed = interval_seconds * step as f64;
        if elapsed > total_seconds {
            break;
        }

        while segment < segment_seconds.len() - 1
            && segment_start + segment_seconds[segment] < elapsed
        {
            segment_start += segment_seconds[segment];
            segment += 1;
        }

        let duration = segment_seconds[segment];
        let fraction = if duration > 0.0 {
            ((elapsed - segment_start) / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let from = &plan.waypoints[segment];
        let to = &plan.waypoints[segment + 1];
        let delta_longitude = (to.longitude - from.longitude + 180.0).rem_euclid(360.0) - 180.0;
        let longitude = from.longitude + fraction * delta_longitude;

        let offset = interval
            .checked_mul(step)
            .and_then(|d| TimeDelta::from_std(d).ok())
            .ok_or_else(|| {
                InvalidParametersSnafu {
                    speed_knots,
                    interval,
                }
                .build()
            })?;

        positions.push(Position {
            latitude: from.latitude + fraction * (to.latitude - from.latitude),
            longitude: wrap_longitude(longitude),
            timestamp: start + offset,
        });

        step += 1;
    }

    Ok(positions)
}

fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}
