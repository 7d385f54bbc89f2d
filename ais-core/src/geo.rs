use geo::{Bearing, Haversine, InterpolatePoint, Point};
use geoutils::Location;

pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;
pub const METERS_PER_SECOND_PER_KNOT: f64 = 0.514444;

/// Great-circle distance in meters.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Location::new(lat1, lon1)
        .haversine_distance_to(&Location::new(lat2, lon2))
        .meters()
}

/// Great-circle distance in nautical miles.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_meters(lat1, lon1, lat2, lon2) / METERS_PER_NAUTICAL_MILE
}

/// Initial great-circle bearing from the first point towards the second, in degrees within
/// `[0, 360)`.
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine
        .bearing(Point::new(lon1, lat1), Point::new(lon2, lat2))
        .rem_euclid(360.0)
}

/// The point `ratio` of the way along the great circle from the first point to the second, as
/// `(latitude, longitude)`.
pub fn intermediate_point(lat1: f64, lon1: f64, lat2: f64, lon2: f64, ratio: f64) -> (f64, f64) {
    let point =
        Haversine.point_at_ratio_between(Point::new(lon1, lat1), Point::new(lon2, lat2), ratio);
    (point.y(), point.x())
}
