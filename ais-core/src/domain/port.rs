use serde::Deserialize;

use crate::Waypoint;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Port {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Unordered pair of port names, `(a, b)` and `(b, a)` are the same pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortPair(String, String);

impl Port {
    pub fn waypoint(&self) -> Waypoint {
        Waypoint {
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }
}

impl PortPair {
    pub fn new(a: &Port, b: &Port) -> PortPair {
        if a.name <= b.name {
            PortPair(a.name.clone(), b.name.clone())
        } else {
            PortPair(b.name.clone(), a.name.clone())
        }
    }
}
