use std::{
    collections::{HashMap, HashSet},
    io::Read,
    path::Path,
};

use ais_core::{MAX_LATITUDE, MAX_LONGITUDE, Port, PortPair};
use rand::Rng;
use serde::Deserialize;
use snafu::ResultExt;
use tracing::{debug, instrument};

use crate::{
    Result,
    error::{
        InsufficientCatalogSnafu, InvalidPortSnafu, PortPairsExhaustedSnafu, ReadCatalogSnafu,
    },
};

/// Ports loaded once from a CSV catalog with `MAIN_PORT_NAME`, `LATITUDE` and `LONGITUDE`
/// columns, any other column is ignored.
#[derive(Debug, Clone)]
pub struct PortCatalog {
    ports: Vec<Port>,
    pair_count: usize,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "MAIN_PORT_NAME")]
    name: String,
    #[serde(rename = "LATITUDE")]
    latitude: f64,
    #[serde(rename = "LONGITUDE")]
    longitude: f64,
}

impl PortCatalog {
    #[instrument]
    pub fn from_path(path: &Path) -> Result<PortCatalog> {
        let bytes = std::fs::read(path).context(ReadCatalogSnafu { path })?;
        let catalog = PortCatalog::from_bytes(bytes)?;
        debug!(ports = catalog.len(), "loaded port catalog");
        Ok(catalog)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<PortCatalog> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context(ReadCatalogSnafu { path: "<reader>" })?;
        PortCatalog::from_bytes(bytes)
    }

    pub fn from_ports(ports: Vec<Port>) -> Result<PortCatalog> {
        for p in &ports {
            if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&p.latitude)
                || !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&p.longitude)
            {
                return InvalidPortSnafu {
                    name: &p.name,
                    latitude: p.latitude,
                    longitude: p.longitude,
                }
                .fail();
            }
        }

        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for p in &ports {
            *name_counts.entry(p.name.as_str()).or_default() += 1;
        }
        let distinct = name_counts.len();
        // Two ports sharing a name form the pair (name, name).
        let shared = name_counts.values().filter(|c| **c > 1).count();
        let pair_count = distinct * distinct.saturating_sub(1) / 2 + shared;

        Ok(PortCatalog { ports, pair_count })
    }

    fn from_bytes(bytes: Vec<u8>) -> Result<PortCatalog> {
        // Catalogs are commonly ISO-8859-1, every byte maps to the code point of the same value.
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let ports = reader
            .deserialize::<CatalogRow>()
            .map(|row| {
                row.map(|r| Port {
                    name: r.name,
                    latitude: r.latitude,
                    longitude: r.longitude,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        PortCatalog::from_ports(ports)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Number of distinct unordered name pairs the catalog can produce.
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Draws two distinct ports uniformly at random until their pair is absent from `used`,
    /// then records the pair in `used`.
    ///
    /// `used` is expected to only hold pairs drawn from this catalog.
    pub fn select_port_pair(
        &self,
        used: &mut HashSet<PortPair>,
        rng: &mut impl Rng,
    ) -> Result<(Port, Port)> {
        if self.ports.len() < 2 {
            return InsufficientCatalogSnafu {
                size: self.ports.len(),
            }
            .fail();
        }

        if used.len() >= self.pair_count {
            return PortPairsExhaustedSnafu {
                pairs: self.pair_count,
            }
            .fail();
        }

        loop {
            let indices = rand::seq::index::sample(rng, self.ports.len(), 2);
            let origin = &self.ports[indices.index(0)];
            let destination = &self.ports[indices.index(1)];

            if used.insert(PortPair::new(origin, destination)) {
                return Ok((origin.clone(), destination.clone()));
            }
        }
    }
}
