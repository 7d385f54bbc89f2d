use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use ais_core::{Aivdm, VesselOutboundPort, VesselSummary};
use chrono::Utc;
use engine::{GreatCircleRouter, PortCatalog};
use rand::{SeedableRng, rngs::StdRng};
use snafu::ResultExt;
use sqlite::SqliteAdapter;
use tokio::{net::TcpStream, task::JoinHandle};
use tracing::{Level, event};

use crate::{
    Result,
    consumer::{Consumer, ConsumerReport},
    error::{ConnectSnafu, JoinSnafu, StorageSnafu},
    fleet::FleetPlanner,
    ingest::Ingestor,
    producer::{PlaybackSpeed, Playlist, Producer},
    settings::Settings,
};

pub struct App {
    adapter: SqliteAdapter,
    producer: Producer,
    vessels: usize,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub vessels: usize,
    pub sent: usize,
    pub consumer: ConsumerReport,
    pub summaries: Vec<VesselSummary>,
}

impl App {
    /// Prepares the store and every voyage, then binds the producer. Nothing is streamed
    /// before [`App::run`].
    pub async fn build(settings: &Settings) -> Result<App> {
        let speed = PlaybackSpeed::from_factor(settings.speed_factor)?;
        speed.delay(settings.sampling_interval)?;

        let adapter = SqliteAdapter::new(&settings.sqlite)
            .await
            .context(StorageSnafu)?;
        adapter.do_migrations().await.context(StorageSnafu)?;

        let catalog = PortCatalog::from_path(&settings.port_catalog)?;
        let router = GreatCircleRouter::new(settings.route_leg_nautical_miles)?;
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let fleet = FleetPlanner::new(
            catalog,
            router,
            Aivdm,
            settings.speed_knots,
            settings.sampling_interval,
        );
        let voyages = fleet
            .build(&adapter, settings.num_vessels, Utc::now(), &mut rng)
            .await?;

        let vessels = voyages.len();
        let playlist = Playlist::new(voyages.into_iter().map(|v| v.messages).collect());
        event!(
            Level::INFO,
            vessels,
            messages = playlist.len(),
            "prepared voyages"
        );

        let producer = Producer::bind(
            settings.stream_address,
            playlist,
            speed,
            settings.sampling_interval,
        )
        .await?;

        Ok(App {
            adapter,
            producer,
            vessels,
        })
    }

    pub fn adapter(&self) -> &SqliteAdapter {
        &self.adapter
    }

    pub fn stream_address(&self) -> SocketAddr {
        self.producer.local_addr()
    }

    /// Streams every voyage to a consumer connected over the bound address and reports what
    /// was sent and stored.
    pub async fn run(self) -> Result<RunReport> {
        let address = connect_address(self.producer.local_addr());

        let producer = tokio::spawn(self.producer.run());

        let stream = connect(address, &producer).await?;
        let consumer = Consumer::new(Ingestor::new(self.adapter.clone(), Aivdm));
        let consumer = tokio::spawn(async move { consumer.run(stream).await });

        let sent = producer.await.context(JoinSnafu)?;
        let report = consumer.await.context(JoinSnafu)?;
        let sent = sent?;
        let consumer = report?;

        let summaries = self.adapter.vessel_summaries().await?;
        self.adapter.close().await;

        Ok(RunReport {
            vessels: self.vessels,
            sent,
            consumer,
            summaries,
        })
    }
}

/// Aborts `producer` when the connection fails.
async fn connect<T>(address: SocketAddr, producer: &JoinHandle<T>) -> Result<TcpStream> {
    match TcpStream::connect(address).await {
        Ok(stream) => Ok(stream),
        Err(e) => {
            producer.abort();
            Err(e).context(ConnectSnafu { address })
        }
    }
}

fn connect_address(mut address: SocketAddr) -> SocketAddr {
    if address.ip().is_unspecified() {
        let loopback: IpAddr = match address.ip() {
            IpAddr::V4(_) => Ipv4Addr::LOCALHOST.into(),
            IpAddr::V6(_) => Ipv6Addr::LOCALHOST.into(),
        };
        address.set_ip(loopback);
    }
    address
}
