use std::{net::SocketAddr, time::Duration};

use ais_core::VesselMessage;
use futures::SinkExt;
use snafu::ResultExt;
use tokio::net::TcpListener;
use tokio_util::codec::{FramedWrite, LinesCodec};
use tracing::{Level, event, instrument};

use crate::{
    Result,
    error::{AcceptSnafu, BindSnafu, SerializeSnafu, SpeedFactorSnafu},
    models::{AisFrame, END_OF_STREAM},
};

/// How fast the recorded timeline is replayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackSpeed {
    /// Every message is sent as soon as the previous one is written.
    Burst,
    /// Messages are spaced by the sampling interval divided by the factor.
    Throttled(f64),
}

impl PlaybackSpeed {
    pub fn from_factor(factor: f64) -> Result<PlaybackSpeed> {
        if factor == -1.0 {
            Ok(PlaybackSpeed::Burst)
        } else if factor.is_finite() && factor > 0.0 {
            Ok(PlaybackSpeed::Throttled(factor))
        } else {
            SpeedFactorSnafu { factor }.fail()
        }
    }

    /// Fails when the scaled interval does not fit in a [`Duration`].
    pub fn delay(&self, base: Duration) -> Result<Duration> {
        match *self {
            PlaybackSpeed::Burst => Ok(Duration::ZERO),
            PlaybackSpeed::Throttled(factor) => {
                Duration::try_from_secs_f64(base.as_secs_f64() / factor)
                    .map_err(|_| SpeedFactorSnafu { factor }.build())
            }
        }
    }
}

/// All vessels' messages merged into a single timeline.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    messages: Vec<VesselMessage>,
}

impl Playlist {
    /// Messages sharing a timestamp keep the order of their vessels.
    pub fn new(per_vessel: Vec<Vec<VesselMessage>>) -> Playlist {
        let mut messages = per_vessel.into_iter().flatten().collect::<Vec<_>>();
        messages.sort_by_key(|m| m.timestamp);
        Playlist { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[VesselMessage] {
        &self.messages
    }
}

pub struct Producer {
    listener: TcpListener,
    local_addr: SocketAddr,
    playlist: Playlist,
    delay: Duration,
}

impl Producer {
    pub async fn bind(
        address: SocketAddr,
        playlist: Playlist,
        speed: PlaybackSpeed,
        interval: Duration,
    ) -> Result<Producer> {
        let delay = speed.delay(interval)?;
        let listener = TcpListener::bind(address)
            .await
            .context(BindSnafu { address })?;
        let local_addr = listener.local_addr().context(BindSnafu { address })?;

        Ok(Producer {
            listener,
            local_addr,
            playlist,
            delay,
        })
    }

    /// The bound address, with the OS-assigned port when binding to port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves the playlist to the first consumer that connects and returns the number of
    /// messages sent, the end-of-stream marker excluded.
    #[instrument(skip(self), fields(app.messages = self.playlist.len()))]
    pub async fn run(self) -> Result<usize> {
        let (stream, peer) = self.listener.accept().await.context(AcceptSnafu)?;
        event!(Level::INFO, %peer, "consumer connected");

        let mut sink = FramedWrite::new(stream, LinesCodec::new());
        let delay = self.delay;

        let mut sent = 0;
        for message in self.playlist.messages {
            if sent > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let line = serde_json::to_string(&AisFrame::from(&message)).context(SerializeSnafu)?;
            sink.send(line).await?;
            sent += 1;
        }

        sink.send(END_OF_STREAM.to_string()).await?;
        SinkExt::<String>::close(&mut sink).await?;

        event!(Level::INFO, sent, "stream complete");
        Ok(sent)
    }
}
