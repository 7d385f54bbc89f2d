use ais_core::{AisCodec, AisInboundPort};
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{Level, event, instrument};

use crate::{
    Result,
    error::StreamClosedSnafu,
    ingest::{IngestOutcome, Ingestor},
    models::END_OF_STREAM,
};

const MAX_LINE_LENGTH: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    /// Lines received before the end-of-stream marker.
    pub received: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub invalid: usize,
    /// Lines that could not be stored.
    pub failed: usize,
    pub end_of_stream: bool,
}

pub struct Consumer<S, C> {
    ingestor: Ingestor<S, C>,
}

impl<S: AisInboundPort, C: AisCodec> Consumer<S, C> {
    pub fn new(ingestor: Ingestor<S, C>) -> Consumer<S, C> {
        Consumer { ingestor }
    }

    /// Ingests lines until the end-of-stream marker, a stream that ends without it is an error.
    #[instrument(skip_all)]
    pub async fn run(&self, source: impl AsyncRead + Unpin) -> Result<ConsumerReport> {
        let codec = LinesCodec::new_with_max_length(MAX_LINE_LENGTH);
        let mut framed_read = FramedRead::new(source, codec);

        let mut report = ConsumerReport::default();

        loop {
            let line = match framed_read.next().await {
                None => {
                    event!(
                        Level::ERROR,
                        received = report.received,
                        "stream closed before end-of-stream marker"
                    );
                    return StreamClosedSnafu {
                        received: report.received,
                    }
                    .fail();
                }
                // The framed reader ends after a decode error, so an over-long line ends the run.
                Some(Err(e)) => {
                    event!(
                        Level::ERROR,
                        received = report.received,
                        "failed to read from stream: {e:?}"
                    );
                    return Err(e.into());
                }
                Some(Ok(line)) => line,
            };

            if line == END_OF_STREAM {
                report.end_of_stream = true;
                break;
            }

            report.received += 1;
            match self.ingestor.ingest_line(&line).await {
                Ok(IngestOutcome::Valid) => report.inserted += 1,
                Ok(IngestOutcome::Invalid) => {
                    report.inserted += 1;
                    report.invalid += 1;
                }
                Ok(IngestOutcome::Duplicate) => report.duplicates += 1,
                Err(e) => {
                    event!(Level::ERROR, "failed to store ais message: {e:?}");
                    report.failed += 1;
                }
            }
        }

        event!(
            Level::INFO,
            received = report.received,
            inserted = report.inserted,
            invalid = report.invalid,
            duplicates = report.duplicates,
            failed = report.failed,
            "consumed stream"
        );

        Ok(report)
    }
}
