use std::time::{Duration, Instant};

use ais_core::{Aivdm, Mmsi, VesselOutboundPort};
use ais_simulator::{
    Error,
    consumer::Consumer,
    ingest::Ingestor,
    models::{AisFrame, END_OF_STREAM, parse_timestamp},
    producer::{PlaybackSpeed, Playlist, Producer},
    settings::{Environment, Settings},
    startup::App,
};
use futures::StreamExt;
use tokio::{io::AsyncWriteExt, net::TcpStream};
use tokio_util::codec::{FramedRead, LinesCodec};

use crate::helper::{test, vessel_messages};

async fn bind(playlist: Playlist, speed: PlaybackSpeed) -> Producer {
    Producer::bind(
        "127.0.0.1:0".parse().unwrap(),
        playlist,
        speed,
        Duration::from_secs(1),
    )
    .await
    .unwrap()
}

fn two_vessels() -> Playlist {
    Playlist::new(vec![
        vessel_messages(111111111, &[0, 10, 20]),
        vessel_messages(222222222, &[5, 15]),
    ])
}

async fn read_all(stream: TcpStream) -> Vec<String> {
    FramedRead::new(stream, LinesCodec::new())
        .map(|l| l.unwrap())
        .collect()
        .await
}

#[tokio::test]
async fn test_interleaved_vessels_arrive_in_time_order_then_end_marker() {
    let producer = bind(two_vessels(), PlaybackSpeed::Burst).await;
    let address = producer.local_addr();
    let handle = tokio::spawn(producer.run());

    let lines = read_all(TcpStream::connect(address).await.unwrap()).await;
    let sent = handle.await.unwrap().unwrap();

    assert_eq!(sent, 5);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines.last().unwrap(), END_OF_STREAM);
    assert_eq!(lines.iter().filter(|l| *l == END_OF_STREAM).count(), 1);

    let frames = lines[..5]
        .iter()
        .map(|l| serde_json::from_str::<AisFrame>(l).unwrap())
        .collect::<Vec<_>>();
    let mmsis = frames
        .iter()
        .map(|f| f.mmsi.clone().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        mmsis,
        vec!["111111111", "222222222", "111111111", "222222222", "111111111"]
    );
    let timestamps = frames
        .iter()
        .map(|f| parse_timestamp(f.timestamp.as_deref().unwrap()).unwrap())
        .collect::<Vec<_>>();
    for w in timestamps.windows(2) {
        assert!(w[0] < w[1]);
    }
    assert!(frames.iter().all(|f| f.message == "AIVDM"));
}

#[tokio::test]
async fn test_throttled_playback_spaces_messages() {
    let playlist = Playlist::new(vec![vessel_messages(111111111, &[0, 1, 2])]);
    // One second divided by a hundred.
    let producer = bind(playlist, PlaybackSpeed::Throttled(100.0)).await;
    let address = producer.local_addr();
    let handle = tokio::spawn(producer.run());

    let started = Instant::now();
    let lines = read_all(TcpStream::connect(address).await.unwrap()).await;
    let elapsed = started.elapsed();

    assert_eq!(handle.await.unwrap().unwrap(), 3);
    assert_eq!(lines.len(), 4);
    assert!(elapsed >= Duration::from_millis(20), "{elapsed:?}");
}

#[tokio::test]
async fn test_burst_playback_sends_without_delay() {
    let messages = (0..200).collect::<Vec<_>>();
    let playlist = Playlist::new(vec![vessel_messages(111111111, &messages)]);
    let producer = bind(playlist, PlaybackSpeed::Burst).await;
    let address = producer.local_addr();
    let handle = tokio::spawn(producer.run());

    let started = Instant::now();
    let lines = read_all(TcpStream::connect(address).await.unwrap()).await;

    assert_eq!(handle.await.unwrap().unwrap(), 200);
    assert_eq!(lines.len(), 201);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_consumer_ingests_until_end_marker() {
    test(|helper| async move {
        let producer = bind(two_vessels(), PlaybackSpeed::Burst).await;
        let address = producer.local_addr();
        let handle = tokio::spawn(producer.run());

        let consumer = Consumer::new(Ingestor::new(helper.db.db.clone(), Aivdm));
        let report = consumer
            .run(TcpStream::connect(address).await.unwrap())
            .await
            .unwrap();

        assert_eq!(handle.await.unwrap().unwrap(), 5);
        assert!(report.end_of_stream);
        assert_eq!(report.received, 5);
        assert_eq!(report.inserted, 5);
        assert_eq!(report.invalid, 0);
        assert_eq!(report.duplicates, 0);

        let records = helper.db.all_ais_records().await;
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.is_valid));

        let track = helper
            .db
            .db
            .vessel_track(Mmsi::test_new(111111111))
            .await
            .unwrap();
        assert_eq!(track.len(), 3);
    })
    .await;
}

#[tokio::test]
async fn test_disconnect_before_end_marker_is_an_incomplete_run() {
    test(|helper| async move {
        let (mut writer, reader) = tokio::io::duplex(4096);
        for message in two_vessels().messages().iter().take(2) {
            let line = serde_json::to_string(&AisFrame::from(message)).unwrap();
            writer.write_all(format!("{line}\n").as_bytes()).await.unwrap();
        }
        drop(writer);

        let consumer = Consumer::new(Ingestor::new(helper.db.db.clone(), Aivdm));
        let result = consumer.run(reader).await;

        let err = result.unwrap_err();
        assert!(err.is_incomplete_run());
        assert!(matches!(err, Error::StreamClosed { received: 2, .. }));
        assert_eq!(helper.db.all_ais_records().await.len(), 2);
    })
    .await;
}

#[tokio::test]
async fn test_over_long_line_ends_the_run() {
    test(|helper| async move {
        let (mut writer, reader) = tokio::io::duplex(8192);
        let message = two_vessels().messages()[0].clone();
        let line = serde_json::to_string(&AisFrame::from(&message)).unwrap();

        writer
            .write_all(format!("{line}\n{}\n{END_OF_STREAM}\n", "x".repeat(2000)).as_bytes())
            .await
            .unwrap();
        drop(writer);

        let consumer = Consumer::new(Ingestor::new(helper.db.db.clone(), Aivdm));
        let err = consumer.run(reader).await.unwrap_err();

        assert!(matches!(err, Error::Transport { .. }));
        assert!(err.is_incomplete_run());
        assert_eq!(helper.db.all_ais_records().await.len(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_app_runs_end_to_end() {
    let settings = Settings::for_environment(Environment::Test).unwrap();

    let app = App::build(&settings).await.unwrap();
    assert_ne!(app.stream_address().port(), 0);
    let report = app.run().await.unwrap();

    assert_eq!(report.vessels, settings.num_vessels);
    assert!(report.sent > 0);
    assert!(report.consumer.end_of_stream);
    assert_eq!(report.consumer.received, report.sent);
    assert_eq!(report.consumer.inserted, report.sent);
    assert_eq!(report.consumer.invalid, 0);
    assert_eq!(report.summaries.len(), settings.num_vessels);
    for summary in &report.summaries {
        assert!(summary.distance > 0.0);
        assert!((summary.avg_speed - settings.speed_knots).abs() < 0.1);
        assert!(!summary.track.is_empty());
    }
}

#[tokio::test]
async fn test_app_rejects_speed_factor_overflowing_the_delay() {
    let mut settings = Settings::for_environment(Environment::Test).unwrap();
    settings.speed_factor = 1e-300;

    let result = App::build(&settings).await;

    assert!(matches!(result, Err(Error::SpeedFactor { .. })));
}
