//! # Player Controller Demo
//!
//! Drives the playback controller against the headless desktop engine:
//! start a playlist, skip around, pause, and watch snapshots and events.
//!
//! Run with: `cargo run --example player_demo --package core-playback`

use bridge_desktop::HeadlessPlaybackBackend;
use bridge_traits::logging::LogLevel;
use core_playback::{PlaybackController, Track};
use core_runtime::config::PlayerConfig;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::sync::Arc;
use std::time::Duration;

fn catalogue() -> Vec<Track> {
    vec![
        Track::new("ocean", "Ocean Breath")
            .with_subtitle("Guided relaxation")
            .with_url("https://cdn.example.com/aura/ocean.mp3")
            .with_image("https://cdn.example.com/aura/ocean.jpg"),
        Track::new("theta", "Theta Drift")
            .with_url("https://cdn.example.com/aura/theta.mp3")
            .with_vinillo("https://cdn.example.com/aura/theta-vinyl.png"),
        Track::new("sleep", "Deep Sleep Session")
            .with_url("https://cdn.example.com/hypnosis/sleep.mp3")
            .hypnosis(true),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Debug),
    )?;

    let engine = Arc::new(HeadlessPlaybackBackend::new());
    let config = PlayerConfig::builder()
        .transition_delay(Duration::from_millis(50))
        .build()?;
    let controller = PlaybackController::new(engine.clone(), config);

    let mut events = controller.events().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {} ({:?})", event.description(), event);
        }
    });

    controller.setup().await;

    let tracks = catalogue();
    println!("=== Start playlist ===");
    controller
        .play_track(tracks[0].clone(), Some(tracks.clone()), true)
        .await;
    print_state(&controller, &engine).await;

    println!("=== Next ===");
    controller.next().await;
    print_state(&controller, &engine).await;

    println!("=== Pause, then next loads silently ===");
    controller.pause().await;
    controller.next().await;
    print_state(&controller, &engine).await;

    println!("=== Resume ===");
    controller.play().await;
    print_state(&controller, &engine).await;

    println!("=== Rapid double next ===");
    let (a, b) = (controller.clone(), controller.clone());
    tokio::join!(a.next(), b.next());
    print_state(&controller, &engine).await;

    println!("=== Shuffle ===");
    controller.shuffle().await;
    print_state(&controller, &engine).await;

    controller.set_ui_open(false);
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok(())
}

async fn print_state(controller: &PlaybackController, engine: &HeadlessPlaybackBackend) {
    let snapshot = controller.snapshot();
    let engine_state = engine.snapshot().await;
    println!(
        "  current={:?} index={}/{} playing={} paused_by_user={} loading={} engine={:?}",
        snapshot.current_id(),
        snapshot.current_index,
        snapshot.playlist_len,
        snapshot.is_playing,
        snapshot.user_paused,
        snapshot.is_loading,
        engine_state.status,
    );
}
