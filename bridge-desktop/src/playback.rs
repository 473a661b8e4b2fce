//! Headless playback engine for desktop hosts.
//!
//! Desktop builds (and CI) have no OS media session, so this adapter keeps the
//! engine state in-process: whether it was set up, the single queued item,
//! and the transport state. Every command is logged so hosts can follow what
//! the controller asked for.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    playback::{BackendOptions, Capability, PlaybackBackend, QueueItem, RepeatMode},
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Transport state reported by [`HeadlessPlaybackBackend::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Nothing queued.
    Empty,
    /// An item is queued but not playing.
    Ready,
    Playing,
    Paused,
}

/// Point-in-time view of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub initialized: bool,
    pub status: EngineStatus,
    pub queued: Option<QueueItem>,
    pub capabilities: Vec<Capability>,
    pub repeat_mode: RepeatMode,
    /// Total number of `setup_player` calls accepted.
    pub setup_calls: u32,
}

#[derive(Debug)]
struct EngineState {
    options: Option<BackendOptions>,
    status: EngineStatus,
    queued: Option<QueueItem>,
    capabilities: Vec<Capability>,
    repeat_mode: RepeatMode,
    setup_calls: u32,
}

/// In-process [`PlaybackBackend`] for desktop and headless hosts.
#[derive(Debug)]
pub struct HeadlessPlaybackBackend {
    state: RwLock<EngineState>,
}

impl HeadlessPlaybackBackend {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EngineState {
                options: None,
                status: EngineStatus::Empty,
                queued: None,
                capabilities: Vec::new(),
                repeat_mode: RepeatMode::Off,
                setup_calls: 0,
            }),
        }
    }

    pub async fn status(&self) -> EngineStatus {
        self.state.read().await.status
    }

    pub async fn snapshot(&self) -> EngineSnapshot {
        let state = self.state.read().await;
        EngineSnapshot {
            initialized: state.options.is_some(),
            status: state.status,
            queued: state.queued.clone(),
            capabilities: state.capabilities.clone(),
            repeat_mode: state.repeat_mode,
            setup_calls: state.setup_calls,
        }
    }
}

impl Default for HeadlessPlaybackBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_initialized(state: &EngineState) -> Result<()> {
    if state.options.is_none() {
        return Err(BridgeError::NotInitialized);
    }
    Ok(())
}

#[async_trait]
impl PlaybackBackend for HeadlessPlaybackBackend {
    async fn setup_player(&self, options: BackendOptions) -> Result<()> {
        let mut state = self.state.write().await;
        state.setup_calls += 1;
        if state.options.is_some() {
            warn!("Headless engine already set up; keeping existing options");
            return Ok(());
        }
        info!(
            background = options.stay_active_in_background,
            "Headless playback engine initialized"
        );
        state.options = Some(options);
        Ok(())
    }

    async fn update_options(&self, capabilities: &[Capability]) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_initialized(&state)?;
        debug!(?capabilities, "Updated remote-control capabilities");
        state.capabilities = capabilities.to_vec();
        Ok(())
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_initialized(&state)?;
        debug!(?mode, "Set repeat mode");
        state.repeat_mode = mode;
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_initialized(&state)?;
        state.queued = None;
        state.status = EngineStatus::Empty;
        debug!("Engine queue reset");
        Ok(())
    }

    async fn add(&self, item: QueueItem) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_initialized(&state)?;
        if item.url.is_empty() {
            return Err(BridgeError::OperationFailed(
                "cannot enqueue an item without url".to_string(),
            ));
        }
        debug!(title = %item.title, "Item enqueued");
        state.queued = Some(item);
        state.status = EngineStatus::Ready;
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_initialized(&state)?;
        match state.status {
            EngineStatus::Empty => {
                // Matches native engines: play on an empty queue is accepted and ignored.
                debug!("play() with empty queue ignored");
            }
            _ => {
                state.status = EngineStatus::Playing;
                debug!("Playback started");
            }
        }
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_initialized(&state)?;
        if state.status == EngineStatus::Playing {
            state.status = EngineStatus::Paused;
            debug!("Playback paused");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: &str) -> QueueItem {
        QueueItem::new(url, "Calm Waters").with_album("Aura")
    }

    #[tokio::test]
    async fn commands_fail_before_setup() {
        let engine = HeadlessPlaybackBackend::new();
        let err = engine.reset().await.unwrap_err();
        assert!(matches!(err, BridgeError::NotInitialized));
    }

    #[tokio::test]
    async fn setup_is_tolerant_of_repeats() {
        let engine = HeadlessPlaybackBackend::new();
        engine.setup_player(BackendOptions::default()).await.unwrap();
        engine.setup_player(BackendOptions::default()).await.unwrap();

        let snapshot = engine.snapshot().await;
        assert!(snapshot.initialized);
        assert_eq!(snapshot.setup_calls, 2);
    }

    #[tokio::test]
    async fn reset_add_play_pause_cycle() {
        let engine = HeadlessPlaybackBackend::new();
        engine.setup_player(BackendOptions::default()).await.unwrap();
        engine
            .update_options(&Capability::defaults())
            .await
            .unwrap();
        engine.set_repeat_mode(RepeatMode::Queue).await.unwrap();

        engine.reset().await.unwrap();
        assert_eq!(engine.status().await, EngineStatus::Empty);

        engine.add(item("https://cdn.example.com/a.mp3")).await.unwrap();
        assert_eq!(engine.status().await, EngineStatus::Ready);

        engine.play().await.unwrap();
        assert_eq!(engine.status().await, EngineStatus::Playing);

        engine.pause().await.unwrap();
        assert_eq!(engine.status().await, EngineStatus::Paused);

        let snapshot = engine.snapshot().await;
        assert_eq!(snapshot.repeat_mode, RepeatMode::Queue);
        assert_eq!(snapshot.capabilities, Capability::defaults());
        assert_eq!(
            snapshot.queued.map(|q| q.url),
            Some("https://cdn.example.com/a.mp3".to_string())
        );
    }

    #[tokio::test]
    async fn play_on_empty_queue_is_ignored() {
        let engine = HeadlessPlaybackBackend::new();
        engine.setup_player(BackendOptions::default()).await.unwrap();
        engine.reset().await.unwrap();
        engine.play().await.unwrap();
        assert_eq!(engine.status().await, EngineStatus::Empty);
    }

    #[tokio::test]
    async fn add_rejects_empty_url() {
        let engine = HeadlessPlaybackBackend::new();
        engine.setup_player(BackendOptions::default()).await.unwrap();
        assert!(engine.add(item("")).await.is_err());
    }
}
