//! # Playback Controller
//!
//! Owns the queue state and is the only writer to the playback backend.
//!
//! ## Sequencing
//!
//! - `play_track`, `next`, `prev` and `shuffle` each take a [`LoadToken`].
//!   A newer token makes older loads stale; stale loads stop issuing backend
//!   commands at the next checkpoint.
//! - Backend command blocks (`reset`, `add`, `play`) run under `load_lock`,
//!   so two loads never interleave their commands. A stale load that already
//!   touched the backend resets it before letting go of the lock.
//! - `next`, `prev` and `shuffle` share a `transitioning` flag: a call that
//!   arrives while another transition is in flight is dropped.
//! - `pause` and `play` bypass both mechanisms and apply immediately.
//!
//! Failures never propagate to callers. They are logged, reflected in the
//! published [`PlayerSnapshot`], and broadcast as [`PlaybackEvent::Error`].
//!
//! ## Example
//!
//! ```no_run
//! use bridge_desktop::HeadlessPlaybackBackend;
//! use core_playback::{PlaybackController, Track};
//! use core_runtime::config::PlayerConfig;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let controller = PlaybackController::new(
//!     Arc::new(HeadlessPlaybackBackend::new()),
//!     PlayerConfig::default(),
//! );
//!
//! let a = Track::new("a", "Calm").with_url("https://cdn.example.com/a.mp3");
//! let b = Track::new("b", "Drift").with_url("https://cdn.example.com/b.mp3");
//!
//! controller.play_track(a.clone(), Some(vec![a, b]), true).await;
//! controller.next().await;
//! assert_eq!(controller.snapshot().current_id(), Some("b"));
//! # }
//! ```

use crate::error::{PlaybackError, Result};
use crate::queue::{Navigation, PlayerSnapshot, QueueState};
use crate::sequencer::{LoadSequencer, LoadToken};
use crate::setup::BackendInitializer;
use crate::track::Track;
use bridge_traits::playback::{PlaybackBackend, QueueItem};
use core_runtime::config::PlayerConfig;
use core_runtime::events::{ChangeDirection, CoreEvent, EventBus, PlaybackEvent, UiEvent};
use core_runtime::logging::strip_query;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// Handle to the playback session. Clones share the same session.
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn PlaybackBackend>,
    config: PlayerConfig,
    initializer: BackendInitializer,
    sequencer: LoadSequencer,
    state: Mutex<QueueState>,
    transitioning: AtomicBool,
    load_lock: tokio::sync::Mutex<()>,
    snapshot_tx: watch::Sender<PlayerSnapshot>,
    events: EventBus,
}

impl PlaybackController {
    pub fn new(backend: Arc<dyn PlaybackBackend>, config: PlayerConfig) -> Self {
        let initializer = BackendInitializer::from_config(&config);
        Self::with_initializer(backend, config, initializer)
    }

    /// Build with an explicit initializer, e.g. one shared with another
    /// controller driving the same engine.
    pub fn with_initializer(
        backend: Arc<dyn PlaybackBackend>,
        config: PlayerConfig,
        initializer: BackendInitializer,
    ) -> Self {
        if let Err(err) = config.validate() {
            warn!(error = %err, "Player config failed validation");
        }
        let (snapshot_tx, _) = watch::channel(PlayerSnapshot::default());
        let events = EventBus::new(config.event_buffer_size);

        Self {
            inner: Arc::new(Inner {
                backend,
                config,
                initializer,
                sequencer: LoadSequencer::new(),
                state: Mutex::new(QueueState::new()),
                transitioning: AtomicBool::new(false),
                load_lock: tokio::sync::Mutex::new(()),
                snapshot_tx,
                events,
            }),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.inner.config
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.inner.state.lock().snapshot()
    }

    /// Receiver that observes every published state change.
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    pub fn playlist(&self) -> Vec<Track> {
        self.inner.state.lock().playlist.clone()
    }

    /// Latest load token handed out.
    pub fn load_generation(&self) -> u64 {
        self.inner.sequencer.current()
    }

    pub fn is_backend_ready(&self) -> bool {
        self.inner.initializer.is_initialized()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Configure the backend once. Later calls are no-ops; a failed attempt
    /// is retried by the next call or the next load.
    pub async fn setup(&self) {
        if let Err(err) = self.try_setup().await {
            self.inner.report_failure(None, &err);
        }
    }

    async fn try_setup(&self) -> Result<()> {
        if !self.native() {
            return Err(PlaybackError::UnsupportedPlatform);
        }
        self.inner.ensure_setup().await
    }

    /// Make `track` current and start it.
    ///
    /// When `playlist` is given it replaces the queue and the index moves to
    /// `track` (first entry if not found). Without a playlist, a singleton
    /// queue is created if none exists yet.
    #[instrument(skip_all, fields(track_id = %track.id))]
    pub async fn play_track(&self, track: Track, playlist: Option<Vec<Track>>, open_ui: bool) {
        if !self.native() {
            return;
        }

        let token = self.inner.sequencer.begin();
        let _loading = LoadingScope::new(&self.inner, token);

        let Some(item) = track.to_queue_item() else {
            let err = PlaybackError::MissingTrackUrl(track.id.clone());
            warn!(token = %token, error = %err, "Ignoring play request");
            return;
        };

        let (index, ui_changed) = self.inner.update(|state| {
            state.install_playlist(&track, playlist);
            state.activate(track.clone());
            state.change_direction = ChangeDirection::None;
            state.user_paused = false;
            state.is_playing = true;
            state.is_loading = true;
            let ui_changed = open_ui && !state.ui_open;
            if open_ui {
                state.ui_open = true;
            }
            (state.current_index, ui_changed)
        });

        if ui_changed {
            self.inner.emit(CoreEvent::Ui(UiEvent::PlayerVisibilityChanged { open: true }));
        }
        self.inner.emit(CoreEvent::Playback(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            index,
            direction: ChangeDirection::None,
        }));
        info!(token = %token, index, url = strip_query(&item.url), "Loading track");

        let result = self.inner.load(token, item, true).await;
        self.inner.finish(token, &track, true, result);
    }

    pub async fn next(&self) {
        self.transition(Navigation::Next).await;
    }

    pub async fn prev(&self) {
        self.transition(Navigation::Prev).await;
    }

    /// Jump to a random playlist entry, possibly the current one.
    pub async fn shuffle(&self) {
        self.transition(Navigation::Shuffle).await;
    }

    pub async fn pause(&self) {
        self.pause_with(false).await;
    }

    /// Pause on behalf of another media surface (e.g. a video player) that
    /// needs audio focus. Nothing resumes automatically afterwards.
    pub async fn pause_for_external_player(&self) {
        self.pause_with(true).await;
    }

    pub async fn play(&self) {
        if !self.native() {
            return;
        }
        match self.inner.backend.play().await {
            Ok(()) => {
                let track_id = self.inner.update(|state| {
                    state.is_playing = true;
                    state.user_paused = false;
                    state.current_id()
                });
                debug!(track_id = ?track_id, "Playback resumed");
                self.inner
                    .emit(CoreEvent::Playback(PlaybackEvent::Resumed { track_id }));
            }
            Err(err) => {
                let track_id = self.snapshot().current_id().map(str::to_string);
                self.inner.report_failure(track_id, &PlaybackError::from(err));
            }
        }
    }

    /// Show or hide the full-screen player. Works on every platform.
    pub fn set_ui_open(&self, open: bool) {
        let changed = self.inner.update(|state| {
            let changed = state.ui_open != open;
            state.ui_open = open;
            changed
        });
        if changed {
            self.inner
                .emit(CoreEvent::Ui(UiEvent::PlayerVisibilityChanged { open }));
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn native(&self) -> bool {
        self.inner.config.platform.supports_native_playback()
    }

    async fn pause_with(&self, external: bool) {
        if !self.native() {
            return;
        }
        match self.inner.backend.pause().await {
            Ok(()) => {
                let track_id = self.inner.update(|state| {
                    state.is_playing = false;
                    state.user_paused = true;
                    state.current_id()
                });
                debug!(track_id = ?track_id, external, "Playback paused");
                self.inner
                    .emit(CoreEvent::Playback(PlaybackEvent::Paused { track_id, external }));
            }
            Err(err) => {
                let track_id = self.snapshot().current_id().map(str::to_string);
                self.inner.report_failure(track_id, &PlaybackError::from(err));
            }
        }
    }

    #[instrument(skip(self), fields(op = navigation.as_str()))]
    async fn transition(&self, navigation: Navigation) {
        if !self.native() {
            return;
        }
        let Some(_transition) = TransitionGuard::acquire(&self.inner.transitioning) else {
            debug!("Transition already in flight; dropping request");
            return;
        };

        let roll = navigation.roll(&mut rand::thread_rng());
        let planned = self.inner.update(|state| {
            let index = navigation.target_index(state.current_index, state.playlist.len(), roll)?;
            let token = self.inner.sequencer.begin();
            state.current_index = index;
            let target = state.track_at(index).cloned()?;
            Some((token, index, target))
        });
        let Some((token, index, target)) = planned else {
            debug!("Playlist empty; nothing to navigate");
            return;
        };
        let _loading = LoadingScope::new(&self.inner, token);

        let Some(item) = target.to_queue_item() else {
            // Index stays on the unplayable entry; current keeps showing the old track.
            let err = PlaybackError::MissingTrackUrl(target.id.clone());
            warn!(token = %token, index, error = %err, "Transition target not loaded");
            return;
        };

        let should_play = self.inner.update(|state| {
            state.is_loading = true;
            state.previous = state.current.clone();
            state.change_direction = navigation.direction();
            !state.user_paused
        });

        let delay = self.inner.config.transition_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Err(err) = self.inner.sequencer.check(token) {
            self.inner.finish(token, &target, should_play, Err(err));
            return;
        }

        self.inner.update(|state| {
            state.current = Some(target.clone());
            state.is_playing = should_play;
        });
        self.inner.emit(CoreEvent::Playback(PlaybackEvent::TrackChanged {
            track_id: target.id.clone(),
            index,
            direction: navigation.direction(),
        }));
        info!(token = %token, index, should_play, "Loading track");

        let result = self.inner.load(token, item, should_play).await;
        self.inner.finish(token, &target, should_play, result);
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("platform", &self.inner.config.platform)
            .field("generation", &self.inner.sequencer.current())
            .field("state", &self.snapshot())
            .finish()
    }
}

impl Inner {
    /// Apply `f` to the queue state and publish the resulting snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut QueueState) -> R) -> R {
        let mut state = self.state.lock();
        let result = f(&mut state);
        self.snapshot_tx.send_replace(state.snapshot());
        result
    }

    fn emit(&self, event: CoreEvent) {
        // No subscribers is the common case.
        let _ = self.events.emit(event);
    }

    async fn ensure_setup(&self) -> Result<()> {
        self.initializer.ensure(self.backend.as_ref()).await
    }

    /// Replace the engine queue with `item` and optionally start it.
    async fn load(&self, token: LoadToken, item: QueueItem, play: bool) -> Result<()> {
        self.sequencer.check(token)?;
        self.ensure_setup().await?;

        let _commands = self.load_lock.lock().await;
        // Nothing issued yet: a newer load owns the engine, leave it alone.
        self.sequencer.check(token)?;

        self.backend.reset().await?;
        self.backend.add(item).await?;

        if let Err(superseded) = self.sequencer.check(token) {
            if let Err(err) = self.backend.reset().await {
                warn!(token = %token, error = %err, "Reset after superseded load failed");
            }
            return Err(superseded);
        }

        if play {
            self.backend.play().await?;
        }
        Ok(())
    }

    fn finish(&self, token: LoadToken, track: &Track, played: bool, result: Result<()>) {
        match result {
            Ok(()) => {
                debug!(token = %token, track_id = %track.id, played, "Track loaded");
                if played {
                    self.emit(CoreEvent::Playback(PlaybackEvent::Started {
                        track_id: track.id.clone(),
                        title: track.title.clone(),
                    }));
                }
            }
            Err(PlaybackError::Superseded { token: stale, latest }) => {
                debug!(token = stale, latest, track_id = %track.id, "Load superseded");
                self.emit(CoreEvent::Playback(PlaybackEvent::LoadSuperseded {
                    track_id: track.id.clone(),
                    token: stale,
                    latest,
                }));
            }
            Err(err) if !self.sequencer.is_current(token) => {
                debug!(token = %token, track_id = %track.id, error = %err, "Stale load failed");
            }
            Err(err) => {
                self.update(|state| state.is_playing = false);
                self.report_failure(Some(track.id.clone()), &err);
            }
        }
    }

    fn report_failure(&self, track_id: Option<String>, err: &PlaybackError) {
        if err.is_benign() {
            debug!(track_id = ?track_id, error = %err, "Playback command skipped");
            return;
        }
        error!(track_id = ?track_id, error = %err, "Playback command failed");
        self.emit(CoreEvent::Playback(PlaybackEvent::Error {
            track_id,
            message: err.to_string(),
        }));
    }
}

/// Clears `is_loading` when the owning operation ends, on every exit path,
/// provided no newer load has taken over.
struct LoadingScope<'a> {
    inner: &'a Inner,
    token: LoadToken,
}

impl<'a> LoadingScope<'a> {
    fn new(inner: &'a Inner, token: LoadToken) -> Self {
        Self { inner, token }
    }
}

impl Drop for LoadingScope<'_> {
    fn drop(&mut self) {
        if self.inner.sequencer.is_current(self.token) {
            self.inner.update(|state| state.is_loading = false);
        }
    }
}

/// Holds the `transitioning` flag for the lifetime of one transition.
struct TransitionGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> TransitionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let first = TransitionGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(TransitionGuard::acquire(&flag).is_none());

        drop(first);
        assert!(!flag.load(Ordering::Acquire));
        assert!(TransitionGuard::acquire(&flag).is_some());
    }
}
