//! Playback bridge traits and supporting queue types.
//!
//! These abstractions let the core playback controller drive a
//! platform-specific audio engine (a native media-session player on mobile,
//! a headless engine on desktop) through a narrow, fire-and-forget command
//! surface. The engine owns decoding, buffering and output; the core only
//! sequences commands into it and never reads state back.

use crate::{error::Result, platform::PlatformSendSync};
use serde::{Deserialize, Serialize};

/// Remote-control actions the backend advertises to the OS media session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Play,
    Pause,
    SkipToNext,
    SkipToPrevious,
    SeekTo,
    Stop,
}

impl Capability {
    /// Capabilities the player exposes out of the box.
    pub fn defaults() -> Vec<Capability> {
        vec![
            Capability::Play,
            Capability::Pause,
            Capability::SkipToNext,
            Capability::SkipToPrevious,
            Capability::SeekTo,
        ]
    }
}

/// Backend-level looping behaviour, configured once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    Off,
    Track,
    #[default]
    Queue,
}

/// Options supplied to [`PlaybackBackend::setup_player`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendOptions {
    /// Keep the native session alive when the host app is backgrounded.
    pub stay_active_in_background: bool,
    /// Let the OS duck other audio instead of pausing it.
    pub duck_others: bool,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            stay_active_in_background: true,
            duck_others: false,
        }
    }
}

/// A single playable item handed to the backend queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Remote audio resource locator.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Display artist string.
    pub artist: String,
    /// Album or collection label.
    pub album: String,
    /// Artwork URI, when one is available.
    pub artwork: Option<String>,
}

impl QueueItem {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            artwork: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn with_artwork(mut self, artwork: Option<String>) -> Self {
        self.artwork = artwork;
        self
    }
}

/// Native audio engine driven by the playback controller.
///
/// All commands are fire-and-forget: a successful return means the engine
/// accepted the command, not that audio is audible. Implementations must
/// tolerate `reset` on an empty queue and repeated `play`/`pause` calls.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::playback::{PlaybackBackend, QueueItem};
///
/// async fn load(backend: &dyn PlaybackBackend) -> bridge_traits::error::Result<()> {
///     backend.reset().await?;
///     backend.add(QueueItem::new("https://cdn.example.com/a.mp3", "Calm")).await?;
///     backend.play().await
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait PlaybackBackend: PlatformSendSync {
    /// One-time engine initialisation.
    async fn setup_player(&self, options: BackendOptions) -> Result<()>;

    /// Declare the remote-control actions the engine should expose.
    async fn update_options(&self, capabilities: &[Capability]) -> Result<()>;

    /// Configure engine-level looping.
    async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()>;

    /// Clear the engine queue. Safe on an empty queue.
    async fn reset(&self) -> Result<()>;

    /// Enqueue exactly one item.
    async fn add(&self, item: QueueItem) -> Result<()>;

    /// Start or resume the enqueued item.
    async fn play(&self) -> Result<()>;

    /// Suspend the enqueued item.
    async fn pause(&self) -> Result<()>;
}
