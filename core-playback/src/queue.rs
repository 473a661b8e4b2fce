//! Queue state owned by the playback controller.
//!
//! Everything here is synchronous: the controller mutates a [`QueueState`]
//! under a short-lived lock and publishes a [`PlayerSnapshot`] after each
//! change. Index arithmetic for `next`/`prev`/`shuffle` lives in
//! [`Navigation`].

use crate::track::Track;
use core_runtime::events::ChangeDirection;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Mutable playback session state.
#[derive(Debug, Clone, Default)]
pub struct QueueState {
    /// Traversal order for navigation.
    pub playlist: Vec<Track>,
    /// Always `< playlist.len()` while the playlist is non-empty.
    pub current_index: usize,
    /// Most recently activated track. Lags `playlist[current_index]` while a
    /// transition is settling.
    pub current: Option<Track>,
    pub previous: Option<Track>,
    pub is_playing: bool,
    /// Explicit listener pause; transitions load silently while set.
    pub user_paused: bool,
    pub change_direction: ChangeDirection,
    pub ui_open: bool,
    pub is_loading: bool,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `playlist` when given, positioning on `track` by id (first entry
    /// when absent). Without a playlist, seed a singleton queue if none exists
    /// yet; an existing queue is left as is.
    pub fn install_playlist(&mut self, track: &Track, playlist: Option<Vec<Track>>) {
        match playlist {
            Some(tracks) => {
                self.current_index = tracks
                    .iter()
                    .position(|candidate| candidate.id == track.id)
                    .unwrap_or(0);
                self.playlist = tracks;
            }
            None if self.playlist.is_empty() => {
                self.playlist = vec![track.clone()];
                self.current_index = 0;
            }
            None => {}
        }
    }

    /// Make `track` current, remembering the outgoing one.
    pub fn activate(&mut self, track: Track) {
        self.previous = self.current.replace(track);
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.playlist.get(index)
    }

    pub fn current_id(&self) -> Option<String> {
        self.current.as_ref().map(|track| track.id.clone())
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current: self.current.clone(),
            previous: self.previous.clone(),
            current_index: self.current_index,
            playlist_len: self.playlist.len(),
            is_playing: self.is_playing,
            user_paused: self.user_paused,
            change_direction: self.change_direction,
            ui_open: self.ui_open,
            is_loading: self.is_loading,
        }
    }
}

/// Read-only view of the session handed to UI consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub current: Option<Track>,
    pub previous: Option<Track>,
    pub current_index: usize,
    pub playlist_len: usize,
    pub is_playing: bool,
    pub user_paused: bool,
    pub change_direction: ChangeDirection,
    pub ui_open: bool,
    pub is_loading: bool,
}

impl PlayerSnapshot {
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|track| track.id.as_str())
    }
}

/// Playlist navigation requested by the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Prev,
    /// Uniformly random position; may land on the current track again.
    Shuffle,
}

impl Navigation {
    /// Direction reported to the UI. Shuffle animates like `Next`.
    pub fn direction(self) -> ChangeDirection {
        match self {
            Navigation::Next | Navigation::Shuffle => ChangeDirection::Next,
            Navigation::Prev => ChangeDirection::Prev,
        }
    }

    /// Draws the random fraction in `[0, 1)` that [`Navigation::target_index`]
    /// uses for shuffle. Next and prev ignore it.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            Navigation::Shuffle => rng.gen(),
            Navigation::Next | Navigation::Prev => 0.0,
        }
    }

    /// Target index for a playlist of `len` entries, or `None` when empty.
    pub fn target_index(self, current: usize, len: usize, roll: f64) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = match self {
            Navigation::Next => (current + 1) % len,
            Navigation::Prev => (current + len - 1) % len,
            Navigation::Shuffle => ((roll * len as f64) as usize).min(len - 1),
        };
        Some(index)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Navigation::Next => "next",
            Navigation::Prev => "prev",
            Navigation::Shuffle => "shuffle",
        }
    }
}
