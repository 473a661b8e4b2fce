//! # Playback Error Types
//!
//! Errors raised inside the load pipeline. The public controller operations
//! swallow them after logging, so hosts only ever see them through
//! [`PlaybackEvent::Error`](core_runtime::events::PlaybackEvent::Error).

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors that can occur during playback operations.
#[derive(Error, Debug)]
pub enum PlaybackError {
    // ========================================================================
    // Track Errors
    // ========================================================================
    /// Track has no playable resource locator.
    #[error("Track has no playable url: {0}")]
    MissingTrackUrl(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// A backend command failed.
    #[error("Backend command failed: {0}")]
    Backend(#[from] BridgeError),

    /// One-time backend setup failed; the next load retries it.
    #[error("Backend setup failed: {0}")]
    SetupFailed(String),

    // ========================================================================
    // Sequencing
    // ========================================================================
    /// A newer load took over before this one finished.
    #[error("Load {token} superseded by {latest}")]
    Superseded { token: u64, latest: u64 },

    /// The host has no native playback engine.
    #[error("Native playback unsupported on this platform")]
    UnsupportedPlatform,
}

impl PlaybackError {
    /// Returns `true` for outcomes that are a normal part of sequencing
    /// rather than failures worth surfacing.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            PlaybackError::Superseded { .. } | PlaybackError::UnsupportedPlatform
        )
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
