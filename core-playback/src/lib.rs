//! # Playback Core
//!
//! Queue and load coordination for the Aura player.
//!
//! ## Overview
//!
//! This crate handles:
//! - The [`Track`] model and its mapping onto a backend [`QueueItem`](bridge_traits::playback::QueueItem)
//! - Playlist navigation (`next`, `prev`, `shuffle`) over [`QueueState`]
//! - Detection of superseded loads through [`LoadSequencer`] tokens
//! - One-time backend configuration via [`BackendInitializer`]
//! - The [`PlaybackController`] exposed to UI layers
//!
//! Audio decoding and output live in the host engine behind
//! [`PlaybackBackend`](bridge_traits::playback::PlaybackBackend).

pub mod controller;
pub mod error;
pub mod queue;
pub mod sequencer;
pub mod setup;
pub mod track;

pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use queue::{Navigation, PlayerSnapshot, QueueState};
pub use sequencer::{LoadSequencer, LoadToken};
pub use setup::BackendInitializer;
pub use track::Track;
