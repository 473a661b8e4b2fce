//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! Desktop hosts have no OS-level media session to hand tracks to, so this
//! crate ships a headless engine:
//! - `PlaybackBackend` using [`HeadlessPlaybackBackend`], an in-process
//!   engine that records the queued item and transport state
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::HeadlessPlaybackBackend;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(HeadlessPlaybackBackend::new());
//!     // Hand `backend` to `core_playback::PlaybackController::new`
//! }
//! ```

mod playback;

pub use playback::{EngineSnapshot, EngineStatus, HeadlessPlaybackBackend};
