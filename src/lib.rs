//! Workspace facade crate.
//!
//! Host applications can depend on `aura-workspace` alone and reach the
//! playback core, its runtime, and the bridge contracts through one path.
//! The `desktop-shims` feature (on by default) also exposes the headless
//! desktop engine.

pub use bridge_traits;
pub use core_playback;
pub use core_runtime;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop;

pub use core_playback::{PlaybackController, PlayerSnapshot, Track};
pub use core_runtime::config::PlayerConfig;
