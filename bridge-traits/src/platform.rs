//! Platform helpers: thread-safety bounds that follow the target, and the
//! host platform kind the core is running on.
//!
//! Native targets require `Send + Sync` so bridge implementations can be
//! shared across async tasks. WebAssembly builds run on a single thread and
//! cannot satisfy those bounds because browser-provided objects are not
//! thread-safe, so the marker traits below collapse to no-ops there.

use serde::{Deserialize, Serialize};

/// Marker trait that applies `Send + Sync` on native targets while becoming a
/// no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}

/// Host platform family.
///
/// Web hosts have no native audio engine; every playback command becomes a
/// silent no-op there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Desktop,
    Web,
}

impl Platform {
    /// Platform of the current compilation target.
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Desktop
        }
    }

    /// Whether a native playback backend exists on this platform.
    pub fn supports_native_playback(&self) -> bool {
        !matches!(self, Platform::Web)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}
