//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the playback core and
//! platform-specific implementations. Each trait represents a capability the
//! core requires but that is implemented differently per platform (iOS,
//! Android, desktop, web).
//!
//! ## Traits
//!
//! - [`PlaybackBackend`](playback::PlaybackBackend) - Native audio engine commands
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation | Status |
//! |----------|----------------|--------|
//! | Desktop  | `bridge-desktop` (`HeadlessPlaybackBackend`) | ✅ |
//! | iOS      | host-native media player adapter | 📋 Planned |
//! | Android  | host-native media player adapter | 📋 Planned |
//! | Web      | none, playback is a no-op | ✅ |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Platform
//! implementations should convert native errors into it and include enough
//! context (command name, item URL) to make logs actionable.
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` on native targets (via
//! [`PlatformSendSync`](platform::PlatformSendSync)) so a single backend can be
//! shared by every task that drives the controller.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::playback::{BackendOptions, Capability, PlaybackBackend, QueueItem, RepeatMode};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyEngine;
//!
//! #[async_trait]
//! impl PlaybackBackend for MyEngine {
//!     async fn setup_player(&self, _options: BackendOptions) -> Result<()> { Ok(()) }
//!     async fn update_options(&self, _caps: &[Capability]) -> Result<()> { Ok(()) }
//!     async fn set_repeat_mode(&self, _mode: RepeatMode) -> Result<()> { Ok(()) }
//!     async fn reset(&self) -> Result<()> { Ok(()) }
//!     async fn add(&self, _item: QueueItem) -> Result<()> { Ok(()) }
//!     async fn play(&self) -> Result<()> { Ok(()) }
//!     async fn pause(&self) -> Result<()> { Ok(()) }
//! }
//! ```

pub mod error;
pub mod logging;
pub mod platform;
pub mod playback;

pub use error::BridgeError;

pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use platform::Platform;
pub use playback::{BackendOptions, Capability, PlaybackBackend, QueueItem, RepeatMode};
