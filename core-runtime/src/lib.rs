//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the Aura player core:
//! - Logging and tracing infrastructure
//! - Player configuration
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the playback core depends on.
//! It establishes the logging conventions, the configuration builder, and the
//! event broadcasting mechanism UI layers subscribe to.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{PlayerConfig, PlayerConfigBuilder};
pub use error::{Error, Result};
pub use events::{ChangeDirection, CoreEvent, EventBus, EventStream, PlaybackEvent, UiEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};
