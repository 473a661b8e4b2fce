//! # Player Configuration Module
//!
//! Provides configuration for the Aura playback core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `PlayerConfig` holding the settings the playback controller reads at
//! construction time. `build()` validates eagerly so a misconfigured host
//! fails at startup rather than on the first tap.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::PlayerConfig;
//! use bridge_traits::playback::RepeatMode;
//! use std::time::Duration;
//!
//! let config = PlayerConfig::builder()
//!     .transition_delay(Duration::from_millis(250))
//!     .repeat_mode(RepeatMode::Off)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.transition_delay, Duration::from_millis(250));
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::PlayerConfig;
//! use bridge_traits::playback::Capability;
//!
//! // Play/Pause are mandatory remote-control capabilities
//! let config = PlayerConfig::builder()
//!     .capabilities(vec![Capability::SkipToNext])
//!     .build()
//!     .expect("Should fail - missing play/pause");
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::platform::Platform;
use bridge_traits::playback::{BackendOptions, Capability, RepeatMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for the transition debounce.
pub const MAX_TRANSITION_DELAY: Duration = Duration::from_secs(5);

/// Settings consumed by the playback controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Pause before a `next`/`prev`/`shuffle` commits its new track, letting
    /// the UI settle its transition animation.
    ///
    /// Default: 300 ms.
    #[serde(default = "default_transition_delay")]
    pub transition_delay: Duration,

    /// Engine-level looping, applied once during setup.
    #[serde(default)]
    pub repeat_mode: RepeatMode,

    /// Remote-control actions advertised to the OS media session.
    #[serde(default = "Capability::defaults")]
    pub capabilities: Vec<Capability>,

    /// Options passed to the engine's one-time setup.
    #[serde(default)]
    pub backend_options: BackendOptions,

    /// Host platform; web hosts turn every playback command into a no-op.
    #[serde(default)]
    pub platform: Platform,

    /// Per-subscriber buffer of the playback event bus.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

fn default_transition_delay() -> Duration {
    Duration::from_millis(300)
}

fn default_event_buffer_size() -> usize {
    DEFAULT_EVENT_BUFFER_SIZE
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            transition_delay: default_transition_delay(),
            repeat_mode: RepeatMode::default(),
            capabilities: Capability::defaults(),
            backend_options: BackendOptions::default(),
            platform: Platform::current(),
            event_buffer_size: default_event_buffer_size(),
        }
    }
}

impl PlayerConfig {
    /// Creates a new builder seeded with defaults.
    pub fn builder() -> PlayerConfigBuilder {
        PlayerConfigBuilder::default()
    }

    /// Parse a JSON settings blob, then validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid player config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - `Play` and `Pause` are among the advertised capabilities
    /// - the transition delay does not exceed [`MAX_TRANSITION_DELAY`]
    /// - the event buffer is non-zero
    pub fn validate(&self) -> Result<()> {
        for required in [Capability::Play, Capability::Pause] {
            if !self.capabilities.contains(&required) {
                return Err(Error::CapabilityMissing {
                    capability: format!("{:?}", required),
                    message: "Play and Pause must be advertised so lock-screen controls \
                              can drive the player."
                        .to_string(),
                });
            }
        }

        if self.transition_delay > MAX_TRANSITION_DELAY {
            return Err(Error::Config(format!(
                "Transition delay {:?} exceeds maximum of {:?}",
                self.transition_delay, MAX_TRANSITION_DELAY
            )));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`PlayerConfig`] instances.
#[derive(Debug, Default)]
pub struct PlayerConfigBuilder {
    transition_delay: Option<Duration>,
    repeat_mode: Option<RepeatMode>,
    capabilities: Option<Vec<Capability>>,
    backend_options: Option<BackendOptions>,
    platform: Option<Platform>,
    event_buffer_size: Option<usize>,
}

impl PlayerConfigBuilder {
    /// Sets the debounce applied before a transition commits its track.
    ///
    /// Default: 300 ms
    pub fn transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = Some(delay);
        self
    }

    /// Sets the engine repeat mode.
    ///
    /// Default: [`RepeatMode::Queue`]
    pub fn repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.repeat_mode = Some(mode);
        self
    }

    /// Replaces the advertised remote-control capabilities.
    pub fn capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn backend_options(mut self, options: BackendOptions) -> Self {
        self.backend_options = Some(options);
        self
    }

    /// Overrides platform detection. Mostly useful in tests and for hosts
    /// that embed a web view inside a native shell.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the event bus buffer size.
    ///
    /// Default: 100
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Builds the configuration, validating it.
    pub fn build(self) -> Result<PlayerConfig> {
        let defaults = PlayerConfig::default();
        let config = PlayerConfig {
            transition_delay: self.transition_delay.unwrap_or(defaults.transition_delay),
            repeat_mode: self.repeat_mode.unwrap_or(defaults.repeat_mode),
            capabilities: self.capabilities.unwrap_or(defaults.capabilities),
            backend_options: self.backend_options.unwrap_or(defaults.backend_options),
            platform: self.platform.unwrap_or(defaults.platform),
            event_buffer_size: self.event_buffer_size.unwrap_or(defaults.event_buffer_size),
        };

        config.validate()?;
        Ok(config)
    }
}
