//! One-time backend initialization.

use crate::error::{PlaybackError, Result};
use bridge_traits::playback::{BackendOptions, Capability, PlaybackBackend, RepeatMode};
use core_runtime::config::PlayerConfig;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Runs `setup_player`, `update_options` and `set_repeat_mode` exactly once
/// per controller. Concurrent callers wait for the first attempt; a failed
/// attempt leaves the cell empty so the next caller retries.
#[derive(Debug)]
pub struct BackendInitializer {
    options: BackendOptions,
    capabilities: Vec<Capability>,
    repeat_mode: RepeatMode,
    ready: OnceCell<()>,
}

impl BackendInitializer {
    pub fn new(options: BackendOptions, capabilities: Vec<Capability>, repeat_mode: RepeatMode) -> Self {
        Self {
            options,
            capabilities,
            repeat_mode,
            ready: OnceCell::new(),
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(
            config.backend_options.clone(),
            config.capabilities.clone(),
            config.repeat_mode,
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.ready.initialized()
    }

    pub async fn ensure(&self, backend: &dyn PlaybackBackend) -> Result<()> {
        if self.ready.initialized() {
            return Ok(());
        }

        self.ready
            .get_or_try_init(|| async {
                debug!("Configuring playback backend");
                backend
                    .setup_player(self.options.clone())
                    .await
                    .map_err(|e| PlaybackError::SetupFailed(e.to_string()))?;
                backend
                    .update_options(&self.capabilities)
                    .await
                    .map_err(|e| PlaybackError::SetupFailed(e.to_string()))?;
                backend
                    .set_repeat_mode(self.repeat_mode)
                    .await
                    .map_err(|e| PlaybackError::SetupFailed(e.to_string()))?;
                info!(
                    capabilities = self.capabilities.len(),
                    repeat_mode = ?self.repeat_mode,
                    "Playback backend ready"
                );
                Ok::<(), PlaybackError>(())
            })
            .await
            .map(|_| ())
    }
}
