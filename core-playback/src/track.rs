//! Track model shared by the queue and the backend adapter.

use bridge_traits::playback::QueueItem;
use serde::{Deserialize, Serialize};

/// Album label used for hypnosis sessions.
pub const HYPNOSIS_ALBUM: &str = "Hypnosis";
/// Album label used for everything else in the catalogue.
pub const AURA_ALBUM: &str = "Aura";

/// One playable audio item.
///
/// Tracks are immutable once built; the queue only ever clones them. The
/// serde shape matches the catalogue API, so DTOs decode directly:
///
/// ```
/// use core_playback::Track;
///
/// let track: Track = serde_json::from_str(r#"{
///     "id": "42",
///     "title": "Deep Rest",
///     "trackUrl": "https://cdn.example.com/42.mp3",
///     "isHypnosis": true
/// }"#).unwrap();
///
/// assert!(track.is_playable());
/// assert_eq!(track.to_queue_item().unwrap().album, "Hypnosis");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub track_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Alternate artwork.
    #[serde(default)]
    pub vinillo: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_hypnosis: bool,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            track_url: None,
            image_url: None,
            vinillo: None,
            color: None,
            is_hypnosis: false,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.track_url = Some(url.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_vinillo(mut self, url: impl Into<String>) -> Self {
        self.vinillo = Some(url.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn hypnosis(mut self, is_hypnosis: bool) -> Self {
        self.is_hypnosis = is_hypnosis;
        self
    }

    /// The playable url, treating an empty string as absent.
    pub fn playable_url(&self) -> Option<&str> {
        self.track_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn is_playable(&self) -> bool {
        self.playable_url().is_some()
    }

    fn album_label(&self) -> &'static str {
        if self.is_hypnosis {
            HYPNOSIS_ALBUM
        } else {
            AURA_ALBUM
        }
    }

    /// Build the single backend item for this track, or `None` when it has
    /// nothing to play.
    pub fn to_queue_item(&self) -> Option<QueueItem> {
        let url = self.playable_url()?;
        let artist = self
            .subtitle
            .clone()
            .unwrap_or_else(|| self.album_label().to_string());
        let artwork = self.image_url.clone().or_else(|| self.vinillo.clone());

        Some(
            QueueItem::new(url, self.title.clone())
                .with_artist(artist)
                .with_album(self.album_label())
                .with_artwork(artwork),
        )
    }
}
