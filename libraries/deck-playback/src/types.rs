//! Core types for presentation playback

use deck_core::AssetTemplate;
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerOptions {
    /// Narration address template (default: `/audio/slide-{id}.mp3`)
    pub asset_template: AssetTemplate,

    /// Start playing as soon as the engine is created (default: false)
    pub autoplay: bool,

    /// 0-based slide to open when the address does not name one (default: first)
    pub start_slide: Option<usize>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            asset_template: AssetTemplate::default(),
            autoplay: false,
            start_slide: None,
        }
    }
}

/// What currently drives auto-advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    /// Narration audio; track end advances
    Audio,
    /// Fallback countdown of the slide's duration
    Timer,
}

/// Identity of one asset load
///
/// Every transport callback carries the token it was issued for. A callback
/// whose token no longer matches the engine's current one is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackToken {
    /// Slide the asset belongs to
    pub slide_index: usize,
    /// Load counter, bumped on every slide transition
    pub generation: u64,
}

impl TrackToken {
    /// Create a token
    pub fn new(slide_index: usize, generation: u64) -> Self {
        Self {
            slide_index,
            generation,
        }
    }
}

/// Mutable session state, owned by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Current slide, always within the deck
    pub current_index: usize,
    /// Play intent
    pub is_playing: bool,
    /// Speaker notes visible
    pub show_notes: bool,
    /// Narration script visible
    pub show_narration: bool,
    /// Transport position in seconds
    pub position: f64,
    /// Track duration in seconds (0 = unknown)
    pub duration: f64,
}

impl PlaybackState {
    pub(crate) fn at(current_index: usize) -> Self {
        Self {
            current_index,
            is_playing: false,
            show_notes: false,
            show_narration: false,
            position: 0.0,
            duration: 0.0,
        }
    }

    /// Whether the track duration has been reported
    pub fn duration_known(&self) -> bool {
        self.duration > 0.0
    }
}
