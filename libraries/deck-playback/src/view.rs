//! Read-only snapshot for rendering

use deck_core::SlideDescriptor;
use serde::Serialize;

use crate::types::TransportMode;

/// Everything a host needs to draw the player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub title: Option<String>,
    pub current_index: usize,
    pub total: usize,
    pub is_playing: bool,
    pub position: f64,
    pub duration: f64,
    /// `position / duration`, 0 while the duration is unknown
    pub progress: f64,
    pub show_notes: bool,
    pub show_narration: bool,
    pub slide: SlideDescriptor,
    /// Canonical `slide/N` form
    pub address: String,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Last slide finished while playing
    pub is_complete: bool,
    pub transport_mode: TransportMode,
    /// Seconds left before the fallback timer advances
    pub fallback_remaining: Option<f64>,
}

impl PlayerView {
    /// `1 / 8` style counter
    pub fn counter(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.total)
    }
}

/// Format seconds as `m:ss`
///
/// Negative and non-finite values render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}
