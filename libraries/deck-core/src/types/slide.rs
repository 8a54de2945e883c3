/// Slide descriptor types
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::SlideId;
use crate::error::{DeckError, Result};

/// One slide record as written in the manifest
///
/// Accepts both the canonical field names and the ones used by older
/// `presentation.json` files (`duration`, `speakerNotes`, `narration`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSlide {
    /// Slide identifier
    pub id: SlideId,

    /// Auto-advance duration in seconds (registry default when absent)
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    /// Speaker notes
    #[serde(default, alias = "speakerNotes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Narration script
    #[serde(default, alias = "narration", skip_serializing_if = "Option::is_none")]
    pub narration_script: Option<String>,
}

/// A validated slide in the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDescriptor {
    /// Slide identifier, also keys the narration asset
    pub id: SlideId,

    /// Auto-advance duration in seconds, finite and non-negative
    pub duration_seconds: f64,

    /// Speaker notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Narration script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration_script: Option<String>,
}

impl SlideDescriptor {
    /// Create a descriptor with no notes or script
    pub fn new(id: impl Into<SlideId>, duration_seconds: f64) -> Self {
        Self {
            id: id.into(),
            duration_seconds,
            notes: None,
            narration_script: None,
        }
    }

    /// Set speaker notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the narration script
    #[must_use]
    pub fn with_narration(mut self, script: impl Into<String>) -> Self {
        self.narration_script = Some(script.into());
        self
    }

    /// Auto-advance duration, saturating for values too large to represent
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_seconds).unwrap_or(Duration::MAX)
    }

    /// Validate a manifest record, filling in the default duration
    pub(crate) fn from_manifest(
        position: usize,
        raw: ManifestSlide,
        default_duration: Duration,
    ) -> Result<Self> {
        if raw.id.is_blank() {
            return Err(DeckError::EmptySlideId(position));
        }

        let duration_seconds = raw
            .duration_seconds
            .unwrap_or_else(|| default_duration.as_secs_f64());
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(DeckError::invalid_duration(&raw.id, duration_seconds));
        }

        Ok(Self {
            id: raw.id,
            duration_seconds,
            notes: raw.notes,
            narration_script: raw.narration_script,
        })
    }
}
