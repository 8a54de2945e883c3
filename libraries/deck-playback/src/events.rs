//! Presentation Events
//!
//! Event-based communication for host synchronization. The engine records
//! events as it changes state; hosts drain them after each call to update
//! the rendered surface.

use serde::{Deserialize, Serialize};

/// Events emitted by the presentation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PresentationEvent {
    /// A different slide became current
    SlideChanged {
        /// New slide index
        index: usize,
        /// Previous slide index (None on the initial slide)
        previous_index: Option<usize>,
        /// Id of the new slide
        slide_id: String,
        /// Narration asset loaded for it
        asset: String,
    },

    /// Play intent flipped
    PlayStateChanged {
        /// New play intent
        is_playing: bool,
    },

    /// Address written to the binding
    AddressChanged {
        /// Canonical `slide/N` form
        address: String,
    },

    /// Transport position moved
    PositionUpdate {
        /// Position in seconds
        position: f64,
        /// Duration in seconds (0 = unknown)
        duration: f64,
    },

    /// Track duration reported
    DurationKnown {
        /// Duration in seconds
        duration: f64,
    },

    /// Playback was refused; the slide now advances on a timer
    FallbackArmed {
        /// Slide the timer belongs to
        index: usize,
        /// Countdown length in seconds
        seconds: f64,
    },

    /// Fallback timer reached zero
    FallbackFired {
        /// Slide the timer belonged to
        index: usize,
    },

    /// Pending fallback timer dropped
    FallbackCancelled {
        /// Slide the timer belonged to
        index: usize,
    },

    /// Last slide finished while playing
    DeckCompleted,

    /// Speaker notes visibility changed
    NotesToggled {
        /// Now visible
        visible: bool,
    },

    /// Narration script visibility changed
    NarrationToggled {
        /// Now visible
        visible: bool,
    },

    /// A transport callback arrived for a load that is no longer current
    StaleCallbackDiscarded {
        /// Slide the callback was issued for
        index: usize,
        /// Load generation of the callback
        generation: u64,
    },
}
