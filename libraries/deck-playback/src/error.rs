//! Error types for presentation playback

use thiserror::Error;

/// Playback errors
///
/// The engine itself never fails once constructed; these values travel
/// between transports and the engine, and out of setup code.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The transport refused to start playback (autoplay policy, missing asset, decode error)
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// No audio backend is available; timers drive the deck
    #[error("No audio backend available")]
    NoAudioBackend,

    /// Transport-specific failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Deck loading or validation failed
    #[error(transparent)]
    Core(#[from] deck_core::DeckError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
