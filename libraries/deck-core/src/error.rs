/// Core error types for Narrated Deck
use thiserror::Error;

use crate::types::SlideId;

/// Result type alias using `DeckError`
pub type Result<T> = std::result::Result<T, DeckError>;

/// Core error type for Narrated Deck
///
/// Only start-up work (manifest loading, template parsing) can fail. Once a
/// session is running, every failure degrades instead of surfacing here.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The manifest contained no slides
    #[error("Manifest contains no slides")]
    EmptyDeck,

    /// Two slides share an id (and would share a narration track)
    #[error("Duplicate slide id: {0}")]
    DuplicateSlideId(SlideId),

    /// A slide id was empty or whitespace
    #[error("Slide at position {0} has an empty id")]
    EmptySlideId(usize),

    /// Slide duration was negative, NaN or infinite
    #[error("Invalid duration for slide {id}: {value}")]
    InvalidDuration {
        /// Offending slide
        id: SlideId,
        /// Value found in the manifest
        value: f64,
    },

    /// Asset template did not contain the `{id}` placeholder
    #[error("Invalid asset template '{0}': missing {{id}} placeholder")]
    InvalidTemplate(String),

    /// Manifest JSON could not be parsed
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeckError {
    /// Create an invalid duration error
    pub fn invalid_duration(id: &SlideId, value: f64) -> Self {
        Self::InvalidDuration {
            id: id.clone(),
            value,
        }
    }
}
