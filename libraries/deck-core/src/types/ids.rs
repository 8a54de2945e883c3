/// ID types for Narrated Deck entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slide identifier
///
/// Keys the slide's narration asset, so it is kept verbatim from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(String);

impl SlideId {
    /// Create a new slide ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SlideId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
