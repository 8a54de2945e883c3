//! Narration asset addressing
//!
//! Each slide's narration track lives at a predictable address derived from
//! its id. A missing asset is normal: the engine falls back to a timer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DeckError, Result};
use crate::types::SlideId;

/// Placeholder substituted with the slide id
pub const ID_PLACEHOLDER: &str = "{id}";

/// Default narration address template
pub const DEFAULT_TEMPLATE: &str = "/audio/slide-{id}.mp3";

/// Address template such as `/audio/slide-{id}.mp3`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetTemplate(String);

impl AssetTemplate {
    /// Parse a template, requiring at least one `{id}` placeholder
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(ID_PLACEHOLDER) {
            return Err(DeckError::InvalidTemplate(template));
        }
        Ok(Self(template))
    }

    /// Address of the narration track for `id`
    pub fn resolve(&self, id: &SlideId) -> AssetAddress {
        AssetAddress(self.0.replace(ID_PLACEHOLDER, id.as_str()))
    }

    /// Raw template text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AssetTemplate {
    fn default() -> Self {
        Self(DEFAULT_TEMPLATE.to_string())
    }
}

impl TryFrom<String> for AssetTemplate {
    type Error = DeckError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AssetTemplate> for String {
    fn from(template: AssetTemplate) -> Self {
        template.0
    }
}

impl fmt::Display for AssetTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved narration track address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetAddress(String);

impl AssetAddress {
    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
