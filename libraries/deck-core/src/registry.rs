//! Slide registry
//!
//! The ordered, fixed-length deck. Loaded once at startup and never mutated;
//! order in the manifest is navigation order.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DeckError, Result};
use crate::types::{ManifestSlide, SlideDescriptor, SlideId};

/// Manifest layouts accepted on disk
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestDocument {
    Deck {
        #[serde(default)]
        title: Option<String>,
        slides: Vec<ManifestSlide>,
    },
    Bare(Vec<ManifestSlide>),
}

#[derive(Deserialize)]
struct StrictDeck {
    #[serde(default)]
    title: Option<String>,
    slides: Vec<ManifestSlide>,
}

/// Immutable, ordered collection of slides
#[derive(Debug, Clone, PartialEq)]
pub struct SlideRegistry {
    title: Option<String>,
    slides: Vec<SlideDescriptor>,
}

impl SlideRegistry {
    /// Build a registry from already-validated descriptors
    ///
    /// Fails on an empty deck, a duplicate id, or an invalid duration.
    pub fn from_slides(title: Option<String>, slides: Vec<SlideDescriptor>) -> Result<Self> {
        if slides.is_empty() {
            return Err(DeckError::EmptyDeck);
        }

        let mut seen: HashSet<&SlideId> = HashSet::with_capacity(slides.len());
        for (position, slide) in slides.iter().enumerate() {
            if slide.id.is_blank() {
                return Err(DeckError::EmptySlideId(position));
            }
            if !slide.duration_seconds.is_finite() || slide.duration_seconds < 0.0 {
                return Err(DeckError::invalid_duration(
                    &slide.id,
                    slide.duration_seconds,
                ));
            }
            if !seen.insert(&slide.id) {
                return Err(DeckError::DuplicateSlideId(slide.id.clone()));
            }
        }

        Ok(Self { title, slides })
    }

    /// Parse a JSON manifest
    ///
    /// Accepts a top-level array of slides or `{ "title"?, "slides": [...] }`.
    /// Slides without a duration get `default_duration`.
    pub fn from_json(json: &str, default_duration: Duration) -> Result<Self> {
        let (title, raw) = match serde_json::from_str::<ManifestDocument>(json) {
            Ok(ManifestDocument::Deck { title, slides }) => (title, slides),
            Ok(ManifestDocument::Bare(slides)) => (None, slides),
            // Re-parse as the canonical layout so the error names the real problem
            Err(_) => {
                let strict: StrictDeck = serde_json::from_str(json)?;
                (strict.title, strict.slides)
            }
        };

        let slides = raw
            .into_iter()
            .enumerate()
            .map(|(position, slide)| {
                SlideDescriptor::from_manifest(position, slide, default_duration)
            })
            .collect::<Result<Vec<_>>>()?;

        let registry = Self::from_slides(title, slides)?;
        debug!(slides = registry.len(), "Parsed slide manifest");
        Ok(registry)
    }

    /// Load a JSON manifest from disk
    pub fn load(path: impl AsRef<Path>, default_duration: Duration) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&json, default_duration)?;
        info!(
            path = %path.display(),
            slides = registry.len(),
            "Loaded slide registry"
        );
        Ok(registry)
    }

    /// Deck title, if the manifest declared one
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of slides (always at least one)
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the last slide
    pub fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }

    /// Slide at `index`
    pub fn get(&self, index: usize) -> Option<&SlideDescriptor> {
        self.slides.get(index)
    }

    /// Navigation position of the slide with `id`
    pub fn position_of(&self, id: &SlideId) -> Option<usize> {
        self.slides.iter().position(|slide| &slide.id == id)
    }

    /// Slides in navigation order
    pub fn iter(&self) -> std::slice::Iter<'_, SlideDescriptor> {
        self.slides.iter()
    }

    /// Sum of all slide durations
    pub fn total_duration(&self) -> Duration {
        self.slides
            .iter()
            .map(SlideDescriptor::duration)
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl std::ops::Index<usize> for SlideRegistry {
    type Output = SlideDescriptor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slides[index]
    }
}

impl<'a> IntoIterator for &'a SlideRegistry {
    type Item = &'a SlideDescriptor;
    type IntoIter = std::slice::Iter<'a, SlideDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}
