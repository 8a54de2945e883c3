//! Narrated Deck Core
//!
//! Platform-agnostic types and error handling shared by every Narrated Deck host.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `SlideId`, `SlideDescriptor`
//! - **Slide Registry**: the ordered, immutable deck loaded once from a manifest
//! - **Asset Addressing**: the `{id}` template that maps a slide to its narration track
//! - **Diagram Rendering**: a caller-owned render id generator and raw-text fallback
//! - **Error Handling**: unified `DeckError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use deck_core::{AssetTemplate, SlideRegistry};
//! use std::time::Duration;
//!
//! let manifest = r#"{
//!     "title": "Sleep and Code Quality",
//!     "slides": [
//!         { "id": "s1", "durationSeconds": 12 },
//!         { "id": "s2", "duration": 30, "speakerNotes": "Pause for questions" }
//!     ]
//! }"#;
//!
//! let registry = SlideRegistry::from_json(manifest, Duration::from_secs(10)).unwrap();
//! assert_eq!(registry.len(), 2);
//!
//! let template = AssetTemplate::default();
//! let asset = template.resolve(&registry.get(1).unwrap().id);
//! assert_eq!(asset.as_str(), "/audio/slide-s2.mp3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod asset;
pub mod diagram;
pub mod error;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use asset::{AssetAddress, AssetTemplate};
pub use diagram::{
    render_or_fallback, DiagramRenderer, RenderId, RenderIdGenerator, RenderedDiagram,
};
pub use error::{DeckError, Result};
pub use registry::SlideRegistry;
pub use types::{ManifestSlide, SlideDescriptor, SlideId};
