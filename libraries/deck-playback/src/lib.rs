//! Narrated Deck - Playback Synchronization
//!
//! Platform-agnostic presentation playback for Narrated Deck.
//!
//! This crate provides:
//! - Slide navigation (next, previous, jump, clamped to the deck)
//! - Narration transport control (play, pause, seek)
//! - Auto-advance on track end, or on a per-slide timer when audio is refused
//! - Two-way deep-link address binding (`#/slide/N`)
//! - Keyboard and on-screen control mapping
//! - An event queue and read-only view for hosts
//!
//! # Architecture
//!
//! `deck-playback` is completely host-agnostic:
//! - No DOM access outside the optional `wasm` bindings
//! - No wall clock: hosts report elapsed time
//! - No global state: the address lives behind [`AddressBinding`]
//!
//! Host-specific code (audio element, hash location) is provided via traits.
//!
//! # Example: Timer-only playback
//!
//! ```rust
//! use deck_core::{SlideDescriptor, SlideRegistry};
//! use deck_playback::{MemoryAddressBinding, NullTransport, PlayerOptions, PresentationEngine};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let registry = SlideRegistry::from_slides(
//!     None,
//!     vec![SlideDescriptor::new("1", 5.0), SlideDescriptor::new("2", 5.0)],
//! )
//! .unwrap();
//!
//! let mut engine = PresentationEngine::new(
//!     Arc::new(registry),
//!     NullTransport::new(),
//!     MemoryAddressBinding::new(),
//!     PlayerOptions::default(),
//! )
//! .unwrap();
//!
//! // No audio backend: play is refused and the slide runs on its timer
//! engine.toggle_play();
//! engine.advance_clock(Duration::from_secs(5));
//!
//! assert_eq!(engine.state().current_index, 1);
//! assert_eq!(engine.address().to_string(), "slide/2");
//! ```
//!
//! # Example: Host integration
//!
//! ```rust,no_run
//! use deck_core::AssetAddress;
//! use deck_playback::{Result, TrackToken, Transport};
//!
//! // Implement Transport for your host
//! struct MyAudioElement {
//!     // ... host-specific handle
//! }
//!
//! impl Transport for MyAudioElement {
//!     fn load(&mut self, asset: &AssetAddress, token: TrackToken) {
//!         // Set the source; report events back with `token`
//!     }
//!
//!     fn play(&mut self, token: TrackToken) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) {}
//!
//!     fn stop(&mut self) {}
//!
//!     fn seek(&mut self, position_secs: f64) {}
//! }
//! ```

mod address;
mod engine;
mod error;
mod events;
mod input;
mod timer;
mod transport;
pub mod types;
mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use address::{Address, AddressBinding, MemoryAddressBinding};
pub use engine::PresentationEngine;
pub use error::{PlaybackError, Result};
pub use events::PresentationEvent;
pub use input::{map_control, map_key, Control, Intent, Key, KeyBinding, KeyEvent};
pub use timer::FallbackTimer;
pub use transport::{NullTransport, Transport, TransportEvent};
pub use types::{PlaybackState, PlayerOptions, TrackToken, TransportMode};
pub use view::{format_clock, PlayerView};
