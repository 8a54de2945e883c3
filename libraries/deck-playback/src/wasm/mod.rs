//! WASM bindings for deck-playback
//!
//! This module provides WebAssembly bindings for the PresentationEngine,
//! backed by a JavaScript audio transport and the page's URL fragment.

pub mod binding;
pub mod player;
pub mod transport;

pub use binding::HashBinding;
pub use player::WasmPresentationPlayer;
pub use transport::JsTransport;
