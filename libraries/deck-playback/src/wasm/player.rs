//! WASM-compatible PresentationEngine wrapper

use deck_core::SlideRegistry;
use js_sys::Function;
use std::sync::Arc;
use std::time::Duration;
use wasm_bindgen::prelude::*;

use super::binding::HashBinding;
use super::transport::JsTransport;
use crate::input::{Key, KeyEvent};
use crate::types::TrackToken;
use crate::{format_clock, PlayerOptions, PresentationEngine};

/// Duration given to slides whose manifest entry has none
const DEFAULT_SLIDE_SECS: u64 = 10;

/// WASM-compatible presentation player
///
/// This wraps the core PresentationEngine with a JavaScript-friendly API.
/// Transport callbacks take the `(slideIndex, generation)` pair the transport
/// was given on `load`.
#[wasm_bindgen]
pub struct WasmPresentationPlayer {
    inner: PresentationEngine<JsTransport, HashBinding>,

    // Event callback
    on_events: Option<Function>,
}

#[wasm_bindgen]
impl WasmPresentationPlayer {
    /// Create a player from a manifest, a transport object and options
    #[wasm_bindgen(constructor)]
    pub fn new(
        manifest_json: &str,
        transport: JsValue,
        options: JsValue,
    ) -> Result<WasmPresentationPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let registry =
            SlideRegistry::from_json(manifest_json, Duration::from_secs(DEFAULT_SLIDE_SECS))
                .map_err(|e| JsValue::from_str(&format!("Failed to load manifest: {}", e)))?;

        let options: PlayerOptions = if options.is_undefined() || options.is_null() {
            PlayerOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
        };

        let inner = PresentationEngine::new(
            Arc::new(registry),
            JsTransport::from_js(&transport)?,
            HashBinding::new(),
            options,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            inner,
            on_events: None,
        })
    }

    // ===== Navigation =====

    /// Advance one slide
    pub fn next(&mut self) {
        self.inner.next();
        self.flush();
    }

    /// Go back one slide
    pub fn previous(&mut self) {
        self.inner.previous();
        self.flush();
    }

    /// Jump to a 0-based slide (clamped); non-finite indices are ignored
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: f64) {
        if let Some(index) = slide_index(index) {
            self.inner.go_to(index);
        }
        self.flush();
    }

    // ===== Playback Control =====

    /// Flip play intent
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
        self.flush();
    }

    /// Flip speaker notes
    #[wasm_bindgen(js_name = toggleNotes)]
    pub fn toggle_notes(&mut self) {
        self.inner.toggle_notes();
        self.flush();
    }

    /// Flip narration script
    #[wasm_bindgen(js_name = toggleNarration)]
    pub fn toggle_narration(&mut self) {
        self.inner.toggle_narration();
        self.flush();
    }

    /// Seek to a fraction of the track (0.0 - 1.0)
    pub fn seek(&mut self, fraction: f64) {
        self.inner.seek(fraction);
        self.flush();
    }

    /// Seek to a position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, position_secs: f64) {
        self.inner.seek_to(position_secs);
        self.flush();
    }

    /// Progress bar click
    #[wasm_bindgen(js_name = clickProgress)]
    pub fn click_progress(&mut self, x: f64, width: f64) {
        self.inner
            .handle_control(crate::input::Control::ProgressBar { x, width });
        self.flush();
    }

    // ===== Host Input =====

    /// Handle a `keydown`; returns true when the page must call `preventDefault()`
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, editable_target: bool, modifier: bool) -> bool {
        let event = KeyEvent {
            key: Key::from_dom_key(key),
            editable_target,
            modifier,
        };
        let prevent = self
            .inner
            .handle_key(&event)
            .is_some_and(|binding| binding.prevent_default);
        self.flush();
        prevent
    }

    /// Forward a `hashchange`
    #[wasm_bindgen(js_name = onHashChange)]
    pub fn on_hash_change(&mut self, hash: String) {
        self.inner.binding_mut().push_external(hash);
        self.inner.poll_address();
        self.flush();
    }

    /// Report elapsed milliseconds (from `setInterval` or animation frames)
    pub fn tick(&mut self, elapsed_ms: f64) {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return;
        }
        let elapsed = Duration::try_from_secs_f64(elapsed_ms / 1000.0).unwrap_or(Duration::MAX);
        self.inner.advance_clock(elapsed);
        self.flush();
    }

    // ===== Transport Callbacks =====

    /// `timeupdate`
    #[wasm_bindgen(js_name = onPositionTick)]
    pub fn on_position_tick(&mut self, slide_index: usize, generation: f64, position: f64) {
        self.inner
            .on_position_tick(token(slide_index, generation), position);
        self.flush();
    }

    /// `loadedmetadata`
    #[wasm_bindgen(js_name = onDurationKnown)]
    pub fn on_duration_known(&mut self, slide_index: usize, generation: f64, duration: f64) {
        self.inner
            .on_duration_known(token(slide_index, generation), duration);
        self.flush();
    }

    /// `ended`
    #[wasm_bindgen(js_name = onTrackEnded)]
    pub fn on_track_ended(&mut self, slide_index: usize, generation: f64) {
        self.inner.on_track_ended(token(slide_index, generation));
        self.flush();
    }

    /// `play()` promise rejected, or `error`
    #[wasm_bindgen(js_name = onPlaybackRejected)]
    pub fn on_playback_rejected(&mut self, slide_index: usize, generation: f64) {
        self.inner
            .on_playback_rejected(token(slide_index, generation));
        self.flush();
    }

    /// `playing`
    #[wasm_bindgen(js_name = onPlaybackStarted)]
    pub fn on_playback_started(&mut self, slide_index: usize, generation: f64) {
        self.inner
            .on_playback_started(token(slide_index, generation));
        self.flush();
    }

    // ===== State Queries =====

    /// Current view as a plain object
    pub fn view(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.view()).unwrap_or(JsValue::NULL)
    }

    /// Events recorded since the last drain (when no callback is set)
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> JsValue {
        let events = self.inner.drain_events();
        serde_wasm_bindgen::to_value(&events).unwrap_or(JsValue::NULL)
    }

    /// `m:ss` clock text
    #[wasm_bindgen(js_name = formatClock)]
    pub fn format_clock(seconds: f64) -> String {
        format_clock(seconds)
    }

    // ===== Event Callbacks =====

    /// Receive event batches as they happen instead of draining
    #[wasm_bindgen(js_name = setOnEvents)]
    pub fn set_on_events(&mut self, callback: Function) {
        self.on_events = Some(callback);
        self.flush();
    }

    /// Cancel timers and stop the transport
    pub fn shutdown(&mut self) {
        self.inner.shutdown();
        self.flush();
    }

    // ===== Internal =====

    fn flush(&mut self) {
        let Some(ref cb) = self.on_events else {
            return;
        };
        if !self.inner.has_pending_events() {
            return;
        }
        let events = self.inner.drain_events();
        if let Ok(js_events) = serde_wasm_bindgen::to_value(&events) {
            cb.call1(&JsValue::NULL, &js_events).ok();
        }
    }
}

fn token(slide_index: usize, generation: f64) -> TrackToken {
    TrackToken::new(slide_index, generation as u64)
}

/// JS number to a slide index: negatives clamp to 0, fractions floor
fn slide_index(value: f64) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    Some(value.max(0.0).floor() as usize)
}
