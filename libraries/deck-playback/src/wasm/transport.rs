//! Transport backed by JavaScript callbacks

use deck_core::AssetAddress;
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{PlaybackError, Result};
use crate::transport::Transport;
use crate::types::TrackToken;

/// Forwards transport commands to a JS object
///
/// The object must provide `load(asset, slideIndex, generation)`,
/// `play(slideIndex, generation)`, `pause()`, `stop()` and `seek(seconds)`.
/// A throwing `play` counts as an immediate rejection; asynchronous outcomes
/// are reported back through the player with the same index and generation.
pub struct JsTransport {
    load: Function,
    play: Function,
    pause: Function,
    stop: Function,
    seek: Function,
}

fn method(target: &JsValue, name: &str) -> std::result::Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("transport.{} must be a function", name)))
}

fn token_args(token: TrackToken) -> (JsValue, JsValue) {
    (
        JsValue::from_f64(token.slide_index as f64),
        JsValue::from_f64(token.generation as f64),
    )
}

impl JsTransport {
    /// Wrap a JS transport object
    pub fn from_js(target: &JsValue) -> std::result::Result<Self, JsValue> {
        Ok(Self {
            load: method(target, "load")?,
            play: method(target, "play")?,
            pause: method(target, "pause")?,
            stop: method(target, "stop")?,
            seek: method(target, "seek")?,
        })
    }
}

impl Transport for JsTransport {
    fn load(&mut self, asset: &AssetAddress, token: TrackToken) {
        let (index, generation) = token_args(token);
        self.load
            .call3(
                &JsValue::NULL,
                &JsValue::from_str(asset.as_str()),
                &index,
                &generation,
            )
            .ok();
    }

    fn play(&mut self, token: TrackToken) -> Result<()> {
        let (index, generation) = token_args(token);
        self.play
            .call2(&JsValue::NULL, &index, &generation)
            .map(|_| ())
            .map_err(|e| PlaybackError::Rejected(format!("{:?}", e)))
    }

    fn pause(&mut self) {
        self.pause.call0(&JsValue::NULL).ok();
    }

    fn stop(&mut self) {
        self.stop.call0(&JsValue::NULL).ok();
    }

    fn seek(&mut self, position_secs: f64) {
        self.seek
            .call1(&JsValue::NULL, &JsValue::from_f64(position_secs))
            .ok();
    }
}
