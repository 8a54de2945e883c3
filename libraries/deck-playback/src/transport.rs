//! Platform-agnostic audio transport
//!
//! Abstracts the narration player for different hosts (browser `<audio>`
//! element, native decoder, none at all).

use deck_core::AssetAddress;
use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};
use crate::types::{TrackToken, TransportMode};

/// Narration transport commanded by the engine
///
/// The engine is the only owner. Every command that concerns one asset
/// carries the [`TrackToken`] of that load; asynchronous outcomes must be
/// reported back to the engine with the same token.
pub trait Transport {
    /// Point the transport at a new asset
    ///
    /// Loading never starts playback. Position and duration restart at zero.
    fn load(&mut self, asset: &AssetAddress, token: TrackToken);

    /// Start or resume playback of the loaded asset
    ///
    /// # Returns
    /// * `Ok(())` - Command accepted; the outcome may still arrive later as a
    ///   rejection or a started notification
    /// * `Err(_)` - Rejected immediately; the engine falls back to a timer
    fn play(&mut self, token: TrackToken) -> Result<()>;

    /// Pause, keeping position
    fn pause(&mut self);

    /// Stop and unload synchronously
    fn stop(&mut self);

    /// Move the play head (seconds)
    fn seek(&mut self, position_secs: f64);

    /// Whether this transport can produce audio at all
    fn mode(&self) -> TransportMode {
        TransportMode::Audio
    }
}

/// Asynchronous outcome reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransportEvent {
    /// Playback actually began
    Started,
    /// Play head moved (seconds)
    PositionTick {
        /// Position in seconds
        position: f64,
    },
    /// Track length became known (seconds)
    DurationKnown {
        /// Duration in seconds
        duration: f64,
    },
    /// Reached end of track
    Ended,
    /// Play was refused or the asset failed to load
    Rejected,
}

/// Transport for hosts without audio output
///
/// Every play is rejected, so each slide advances on its duration timer.
#[derive(Debug, Clone, Default)]
pub struct NullTransport {
    loaded: Option<TrackToken>,
}

impl NullTransport {
    /// Create a null transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the last load, if not stopped since
    pub fn loaded(&self) -> Option<TrackToken> {
        self.loaded
    }
}

impl Transport for NullTransport {
    fn load(&mut self, _asset: &AssetAddress, token: TrackToken) {
        self.loaded = Some(token);
    }

    fn play(&mut self, _token: TrackToken) -> Result<()> {
        Err(PlaybackError::NoAudioBackend)
    }

    fn pause(&mut self) {}

    fn stop(&mut self) {
        self.loaded = None;
    }

    fn seek(&mut self, _position_secs: f64) {}

    fn mode(&self) -> TransportMode {
        TransportMode::Timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{AssetTemplate, SlideId};

    #[test]
    fn null_transport_rejects_every_play() {
        let mut transport = NullTransport::new();
        let token = TrackToken::new(0, 1);
        let asset = AssetTemplate::default().resolve(&SlideId::new("1"));

        transport.load(&asset, token);
        assert_eq!(transport.loaded(), Some(token));
        assert!(matches!(
            transport.play(token),
            Err(PlaybackError::NoAudioBackend)
        ));
        assert_eq!(transport.mode(), TransportMode::Timer);

        transport.stop();
        assert_eq!(transport.loaded(), None);
    }

    #[test]
    fn transport_event_json_shape() {
        let json = serde_json::to_string(&TransportEvent::PositionTick { position: 1.5 }).unwrap();
        assert_eq!(json, r#"{"type":"positionTick","position":1.5}"#);
    }
}
