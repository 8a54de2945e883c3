/// Common test utilities and fixtures
use deck_core::{AssetAddress, SlideDescriptor, SlideRegistry};
use deck_playback::{
    MemoryAddressBinding, PlaybackError, PlayerOptions, PresentationEngine, Result, TrackToken,
    Transport,
};
use std::sync::Arc;

/// Command received by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String, TrackToken),
    Play(TrackToken),
    Pause,
    Stop,
    Seek(f64),
}

/// Transport double that records commands and can refuse to play
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub commands: Vec<Command>,
    pub reject_play: bool,
}

impl RecordingTransport {
    pub fn rejecting() -> Self {
        Self {
            commands: Vec::new(),
            reject_play: true,
        }
    }

    /// Asset of the most recent load
    pub fn last_loaded(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Load(asset, _) => Some(asset.as_str()),
            _ => None,
        })
    }

    /// Token of the most recent play command
    pub fn last_played(&self) -> Option<TrackToken> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Play(token) => Some(*token),
            _ => None,
        })
    }

    pub fn count(&self, wanted: fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| wanted(c)).count()
    }
}

impl Transport for RecordingTransport {
    fn load(&mut self, asset: &AssetAddress, token: TrackToken) {
        self.commands.push(Command::Load(asset.to_string(), token));
    }

    fn play(&mut self, token: TrackToken) -> Result<()> {
        self.commands.push(Command::Play(token));
        if self.reject_play {
            Err(PlaybackError::Rejected("NotAllowedError".to_string()))
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn stop(&mut self) {
        self.commands.push(Command::Stop);
    }

    fn seek(&mut self, position_secs: f64) {
        self.commands.push(Command::Seek(position_secs));
    }
}

pub type TestEngine = PresentationEngine<RecordingTransport, MemoryAddressBinding>;

/// Deck of `n` slides with ids "1".."n", each `secs` long
pub fn deck(n: usize, secs: f64) -> Arc<SlideRegistry> {
    let slides = (1..=n)
        .map(|i| SlideDescriptor::new(i.to_string(), secs))
        .collect();
    Arc::new(SlideRegistry::from_slides(Some("Test deck".to_string()), slides).unwrap())
}

/// Engine over `deck(n, 30.0)` with a fresh binding
pub fn engine(n: usize) -> (TestEngine, MemoryAddressBinding) {
    engine_with(n, RecordingTransport::default(), MemoryAddressBinding::new())
}

pub fn engine_with(
    n: usize,
    transport: RecordingTransport,
    binding: MemoryAddressBinding,
) -> (TestEngine, MemoryAddressBinding) {
    let engine = PresentationEngine::new(
        deck(n, 30.0),
        transport,
        binding.clone(),
        PlayerOptions::default(),
    )
    .unwrap();
    (engine, binding)
}
