//! Playback synchronization engine
//!
//! Ties slide position, narration transport, the fallback timer and the
//! deep-link address into one model. Every mutation goes through here.

use deck_core::{SlideDescriptor, SlideRegistry};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::address::{Address, AddressBinding};
use crate::error::Result;
use crate::events::PresentationEvent;
use crate::input::{map_control, map_key, Control, Intent, KeyBinding, KeyEvent};
use crate::timer::FallbackTimer;
use crate::transport::{Transport, TransportEvent};
use crate::types::{PlaybackState, PlayerOptions, TrackToken, TransportMode};
use crate::view::PlayerView;

/// Central presentation controller
///
/// Owns:
/// - Slide position (always within the deck)
/// - Play intent and transport position/duration
/// - The fallback timer used when narration cannot play
/// - The address binding, kept equal to the current slide
///
/// Single-threaded. Hosts call intents and forward transport callbacks, then
/// drain [`PresentationEvent`]s to refresh their surface.
pub struct PresentationEngine<T: Transport, B: AddressBinding> {
    registry: Arc<SlideRegistry>,
    transport: T,
    binding: B,
    options: PlayerOptions,

    // State
    state: PlaybackState,
    generation: u64,
    completed: bool,
    shut_down: bool,

    // Auto-advance without audio
    timer: FallbackTimer,
    rejected: Option<TrackToken>,

    // Event queue for host synchronization
    pending_events: Vec<PresentationEvent>,
}

impl<T: Transport, B: AddressBinding> PresentationEngine<T, B> {
    /// Create an engine and load the initial slide
    ///
    /// The initial slide is the one named by the binding's address when it
    /// is valid and in range, else `options.start_slide` (clamped), else the
    /// first. The asset is loaded and, with `autoplay`, play is commanded.
    pub fn new(
        registry: Arc<SlideRegistry>,
        transport: T,
        binding: B,
        options: PlayerOptions,
    ) -> Result<Self> {
        if registry.is_empty() {
            return Err(deck_core::DeckError::EmptyDeck.into());
        }

        let last = registry.last_index();
        let from_address = binding
            .read()
            .as_deref()
            .and_then(Address::parse)
            .map(Address::index)
            .filter(|index| *index <= last);
        let initial = from_address
            .or_else(|| options.start_slide.map(|slide| slide.min(last)))
            .unwrap_or(0);

        let autoplay = options.autoplay;
        let mut engine = Self {
            registry,
            transport,
            binding,
            options,
            state: PlaybackState::at(initial),
            generation: 0,
            completed: false,
            shut_down: false,
            timer: FallbackTimer::new(),
            rejected: None,
            pending_events: Vec::new(),
        };

        info!(
            slides = engine.registry.len(),
            start = initial + 1,
            autoplay,
            "Presentation engine ready"
        );
        engine.enter_slide(None);

        if autoplay {
            engine.set_playing(true);
            engine.start_playback();
        }

        Ok(engine)
    }

    // ===== Navigation =====

    /// Jump to a 0-based slide, clamped to the deck
    ///
    /// No-op when the (clamped) index is already current.
    pub fn go_to(&mut self, index: usize) {
        if self.shut_down {
            return;
        }
        let index = index.min(self.registry.last_index());
        if index == self.state.current_index {
            return;
        }
        self.transition(index);
    }

    /// Advance one slide; no-op on the last
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.state.current_index < self.registry.last_index() {
            self.go_to(self.state.current_index + 1);
        }
    }

    /// Go back one slide; no-op on the first
    pub fn previous(&mut self) {
        if let Some(index) = self.state.current_index.checked_sub(1) {
            self.go_to(index);
        }
    }

    /// Jump to the first slide
    pub fn first(&mut self) {
        self.go_to(0);
    }

    /// Jump to the last slide
    pub fn last(&mut self) {
        self.go_to(self.registry.last_index());
    }

    // ===== Playback Control =====

    /// Flip play intent and command the transport
    pub fn toggle_play(&mut self) {
        if self.shut_down {
            return;
        }

        let playing = !self.state.is_playing;
        self.set_playing(playing);

        if playing {
            self.completed = false;
            self.start_playback();
        } else {
            self.cancel_fallback();
            self.transport.pause();
        }
    }

    /// Flip speaker notes visibility
    pub fn toggle_notes(&mut self) {
        self.state.show_notes = !self.state.show_notes;
        self.pending_events.push(PresentationEvent::NotesToggled {
            visible: self.state.show_notes,
        });
    }

    /// Flip narration script visibility
    pub fn toggle_narration(&mut self) {
        self.state.show_narration = !self.state.show_narration;
        self.pending_events.push(PresentationEvent::NarrationToggled {
            visible: self.state.show_narration,
        });
    }

    // ===== Seek =====

    /// Seek to a fraction of the track (clamped to 0.0 - 1.0)
    ///
    /// Ignored while the duration is unknown or for a non-finite fraction.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() || !self.state.duration_known() {
            debug!(fraction, "Seek ignored");
            return;
        }
        let target = fraction.clamp(0.0, 1.0) * self.state.duration;
        self.apply_seek(target);
    }

    /// Seek to a position in seconds (clamped to the track)
    pub fn seek_to(&mut self, position_secs: f64) {
        if !position_secs.is_finite() || !self.state.duration_known() {
            debug!(position_secs, "Seek ignored");
            return;
        }
        let target = position_secs.clamp(0.0, self.state.duration);
        self.apply_seek(target);
    }

    fn apply_seek(&mut self, target: f64) {
        self.transport.seek(target);
        self.state.position = target;
        self.emit_position();
    }

    // ===== Transport Callbacks =====

    /// Transport reported a new position (seconds)
    pub fn on_position_tick(&mut self, token: TrackToken, position: f64) {
        if !self.accept(token) {
            return;
        }
        if !position.is_finite() || position < 0.0 {
            return;
        }

        self.state.position = if self.state.duration_known() {
            position.min(self.state.duration)
        } else {
            position
        };
        self.emit_position();
    }

    /// Transport learned the track length (seconds)
    ///
    /// Non-finite or negative values (live streams) leave the duration unknown.
    pub fn on_duration_known(&mut self, token: TrackToken, duration: f64) {
        if !self.accept(token) {
            return;
        }
        if !duration.is_finite() || duration < 0.0 {
            debug!(duration, "Unusable track duration ignored");
            return;
        }

        self.state.duration = duration;
        if duration > 0.0 && self.state.position > duration {
            self.state.position = duration;
        }
        self.pending_events
            .push(PresentationEvent::DurationKnown { duration });
    }

    /// Transport reached the end of the track
    pub fn on_track_ended(&mut self, token: TrackToken) {
        if !self.accept(token) {
            return;
        }
        self.cancel_fallback();

        if self.state.is_playing {
            self.finish_slide();
        }
    }

    /// Transport refused to play, or the asset could not be loaded
    ///
    /// While playing, arms the fallback timer for the slide's duration. While
    /// paused, the rejection is only recorded.
    pub fn on_playback_rejected(&mut self, token: TrackToken) {
        if !self.accept(token) {
            return;
        }
        self.handle_rejection(token);
    }

    /// Transport confirmed audio is actually playing
    pub fn on_playback_started(&mut self, token: TrackToken) {
        if !self.accept(token) {
            return;
        }
        self.rejected = None;
        self.cancel_fallback();
    }

    /// Dispatch a transport callback
    pub fn handle_transport_event(&mut self, token: TrackToken, event: TransportEvent) {
        match event {
            TransportEvent::Started => self.on_playback_started(token),
            TransportEvent::PositionTick { position } => self.on_position_tick(token, position),
            TransportEvent::DurationKnown { duration } => self.on_duration_known(token, duration),
            TransportEvent::Ended => self.on_track_ended(token),
            TransportEvent::Rejected => self.on_playback_rejected(token),
        }
    }

    // ===== Time =====

    /// Consume elapsed wall time; fires the fallback timer when due
    pub fn advance_clock(&mut self, elapsed: Duration) {
        let Some(token) = self.timer.advance(elapsed) else {
            return;
        };
        if !self.is_current(token) {
            return;
        }

        debug!(slide = token.slide_index + 1, "Fallback timer fired");
        self.pending_events.push(PresentationEvent::FallbackFired {
            index: token.slide_index,
        });

        if self.state.is_playing {
            self.finish_slide();
        }
    }

    // ===== Address =====

    /// Apply an address changed outside the engine
    ///
    /// Returns false when the address is malformed or out of range; state is
    /// unchanged in that case.
    pub fn on_address_changed(&mut self, raw: &str) -> bool {
        match Address::parse(raw) {
            Some(address) if address.index() < self.registry.len() => {
                self.go_to(address.index());
                true
            }
            Some(address) => {
                debug!(address = %address, "Address out of range ignored");
                false
            }
            None => {
                debug!(raw, "Malformed address ignored");
                false
            }
        }
    }

    /// Pull and apply every pending external address change
    pub fn poll_address(&mut self) {
        while let Some(raw) = self.binding.poll_external_change() {
            self.on_address_changed(&raw);
        }
    }

    // ===== Input =====

    /// Execute an intent
    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::First => self.first(),
            Intent::Last => self.last(),
            Intent::GoTo(index) => self.go_to(index),
            Intent::TogglePlay => self.toggle_play(),
            Intent::ToggleNotes => self.toggle_notes(),
            Intent::ToggleNarration => self.toggle_narration(),
            Intent::Seek(fraction) => self.seek(fraction),
        }
    }

    /// Map and execute a key press
    ///
    /// Returns the binding so the host can suppress the platform default.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<KeyBinding> {
        let binding = map_key(event)?;
        self.handle_intent(binding.intent);
        Some(binding)
    }

    /// Map and execute an on-screen control
    pub fn handle_control(&mut self, control: Control) {
        if let Some(intent) = map_control(control) {
            self.handle_intent(intent);
        }
    }

    // ===== State Queries =====

    /// Current session state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Descriptor of the current slide
    pub fn current_slide(&self) -> &SlideDescriptor {
        &self.registry[self.state.current_index]
    }

    /// The deck
    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    /// Engine options
    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// Token of the current load
    pub fn track_token(&self) -> TrackToken {
        TrackToken::new(self.state.current_index, self.generation)
    }

    /// Address of the current slide
    pub fn address(&self) -> Address {
        Address::from_index(self.state.current_index)
    }

    /// Time left on the fallback timer
    pub fn fallback_remaining(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    /// Last slide finished while playing
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Whether audio or the fallback timer currently drives auto-advance
    pub fn transport_mode(&self) -> TransportMode {
        if self.timer.is_armed() || self.rejected.is_some() {
            TransportMode::Timer
        } else {
            self.transport.mode()
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> PlayerView {
        let state = &self.state;
        let progress = if state.duration_known() {
            (state.position / state.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        PlayerView {
            title: self.registry.title().map(str::to_string),
            current_index: state.current_index,
            total: self.registry.len(),
            is_playing: state.is_playing,
            position: state.position,
            duration: state.duration,
            progress,
            show_notes: state.show_notes,
            show_narration: state.show_narration,
            slide: self.current_slide().clone(),
            address: self.address().to_string(),
            can_go_previous: state.current_index > 0,
            can_go_next: state.current_index < self.registry.last_index(),
            is_complete: self.completed,
            transport_mode: self.transport_mode(),
            fallback_remaining: self.timer.remaining().map(|d| d.as_secs_f64()),
        }
    }

    /// Transport handle
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable transport handle
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Address binding
    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// Mutable address binding, for hosts that feed it external changes
    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Teardown =====

    /// Cancel the fallback timer and stop the transport
    ///
    /// Idempotent. Later callbacks are discarded and intents ignored.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.cancel_fallback();
        self.transport.stop();
        if self.state.is_playing {
            self.set_playing(false);
        }
        self.shut_down = true;
        info!("Presentation engine shut down");
    }

    // ===== Internal =====

    /// Slide transition: stop, reset, address, load, then resume intent
    fn transition(&mut self, index: usize) {
        let previous = self.state.current_index;

        self.cancel_fallback();
        self.transport.stop();

        self.state.current_index = index;
        self.state.position = 0.0;
        self.state.duration = 0.0;
        self.rejected = None;
        self.completed = false;

        info!(from = previous + 1, to = index + 1, "Slide changed");
        self.enter_slide(Some(previous));

        if self.state.is_playing {
            self.start_playback();
        }
    }

    /// Write the address and load the current slide's asset
    fn enter_slide(&mut self, previous_index: Option<usize>) {
        let index = self.state.current_index;
        let address = Address::from_index(index);
        self.binding.write(address);
        self.pending_events.push(PresentationEvent::AddressChanged {
            address: address.to_string(),
        });

        self.generation += 1;
        let token = self.track_token();
        let slide = &self.registry[index];
        let asset = self.options.asset_template.resolve(&slide.id);
        debug!(asset = %asset, generation = token.generation, "Loading narration");
        self.transport.load(&asset, token);

        self.pending_events.push(PresentationEvent::SlideChanged {
            index,
            previous_index,
            slide_id: slide.id.to_string(),
            asset: asset.to_string(),
        });
    }

    fn start_playback(&mut self) {
        let token = self.track_token();
        match self.transport.play(token) {
            Ok(()) => debug!(slide = token.slide_index + 1, "Play commanded"),
            Err(e) => {
                debug!(slide = token.slide_index + 1, error = %e, "Play rejected");
                self.handle_rejection(token);
            }
        }
    }

    fn handle_rejection(&mut self, token: TrackToken) {
        self.rejected = Some(token);

        if !self.state.is_playing {
            debug!(slide = token.slide_index + 1, "Rejected while paused, no timer");
            return;
        }
        if self.timer.is_armed_for(token) {
            return;
        }

        let slide = &self.registry[token.slide_index];
        let seconds = slide.duration_seconds;
        self.timer.arm(token, slide.duration());
        debug!(slide = token.slide_index + 1, seconds, "Fallback timer armed");
        self.pending_events.push(PresentationEvent::FallbackArmed {
            index: token.slide_index,
            seconds,
        });
    }

    fn cancel_fallback(&mut self) {
        if let Some(token) = self.timer.cancel() {
            debug!(slide = token.slide_index + 1, "Fallback timer cancelled");
            self.pending_events.push(PresentationEvent::FallbackCancelled {
                index: token.slide_index,
            });
        }
    }

    /// Current slide ran to its end while playing
    fn finish_slide(&mut self) {
        let index = self.state.current_index;
        if index < self.registry.last_index() {
            self.transition(index + 1);
        } else {
            self.completed = true;
            self.set_playing(false);
            self.transport.pause();
            info!("Deck complete");
            self.pending_events.push(PresentationEvent::DeckCompleted);
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.state.is_playing = playing;
        self.pending_events
            .push(PresentationEvent::PlayStateChanged { is_playing: playing });
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PresentationEvent::PositionUpdate {
            position: self.state.position,
            duration: self.state.duration,
        });
    }

    fn is_current(&self, token: TrackToken) -> bool {
        !self.shut_down && token == self.track_token()
    }

    /// Check a callback token, recording it when stale
    fn accept(&mut self, token: TrackToken) -> bool {
        if self.is_current(token) {
            return true;
        }
        debug!(
            slide = token.slide_index + 1,
            generation = token.generation,
            "Stale transport callback discarded"
        );
        self.pending_events
            .push(PresentationEvent::StaleCallbackDiscarded {
                index: token.slide_index,
                generation: token.generation,
            });
        false
    }
}

impl<T: Transport, B: AddressBinding> Drop for PresentationEngine<T, B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
