//! End-to-end tests for PresentationEngine
//!
//! Covers navigation, transport callbacks, the fallback timer and the
//! address binding working together:
//! - Navigation clamping and boundaries
//! - Slide transitions resetting transport state
//! - Auto-advance on track end and on the fallback timer
//! - Stale callback rejection
//! - Teardown

mod common;

use common::{deck, engine, engine_with, Command, RecordingTransport};
use deck_playback::{
    Intent, Key, KeyEvent, MemoryAddressBinding, NullTransport, PlayerOptions,
    PresentationEngine, PresentationEvent, TrackToken, TransportEvent, TransportMode,
};
use std::time::Duration;

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_go_to_every_index_updates_address() {
    let (mut engine, binding) = engine(6);

    for i in (0..6).rev().chain(0..6) {
        engine.go_to(i);
        assert_eq!(engine.state().current_index, i);
        assert_eq!(binding.current(), Some(format!("slide/{}", i + 1)));
    }
}

#[test]
fn test_boundaries_are_no_ops() {
    let (mut engine, binding) = engine(3);
    let writes = binding.history().len();

    engine.previous();
    assert_eq!(engine.state().current_index, 0);

    engine.go_to(2);
    engine.next();
    assert_eq!(engine.state().current_index, 2);

    // one write for go_to(2) only
    assert_eq!(binding.history().len(), writes + 1);
}

#[test]
fn test_go_to_out_of_range_clamps() {
    let (mut engine, _) = engine(4);
    engine.go_to(99);
    assert_eq!(engine.state().current_index, 3);
    assert_eq!(engine.address().to_string(), "slide/4");
}

#[test]
fn test_go_to_current_is_a_no_op() {
    let (mut engine, _) = engine(4);
    engine.go_to(1);
    engine.drain_events();
    engine.transport_mut().commands.clear();

    engine.go_to(1);

    assert!(engine.transport().commands.is_empty());
    assert!(!engine.has_pending_events());
}

#[test]
fn test_transition_resets_position_and_duration() {
    let (mut engine, _) = engine(3);
    let token = engine.track_token();
    engine.on_duration_known(token, 42.0);
    engine.on_position_tick(token, 17.5);
    assert_eq!(engine.state().position, 17.5);

    engine.next();

    assert_eq!(engine.state().position, 0.0);
    assert_eq!(engine.state().duration, 0.0);
    assert_eq!(engine.view().progress, 0.0);
}

#[test]
fn test_home_and_end_keys() {
    let (mut engine, _) = engine(5);

    engine.handle_key(&KeyEvent::plain(Key::End));
    assert_eq!(engine.state().current_index, 4);

    engine.handle_key(&KeyEvent::plain(Key::Home));
    assert_eq!(engine.state().current_index, 0);
}

#[test]
fn test_keys_from_editable_fields_are_ignored() {
    let (mut engine, _) = engine(5);
    let binding = engine.handle_key(&KeyEvent {
        key: Key::ArrowRight,
        editable_target: true,
        modifier: false,
    });

    assert_eq!(binding, None);
    assert_eq!(engine.state().current_index, 0);
}

#[test]
fn test_space_toggles_play_and_prevents_scroll() {
    let (mut engine, _) = engine(2);
    let binding = engine.handle_key(&KeyEvent::plain(Key::Space)).unwrap();

    assert!(binding.prevent_default);
    assert!(engine.state().is_playing);
}

// ============================================================================
// Track end
// ============================================================================

#[test]
fn test_track_end_while_playing_advances_once() {
    let (mut engine, _) = engine(3);
    engine.toggle_play();

    let token = engine.track_token();
    engine.on_track_ended(token);
    assert_eq!(engine.state().current_index, 1);

    // duplicate delivery of the same end is stale now
    engine.on_track_ended(token);
    assert_eq!(engine.state().current_index, 1);
}

#[test]
fn test_track_end_while_paused_stays() {
    let (mut engine, _) = engine(3);
    engine.on_track_ended(engine.track_token());
    assert_eq!(engine.state().current_index, 0);
}

#[test]
fn test_track_end_on_last_slide_completes_deck() {
    let (mut engine, _) = engine(2);
    engine.go_to(1);
    engine.toggle_play();
    engine.drain_events();

    engine.on_track_ended(engine.track_token());

    assert_eq!(engine.state().current_index, 1);
    assert!(!engine.state().is_playing);
    assert!(engine.is_complete());
    assert!(engine.view().is_complete);

    let events = engine.drain_events();
    assert!(events.contains(&PresentationEvent::DeckCompleted));
    assert!(events.contains(&PresentationEvent::PlayStateChanged { is_playing: false }));
}

// ============================================================================
// Fallback timer
// ============================================================================

#[test]
fn test_rejection_arms_timer_of_slide_duration() {
    let (mut engine, _) = engine(3);
    engine.toggle_play();
    engine.on_playback_rejected(engine.track_token());

    assert_eq!(engine.fallback_remaining(), Some(Duration::from_secs(30)));

    engine.advance_clock(Duration::from_secs(29));
    assert_eq!(engine.state().current_index, 0);

    engine.advance_clock(Duration::from_secs(1));
    assert_eq!(engine.state().current_index, 1);
    assert_eq!(engine.fallback_remaining(), None);

    // firing advanced exactly once
    engine.advance_clock(Duration::from_secs(120));
    assert_eq!(engine.state().current_index, 1);
}

#[test]
fn test_manual_navigation_cancels_pending_timer() {
    let (mut engine, _) = engine(5);
    engine.toggle_play();
    engine.on_playback_rejected(engine.track_token());

    engine.go_to(3);
    engine.advance_clock(Duration::from_secs(60));

    // new slide plays normally (transport accepted), nothing auto-advanced
    assert_eq!(engine.state().current_index, 3);
    assert!(engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, PresentationEvent::FallbackCancelled { index: 0 })));
}

#[test]
fn test_toggle_play_off_cancels_timer() {
    let (mut engine, _) = engine(3);
    engine.toggle_play();
    engine.on_playback_rejected(engine.track_token());
    engine.toggle_play();

    assert_eq!(engine.fallback_remaining(), None);
    engine.advance_clock(Duration::from_secs(100));
    assert_eq!(engine.state().current_index, 0);
}

#[test]
fn test_rejection_while_paused_arms_nothing() {
    let (mut engine, _) = engine(3);
    engine.on_playback_rejected(engine.track_token());

    assert_eq!(engine.fallback_remaining(), None);
    assert_eq!(engine.transport_mode(), TransportMode::Timer);

    engine.advance_clock(Duration::from_secs(100));
    assert_eq!(engine.state().current_index, 0);
}

#[test]
fn test_repeated_rejection_does_not_restart_timer() {
    let (mut engine, _) = engine(3);
    engine.toggle_play();
    let token = engine.track_token();
    engine.on_playback_rejected(token);
    engine.advance_clock(Duration::from_secs(20));

    engine.on_playback_rejected(token);
    assert_eq!(engine.fallback_remaining(), Some(Duration::from_secs(10)));
}

#[test]
fn test_started_after_rejection_returns_to_audio() {
    let (mut engine, _) = engine(3);
    engine.toggle_play();
    let token = engine.track_token();
    engine.on_playback_rejected(token);

    engine.on_playback_started(token);

    assert_eq!(engine.fallback_remaining(), None);
    assert_eq!(engine.transport_mode(), TransportMode::Audio);
}

#[test]
fn test_timer_on_last_slide_completes_deck() {
    let (mut engine, _) = engine_with(
        2,
        RecordingTransport::rejecting(),
        MemoryAddressBinding::new(),
    );
    engine.go_to(1);
    engine.toggle_play();

    engine.advance_clock(Duration::from_secs(30));

    assert_eq!(engine.state().current_index, 1);
    assert!(!engine.state().is_playing);
    assert!(engine.is_complete());
}

#[test]
fn test_null_transport_runs_whole_deck_on_timers() {
    let registry = deck(4, 5.0);
    let mut engine = PresentationEngine::new(
        registry,
        NullTransport::new(),
        MemoryAddressBinding::new(),
        PlayerOptions {
            autoplay: true,
            ..PlayerOptions::default()
        },
    )
    .unwrap();

    assert!(engine.state().is_playing);
    for expected in 1..4 {
        engine.advance_clock(Duration::from_secs(5));
        assert_eq!(engine.state().current_index, expected);
    }
    engine.advance_clock(Duration::from_secs(5));
    assert!(engine.is_complete());
    assert_eq!(engine.view().counter(), "4 / 4");
}

// ============================================================================
// Stale callbacks
// ============================================================================

#[test]
fn test_stale_callbacks_are_discarded() {
    let (mut engine, _) = engine(4);
    engine.toggle_play();
    let old = engine.track_token();

    engine.next();
    engine.drain_events();

    engine.on_playback_rejected(old);
    engine.on_track_ended(old);
    engine.on_position_tick(old, 12.0);
    engine.on_duration_known(old, 99.0);

    assert_eq!(engine.state().current_index, 1);
    assert_eq!(engine.state().position, 0.0);
    assert_eq!(engine.state().duration, 0.0);
    assert_eq!(engine.fallback_remaining(), None);

    let stale = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PresentationEvent::StaleCallbackDiscarded { .. }))
        .count();
    assert_eq!(stale, 4);
}

#[test]
fn test_returning_to_a_slide_issues_a_new_token() {
    let (mut engine, _) = engine(3);
    let first_visit = engine.track_token();

    engine.next();
    engine.previous();

    assert_eq!(engine.state().current_index, first_visit.slide_index);
    assert_ne!(engine.track_token(), first_visit);

    engine.on_duration_known(first_visit, 10.0);
    assert_eq!(engine.state().duration, 0.0);
}

// ============================================================================
// Position, duration and seek
// ============================================================================

#[test]
fn test_seek_half_of_120_seconds() {
    let (mut engine, _) = engine(2);
    engine.on_duration_known(engine.track_token(), 120.0);

    engine.seek(0.5);

    assert_eq!(engine.state().position, 60.0);
    assert_eq!(engine.transport().commands.last(), Some(&Command::Seek(60.0)));
}

#[test]
fn test_seek_with_unknown_duration_is_a_no_op() {
    let (mut engine, _) = engine(2);
    engine.transport_mut().commands.clear();

    engine.seek(0.5);
    engine.handle_intent(Intent::Seek(0.9));

    assert_eq!(engine.state().position, 0.0);
    assert!(engine.transport().commands.is_empty());
}

#[test]
fn test_seek_fraction_is_clamped() {
    let (mut engine, _) = engine(1);
    engine.on_duration_known(engine.track_token(), 50.0);

    engine.seek(1.7);
    assert_eq!(engine.state().position, 50.0);

    engine.seek(-0.2);
    assert_eq!(engine.state().position, 0.0);

    engine.seek(f64::NAN);
    assert_eq!(engine.state().position, 0.0);
}

#[test]
fn test_position_never_exceeds_known_duration() {
    let (mut engine, _) = engine(1);
    let token = engine.track_token();
    engine.on_position_tick(token, 80.0);
    engine.on_duration_known(token, 60.0);
    assert_eq!(engine.state().position, 60.0);

    engine.on_position_tick(token, 75.0);
    assert_eq!(engine.state().position, 60.0);
    assert_eq!(engine.view().progress, 1.0);
}

#[test]
fn test_infinite_duration_stays_unknown() {
    let (mut engine, _) = engine(1);
    engine.on_duration_known(engine.track_token(), f64::INFINITY);
    assert_eq!(engine.state().duration, 0.0);
}

#[test]
fn test_transport_event_dispatch() {
    let (mut engine, _) = engine(2);
    engine.toggle_play();
    let token = engine.track_token();

    engine.handle_transport_event(token, TransportEvent::DurationKnown { duration: 8.0 });
    engine.handle_transport_event(token, TransportEvent::PositionTick { position: 4.0 });
    assert_eq!(engine.view().progress, 0.5);

    engine.handle_transport_event(token, TransportEvent::Ended);
    assert_eq!(engine.state().current_index, 1);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_shutdown_cancels_timer_and_stops_transport() {
    let (mut engine, _) = engine(3);
    engine.toggle_play();
    let token = engine.track_token();
    engine.on_playback_rejected(token);

    engine.shutdown();

    assert_eq!(engine.fallback_remaining(), None);
    assert_eq!(engine.transport().commands.last(), Some(&Command::Stop));

    engine.advance_clock(Duration::from_secs(60));
    engine.next();
    engine.on_track_ended(token);
    assert_eq!(engine.state().current_index, 0);
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_eight_slide_walkthrough() {
    let (mut engine, binding) = engine(8);

    for _ in 0..5 {
        engine.next();
    }
    assert_eq!(engine.state().current_index, 5);
    assert_eq!(binding.current().as_deref(), Some("slide/6"));

    engine.toggle_play();
    assert!(engine.state().is_playing);
    assert_eq!(
        engine.transport().last_played(),
        Some(TrackToken::new(5, engine.track_token().generation))
    );
    assert_eq!(engine.transport().last_loaded(), Some("/audio/slide-6.mp3"));

    engine.on_track_ended(engine.track_token());
    assert_eq!(engine.state().current_index, 6);
    assert_eq!(binding.current().as_deref(), Some("slide/7"));

    engine.on_playback_rejected(engine.track_token());
    engine.advance_clock(Duration::from_secs(30));
    assert_eq!(engine.state().current_index, 7);
    assert_eq!(binding.current().as_deref(), Some("slide/8"));

    let plays = engine
        .transport()
        .count(|c| matches!(c, Command::Play(_)));
    assert_eq!(plays, 3);
}
