/// Common test utilities and fixtures
use deck_core::{SlideDescriptor, SlideRegistry};
use deck_player::Session;
use deck_playback::PlayerOptions;
use std::sync::Arc;

/// Deck of `count` slides, `slide-1..=count`, each `secs` long
pub fn deck(count: usize, secs: f64) -> Arc<SlideRegistry> {
    let slides = (1..=count)
        .map(|n| {
            SlideDescriptor::new(format!("slide-{}", n), secs)
                .with_notes(format!("notes for {}", n))
        })
        .collect();
    Arc::new(SlideRegistry::from_slides(Some("Test deck".to_string()), slides).unwrap())
}

/// Session over a fresh deck; output from construction is discarded
pub fn session(count: usize, secs: f64, options: PlayerOptions) -> Session {
    let mut session = Session::new(deck(count, secs), options).unwrap();
    session.drain_output();
    session
}

pub fn autoplay() -> PlayerOptions {
    PlayerOptions {
        autoplay: true,
        ..PlayerOptions::default()
    }
}
