//! Fallback auto-advance timer
//!
//! A countdown driven by elapsed time the host reports. Nothing here reads a
//! clock, which keeps timing deterministic under test.

use std::time::Duration;

use crate::types::TrackToken;

/// Single pending countdown tied to one track load
#[derive(Debug, Clone, Default)]
pub struct FallbackTimer {
    pending: Option<(TrackToken, Duration)>,
}

impl FallbackTimer {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown for `token`
    pub fn arm(&mut self, token: TrackToken, duration: Duration) {
        self.pending = Some((token, duration));
    }

    /// Drop the pending countdown, returning the token it was armed for
    pub fn cancel(&mut self) -> Option<TrackToken> {
        self.pending.take().map(|(token, _)| token)
    }

    /// Whether a countdown is pending
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a countdown is pending for exactly `token`
    pub fn is_armed_for(&self, token: TrackToken) -> bool {
        matches!(self.pending, Some((armed, _)) if armed == token)
    }

    /// Time left on the pending countdown
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|(_, remaining)| remaining)
    }

    /// Consume `elapsed` time
    ///
    /// Returns the token once the countdown reaches zero; the timer is idle
    /// afterwards. A zero-length countdown fires on the first call.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TrackToken> {
        let (token, remaining) = self.pending.as_mut()?;
        *remaining = remaining.saturating_sub(elapsed);

        if remaining.is_zero() {
            let token = *token;
            self.pending = None;
            Some(token)
        } else {
            None
        }
    }
}
