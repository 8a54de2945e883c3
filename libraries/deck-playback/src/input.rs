//! Input intent mapping
//!
//! Translates keyboard events and on-screen controls into engine intents.

use serde::{Deserialize, Serialize};

/// Something the viewer asked for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Intent {
    /// Advance one slide
    Next,
    /// Go back one slide
    Previous,
    /// Jump to the first slide
    First,
    /// Jump to the last slide
    Last,
    /// Jump to a 0-based slide (clamped)
    GoTo(usize),
    /// Flip play intent
    TogglePlay,
    /// Flip speaker notes visibility
    ToggleNotes,
    /// Flip narration script visibility
    ToggleNarration,
    /// Move the play head to a fraction of the track
    Seek(f64),
}

/// Keys the player reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Right arrow
    ArrowRight,
    /// Left arrow
    ArrowLeft,
    /// Space bar
    Space,
    /// Home
    Home,
    /// End
    End,
    /// A printable character
    Char(char),
    /// Anything else
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            " " | "Spacebar" | "Space" => Self::Space,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// A key press together with where it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    /// Key pressed
    pub key: Key,
    /// Focus was in a text input, textarea or contenteditable element
    pub editable_target: bool,
    /// Ctrl, Alt or Meta was held
    pub modifier: bool,
}

impl KeyEvent {
    /// Plain key press outside any editable field
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            editable_target: false,
            modifier: false,
        }
    }
}

/// Result of mapping a key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyBinding {
    /// Intent to dispatch
    pub intent: Intent,
    /// Host must suppress the platform default (scrolling)
    pub prevent_default: bool,
}

impl KeyBinding {
    fn new(intent: Intent, prevent_default: bool) -> Self {
        Self {
            intent,
            prevent_default,
        }
    }
}

/// Map a key press to an intent
///
/// Keys typed into editable fields and shortcut chords belong to the page,
/// not the player, and map to nothing.
pub fn map_key(event: &KeyEvent) -> Option<KeyBinding> {
    if event.editable_target || event.modifier {
        return None;
    }

    let binding = match event.key {
        Key::ArrowRight => KeyBinding::new(Intent::Next, true),
        Key::ArrowLeft => KeyBinding::new(Intent::Previous, true),
        Key::Space | Key::Char(' ') => KeyBinding::new(Intent::TogglePlay, true),
        Key::Home => KeyBinding::new(Intent::First, false),
        Key::End => KeyBinding::new(Intent::Last, false),
        Key::Char('n' | 'N') => KeyBinding::new(Intent::ToggleNotes, false),
        Key::Char('s' | 'S') => KeyBinding::new(Intent::ToggleNarration, false),
        Key::Char(_) | Key::Other => return None,
    };
    Some(binding)
}

/// On-screen controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Control {
    /// "Previous" button
    PreviousButton,
    /// "Next" button
    NextButton,
    /// Play/pause button
    PlayButton,
    /// Speaker notes toggle
    NotesButton,
    /// Narration script toggle
    ScriptButton,
    /// Click on the progress bar, `x` pixels from its left edge
    ProgressBar {
        /// Click offset from the left edge
        x: f64,
        /// Rendered bar width
        width: f64,
    },
}

/// Map a control activation to an intent
///
/// A progress-bar click on a zero-width bar maps to nothing.
pub fn map_control(control: Control) -> Option<Intent> {
    match control {
        Control::PreviousButton => Some(Intent::Previous),
        Control::NextButton => Some(Intent::Next),
        Control::PlayButton => Some(Intent::TogglePlay),
        Control::NotesButton => Some(Intent::ToggleNotes),
        Control::ScriptButton => Some(Intent::ToggleNarration),
        Control::ProgressBar { x, width } => {
            if width > 0.0 && width.is_finite() && x.is_finite() {
                Some(Intent::Seek(x / width))
            } else {
                None
            }
        }
    }
}
