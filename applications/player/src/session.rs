//! Interactive terminal session
//!
//! Drives a [`PresentationEngine`] without audio: every slide runs on its
//! fallback timer, fed from a tokio interval, while stdin supplies commands.

use deck_core::SlideRegistry;
use deck_playback::{
    format_clock, MemoryAddressBinding, NullTransport, PlayerOptions, PresentationEngine,
    PresentationEvent,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::console::{parse_line, ConsoleCommand, HELP};
use crate::error::Result;

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Timer-driven presentation bound to the terminal
pub struct Session {
    engine: PresentationEngine<NullTransport, MemoryAddressBinding>,
    binding: MemoryAddressBinding,
    output: Vec<String>,
}

impl Session {
    pub fn new(registry: Arc<SlideRegistry>, options: PlayerOptions) -> Result<Self> {
        let binding = MemoryAddressBinding::new();
        let engine = PresentationEngine::new(registry, NullTransport::new(), binding.clone(), options)?;

        let mut session = Self {
            engine,
            binding,
            output: Vec::new(),
        };
        session.collect_events();
        Ok(session)
    }

    /// Handle one stdin line
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let flow = match parse_line(line) {
            Ok(command) => self.apply(command),
            Err(message) => {
                self.output.push(message);
                Flow::Continue
            }
        };
        self.collect_events();
        flow
    }

    /// Execute a parsed command
    pub fn apply(&mut self, command: ConsoleCommand) -> Flow {
        match command {
            ConsoleCommand::Key(event) => {
                if self.engine.handle_key(&event).is_none() {
                    self.output.push("key not bound".to_string());
                }
            }
            ConsoleCommand::Intent(intent) => self.engine.handle_intent(intent),
            ConsoleCommand::Address(raw) => {
                self.binding.push_external(raw);
                self.engine.poll_address();
            }
            ConsoleCommand::Status => {
                let status = self.status_line();
                self.output.push(status);
            }
            ConsoleCommand::Help => self.output.push(HELP.to_string()),
            ConsoleCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Report elapsed time to the engine
    pub fn tick(&mut self, elapsed: Duration) {
        self.engine.advance_clock(elapsed);
        self.collect_events();
    }

    pub fn is_playing(&self) -> bool {
        self.engine.state().is_playing
    }

    pub fn engine(&self) -> &PresentationEngine<NullTransport, MemoryAddressBinding> {
        &self.engine
    }

    /// Current address as the binding holds it
    pub fn address(&self) -> Option<String> {
        self.binding.current()
    }

    /// `[3 / 8] slide/3  playing  0:12 left`
    pub fn status_line(&self) -> String {
        let view = self.engine.view();
        let mode = if view.is_complete {
            "complete"
        } else if view.is_playing {
            "playing"
        } else {
            "paused"
        };
        let mut line = format!("[{}] {}  {}", view.counter(), view.address, mode);
        if let Some(remaining) = view.fallback_remaining {
            line.push_str(&format!("  {} left", format_clock(remaining)));
        }
        line
    }

    /// Take lines produced since the last call
    pub fn drain_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
        self.collect_events();
    }

    fn collect_events(&mut self) {
        for event in self.engine.drain_events() {
            debug!(?event, "Presentation event");
            if let Some(line) = self.describe(&event) {
                self.output.push(line);
            }
        }
    }

    fn describe(&self, event: &PresentationEvent) -> Option<String> {
        let slide = self.engine.current_slide();
        match event {
            PresentationEvent::SlideChanged { index, slide_id, .. } => {
                let mut line = format!(
                    "Slide {} / {} ({})",
                    index + 1,
                    self.engine.registry().len(),
                    slide_id
                );
                let shown = self.engine.registry().get(*index)?;
                let state = self.engine.state();
                if state.show_notes {
                    if let Some(notes) = &shown.notes {
                        line.push_str(&format!("\n  notes: {}", notes));
                    }
                }
                if state.show_narration {
                    if let Some(script) = &shown.narration_script {
                        line.push_str(&format!("\n  script: {}", script));
                    }
                }
                Some(line)
            }
            PresentationEvent::PlayStateChanged { is_playing } => {
                Some(if *is_playing { "Playing" } else { "Paused" }.to_string())
            }
            PresentationEvent::FallbackArmed { seconds, .. } => Some(format!(
                "No narration audio, advancing in {}",
                format_clock(*seconds)
            )),
            PresentationEvent::NotesToggled { visible } => Some(match (&slide.notes, visible) {
                (Some(notes), true) => format!("notes: {}", notes),
                (None, true) => "notes: (none)".to_string(),
                (_, false) => "notes hidden".to_string(),
            }),
            PresentationEvent::NarrationToggled { visible } => {
                Some(match (&slide.narration_script, visible) {
                    (Some(script), true) => format!("script: {}", script),
                    (None, true) => "script: (none)".to_string(),
                    (_, false) => "script hidden".to_string(),
                })
            }
            PresentationEvent::PositionUpdate { position, duration } => Some(format!(
                "{} / {}",
                format_clock(*position),
                format_clock(*duration)
            )),
            PresentationEvent::DeckCompleted => Some("Deck complete".to_string()),
            _ => None,
        }
    }
}

/// Run the session until `quit`, or until stdin closes and playback stops
pub async fn run(mut session: Session, tick: Duration) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last = Instant::now();
    let mut stdin_open = true;

    print_lines(session.drain_output());
    println!("{}", session.status_line());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                session.tick(now.duration_since(last));
                last = now;
                if !stdin_open && !session.is_playing() {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if session.handle_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        debug!("stdin closed");
                        stdin_open = false;
                        if !session.is_playing() {
                            break;
                        }
                    }
                }
            }
        }
        print_lines(session.drain_output());
    }

    session.shutdown();
    print_lines(session.drain_output());
    info!("Session ended");
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
