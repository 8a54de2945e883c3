//! Console command parsing
//!
//! One command per stdin line. Key names go through the same key mapping a
//! browser host uses; words map straight to intents.

use deck_playback::{Intent, Key, KeyEvent};

/// Parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Key press, mapped by the engine
    Key(KeyEvent),
    /// Direct intent
    Intent(Intent),
    /// Externally edited address (`#/slide/3`)
    Address(String),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  right | left | space | home | end   keys, as in a browser
  n | s                               toggle notes | narration script
  next | prev | play | first | last   same as the keys
  goto <N>                            open slide N (1-based)
  seek <0.0-1.0>                      move within the narration track
  #/slide/N                           follow a deep link
  status | help | quit";

/// Parse one line; `Err` carries the message to show
pub fn parse_line(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(ConsoleCommand::Status);
    };
    let arg = parts.next();

    if head.starts_with('#') || head.starts_with("slide/") || head.starts_with("/slide/") {
        return Ok(ConsoleCommand::Address(head.to_string()));
    }

    let key = |k: Key| -> Result<ConsoleCommand, String> {
        Ok(ConsoleCommand::Key(KeyEvent::plain(k)))
    };
    let intent = |i: Intent| -> Result<ConsoleCommand, String> { Ok(ConsoleCommand::Intent(i)) };

    match head.to_ascii_lowercase().as_str() {
        "right" => key(Key::ArrowRight),
        "left" => key(Key::ArrowLeft),
        "space" => key(Key::Space),
        "home" => key(Key::Home),
        "end" => key(Key::End),
        "n" => key(Key::Char('n')),
        "s" => key(Key::Char('s')),
        "next" => intent(Intent::Next),
        "prev" | "previous" => intent(Intent::Previous),
        "play" | "pause" => intent(Intent::TogglePlay),
        "first" => intent(Intent::First),
        "last" => intent(Intent::Last),
        "notes" => intent(Intent::ToggleNotes),
        "script" => intent(Intent::ToggleNarration),
        "goto" => match arg.and_then(|a| a.parse::<usize>().ok()) {
            Some(number) if number >= 1 => intent(Intent::GoTo(number - 1)),
            _ => Err("usage: goto <N>, N >= 1".to_string()),
        },
        "seek" => match arg.and_then(|a| a.parse::<f64>().ok()) {
            Some(fraction) => intent(Intent::Seek(fraction)),
            None => Err("usage: seek <fraction>".to_string()),
        },
        "status" => Ok(ConsoleCommand::Status),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}
