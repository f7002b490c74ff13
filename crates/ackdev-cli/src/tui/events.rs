//! Input sources for the session loop.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::intent::Message;
use super::keymap::KeyBinding;

/// Virtual terminal size of a key script without a `size:` line
pub const DEFAULT_SCRIPT_SIZE: (u16, u16) = (100, 30);

pub trait EventSource {
    /// Next input message, or `None` when the source is exhausted.
    fn next_message(&mut self) -> Result<Option<Message>>;
}

/// Blocks on crossterm events, waking every `poll_interval` to check the
/// process-level interrupt flag.
pub struct TerminalEventSource {
    interrupted: Arc<AtomicBool>,
    poll_interval: Duration,
}

impl TerminalEventSource {
    pub fn new(interrupted: Arc<AtomicBool>, poll_interval: Duration) -> Self {
        Self {
            interrupted,
            poll_interval,
        }
    }
}

impl EventSource for TerminalEventSource {
    fn next_message(&mut self) -> Result<Option<Message>> {
        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                return Ok(Some(Message::Interrupt));
            }
            if !event::poll(self.poll_interval)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Some(Message::Key(key)));
                }
                Event::Resize(width, height) => {
                    return Ok(Some(Message::Resize { width, height }));
                }
                _ => {}
            }
        }
    }
}

/// Replays a fixed list of messages, then reports exhaustion.
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    messages: VecDeque<Message>,
}

impl ScriptedEventSource {
    pub fn new(messages: impl IntoIterator<Item = Message>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.messages.len()
    }
}

impl EventSource for ScriptedEventSource {
    fn next_message(&mut self) -> Result<Option<Message>> {
        Ok(self.messages.pop_front())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScript {
    pub size: (u16, u16),
    pub messages: Vec<Message>,
}

impl KeyScript {
    pub fn into_source(self) -> ScriptedEventSource {
        ScriptedEventSource::new(self.messages)
    }
}

/// Parse a key script: one key name, `text:<literal>` or `resize:<W>x<H>`
/// per line. Only the first token line may be `size:<W>x<H>`.
pub fn parse_script(content: &str) -> Result<KeyScript> {
    let mut size = DEFAULT_SCRIPT_SIZE;
    let mut messages = Vec::new();
    let mut first = true;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(dims) = line.strip_prefix("size:") {
            if !first {
                bail!("line {}: size must come first in the script", line_no);
            }
            size = parse_dimensions(dims).with_context(|| format!("line {}", line_no))?;
        } else if let Some(dims) = line.strip_prefix("resize:") {
            let (width, height) =
                parse_dimensions(dims).with_context(|| format!("line {}", line_no))?;
            messages.push(Message::Resize { width, height });
        } else if let Some(text) = raw.trim_start().strip_prefix("text:") {
            messages.extend(text.chars().map(|c| Message::Key(char_event(c))));
        } else {
            let Some(binding) = KeyBinding::parse(line) else {
                bail!("line {}: unknown key '{}'", line_no, line);
            };
            messages.push(Message::Key(binding.to_event()));
        }
        first = false;
    }

    Ok(KeyScript { size, messages })
}

fn char_event(c: char) -> KeyEvent {
    let modifiers = if c.is_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(KeyCode::Char(c), modifiers)
}

fn parse_dimensions(value: &str) -> Result<(u16, u16)> {
    let Some((width, height)) = value.trim().split_once('x') else {
        bail!("expected <width>x<height>, got '{}'", value.trim());
    };
    let width = width
        .parse::<u16>()
        .with_context(|| format!("invalid width '{}'", width))?;
    let height = height
        .parse::<u16>()
        .with_context(|| format!("invalid height '{}'", height))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Message {
        Message::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_parse_script_tokens() {
        let script = parse_script(
            "size:80x24\n\
             # open the first resource\n\
             enter\n\
             \n\
             text:aB \n\
             backtab\n\
             ctrl+c\n\
             resize:120x40\n",
        )
        .unwrap();

        assert_eq!(script.size, (80, 24));
        assert_eq!(
            script.messages,
            vec![
                key(KeyCode::Enter, KeyModifiers::NONE),
                key(KeyCode::Char('a'), KeyModifiers::NONE),
                key(KeyCode::Char('B'), KeyModifiers::SHIFT),
                key(KeyCode::Char(' '), KeyModifiers::NONE),
                key(KeyCode::BackTab, KeyModifiers::SHIFT),
                key(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Message::Resize {
                    width: 120,
                    height: 40,
                },
            ]
        );
    }

    #[test]
    fn test_parse_script_defaults_size() {
        let script = parse_script("q\n").unwrap();
        assert_eq!(script.size, DEFAULT_SCRIPT_SIZE);
        assert_eq!(script.messages.len(), 1);
    }

    #[test]
    fn test_parse_script_reports_line_numbers() {
        let err = parse_script("enter\n\nbogus-key\n").unwrap_err();
        assert_eq!(err.to_string(), "line 3: unknown key 'bogus-key'");

        let err = parse_script("enter\nsize:10x10\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = parse_script("resize:wide\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1");
    }

    #[test]
    fn test_scripted_source_exhausts() {
        let mut source = parse_script("up\ndown\n").unwrap().into_source();
        assert_eq!(source.remaining(), 2);
        assert!(source.next_message().unwrap().is_some());
        assert!(source.next_message().unwrap().is_some());
        assert!(source.next_message().unwrap().is_none());
    }
}
