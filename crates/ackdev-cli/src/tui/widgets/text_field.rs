use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::focus::Focusable;

/// Single-line text input with a placeholder fallback
#[derive(Debug, Clone)]
pub struct TextField {
    label: String,
    value: String,
    placeholder: String,
    /// Cursor position in chars, `0..=value.chars().count()`
    cursor: usize,
    focused: bool,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            placeholder: String::new(),
            cursor: 0,
            focused: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value, or the placeholder when the value is empty
    pub fn value_or_placeholder(&self) -> &str {
        if self.value.is_empty() {
            &self.placeholder
        } else {
            &self.value
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns true when the value changed.
    ///
    /// Unfocused fields and keys carrying ctrl/alt are ignored.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focused
            || key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        let len = self.value.chars().count();
        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let at = self.byte_offset(self.cursor - 1);
                self.value.remove(at);
                self.cursor -= 1;
                true
            }
            KeyCode::Delete if self.cursor < len => {
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = len;
                false
            }
            _ => false,
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }
}

impl Focusable for TextField {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}

/// Renders `label: value` on the first row of `area`
impl Widget for &TextField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let prompt = if self.focused { "> " } else { "  " };

        let mut spans = vec![
            Span::styled(prompt, label_style),
            Span::styled(format!("{}: ", self.label), label_style),
        ];

        if self.value.is_empty() {
            let placeholder = Style::default().fg(Color::DarkGray);
            if self.focused {
                spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
            }
            spans.push(Span::styled(self.placeholder.as_str(), placeholder));
        } else if self.focused {
            let split = self.byte_offset(self.cursor);
            let (before, rest) = self.value.split_at(split);
            let mut rest_chars = rest.chars();
            let under_cursor = rest_chars
                .next()
                .map(String::from)
                .unwrap_or_else(|| " ".to_string());
            spans.push(Span::raw(before));
            spans.push(Span::styled(
                under_cursor,
                Style::default().add_modifier(Modifier::REVERSED),
            ));
            spans.push(Span::raw(rest_chars.as_str()));
        } else {
            spans.push(Span::raw(self.value.as_str()));
        }

        Line::from(spans).render(area, buf);
    }
}
