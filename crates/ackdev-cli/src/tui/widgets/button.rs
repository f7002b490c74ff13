use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::tui::focus::Focusable;
use crate::tui::intent::{Deferred, Intent, defer};
use crate::tui::keymap::{Action, Keymap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    SpecFields,
    StatusFields,
    DialogOk,
    DialogCancel,
}

#[derive(Debug, Clone)]
pub struct Button {
    id: ButtonId,
    label: String,
    focused: bool,
}

impl Button {
    pub fn new(id: ButtonId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            focused: false,
        }
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Rendered width including padding
    pub fn width(&self) -> u16 {
        u16::try_from(self.label.chars().count() + 2).unwrap_or(u16::MAX)
    }

    /// Confirm on a focused button yields `ButtonSelected(id)` for a later
    /// tick. Unfocused buttons ignore input.
    pub fn handle_key(&self, key: &KeyEvent, keymap: &Keymap) -> Option<Deferred> {
        if self.focused && keymap.is(Action::Confirm, key) {
            return Some(defer(Intent::ButtonSelected(self.id)));
        }
        None
    }
}

impl Focusable for Button {
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

impl Widget for &Button {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text = format!(" {} ", self.label);
        Span::styled(text, style).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::intent::Message;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn test_unfocused_button_ignores_confirm() {
        let button = Button::new(ButtonId::DialogOk, "Ok");
        assert!(button.handle_key(&enter(), &Keymap::default()).is_none());
    }

    #[test]
    fn test_focused_button_defers_selection() {
        let mut button = Button::new(ButtonId::SpecFields, "2 fields");
        button.focus();

        let deferred = button.handle_key(&enter(), &Keymap::default()).unwrap();
        assert_eq!(
            deferred(),
            Message::Intent(Intent::ButtonSelected(ButtonId::SpecFields))
        );
    }

    #[test]
    fn test_focused_button_ignores_other_keys() {
        let mut button = Button::new(ButtonId::DialogCancel, "Cancel");
        button.focus();
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(button.handle_key(&key, &Keymap::default()).is_none());
    }
}
