use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::{Response, View};
use crate::tui::focus::{Direction, FocusRing, Focusable};
use crate::tui::intent::Intent;
use crate::tui::keymap::{Action, Hint, Keymap};
use crate::tui::widgets::{Button, ButtonId};

const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 6;
const BUTTON_GAP: u16 = 4;

/// Ok discards the session, Cancel returns to the summary
pub struct ConfirmDialogView {
    message: String,
    ok: Button,
    cancel: Button,
}

impl ConfirmDialogView {
    pub fn new() -> Self {
        let mut view = Self {
            message: "Discard changes and exit?".to_string(),
            ok: Button::new(ButtonId::DialogOk, "Ok"),
            cancel: Button::new(ButtonId::DialogCancel, "Cancel"),
        };
        view.focus_ring().focus_first();
        view
    }

    pub fn focused_button(&self) -> Option<ButtonId> {
        [&self.ok, &self.cancel]
            .into_iter()
            .find(|button| button.is_focused())
            .map(Button::id)
    }

    pub fn intent_for(&self, id: ButtonId) -> Option<Intent> {
        match id {
            ButtonId::DialogOk => Some(Intent::Discard),
            ButtonId::DialogCancel => Some(Intent::Return),
            ButtonId::SpecFields | ButtonId::StatusFields => None,
        }
    }

    fn focus_ring(&mut self) -> FocusRing<'_> {
        FocusRing::new(vec![&mut self.ok as &mut dyn Focusable, &mut self.cancel])
    }

    pub fn handle_key(&mut self, key: &KeyEvent, keymap: &Keymap) -> Response {
        if keymap.is(Action::Left, key) {
            self.focus_ring().rotate(Direction::Backward);
            return Response::Handled;
        }
        if keymap.is(Action::Right, key) {
            self.focus_ring().rotate(Direction::Forward);
            return Response::Handled;
        }
        if keymap.is(Action::Back, key) {
            return Response::Intent(Intent::Return);
        }

        self.ok
            .handle_key(key, keymap)
            .or_else(|| self.cancel.handle_key(key, keymap))
            .map_or(Response::Ignored, Response::Defer)
    }

    /// Centered box inside `area`
    fn dialog_area(area: Rect) -> Rect {
        let width = DIALOG_WIDTH.min(area.width);
        let height = DIALOG_HEIGHT.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

impl Default for ConfirmDialogView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ConfirmDialogView {
    fn title(&self) -> String {
        " Discard ".to_string()
    }

    fn hints(&self, keymap: &Keymap) -> Vec<Hint> {
        vec![
            keymap.hint(&[Action::Left, Action::Right], "focus"),
            keymap.hint(&[Action::Confirm], "select"),
            keymap.hint(&[Action::Back], "cancel"),
        ]
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let dialog = Self::dialog_area(area);
        Clear.render(dialog, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(dialog);
        block.render(dialog, buf);
        if inner.height == 0 {
            return;
        }

        Paragraph::new(Line::from(self.message.as_str()))
            .alignment(Alignment::Center)
            .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);

        let buttons_y = inner.y + inner.height.saturating_sub(1).min(2);
        let buttons_width = self.ok.width() + BUTTON_GAP + self.cancel.width();
        let mut x = inner.x + inner.width.saturating_sub(buttons_width) / 2;
        for button in [&self.ok, &self.cancel] {
            let width = button.width().min(inner.right().saturating_sub(x));
            button.render(Rect::new(x, buttons_y, width, 1), buf);
            x = x.saturating_add(button.width() + BUTTON_GAP);
        }
    }
}
