use ackdev_types::Crd;
use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{Response, View};
use crate::tui::focus::{Direction, FocusRing, Focusable};
use crate::tui::intent::Intent;
use crate::tui::keymap::{Action, Hint, Keymap};
use crate::tui::widgets::{Button, ButtonId};

const LABEL_WIDTH: u16 = 22;

/// Read-only facts about one CRD plus buttons into its field lists
pub struct ResourceDetailView {
    kind: String,
    plural: String,
    arn_primary_key: bool,
    spec_button: Button,
    status_button: Button,
}

impl ResourceDetailView {
    pub fn new(crd: &Crd) -> Self {
        let mut view = Self {
            kind: crd.kind.clone(),
            plural: crd.plural.clone(),
            arn_primary_key: crd.is_arn_primary_key(),
            spec_button: Button::new(
                ButtonId::SpecFields,
                format!("{} fields", crd.spec_fields.len()),
            ),
            status_button: Button::new(
                ButtonId::StatusFields,
                format!("{} fields", crd.status_fields.len()),
            ),
        };
        view.focus_ring().focus_first();
        view
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn focused_button(&self) -> Option<ButtonId> {
        [&self.spec_button, &self.status_button]
            .into_iter()
            .find(|button| button.is_focused())
            .map(Button::id)
    }

    /// What a selected button means on this screen
    pub fn intent_for(&self, id: ButtonId) -> Option<Intent> {
        match id {
            ButtonId::SpecFields => Some(Intent::OpenSpecFields),
            ButtonId::StatusFields => Some(Intent::OpenStatusFields),
            ButtonId::DialogOk | ButtonId::DialogCancel => None,
        }
    }

    fn focus_ring(&mut self) -> FocusRing<'_> {
        FocusRing::new(vec![
            &mut self.spec_button as &mut dyn Focusable,
            &mut self.status_button,
        ])
    }

    pub fn handle_key(&mut self, key: &KeyEvent, keymap: &Keymap) -> Response {
        if keymap.is(Action::Up, key) {
            self.focus_ring().rotate(Direction::Backward);
            return Response::Handled;
        }
        if keymap.is(Action::Down, key) {
            self.focus_ring().rotate(Direction::Forward);
            return Response::Handled;
        }
        if keymap.is(Action::Back, key) {
            return Response::Intent(Intent::Return);
        }
        if keymap.is(Action::Quit, key) {
            return Response::Intent(Intent::Quit);
        }

        self.spec_button
            .handle_key(key, keymap)
            .or_else(|| self.status_button.handle_key(key, keymap))
            .map_or(Response::Ignored, Response::Defer)
    }
}

impl View for ResourceDetailView {
    fn title(&self) -> String {
        format!(" {} ", self.kind)
    }

    fn hints(&self, keymap: &Keymap) -> Vec<Hint> {
        vec![
            keymap.hint(&[Action::Up, Action::Down], "focus"),
            keymap.hint(&[Action::Confirm], "open"),
            keymap.hint(&[Action::Back], "go back"),
            keymap.hint(&[Action::Quit], "save & quit"),
        ]
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let label = |text: &str| {
            Span::styled(
                format!("{:<width$}", text, width = LABEL_WIDTH as usize),
                label_style,
            )
        };

        let text_rows = [
            ("Kind", self.kind.clone()),
            ("Plural", self.plural.clone()),
        ];
        let mut y = area.y;
        for (name, value) in text_rows {
            if y >= area.bottom() {
                return;
            }
            Line::from(vec![label(name), Span::raw(value)])
                .render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        }

        for (name, button) in [
            ("Spec Fields", &self.spec_button),
            ("Status Fields", &self.status_button),
        ] {
            if y >= area.bottom() {
                return;
            }
            let row = Rect::new(area.x, y, area.width, 1);
            label(name).render(row, buf);
            let button_area = Rect::new(
                area.x.saturating_add(LABEL_WIDTH),
                y,
                button.width().min(area.width.saturating_sub(LABEL_WIDTH)),
                1,
            );
            button.render(button_area, buf);
            y += 1;
        }

        if y < area.bottom() {
            let value = if self.arn_primary_key { "yes" } else { "no" };
            Line::from(vec![label("Is ARN Primary Key?"), Span::raw(value)])
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::intent::Message;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn bucket() -> Crd {
        Crd::new("Bucket")
            .with_spec_field("Name", "string")
            .with_spec_field("Region", "string")
            .with_status_field("ARN", "string")
    }

    #[test]
    fn test_spec_button_focused_first_and_rotation_clamps() {
        let mut view = ResourceDetailView::new(&bucket());
        let keymap = Keymap::default();
        assert_eq!(view.focused_button(), Some(ButtonId::SpecFields));

        view.handle_key(&key(KeyCode::Up), &keymap);
        assert_eq!(view.focused_button(), Some(ButtonId::SpecFields));

        view.handle_key(&key(KeyCode::Down), &keymap);
        view.handle_key(&key(KeyCode::Down), &keymap);
        assert_eq!(view.focused_button(), Some(ButtonId::StatusFields));
    }

    #[test]
    fn test_confirm_defers_focused_button() {
        let mut view = ResourceDetailView::new(&bucket());
        let keymap = Keymap::default();
        view.handle_key(&key(KeyCode::Char('j')), &keymap);

        match view.handle_key(&key(KeyCode::Enter), &keymap) {
            Response::Defer(deferred) => assert_eq!(
                deferred(),
                Message::Intent(Intent::ButtonSelected(ButtonId::StatusFields))
            ),
            _ => panic!("expected a deferred button selection"),
        }
        assert_eq!(
            view.intent_for(ButtonId::StatusFields),
            Some(Intent::OpenStatusFields)
        );
        assert_eq!(view.intent_for(ButtonId::DialogOk), None);
    }

    #[test]
    fn test_render_lists_fields_and_counts() {
        let view = ResourceDetailView::new(&bucket());
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);

        let line = |y: u16| -> String {
            (0..40).map(|x| buf[(x, y)].symbol().to_string()).collect()
        };
        assert!(line(0).starts_with("Kind"));
        assert!(line(0).contains("Bucket"));
        assert!(line(1).contains("buckets"));
        assert!(line(2).contains(" 2 fields "));
        assert!(line(3).contains(" 1 fields "));
        assert!(line(4).contains("no"));
    }
}
