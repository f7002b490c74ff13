//! Reference editor for one field.
//!
//! Edits are live: every keystroke that changes a text field is written into
//! the bound [`ReferencesConfig`] immediately. An empty service name stands
//! for the service being generated.

use ackdev_types::{FieldSet, ReferencesConfig};
use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{Response, View};
use crate::tui::focus::{Direction, FocusRing, Focusable};
use crate::tui::intent::Intent;
use crate::tui::keymap::{Action, Hint, Keymap};
use crate::tui::widgets::TextField;

pub struct ReferenceEditorView {
    kind: String,
    set: FieldSet,
    field: String,
    service_name: TextField,
    resource: TextField,
    path: TextField,
}

impl ReferenceEditorView {
    pub fn new(
        kind: &str,
        set: FieldSet,
        field: &str,
        service: &str,
        references: &ReferencesConfig,
    ) -> Self {
        let service_name = if references.service_name == service {
            String::new()
        } else {
            references.service_name.clone()
        };

        let mut view = Self {
            kind: kind.to_string(),
            set,
            field: field.to_string(),
            service_name: TextField::new("Service name")
                .with_placeholder(service)
                .with_value(service_name),
            resource: TextField::new("Resource")
                .with_placeholder("Kind of the referenced resource")
                .with_value(references.resource.clone()),
            path: TextField::new("Path")
                .with_placeholder(".status.ackResourceMetadata.arn")
                .with_value(references.path.clone()),
        };
        view.focus_ring().focus_first();
        view
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn set(&self) -> FieldSet {
        self.set
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn focused_index(&mut self) -> Option<usize> {
        self.focus_ring().focused_index()
    }

    fn focus_ring(&mut self) -> FocusRing<'_> {
        FocusRing::new(vec![
            &mut self.service_name as &mut dyn Focusable,
            &mut self.resource,
            &mut self.path,
        ])
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        [&mut self.service_name, &mut self.resource, &mut self.path]
            .into_iter()
            .find(|field| field.is_focused())
    }

    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        keymap: &Keymap,
        references: &mut ReferencesConfig,
    ) -> Response {
        if keymap.is(Action::Back, key) {
            return Response::Intent(Intent::Return);
        }
        if keymap.is(Action::NextField, key) {
            self.focus_ring().rotate(Direction::Forward);
            return Response::Handled;
        }
        if keymap.is(Action::PrevField, key) {
            self.focus_ring().rotate(Direction::Backward);
            return Response::Handled;
        }

        let changed = self
            .focused_field()
            .is_some_and(|field| field.handle_key(key));
        if changed {
            self.commit(references);
            Response::Handled
        } else {
            Response::Ignored
        }
    }

    /// Write all three inputs into `references`.
    pub fn commit(&self, references: &mut ReferencesConfig) {
        references.service_name = self.service_name.value_or_placeholder().to_string();
        references.resource = self.resource.value().to_string();
        references.path = self.path.value().to_string();
    }
}

impl View for ReferenceEditorView {
    fn title(&self) -> String {
        format!(" {} reference ", self.field)
    }

    fn hints(&self, keymap: &Keymap) -> Vec<Hint> {
        vec![
            keymap.hint(&[Action::PrevField, Action::NextField], "field"),
            keymap.hint(&[Action::Back], "save & go back"),
        ]
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        for (offset, field) in [&self.service_name, &self.resource, &self.path]
            .into_iter()
            .enumerate()
        {
            let y = area.y.saturating_add(offset as u16 * 2);
            if y >= area.bottom() {
                break;
            }
            field.render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut ReferenceEditorView, references: &mut ReferencesConfig, text: &str) {
        let keymap = Keymap::default();
        for c in text.chars() {
            view.handle_key(&key(KeyCode::Char(c)), &keymap, references);
        }
    }

    #[test]
    fn test_keystrokes_write_through() {
        let mut references = ReferencesConfig::default();
        let mut view =
            ReferenceEditorView::new("Bucket", FieldSet::Spec, "Name", "s3", &references);
        let keymap = Keymap::default();

        type_text(&mut view, &mut references, "kms");
        assert_eq!(references.service_name, "kms");

        view.handle_key(&key(KeyCode::Tab), &keymap, &mut references);
        type_text(&mut view, &mut references, "Key");
        assert_eq!(references.resource, "Key");

        view.handle_key(&key(KeyCode::Down), &keymap, &mut references);
        type_text(&mut view, &mut references, ".status.arn");
        assert_eq!(references.path, ".status.arn");

        view.handle_key(&key(KeyCode::Backspace), &keymap, &mut references);
        assert_eq!(references.path, ".status.ar");
    }

    #[test]
    fn test_blank_service_name_falls_back_to_service() {
        let mut references = ReferencesConfig::default();
        let view = ReferenceEditorView::new("Bucket", FieldSet::Spec, "Name", "s3", &references);

        view.commit(&mut references);
        assert_eq!(references.service_name, "s3");
        assert_eq!(references.resource, "");
        assert_eq!(references.path, "");
    }

    #[test]
    fn test_clearing_service_name_restores_fallback() {
        let mut references = ReferencesConfig::default();
        let mut view =
            ReferenceEditorView::new("Bucket", FieldSet::Spec, "Name", "s3", &references);
        let keymap = Keymap::default();

        type_text(&mut view, &mut references, "x");
        assert_eq!(references.service_name, "x");
        view.handle_key(&key(KeyCode::Backspace), &keymap, &mut references);
        assert_eq!(references.service_name, "s3");
    }

    #[test]
    fn test_focus_moves_only_with_field_keys() {
        let references = ReferencesConfig::default();
        let mut scratch = ReferencesConfig::default();
        let mut view =
            ReferenceEditorView::new("Bucket", FieldSet::Spec, "Name", "s3", &references);
        let keymap = Keymap::default();
        assert_eq!(view.focused_index(), Some(0));

        view.handle_key(&key(KeyCode::Char('j')), &keymap, &mut scratch);
        assert_eq!(view.focused_index(), Some(0));

        view.handle_key(&key(KeyCode::BackTab), &keymap, &mut scratch);
        assert_eq!(view.focused_index(), Some(0));

        for _ in 0..5 {
            view.handle_key(&key(KeyCode::Tab), &keymap, &mut scratch);
        }
        assert_eq!(view.focused_index(), Some(2));
        assert!(matches!(
            view.handle_key(&key(KeyCode::Esc), &keymap, &mut scratch),
            Response::Intent(Intent::Return)
        ));
    }

    #[test]
    fn test_existing_reference_is_loaded() {
        let references = ReferencesConfig {
            service_name: "kms".to_string(),
            resource: "Key".to_string(),
            path: ".status.arn".to_string(),
        };
        let view = ReferenceEditorView::new("Bucket", FieldSet::Spec, "KmsKey", "s3", &references);

        let mut written = ReferencesConfig::default();
        view.commit(&mut written);
        assert_eq!(written, references);
    }
}
