//! The five screens of the wizard plus the header/footer chrome.
//!
//! A view holds scope keys (resource kind, field set, field name) and its
//! widgets. It never holds the document: the navigator lends the view the
//! sub-record it edits for the duration of one dispatch.

pub mod chrome;
pub mod confirm_dialog;
pub mod field_list;
pub mod reference_editor;
pub mod resource_detail;
pub mod summary;

pub use chrome::{FooterView, HEADER_HEIGHT, HeaderView, footer_height};
pub use confirm_dialog::ConfirmDialogView;
pub use field_list::FieldListView;
pub use reference_editor::ReferenceEditorView;
pub use resource_detail::ResourceDetailView;
pub use summary::SummaryView;

use std::collections::HashMap;

use ackdev_types::FieldSet;
use ratatui::{buffer::Buffer, layout::Rect};

use super::intent::{Deferred, Intent};
use super::keymap::{Hint, Keymap};
use super::layout::LayoutContext;

/// What a view made of a key press
pub enum Response {
    /// Not a key this view recognizes
    Ignored,
    /// Consumed locally (highlight moved, focus rotated, text edited)
    Handled,
    /// Apply now
    Intent(Intent),
    /// Apply on a later tick
    Defer(Deferred),
}

pub(crate) trait View {
    fn title(&self) -> String;
    fn hints(&self, keymap: &Keymap) -> Vec<Hint>;
    fn on_layout(&mut self, _layout: &LayoutContext) {}
    fn render(&self, area: Rect, buf: &mut Buffer);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Summary,
    ResourceDetail,
    FieldList(FieldSet),
    ReferenceEditor,
    ConfirmDialog,
}

impl ScreenKind {
    pub fn name(self) -> &'static str {
        match self {
            ScreenKind::Summary => "Summary",
            ScreenKind::ResourceDetail => "ResourceDetail",
            ScreenKind::FieldList(FieldSet::Spec) => "FieldList(Spec)",
            ScreenKind::FieldList(FieldSet::Status) => "FieldList(Status)",
            ScreenKind::ReferenceEditor => "ReferenceEditor",
            ScreenKind::ConfirmDialog => "ConfirmDialog",
        }
    }
}

/// The active screen. The summary view itself lives for the whole session
/// and is owned by the navigator.
pub enum Screen {
    Summary,
    ResourceDetail(ResourceDetailView),
    FieldList(FieldListView),
    ReferenceEditor(ReferenceEditorView),
    ConfirmDialog(ConfirmDialogView),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Summary => ScreenKind::Summary,
            Screen::ResourceDetail(_) => ScreenKind::ResourceDetail,
            Screen::FieldList(view) => ScreenKind::FieldList(view.set()),
            Screen::ReferenceEditor(_) => ScreenKind::ReferenceEditor,
            Screen::ConfirmDialog(_) => ScreenKind::ConfirmDialog,
        }
    }
}

/// Detail and field-list views left behind, keyed by scope, so that
/// re-entry keeps focus and highlight.
#[derive(Default)]
pub struct ViewCache {
    details: HashMap<String, ResourceDetailView>,
    field_lists: HashMap<(String, FieldSet), FieldListView>,
}

impl ViewCache {
    pub fn store(&mut self, screen: Screen) {
        match screen {
            Screen::ResourceDetail(view) => {
                self.details.insert(view.kind().to_string(), view);
            }
            Screen::FieldList(view) => {
                self.field_lists
                    .insert((view.kind().to_string(), view.set()), view);
            }
            Screen::Summary | Screen::ReferenceEditor(_) | Screen::ConfirmDialog(_) => {}
        }
    }

    pub fn take_detail(&mut self, kind: &str) -> Option<ResourceDetailView> {
        self.details.remove(kind)
    }

    pub fn take_field_list(&mut self, kind: &str, set: FieldSet) -> Option<FieldListView> {
        self.field_lists.remove(&(kind.to_string(), set))
    }
}

pub(crate) fn checkbox(checked: bool) -> String {
    if checked { "[x]" } else { "[ ]" }.to_string()
}

/// Breadcrumb label of a field list
pub(crate) fn field_set_title(set: FieldSet) -> String {
    format!("{} Fields", set.label())
}
