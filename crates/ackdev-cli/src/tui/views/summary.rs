//! Resource summary: every CRD of the service with its ignore state.

use ackdev_types::{CrdCatalog, GeneratorConfig};
use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{Response, View, checkbox};
use crate::tui::intent::Intent;
use crate::tui::keymap::{Action, Hint, Keymap};
use crate::tui::layout::{Dimensions, LayoutContext, split_columns};
use crate::tui::widgets::RowTable;

const IGNORED_COLUMN_WIDTH: u16 = 7;
const KIND_COLUMN: usize = 1;

pub struct SummaryView {
    service: String,
    table: RowTable,
    columns_for: Option<Dimensions>,
}

impl SummaryView {
    pub fn new(service: &str, catalog: &CrdCatalog, doc: &GeneratorConfig) -> Self {
        let header = ["Ignored", "Kind", "API Group"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut view = Self {
            service: service.to_string(),
            table: RowTable::new(header, KIND_COLUMN),
            columns_for: None,
        };
        view.sync(catalog, doc);
        view
    }

    /// Rebuild rows from the document, keeping the highlight.
    pub fn sync(&mut self, catalog: &CrdCatalog, doc: &GeneratorConfig) {
        let rows = catalog
            .iter()
            .map(|crd| {
                vec![
                    checkbox(doc.is_ignored(&crd.kind)),
                    crd.kind.clone(),
                    crd.api_group(&self.service),
                ]
            })
            .collect();
        self.table.set_rows(rows);
    }

    pub fn selected_kind(&self) -> Option<&str> {
        self.table.selected_key()
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    pub fn handle_key(&mut self, key: &KeyEvent, keymap: &Keymap) -> Response {
        if keymap.is(Action::Up, key) {
            self.table.move_up();
            Response::Handled
        } else if keymap.is(Action::Down, key) {
            self.table.move_down();
            Response::Handled
        } else if keymap.is(Action::Confirm, key) {
            match self.selected_kind() {
                Some(kind) => Response::Intent(Intent::SelectResource(kind.to_string())),
                None => Response::Handled,
            }
        } else if keymap.is(Action::Ignore, key) {
            match self.selected_kind() {
                Some(kind) => Response::Intent(Intent::ToggleIgnore(kind.to_string())),
                None => Response::Handled,
            }
        } else if keymap.is(Action::Back, key) {
            Response::Intent(Intent::RequestDiscard)
        } else if keymap.is(Action::Quit, key) {
            Response::Intent(Intent::Quit)
        } else {
            Response::Ignored
        }
    }
}

impl View for SummaryView {
    fn title(&self) -> String {
        format!(" {} resources ", self.service)
    }

    fn hints(&self, keymap: &Keymap) -> Vec<Hint> {
        vec![
            keymap.hint(&[Action::Up, Action::Down], "move"),
            keymap.hint(&[Action::Confirm], "select"),
            keymap.hint(&[Action::Ignore], "toggle ignore"),
            keymap.hint(&[Action::Quit], "save & quit"),
            keymap.hint(&[Action::Back], "discard"),
        ]
    }

    fn on_layout(&mut self, layout: &LayoutContext) {
        if self.columns_for == Some(layout.usable) {
            return;
        }
        self.table
            .set_widths(split_columns(layout.usable.width, IGNORED_COLUMN_WIDTH, 2));
        self.columns_for = Some(layout.usable);
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        (&self.table).render(area, buf);
    }
}
