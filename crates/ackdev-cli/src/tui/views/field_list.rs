use ackdev_types::{Crd, FieldConfig, FieldFlag, FieldSet, ResourceConfig};
use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{Response, View, checkbox, field_set_title};
use crate::tui::intent::Intent;
use crate::tui::keymap::{Action, Hint, Keymap};
use crate::tui::layout::{Dimensions, LayoutContext, split_columns};
use crate::tui::widgets::RowTable;

const NAME_COLUMN_WIDTH: u16 = 22;
const NAME_COLUMN: usize = 0;

/// Type, one column per flag, and the reference target
const SHARED_COLUMNS: usize = 2 + FieldFlag::ALL.len();

/// Spec or status fields of one CRD with their flags. The documentation of
/// the highlighted field, when the model has any, takes the last row.
pub struct FieldListView {
    kind: String,
    set: FieldSet,
    table: RowTable,
    documentation: Vec<Option<String>>,
    columns_for: Option<Dimensions>,
}

impl FieldListView {
    pub fn new(crd: &Crd, set: FieldSet) -> Self {
        let mut header = vec!["Name".to_string(), "Type".to_string()];
        header.extend(FieldFlag::ALL.iter().map(|flag| flag.label().to_string()));
        header.push("Reference".to_string());

        Self {
            kind: crd.kind.clone(),
            set,
            table: RowTable::new(header, NAME_COLUMN),
            documentation: Vec::new(),
            columns_for: None,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn set(&self) -> FieldSet {
        self.set
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    pub fn selected_field(&self) -> Option<&str> {
        self.table.selected_key()
    }

    pub fn selected_documentation(&self) -> Option<&str> {
        let index = self.table.selected_index()?;
        self.documentation.get(index)?.as_deref()
    }

    pub fn columns_for(&self) -> Option<Dimensions> {
        self.columns_for
    }

    /// Rebuild rows from the CRD and the (possibly absent) resource config.
    pub fn sync(&mut self, crd: &Crd, resource: Option<&ResourceConfig>) {
        let fields = crd.fields(self.set);
        let rows = fields
            .iter()
            .map(|meta| {
                let config = resource.and_then(|resource| resource.field(&meta.name));
                let mut row = vec![meta.name.clone(), meta.type_name.clone()];
                row.extend(
                    FieldFlag::ALL
                        .iter()
                        .map(|flag| checkbox(config.is_some_and(|field| field.flag(*flag)))),
                );
                row.push(reference_label(config));
                row
            })
            .collect();
        self.table.set_rows(rows);
        self.documentation = fields
            .iter()
            .map(|meta| meta.documentation.clone())
            .collect();
    }

    pub fn handle_key(&mut self, key: &KeyEvent, keymap: &Keymap) -> Response {
        if keymap.is(Action::Up, key) {
            self.table.move_up();
            return Response::Handled;
        }
        if keymap.is(Action::Down, key) {
            self.table.move_down();
            return Response::Handled;
        }
        if keymap.is(Action::Back, key) {
            return Response::Intent(Intent::Return);
        }
        if keymap.is(Action::Quit, key) {
            return Response::Intent(Intent::Quit);
        }

        let Some(field) = self.selected_field().map(str::to_string) else {
            return Response::Ignored;
        };
        if keymap.is(Action::Confirm, key) {
            return Response::Intent(Intent::OpenReference(field));
        }
        FieldFlag::ALL
            .into_iter()
            .find(|flag| keymap.is(Action::Flag(*flag), key))
            .map_or(Response::Ignored, |flag| {
                Response::Intent(Intent::ToggleFieldFlag { field, flag })
            })
    }
}

fn reference_label(config: Option<&FieldConfig>) -> String {
    config
        .and_then(|field| field.references.as_ref())
        .filter(|references| !references.is_empty())
        .map(|references| format!("{}/{}", references.service_name, references.resource))
        .unwrap_or_default()
}

impl View for FieldListView {
    fn title(&self) -> String {
        format!(" {} {} ", self.kind, field_set_title(self.set))
    }

    fn hints(&self, keymap: &Keymap) -> Vec<Hint> {
        vec![
            keymap.hint(&[Action::Up, Action::Down], "move"),
            keymap.hint(&[Action::Confirm], "edit reference"),
            keymap.hint(&[Action::Flag(FieldFlag::Required)], "required"),
            keymap.hint(&[Action::Flag(FieldFlag::PrimaryKey)], "primary key"),
            keymap.hint(&[Action::Flag(FieldFlag::Secret)], "secret"),
            keymap.hint(&[Action::Flag(FieldFlag::Immutable)], "immutable"),
            keymap.hint(&[Action::Flag(FieldFlag::Arn)], "arn"),
            keymap.hint(&[Action::Back], "go back"),
            keymap.hint(&[Action::Quit], "save & quit"),
        ]
    }

    fn on_layout(&mut self, layout: &LayoutContext) {
        if self.columns_for == Some(layout.usable) {
            return;
        }
        self.table.set_widths(split_columns(
            layout.usable.width,
            NAME_COLUMN_WIDTH,
            SHARED_COLUMNS,
        ));
        self.columns_for = Some(layout.usable);
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let documentation = self.selected_documentation().filter(|_| area.height > 2);
        let Some(documentation) = documentation else {
            (&self.table).render(area, buf);
            return;
        };

        let table_area = Rect {
            height: area.height - 1,
            ..area
        };
        let documentation_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        (&self.table).render(table_area, buf);
        let style = Style::default().fg(Color::DarkGray);
        Paragraph::new(Line::from(Span::styled(documentation, style)))
            .render(documentation_area, buf);
    }
}
