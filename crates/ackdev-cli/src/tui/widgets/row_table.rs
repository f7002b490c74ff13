use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Row, StatefulWidget, Table, TableState, Widget},
};

use crate::tui::focus::Focusable;

/// Table with fixed columns and exactly one highlighted row (when non-empty).
///
/// Rows are identified by the value of `key_column`.
#[derive(Debug, Clone)]
pub struct RowTable {
    header: Vec<String>,
    widths: Vec<u16>,
    rows: Vec<Vec<String>>,
    key_column: usize,
    selected: usize,
    focused: bool,
}

impl RowTable {
    pub fn new(header: Vec<String>, key_column: usize) -> Self {
        Self {
            header,
            widths: Vec::new(),
            rows: Vec::new(),
            key_column,
            selected: 0,
            focused: true,
        }
    }

    pub fn set_widths(&mut self, widths: Vec<u16>) {
        self.widths = widths;
    }

    pub fn widths(&self) -> &[u16] {
        &self.widths
    }

    /// Replace the rows, keeping the highlight on the same index (clamped).
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    /// Key column of the highlighted row; `None` for an empty table
    pub fn selected_key(&self) -> Option<&str> {
        self.rows
            .get(self.selected)
            .and_then(|row| row.get(self.key_column))
            .map(String::as_str)
    }
}

impl Focusable for RowTable {
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

impl Widget for &RowTable {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(self.header.iter().map(String::as_str)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self
            .rows
            .iter()
            .map(|row| Row::new(row.iter().map(String::as_str)));
        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let table = Table::new(rows, self.widths.iter().map(|w| Constraint::Length(*w)))
            .header(header)
            .column_spacing(0)
            .row_highlight_style(highlight);

        let mut state = TableState::default().with_selected(self.selected_index());
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
