//! Header and footer around the active view.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::breadcrumbs::Breadcrumbs;
use crate::tui::keymap::Hint;
use crate::tui::layout::wrapped_line_count;

/// Title row plus breadcrumb row
pub const HEADER_HEIGHT: u16 = 2;

const HINT_SEPARATOR: usize = 2;
const BREADCRUMB_SEPARATOR: &str = " › ";

/// Controller title from the document's model name, then the breadcrumb
/// trail rooted at the service
pub struct HeaderView<'a> {
    model_name: &'a str,
    service: &'a str,
    breadcrumbs: &'a Breadcrumbs,
}

impl<'a> HeaderView<'a> {
    pub fn new(model_name: &'a str, service: &'a str, breadcrumbs: &'a Breadcrumbs) -> Self {
        Self {
            model_name,
            service,
            breadcrumbs,
        }
    }
}

impl Widget for HeaderView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(Span::styled(
            format!("Generating \"{}-controller\"", self.model_name),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        let mut trail = vec![Span::styled(self.service, Style::default().fg(Color::Cyan))];
        for part in self.breadcrumbs.parts() {
            trail.push(Span::styled(BREADCRUMB_SEPARATOR, Style::default().fg(Color::DarkGray)));
            trail.push(Span::raw(part.clone()));
        }

        Paragraph::new(vec![title, Line::from(trail)]).render(area, buf);
    }
}

/// Key hints wrapped over as many rows as needed, then an optional notice
pub struct FooterView<'a> {
    hints: &'a [Hint],
    notice: Option<&'a str>,
}

impl<'a> FooterView<'a> {
    pub fn new(hints: &'a [Hint], notice: Option<&'a str>) -> Self {
        Self { hints, notice }
    }

    fn lines(&self, width: u16) -> Vec<Line<'a>> {
        let width = usize::from(width).max(1);
        let mut lines = Vec::new();
        let mut current: Vec<Span<'a>> = Vec::new();
        let mut used = 0usize;

        for hint in self.hints {
            let item = hint.width();
            if used > 0 && used + HINT_SEPARATOR + item > width {
                lines.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            if used > 0 {
                current.push(Span::raw(" ".repeat(HINT_SEPARATOR)));
                used += HINT_SEPARATOR;
            }
            current.push(Span::styled(
                format!("[{}]", hint.keys),
                Style::default().fg(Color::Yellow),
            ));
            current.push(Span::raw(format!(" {}", hint.label)));
            used += item;
        }
        if !current.is_empty() {
            lines.push(Line::from(current));
        }

        if let Some(notice) = self.notice {
            lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::Yellow))));
        }
        lines
    }
}

impl Widget for FooterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines(area.width)).render(area, buf);
    }
}

/// Rows the footer occupies at `width`
pub fn footer_height(hints: &[Hint], notice: bool, width: u16) -> u16 {
    let widths: Vec<usize> = hints.iter().map(Hint::width).collect();
    wrapped_line_count(&widths, HINT_SEPARATOR, width) + u16::from(notice)
}
