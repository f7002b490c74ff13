//! Focus ring
//!
//! A view builds a ring on demand from mutable borrows of its focusable
//! widgets, rotates it, and drops it. Rotation is clamped: focus stops at the
//! first and last widget instead of wrapping around.

pub trait Focusable {
    fn is_focused(&self) -> bool;
    fn focus(&mut self);
    fn blur(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub struct FocusRing<'a> {
    widgets: Vec<&'a mut dyn Focusable>,
}

impl<'a> FocusRing<'a> {
    pub fn new(widgets: Vec<&'a mut dyn Focusable>) -> Self {
        Self { widgets }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.widgets.iter().position(|widget| widget.is_focused())
    }

    /// Move focus one step and return the newly focused index.
    ///
    /// With nothing focused the first widget receives focus. Every other
    /// widget is blurred, so at most one widget is focused afterwards.
    pub fn rotate(&mut self, direction: Direction) -> Option<usize> {
        if self.widgets.is_empty() {
            return None;
        }

        let last = self.widgets.len() - 1;
        let next = match (self.focused_index(), direction) {
            (None, _) => 0,
            (Some(index), Direction::Forward) => (index + 1).min(last),
            (Some(index), Direction::Backward) => index.saturating_sub(1),
        };

        self.focus_only(next);
        Some(next)
    }

    pub fn focus_first(&mut self) {
        if !self.widgets.is_empty() {
            self.focus_only(0);
        }
    }

    fn focus_only(&mut self, index: usize) {
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            if i != index && widget.is_focused() {
                widget.blur();
            }
        }
        self.widgets[index].focus();
    }
}
