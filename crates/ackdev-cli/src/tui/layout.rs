//! Layout engine
//!
//! The screen is a one-cell margin around three stacked regions:
//!
//! ```text
//! margin
//! header     (header_height rows)
//! container  (bordered block; its inner area is the usable area)
//! footer     (footer_height rows)
//! margin
//! ```
//!
//! [`LayoutContext`] is recomputed whenever the window or the chrome heights
//! change and is read-only in between.

use ratatui::layout::Rect;

/// Outer margin, one cell on each side
pub const FRAME_MARGIN: u16 = 2;

/// Border of the container block, one cell on each side
pub const INNER_BORDER: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutContext {
    pub window: Dimensions,
    pub header_height: u16,
    pub footer_height: u16,
    pub container: Dimensions,
    pub usable: Dimensions,
}

impl LayoutContext {
    /// All subtractions saturate, so a window smaller than its chrome
    /// yields empty (not negative) regions.
    pub fn compute(window: Dimensions, header_height: u16, footer_height: u16) -> Self {
        let container = Dimensions {
            width: window.width.saturating_sub(FRAME_MARGIN),
            height: window
                .height
                .saturating_sub(FRAME_MARGIN)
                .saturating_sub(header_height)
                .saturating_sub(footer_height),
        };
        let usable = Dimensions {
            width: container.width.saturating_sub(INNER_BORDER),
            height: container.height.saturating_sub(INNER_BORDER),
        };

        Self {
            window,
            header_height,
            footer_height,
            container,
            usable,
        }
    }

    pub fn header_area(&self) -> Rect {
        Rect::new(1, 1, self.container.width, self.header_height)
    }

    pub fn container_area(&self) -> Rect {
        Rect::new(
            1,
            1u16.saturating_add(self.header_height),
            self.container.width,
            self.container.height,
        )
    }

    pub fn footer_area(&self) -> Rect {
        Rect::new(
            1,
            1u16.saturating_add(self.header_height)
                .saturating_add(self.container.height),
            self.container.width,
            self.footer_height,
        )
    }
}

/// One fixed-width column followed by `n` columns sharing the rest equally.
///
/// Each shared column is `round((total - fixed) / n)` wide, so the sum may
/// differ from `total` by up to `n / 2` cells.
pub fn split_columns(total: u16, fixed: u16, n: usize) -> Vec<u16> {
    let mut widths = Vec::with_capacity(n + 1);
    widths.push(fixed.min(total));
    if n == 0 {
        return widths;
    }

    let remaining = f64::from(total.saturating_sub(fixed));
    let each = (remaining / n as f64).round() as u16;
    widths.extend(std::iter::repeat_n(each, n));
    widths
}

/// Number of lines a sequence of items occupies when laid out left to right
/// with `separator` cells between items and wrapped at `width`.
///
/// An item wider than the line gets a line of its own.
pub fn wrapped_line_count(item_widths: &[usize], separator: usize, width: u16) -> u16 {
    if item_widths.is_empty() {
        return 0;
    }

    let width = usize::from(width).max(1);
    let mut lines: u16 = 1;
    let mut used = 0usize;

    for &item in item_widths {
        if used == 0 {
            used = item;
        } else if used + separator + item <= width {
            used += separator + item;
        } else {
            lines = lines.saturating_add(1);
            used = item;
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_identities_hold_across_resizes() {
        let chrome = [(2u16, 1u16), (2, 2), (3, 4), (0, 0)];
        let windows = [(100u16, 30u16), (80, 24), (40, 12), (200, 60), (12, 12)];

        for &(width, height) in &windows {
            for &(header, footer) in &chrome {
                let layout = LayoutContext::compute(Dimensions::new(width, height), header, footer);

                assert_eq!(
                    layout.container.height + FRAME_MARGIN + header + footer,
                    height,
                    "{}x{} header={} footer={}",
                    width, height, header, footer
                );
                assert_eq!(layout.container.width + FRAME_MARGIN, width);
                assert_eq!(layout.usable.width, layout.container.width - INNER_BORDER);
                assert_eq!(layout.usable.height, layout.container.height - INNER_BORDER);
            }
        }
    }

    #[test]
    fn test_tiny_window_saturates() {
        let layout = LayoutContext::compute(Dimensions::new(1, 3), 2, 2);
        assert_eq!(layout.container, Dimensions::new(0, 0));
        assert_eq!(layout.usable, Dimensions::new(0, 0));
    }

    #[test]
    fn test_regions_stack_without_overlap() {
        let layout = LayoutContext::compute(Dimensions::new(100, 30), 2, 1);
        let header = layout.header_area();
        let container = layout.container_area();
        let footer = layout.footer_area();

        assert_eq!(header.y, 1);
        assert_eq!(container.y, header.y + header.height);
        assert_eq!(footer.y, container.y + container.height);
        assert_eq!(footer.y + footer.height + 1, 30);
        assert_eq!(container.width, 98);
    }

    #[test]
    fn test_split_columns_rounds_shared_width() {
        assert_eq!(split_columns(96, 7, 2), vec![7, 45, 45]);
        assert_eq!(split_columns(97, 7, 2), vec![7, 45, 45]);
        assert_eq!(split_columns(98, 7, 2), vec![7, 46, 46]);
        assert_eq!(
            split_columns(96, 22, 7),
            vec![22, 11, 11, 11, 11, 11, 11, 11]
        );
    }

    #[test]
    fn test_split_columns_degenerate_inputs() {
        assert_eq!(split_columns(5, 7, 2), vec![5, 0, 0]);
        assert_eq!(split_columns(50, 10, 0), vec![10]);
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count(&[], 2, 80), 0);
        assert_eq!(wrapped_line_count(&[10, 10, 10], 2, 80), 1);
        assert_eq!(wrapped_line_count(&[10, 10, 10], 2, 22), 2);
        assert_eq!(wrapped_line_count(&[10, 10, 10], 2, 10), 3);
        assert_eq!(wrapped_line_count(&[30], 2, 10), 1);
    }
}
