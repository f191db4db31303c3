//! Layout helpers shared by the UI components.

use ratatui::prelude::*;

/// A full-height rectangle of at most `width` columns pinned to the right
/// edge of `area`.
pub fn right_aligned_rect(width: u16, area: Rect) -> Rect {
    let [_, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Length(width.min(area.width))]).areas(area);
    right
}

/// Removes the bottom `rows` of `area`.
pub fn without_bottom_rows(area: Rect, rows: u16) -> Rect {
    Rect {
        height: area.height.saturating_sub(rows),
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_aligned_rect_pins_to_the_right_edge() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(right_aligned_rect(50, area), Rect::new(70, 0, 50, 40));
    }

    #[test]
    fn right_aligned_rect_shrinks_to_narrow_areas() {
        let area = Rect::new(5, 2, 30, 10);
        assert_eq!(right_aligned_rect(50, area), Rect::new(5, 2, 30, 10));
    }

    #[test]
    fn bottom_rows_saturate() {
        assert_eq!(without_bottom_rows(Rect::new(0, 0, 10, 1), 3).height, 0);
        assert_eq!(without_bottom_rows(Rect::new(0, 0, 10, 8), 1), Rect::new(0, 0, 10, 7));
    }
}
