pub mod direct_input;
pub mod file_input;
pub mod help;
pub mod home;

use ratatui::layout::{Position, Rect};

/// What a click on one of the input screens asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    OpenFileInput,
    OpenDirectInput,
    Submit,
    Back,
}

/// Compute a centered popup area within the given area.
pub fn centered_popup_area(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let width = (area.width * width_percent) / 100;
    let height = (area.height * height_percent) / 100;
    centered_rect(area, width, height)
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;

    Rect::new(x, y, width, height)
}

pub(crate) fn contains(rect: Rect, x: u16, y: u16) -> bool {
    rect.contains(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_area() {
        let area = Rect::new(0, 0, 100, 50);
        assert_eq!(centered_popup_area(area, 50, 50), Rect::new(25, 12, 50, 25));
    }

    #[test]
    fn test_centered_rect_shrinks_to_fit() {
        let area = Rect::new(2, 2, 10, 4);
        assert_eq!(centered_rect(area, 40, 8), area);
        assert_eq!(centered_rect(area, 4, 2), Rect::new(5, 3, 4, 2));
    }
}
