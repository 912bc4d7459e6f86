pub mod board;
pub mod controls;
pub mod idle;
pub mod reader;
pub mod theme;
pub mod windows;

use ratatui::layout::Rect;

use crate::models::Viewport;
use crate::ui::controls::ControlBar;

/// Where the fixed parts of the screen go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub content: Rect,
    /// Overlays the bottom of `content` while visible.
    pub controls: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, max_text_width: Option<u16>) -> Self {
        let header = Rect { height: area.height.min(1), ..area };

        let top = area.y + 2u16.min(area.height);
        let height = area.height.saturating_sub(3);
        let mut width = area.width.saturating_sub(4);
        if let Some(max) = max_text_width {
            width = width.min(max);
        }
        let content = Rect::new(area.x + (area.width - width) / 2, top, width, height);

        Self {
            header,
            content,
            controls: ControlBar::area(area),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.content.width, self.content.height)
    }
}
