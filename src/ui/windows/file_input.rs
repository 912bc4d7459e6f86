use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;
use crate::ui::windows::{WindowAction, centered_rect, contains};

const OPEN: &str = "[Open]";
const BACK: &str = "[Back]";

pub struct FileInputWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInputLayout {
    pub popup: Rect,
    pub path: Rect,
    pub status: Rect,
    pub open: Rect,
    pub back: Rect,
}

impl FileInputWindow {
    pub fn layout(area: Rect) -> FileInputLayout {
        let popup = centered_rect(area, 64, 7);
        let inner = Block::default().borders(Borders::ALL).inner(popup);
        let row = |offset: u16, x: u16, width: u16| {
            if offset >= inner.height {
                return Rect::new(inner.x, inner.y, 0, 0);
            }
            let x = x.min(inner.width);
            Rect::new(inner.x + x, inner.y + offset, width.min(inner.width - x), 1)
        };
        FileInputLayout {
            popup,
            path: row(0, 0, inner.width),
            status: row(2, 0, inner.width),
            open: row(4, 0, OPEN.len() as u16),
            back: row(4, OPEN.len() as u16 + 2, BACK.len() as u16),
        }
    }

    pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<WindowAction> {
        let layout = Self::layout(area);
        if contains(layout.open, x, y) {
            Some(WindowAction::Submit)
        } else if contains(layout.back, x, y) {
            Some(WindowAction::Back)
        } else {
            None
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, path: &str, pending: bool, theme: &Theme) {
        let layout = Self::layout(area);

        frame.render_widget(Clear, layout.popup);
        frame.render_widget(
            Block::default()
                .title("Open Text File")
                .borders(Borders::ALL)
                .style(theme.base),
            layout.popup,
        );

        // Keep the end of a long path visible.
        let visible: String = {
            let room = layout.path.width.saturating_sub(7) as usize;
            let count = path.chars().count();
            path.chars().skip(count.saturating_sub(room)).collect()
        };
        let path_line = Line::from(vec![
            Span::styled("Path: ", theme.muted),
            Span::styled(visible, theme.base),
            Span::styled("_", theme.cursor),
        ]);
        frame.render_widget(Paragraph::new(path_line), layout.path);

        let status = if pending {
            "Reading..."
        } else {
            "Enter to open, Esc to go back"
        };
        frame.render_widget(Paragraph::new(status).style(theme.muted), layout.status);

        let open_style = if pending || path.trim().is_empty() {
            theme.button_disabled
        } else {
            theme.button
        };
        frame.render_widget(Paragraph::new(OPEN).style(open_style), layout.open);
        frame.render_widget(Paragraph::new(BACK).style(theme.button), layout.back);
    }
}
