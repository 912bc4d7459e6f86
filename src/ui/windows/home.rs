use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::settings::Keymap;
use crate::ui::theme::Theme;
use crate::ui::windows::{WindowAction, centered_rect, contains};

const BUTTON_WIDTH: u16 = 32;

pub struct HomeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeLayout {
    pub title: Rect,
    pub open_file: Rect,
    pub direct_input: Rect,
}

impl HomeWindow {
    pub fn layout(area: Rect) -> HomeLayout {
        let block = centered_rect(area, BUTTON_WIDTH, 9);
        let row = |offset: u16, height: u16| {
            let offset = offset.min(block.height);
            Rect::new(
                block.x,
                block.y + offset,
                block.width,
                height.min(block.height - offset),
            )
        };
        HomeLayout {
            title: row(0, 2),
            open_file: row(3, 3),
            direct_input: row(6, 3),
        }
    }

    pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<WindowAction> {
        let layout = Self::layout(area);
        if contains(layout.open_file, x, y) {
            Some(WindowAction::OpenFileInput)
        } else if contains(layout.direct_input, x, y) {
            Some(WindowAction::OpenDirectInput)
        } else {
            None
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, theme: &Theme) {
        let layout = Self::layout(area);

        let title = Paragraph::new(vec![
            Line::from("Choose something to read"),
            Line::from(format!("{} for help", keymap.help)),
        ])
        .alignment(Alignment::Center)
        .style(theme.muted);
        frame.render_widget(title, layout.title);

        let buttons = [
            (layout.open_file, format!("Open Text File ({})", keymap.open_file)),
            (layout.direct_input, format!("Input Text Directly ({})", keymap.direct_input)),
        ];
        for (rect, label) in buttons {
            let button = Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(theme.button)
                .block(Block::default().borders(Borders::ALL).border_style(theme.muted));
            frame.render_widget(button, rect);
        }
    }
}
