use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;
use crate::ui::windows::{WindowAction, centered_popup_area, contains};

const PROCESS: &str = "[Process Text]";
const BACK: &str = "[Back]";

pub struct DirectInputWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectInputLayout {
    pub popup: Rect,
    pub text: Rect,
    pub hint: Rect,
    pub process: Rect,
    pub back: Rect,
}

impl DirectInputWindow {
    pub fn layout(area: Rect) -> DirectInputLayout {
        let popup = centered_popup_area(area, 80, 80);
        let inner = Block::default().borders(Borders::ALL).inner(popup);
        let button_row = inner.bottom().saturating_sub(1).max(inner.y);
        let text_height = inner.height.saturating_sub(3);
        let button = |x: u16, width: u16| {
            let x = x.min(inner.width);
            Rect::new(inner.x + x, button_row, width.min(inner.width - x), inner.height.min(1))
        };

        DirectInputLayout {
            popup,
            text: Rect { height: text_height, ..inner },
            hint: Rect::new(inner.x, inner.y + text_height, inner.width, inner.height.min(1)),
            process: button(0, PROCESS.len() as u16),
            back: button(PROCESS.len() as u16 + 2, BACK.len() as u16),
        }
    }

    /// `can_submit` is false for blank input, which disables Process.
    pub fn hit_test(area: Rect, x: u16, y: u16, can_submit: bool) -> Option<WindowAction> {
        let layout = Self::layout(area);
        if contains(layout.process, x, y) {
            can_submit.then_some(WindowAction::Submit)
        } else if contains(layout.back, x, y) {
            Some(WindowAction::Back)
        } else {
            None
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, text: &str, can_submit: bool, theme: &Theme) {
        let layout = Self::layout(area);

        frame.render_widget(Clear, layout.popup);
        frame.render_widget(
            Block::default()
                .title("Input Text")
                .borders(Borders::ALL)
                .style(theme.base),
            layout.popup,
        );

        let width = layout.text.width.max(1) as usize;
        let mut lines: Vec<String> = text
            .split('\n')
            .flat_map(|line| {
                let wrapped = textwrap::wrap(line, width);
                if wrapped.is_empty() {
                    vec![String::new()]
                } else {
                    wrapped.into_iter().map(|l| l.into_owned()).collect()
                }
            })
            .collect();
        if let Some(last) = lines.last_mut() {
            last.push('_');
        }
        let scroll = lines.len().saturating_sub(layout.text.height as usize);
        let body = Paragraph::new(lines.join("\n"))
            .style(theme.base)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(body, layout.text);

        frame.render_widget(
            Paragraph::new("Ctrl+S process, Ctrl+V paste, Esc back").style(theme.muted),
            layout.hint,
        );

        let process_style = if can_submit {
            theme.button
        } else {
            theme.button_disabled
        };
        frame.render_widget(Paragraph::new(PROCESS).style(process_style), layout.process);
        frame.render_widget(Paragraph::new(BACK).style(theme.button), layout.back);
    }
}
