use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::core::display_width;

use crate::models::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::ui::theme::Theme;

pub const BACK_LABEL: &str = "[← Back to Home]";
pub const DARK_LABEL: &str = "[Dark Mode]";
pub const LIGHT_LABEL: &str = "[Light Mode]";

const FONT_MINUS: &str = "[-]";
const FONT_PLUS: &str = "[+]";
const PREVIOUS: &str = "[< Prev]";
const NEXT: &str = "[Next >]";

/// Rows taken by the floating control bar, borders included.
pub const CONTROL_BAR_HEIGHT: u16 = 4;
const CONTROL_BAR_MAX_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Back,
    ToggleTheme,
    DecreaseFont,
    IncreaseFont,
    SetFont(u16),
    PreviousPage,
    NextPage,
}

fn label_width(label: &str) -> u16 {
    display_width(label).min(u16::MAX as usize) as u16
}

fn hit(rect: Option<Rect>, x: u16, y: u16) -> bool {
    rect.is_some_and(|r| r.contains(Position::new(x, y)))
}

/// Top bar: a back button while reading and the theme switch on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderBar {
    pub show_back: bool,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderLayout {
    pub back: Option<Rect>,
    pub theme: Option<Rect>,
}

impl HeaderBar {
    /// The button names the mode it switches to.
    pub fn theme_label(&self) -> &'static str {
        if self.dark_mode { LIGHT_LABEL } else { DARK_LABEL }
    }

    pub fn layout(&self, area: Rect) -> HeaderLayout {
        if area.height == 0 {
            return HeaderLayout::default();
        }
        let back = self.show_back.then(|| {
            let width = label_width(BACK_LABEL).min(area.width.saturating_sub(1));
            Rect::new(area.x + 1u16.min(area.width), area.y, width, 1)
        });
        let theme_width = label_width(self.theme_label());
        let theme = (area.width > theme_width).then(|| {
            Rect::new(area.right() - theme_width - 1, area.y, theme_width, 1)
        });
        HeaderLayout { back, theme }
    }

    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<ControlAction> {
        let layout = self.layout(area);
        if hit(layout.back, x, y) {
            Some(ControlAction::Back)
        } else if hit(layout.theme, x, y) {
            Some(ControlAction::ToggleTheme)
        } else {
            None
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Block::default().style(theme.base), area);
        let layout = self.layout(area);
        if let Some(rect) = layout.back {
            frame.render_widget(Paragraph::new(BACK_LABEL).style(theme.button), rect);
        }
        if let Some(rect) = layout.theme {
            frame.render_widget(Paragraph::new(self.theme_label()).style(theme.button), rect);
        }
    }
}

/// Floating bar with font size and page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBar {
    pub font_size: u16,
    pub page_index: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlBarLayout {
    pub font_minus: Rect,
    pub font_value: Rect,
    pub font_plus: Rect,
    pub slider: Rect,
    pub previous: Rect,
    pub page_label: Rect,
    pub next: Rect,
}

impl ControlBar {
    /// Bottom-centred overlay area for a screen.
    pub fn area(screen: Rect) -> Rect {
        let width = screen.width.min(CONTROL_BAR_MAX_WIDTH);
        let height = screen.height.min(CONTROL_BAR_HEIGHT);
        Rect::new(
            screen.x + (screen.width - width) / 2,
            screen.bottom() - height,
            width,
            height,
        )
    }

    pub fn page_label(&self) -> String {
        if self.page_count == 0 {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.page_index + 1, self.page_count)
        }
    }

    pub fn can_decrease_font(&self) -> bool {
        self.font_size > MIN_FONT_SIZE
    }

    pub fn can_increase_font(&self) -> bool {
        self.font_size < MAX_FONT_SIZE
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn layout(&self, area: Rect) -> ControlBarLayout {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if inner.width == 0 || inner.height == 0 {
            return ControlBarLayout::default();
        }
        let row = inner.y;
        let clip = |x: u16, width: u16, y: u16| {
            let x = x.min(inner.right());
            Rect::new(x, y, width.min(inner.right() - x), 1)
        };

        let minus_w = label_width(FONT_MINUS);
        let font_minus = clip(inner.x, minus_w, row);
        let font_value = clip(font_minus.right() + 1, 2, row);
        let font_plus = clip(font_value.right() + 1, label_width(FONT_PLUS), row);

        let label = self.page_label();
        let next_w = label_width(NEXT);
        let label_w = label_width(&label);
        let prev_w = label_width(PREVIOUS);
        let nav_width = prev_w + 1 + label_w + 1 + next_w;
        let nav_x = inner.right().saturating_sub(nav_width).max(font_plus.right() + 1);
        let previous = clip(nav_x, prev_w, row);
        let page_label = clip(previous.right() + 1, label_w, row);
        let next = clip(page_label.right() + 1, next_w, row);

        let slider = if inner.height > 1 {
            clip(inner.x, inner.width, row + 1)
        } else {
            Rect::new(inner.x, row, 0, 0)
        };

        ControlBarLayout {
            font_minus,
            font_value,
            font_plus,
            slider,
            previous,
            page_label,
            next,
        }
    }

    /// Font size for a column on the slider track.
    pub fn slider_value(slider: Rect, x: u16) -> u16 {
        if slider.width < 2 {
            return MIN_FONT_SIZE;
        }
        let offset = x.clamp(slider.x, slider.right() - 1) - slider.x;
        let span = (MAX_FONT_SIZE - MIN_FONT_SIZE) as u32;
        let steps = (slider.width - 1) as u32;
        MIN_FONT_SIZE + ((offset as u32 * span + steps / 2) / steps) as u16
    }

    /// Column on the slider track showing `font_size`.
    pub fn slider_position(slider: Rect, font_size: u16) -> u16 {
        if slider.width < 2 {
            return slider.x;
        }
        let value = font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE) - MIN_FONT_SIZE;
        let span = (MAX_FONT_SIZE - MIN_FONT_SIZE) as u32;
        let steps = (slider.width - 1) as u32;
        slider.x + ((value as u32 * steps + span / 2) / span) as u16
    }

    /// Action under a cell. Disabled buttons do nothing.
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<ControlAction> {
        let layout = self.layout(area);
        let at = |rect: Rect| hit(Some(rect), x, y);

        if at(layout.font_minus) {
            self.can_decrease_font().then_some(ControlAction::DecreaseFont)
        } else if at(layout.font_plus) {
            self.can_increase_font().then_some(ControlAction::IncreaseFont)
        } else if at(layout.slider) {
            Some(ControlAction::SetFont(Self::slider_value(layout.slider, x)))
        } else if at(layout.previous) {
            self.has_previous().then_some(ControlAction::PreviousPage)
        } else if at(layout.next) {
            self.has_next().then_some(ControlAction::NextPage)
        } else {
            None
        }
    }

    /// Action for a left-button drag. Only the slider row follows the pointer;
    /// columns past the track ends clamp to the font size bounds.
    pub fn drag(&self, area: Rect, x: u16, y: u16) -> Option<ControlAction> {
        let slider = self.layout(area).slider;
        let on_row = slider.height > 0 && y == slider.y;
        (on_row && x >= area.x && x < area.right())
            .then(|| ControlAction::SetFont(Self::slider_value(slider, x)))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.muted)
                .style(theme.base),
            area,
        );

        let layout = self.layout(area);
        let button = |label: &'static str, enabled: bool| {
            let style = if enabled { theme.button } else { theme.button_disabled };
            Paragraph::new(label).style(style)
        };

        frame.render_widget(button(FONT_MINUS, self.can_decrease_font()), layout.font_minus);
        frame.render_widget(
            Paragraph::new(format!("{:>2}", self.font_size)).style(theme.base),
            layout.font_value,
        );
        frame.render_widget(button(FONT_PLUS, self.can_increase_font()), layout.font_plus);
        frame.render_widget(button(PREVIOUS, self.has_previous()), layout.previous);
        frame.render_widget(
            Paragraph::new(self.page_label()).style(theme.base),
            layout.page_label,
        );
        frame.render_widget(button(NEXT, self.has_next()), layout.next);

        if layout.slider.width > 0 {
            let knob = Self::slider_position(layout.slider, self.font_size) - layout.slider.x;
            let track: Vec<Span> = (0..layout.slider.width)
                .map(|i| {
                    if i == knob {
                        Span::styled("●", theme.accent)
                    } else {
                        Span::styled("─", theme.muted)
                    }
                })
                .collect();
            frame.render_widget(Paragraph::new(Line::from(track)), layout.slider);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(font_size: u16, page_index: usize, page_count: usize) -> ControlBar {
        ControlBar {
            font_size,
            page_index,
            page_count,
        }
    }

    #[test]
    fn test_area_is_bottom_centred() {
        let area = ControlBar::area(Rect::new(0, 0, 100, 30));
        assert_eq!(area, Rect::new(10, 26, 80, 4));
        let small = ControlBar::area(Rect::new(0, 0, 40, 3));
        assert_eq!(small, Rect::new(0, 0, 40, 3));
    }

    #[test]
    fn test_layout_positions() {
        let area = Rect::new(0, 0, 60, 4);
        let layout = bar(16, 0, 3).layout(area);
        assert_eq!(layout.font_minus, Rect::new(1, 1, 3, 1));
        assert_eq!(layout.font_value, Rect::new(5, 1, 2, 1));
        assert_eq!(layout.font_plus, Rect::new(8, 1, 3, 1));
        assert_eq!(layout.slider, Rect::new(1, 2, 58, 1));
        assert_eq!(layout.next.right(), 59);
        assert!(layout.previous.right() < layout.page_label.x);
    }

    #[test]
    fn test_hit_test_buttons() {
        let area = Rect::new(0, 0, 60, 4);
        let controls = bar(16, 1, 3);
        let layout = controls.layout(area);
        assert_eq!(controls.hit_test(area, 2, 1), Some(ControlAction::DecreaseFont));
        assert_eq!(controls.hit_test(area, 9, 1), Some(ControlAction::IncreaseFont));
        assert_eq!(
            controls.hit_test(area, layout.previous.x, 1),
            Some(ControlAction::PreviousPage)
        );
        assert_eq!(controls.hit_test(area, layout.next.x, 1), Some(ControlAction::NextPage));
        assert_eq!(controls.hit_test(area, layout.page_label.x, 1), None);
        assert_eq!(controls.hit_test(area, 0, 0), None);
    }

    #[test]
    fn test_disabled_buttons_do_nothing() {
        let area = Rect::new(0, 0, 60, 4);
        let at_bounds = bar(MIN_FONT_SIZE, 0, 1);
        let layout = at_bounds.layout(area);
        assert_eq!(at_bounds.hit_test(area, 2, 1), None);
        assert_eq!(at_bounds.hit_test(area, layout.previous.x, 1), None);
        assert_eq!(at_bounds.hit_test(area, layout.next.x, 1), None);

        let max = bar(MAX_FONT_SIZE, 0, 1);
        assert_eq!(max.hit_test(area, 9, 1), None);
    }

    #[test]
    fn test_slider_maps_columns_to_font_sizes() {
        let slider = Rect::new(1, 2, 13, 1);
        assert_eq!(ControlBar::slider_value(slider, 1), MIN_FONT_SIZE);
        assert_eq!(ControlBar::slider_value(slider, 13), MAX_FONT_SIZE);
        assert_eq!(ControlBar::slider_value(slider, 7), 18);
        // clicks past the ends clamp
        assert_eq!(ControlBar::slider_value(slider, 40), MAX_FONT_SIZE);
        assert_eq!(ControlBar::slider_position(slider, 18), 7);
        assert_eq!(ControlBar::slider_position(slider, MIN_FONT_SIZE), 1);
    }

    #[test]
    fn test_slider_hit_sets_font() {
        let area = Rect::new(0, 0, 27, 4);
        let controls = bar(16, 0, 1);
        // track spans columns 1..=25
        assert_eq!(
            controls.hit_test(area, 25, 2),
            Some(ControlAction::SetFont(MAX_FONT_SIZE))
        );
        assert_eq!(
            controls.hit_test(area, 1, 2),
            Some(ControlAction::SetFont(MIN_FONT_SIZE))
        );
    }

    #[test]
    fn test_drag_follows_slider_row() {
        let area = Rect::new(0, 0, 27, 4);
        let controls = bar(16, 0, 1);
        assert_eq!(controls.drag(area, 13, 2), Some(ControlAction::SetFont(18)));
        // the border columns clamp to the track ends
        assert_eq!(controls.drag(area, 0, 2), Some(ControlAction::SetFont(MIN_FONT_SIZE)));
        assert_eq!(controls.drag(area, 26, 2), Some(ControlAction::SetFont(MAX_FONT_SIZE)));
        // dragging across the buttons does not press them
        assert_eq!(controls.drag(area, 9, 1), None);
        assert_eq!(controls.drag(area, 13, 3), None);
        assert_eq!(controls.drag(area, 30, 2), None);
    }

    #[test]
    fn test_page_label() {
        assert_eq!(bar(16, 0, 0).page_label(), "0 / 0");
        assert_eq!(bar(16, 2, 5).page_label(), "3 / 5");
    }

    #[test]
    fn test_header_layout_and_hits() {
        let area = Rect::new(0, 0, 60, 1);
        let reading = HeaderBar {
            show_back: true,
            dark_mode: false,
        };
        assert_eq!(reading.theme_label(), DARK_LABEL);
        let layout = reading.layout(area);
        assert_eq!(layout.back, Some(Rect::new(1, 0, 16, 1)));
        assert_eq!(layout.theme, Some(Rect::new(48, 0, 11, 1)));
        assert_eq!(reading.hit_test(area, 3, 0), Some(ControlAction::Back));
        assert_eq!(reading.hit_test(area, 50, 0), Some(ControlAction::ToggleTheme));
        assert_eq!(reading.hit_test(area, 30, 0), None);

        let home = HeaderBar {
            show_back: false,
            dark_mode: true,
        };
        assert_eq!(home.theme_label(), LIGHT_LABEL);
        assert_eq!(home.hit_test(area, 3, 0), None);
    }
}
