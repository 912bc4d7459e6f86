use ratatui::style::{Color, Modifier, Style};

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub base: Style,
    pub quote: Style,
    pub muted: Style,
    pub annotation: Style,
    pub cursor: Style,
    pub button: Style,
    pub button_disabled: Style,
    pub accent: Style,
}

fn indexed(index: i16) -> Color {
    if index < 0 {
        Color::Reset
    } else {
        Color::Indexed(index.min(255) as u8)
    }
}

impl Theme {
    pub fn from_settings(settings: &Settings, dark: bool) -> Self {
        let (fg, bg) = if dark {
            (indexed(settings.dark_color_fg), indexed(settings.dark_color_bg))
        } else {
            (indexed(settings.light_color_fg), indexed(settings.light_color_bg))
        };
        let base = Style::default().fg(fg).bg(bg);
        let (quote, muted, panel) = if dark {
            (Color::Indexed(183), Color::Indexed(245), Color::Indexed(237))
        } else {
            (Color::Indexed(91), Color::Indexed(242), Color::Indexed(254))
        };

        Self {
            base,
            quote: base.fg(quote),
            muted: base.fg(muted),
            annotation: Style::default().fg(muted).bg(panel),
            cursor: Style::default().add_modifier(Modifier::UNDERLINED),
            button: base.add_modifier(Modifier::BOLD),
            button_disabled: base.fg(muted).add_modifier(Modifier::DIM),
            accent: Style::default().fg(Color::White).bg(Color::Blue),
        }
    }
}
