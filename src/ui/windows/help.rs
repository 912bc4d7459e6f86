use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::settings::Keymap;

pub struct HelpWindow;

impl HelpWindow {
    pub fn lines(keymap: &Keymap) -> Vec<String> {
        let key = |c: char| c.to_string();
        let rows: Vec<(String, &str)> = vec![
            (String::new(), " Reading:"),
            (format!("{} / Left / PgUp", key(keymap.page_up)), "Previous Page"),
            (format!("{} / Right / PgDn / Space", key(keymap.page_down)), "Next Page"),
            (format!("{} / {}", keymap.shrink, keymap.enlarge), "Font Size -/+"),
            (key(keymap.switch_color), "Dark / Light Mode"),
            (key(keymap.show_controls), "Show Controls"),
            (String::new(), ""),
            (String::new(), " Sentences:"),
            (format!("{} / Down", keymap.next_sentence), "Next Sentence"),
            (format!("{} / Up", keymap.prev_sentence), "Previous Sentence"),
            (format!("{} / Enter", keymap.annotate), "Toggle Popup"),
            ("Click".to_string(), "Show Popup / Hide Popup"),
            (String::new(), ""),
            (String::new(), " Screens:"),
            (key(keymap.open_file), "Open Text File"),
            (key(keymap.direct_input), "Input Text Directly"),
            (format!("{} / Esc", keymap.back), "Back"),
            ("Ctrl+S".to_string(), "Process Typed Text"),
            ("Ctrl+V".to_string(), "Paste"),
            (key(keymap.help), "Help"),
            (key(keymap.quit), "Quit"),
        ];

        rows.into_iter()
            .map(|(keys, action)| {
                if keys.is_empty() {
                    action.to_string()
                } else {
                    format!("   {:<26}{}", keys, action)
                }
            })
            .collect()
    }

    fn popup_area(area: Rect, lines: &[String]) -> Rect {
        let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = (max_width + 4).min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);

        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        Rect::new(x, y, width, height)
    }

    /// Largest useful scroll offset when the popup is shorter than its text.
    pub fn max_scroll_offset(area: Rect, keymap: &Keymap) -> u16 {
        let lines = Self::lines(keymap);
        let popup = Self::popup_area(area, &lines);
        (lines.len() as u16).saturating_sub(popup.height.saturating_sub(2))
    }

    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, scroll_offset: u16) {
        let lines = Self::lines(keymap);
        let popup_area = Self::popup_area(area, &lines);
        let help_content: Vec<Line> = lines.into_iter().map(Line::from).collect();

        frame.render_widget(Clear, popup_area);

        let help_paragraph = Paragraph::new(help_content)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .scroll((scroll_offset, 0));

        frame.render_widget(help_paragraph, popup_area);
    }
}
