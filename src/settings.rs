use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font_size: u16,
    pub start_in_dark_mode: bool,
    pub mouse_support: bool,
    pub auto_hide_controls: bool,
    pub max_text_width: Option<u16>,
    pub dark_color_fg: i16,
    pub dark_color_bg: i16,
    pub light_color_fg: i16,
    pub light_color_bg: i16,
}

impl Settings {
    pub fn merge(&mut self, other: Self) {
        self.font_size = other.font_size;
        self.start_in_dark_mode = other.start_in_dark_mode;
        self.mouse_support = other.mouse_support;
        self.auto_hide_controls = other.auto_hide_controls;
        if other.max_text_width.is_some() {
            self.max_text_width = other.max_text_width;
        }
        self.dark_color_fg = other.dark_color_fg;
        self.dark_color_bg = other.dark_color_bg;
        self.light_color_fg = other.light_color_fg;
        self.light_color_bg = other.light_color_bg;
    }

    /// Configured starting font size, forced into the supported range.
    pub fn initial_font_size(&self) -> u16 {
        self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            start_in_dark_mode: false,
            mouse_support: true,
            auto_hide_controls: true,
            max_text_width: Some(90),
            dark_color_fg: 252,
            dark_color_bg: 235,
            light_color_fg: 238,
            light_color_bg: 255,
        }
    }
}

/// User-facing key bindings, one character each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CfgDefaultKeymaps {
    pub page_up: String,
    pub page_down: String,
    pub shrink: String,
    pub enlarge: String,
    pub switch_color: String,
    pub next_sentence: String,
    pub prev_sentence: String,
    pub annotate: String,
    pub show_controls: String,
    pub back: String,
    pub open_file: String,
    pub direct_input: String,
    pub help: String,
    pub quit: String,
}

impl Default for CfgDefaultKeymaps {
    fn default() -> Self {
        Self {
            page_up: "h".to_string(),
            page_down: "l".to_string(),
            shrink: "-".to_string(),
            enlarge: "+".to_string(),
            switch_color: "c".to_string(),
            next_sentence: "j".to_string(),
            prev_sentence: "k".to_string(),
            annotate: "t".to_string(),
            show_controls: "s".to_string(),
            back: "b".to_string(),
            open_file: "f".to_string(),
            direct_input: "d".to_string(),
            help: "?".to_string(),
            quit: "q".to_string(),
        }
    }
}

impl CfgDefaultKeymaps {
    pub fn merge(&mut self, other: Self) {
        self.page_up = other.page_up;
        self.page_down = other.page_down;
        self.shrink = other.shrink;
        self.enlarge = other.enlarge;
        self.switch_color = other.switch_color;
        self.next_sentence = other.next_sentence;
        self.prev_sentence = other.prev_sentence;
        self.annotate = other.annotate;
        self.show_controls = other.show_controls;
        self.back = other.back;
        self.open_file = other.open_file;
        self.direct_input = other.direct_input;
        self.help = other.help;
        self.quit = other.quit;
    }
}

/// Resolved key bindings used by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub page_up: char,
    pub page_down: char,
    pub shrink: char,
    pub enlarge: char,
    pub switch_color: char,
    pub next_sentence: char,
    pub prev_sentence: char,
    pub annotate: char,
    pub show_controls: char,
    pub back: char,
    pub open_file: char,
    pub direct_input: char,
    pub help: char,
    pub quit: char,
}

impl Keymap {
    /// Takes the first character of each binding; an empty binding falls back
    /// to the default.
    pub fn from_user_dict(dict: &CfgDefaultKeymaps) -> Self {
        let defaults = CfgDefaultKeymaps::default();
        let key = |user: &str, fallback: &str| {
            user.chars()
                .next()
                .or_else(|| fallback.chars().next())
                .unwrap_or(' ')
        };
        Self {
            page_up: key(&dict.page_up, &defaults.page_up),
            page_down: key(&dict.page_down, &defaults.page_down),
            shrink: key(&dict.shrink, &defaults.shrink),
            enlarge: key(&dict.enlarge, &defaults.enlarge),
            switch_color: key(&dict.switch_color, &defaults.switch_color),
            next_sentence: key(&dict.next_sentence, &defaults.next_sentence),
            prev_sentence: key(&dict.prev_sentence, &defaults.prev_sentence),
            annotate: key(&dict.annotate, &defaults.annotate),
            show_controls: key(&dict.show_controls, &defaults.show_controls),
            back: key(&dict.back, &defaults.back),
            open_file: key(&dict.open_file, &defaults.open_file),
            direct_input: key(&dict.direct_input, &defaults.direct_input),
            help: key(&dict.help, &defaults.help),
            quit: key(&dict.quit, &defaults.quit),
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_user_dict(&CfgDefaultKeymaps::default())
    }
}
