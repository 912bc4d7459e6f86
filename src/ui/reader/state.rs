use std::time::{Duration, Instant};

use crate::annotations::AnnotationStore;
use crate::config::Config;
use crate::document::Document;
use crate::ingest::FileReadResult;
use crate::layout::measure_cells;
use crate::models::{
    AnnotationKey, Direction, IDLE_TIMEOUT_MS, MAX_FONT_SIZE, MIN_FONT_SIZE, Page, Viewport,
    WindowType,
};
use crate::pagination::{MeasureFn, paginate};
use crate::ui::board::ClickTarget;
use crate::ui::idle::IdleTimer;

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Display settings that survive going back to the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub font_size: u16,
    pub page_index: usize,
    pub dark_mode: bool,
}

/// Application state that encompasses all UI and reading state
#[derive(Debug, Clone)]
pub struct ApplicationState {
    pub config: Config,
    pub view: ViewState,
    pub document: Option<Document>,
    pub pages: Vec<Page>,
    pub annotations: AnnotationStore,
    pub ui_state: UiState,
    pub idle: IdleTimer,
    pub viewport: Option<Viewport>,
    pub should_quit: bool,
    measure: MeasureFn,
}

impl ApplicationState {
    pub fn new(config: Config) -> Self {
        Self::with_measure(config, measure_cells)
    }

    pub fn with_measure(config: Config, measure: MeasureFn) -> Self {
        let view = ViewState {
            font_size: config.settings.initial_font_size(),
            page_index: 0,
            dark_mode: config.settings.start_in_dark_mode,
        };
        let idle = IdleTimer::new(
            Duration::from_millis(IDLE_TIMEOUT_MS),
            config.settings.auto_hide_controls,
        );
        Self {
            config,
            view,
            document: None,
            pages: Vec::new(),
            annotations: AnnotationStore::new(),
            ui_state: UiState::new(),
            idle,
            viewport: None,
            should_quit: false,
            measure,
        }
    }

    pub fn active_window(&self) -> WindowType {
        self.ui_state.active_window
    }

    pub fn choose_file_input(&mut self) {
        if self.ui_state.active_window == WindowType::Home {
            self.ui_state.open_window(WindowType::FileInput);
        }
    }

    pub fn choose_direct_input(&mut self) {
        if self.ui_state.active_window == WindowType::Home {
            self.ui_state.open_window(WindowType::DirectInput);
        }
    }

    /// Input screens return home keeping what was typed. Leaving the reader
    /// discards the document and everything tied to it.
    pub fn back(&mut self) {
        match self.ui_state.active_window {
            WindowType::Home => {}
            WindowType::FileInput | WindowType::DirectInput => {
                self.ui_state.file_read_pending = false;
                self.ui_state.open_window(WindowType::Home);
            }
            WindowType::Reader => {
                log::info!("Closing document");
                self.document = None;
                self.pages.clear();
                self.annotations.clear();
                self.view.page_index = 0;
                self.ui_state.cursor = None;
                self.ui_state.direct_input.clear();
                self.ui_state.open_window(WindowType::Home);
            }
        }
    }

    pub fn can_submit_direct_input(&self) -> bool {
        !self.ui_state.direct_input.trim().is_empty()
    }

    /// Loads the typed text. Blank input is refused.
    pub fn submit_direct_input(&mut self) -> bool {
        if self.ui_state.active_window != WindowType::DirectInput || !self.can_submit_direct_input()
        {
            return false;
        }
        let document = Document::from_text(&self.ui_state.direct_input);
        self.load_document(document);
        true
    }

    pub fn load_text(&mut self, text: &str) {
        self.load_document(Document::from_text(text));
    }

    pub fn load_document(&mut self, document: Document) {
        log::info!(
            "Loaded {} paragraphs, {} sentences",
            document.len(),
            document.sentence_count()
        );
        self.document = Some(document);
        self.pages.clear();
        self.annotations.clear();
        self.view.page_index = 0;
        self.ui_state.cursor = None;
        self.ui_state.file_read_pending = false;
        self.ui_state.open_window(WindowType::Reader);
        self.repaginate();
    }

    /// Records the content area and re-paginates when it changed.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport != Some(viewport) {
            self.viewport = Some(viewport);
            self.repaginate();
        }
    }

    /// Rebuilds pages for the current viewport and font size. A zero-sized
    /// viewport keeps the previous pages.
    pub fn repaginate(&mut self) {
        let (Some(document), Some(viewport)) = (&self.document, self.viewport) else {
            return;
        };
        let Some(pages) = paginate(
            &document.paragraphs,
            viewport,
            self.view.font_size,
            &self.measure,
        ) else {
            log::debug!("Skipping pagination for empty viewport {:?}", viewport);
            return;
        };

        log::debug!(
            "Paginated into {} pages at {}x{}, font {}",
            pages.len(),
            viewport.width,
            viewport.height,
            self.view.font_size
        );
        self.pages = pages;
        self.view.page_index = self
            .view
            .page_index
            .min(self.pages.len().saturating_sub(1));
        if let Some(cursor) = self.ui_state.cursor
            && !self.current_page().is_some_and(|p| p.contains(cursor.paragraph))
        {
            self.ui_state.cursor = None;
        }
    }

    /// Sets the font size, clamped to the supported range. Returns true when
    /// the size changed.
    pub fn set_font_size(&mut self, size: i32) -> bool {
        let size = size.clamp(MIN_FONT_SIZE as i32, MAX_FONT_SIZE as i32) as u16;
        if size == self.view.font_size {
            return false;
        }
        self.view.font_size = size;
        self.repaginate();
        true
    }

    pub fn increase_font_size(&mut self) -> bool {
        self.set_font_size(self.view.font_size as i32 + 1)
    }

    pub fn decrease_font_size(&mut self) -> bool {
        self.set_font_size(self.view.font_size as i32 - 1)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.view.page_index)
    }

    pub fn is_first_page(&self) -> bool {
        self.view.page_index == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.view.page_index + 1 >= self.pages.len()
    }

    /// Moves one page, stopping at either end. Returns true when the page
    /// changed.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Forward if !self.is_last_page() => self.view.page_index + 1,
            Direction::Backward if !self.is_first_page() => self.view.page_index - 1,
            _ => return false,
        };
        self.view.page_index = target;
        self.ui_state.cursor = None;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(Direction::Forward)
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigate(Direction::Backward)
    }

    pub fn toggle_dark_mode(&mut self) {
        self.view.dark_mode = !self.view.dark_mode;
    }

    /// Shows the sentence under `key`. Unknown keys are ignored.
    pub fn reveal(&mut self, key: AnnotationKey) -> bool {
        let Some(text) = self
            .document
            .as_ref()
            .and_then(|doc| doc.sentence(key.paragraph, key.sentence))
        else {
            return false;
        };
        self.annotations.reveal(key, text);
        true
    }

    pub fn hide(&mut self, key: AnnotationKey) {
        self.annotations.hide(key);
    }

    pub fn handle_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Sentence(key) => {
                if self.reveal(key) {
                    self.ui_state.cursor = Some(key);
                }
            }
            ClickTarget::Annotation(key) => self.hide(key),
        }
    }

    /// Sentence keys on the current page, in reading order.
    pub fn page_sentences(&self) -> Vec<AnnotationKey> {
        let (Some(document), Some(page)) = (&self.document, self.current_page()) else {
            return Vec::new();
        };
        page.paragraphs
            .clone()
            .filter_map(|id| document.paragraph(id).map(|p| (id, p.sentences.len())))
            .flat_map(|(id, count)| (0..count).map(move |s| AnnotationKey::new(id, s)))
            .collect()
    }

    /// Moves the keyboard cursor through the current page's sentences.
    pub fn move_cursor(&mut self, direction: Direction) {
        let sentences = self.page_sentences();
        if sentences.is_empty() {
            self.ui_state.cursor = None;
            return;
        }
        let position = self
            .ui_state
            .cursor
            .and_then(|cursor| sentences.iter().position(|k| *k == cursor));
        let index = match (position, direction) {
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => sentences.len() - 1,
            (Some(i), Direction::Forward) => (i + 1).min(sentences.len() - 1),
            (Some(i), Direction::Backward) => i.saturating_sub(1),
        };
        self.ui_state.cursor = Some(sentences[index]);
    }

    pub fn toggle_cursor_annotation(&mut self) {
        let Some(key) = self.ui_state.cursor else {
            return;
        };
        if self.annotations.is_visible(key) {
            self.hide(key);
        } else {
            self.reveal(key);
        }
    }

    pub fn pointer_moved(&mut self, now: Instant) {
        self.idle.activity(now);
    }

    /// Advances timers. Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.idle.tick(now);
        if self.ui_state.message_expired(now) {
            self.ui_state.clear_message();
            changed = true;
        }
        changed
    }

    pub fn begin_file_read(&mut self) {
        self.ui_state.file_read_pending = true;
    }

    /// Applies a finished background read. A read that is no longer wanted,
    /// or that failed, leaves the screen as it is.
    pub fn finish_file_read(&mut self, result: FileReadResult) {
        if !self.ui_state.file_read_pending
            || self.ui_state.active_window != WindowType::FileInput
        {
            log::debug!("Discarding stale read of {}", result.path.display());
            return;
        }
        self.ui_state.file_read_pending = false;
        match result.document {
            Ok(document) => {
                log::info!("Opened {}", result.path.display());
                self.load_document(document);
            }
            Err(err) => {
                log::warn!("Could not open {}: {}", result.path.display(), err);
                self.ui_state.set_message(err, MessageType::Error);
            }
        }
    }

    pub fn push_input_char(&mut self, c: char) {
        match self.ui_state.active_window {
            WindowType::FileInput if c != '\n' => self.ui_state.file_path_input.push(c),
            WindowType::DirectInput => self.ui_state.direct_input.push(c),
            _ => {}
        }
    }

    pub fn pop_input_char(&mut self) {
        match self.ui_state.active_window {
            WindowType::FileInput => {
                self.ui_state.file_path_input.pop();
            }
            WindowType::DirectInput => {
                self.ui_state.direct_input.pop();
            }
            _ => {}
        }
    }

    pub fn paste_input(&mut self, text: &str) {
        match self.ui_state.active_window {
            WindowType::FileInput => {
                let line = text.lines().next().unwrap_or_default();
                self.ui_state.file_path_input.push_str(line.trim());
            }
            WindowType::DirectInput => {
                self.ui_state.direct_input.push_str(&text.replace("\r\n", "\n"));
            }
            _ => {}
        }
    }
}

/// UI-specific state management
#[derive(Debug, Clone)]
pub struct UiState {
    pub active_window: WindowType,
    pub show_help: bool,
    pub help_scroll_offset: u16,
    pub file_path_input: String,
    pub direct_input: String,
    pub file_read_pending: bool,
    pub cursor: Option<AnnotationKey>,
    pub message: Option<String>,
    pub message_type: MessageType,
    pub message_time: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            active_window: WindowType::Home,
            show_help: false,
            help_scroll_offset: 0,
            file_path_input: String::new(),
            direct_input: String::new(),
            file_read_pending: false,
            cursor: None,
            message: None,
            message_type: MessageType::Info,
            message_time: None,
        }
    }

    pub fn set_message(&mut self, message: String, message_type: MessageType) {
        self.message = Some(message);
        self.message_type = message_type;
        self.message_time = Some(Instant::now());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_time = None;
    }

    /// Returns true if the current message is older than three seconds.
    pub fn message_expired(&self, now: Instant) -> bool {
        self.message_time
            .is_some_and(|t| now.saturating_duration_since(t) >= MESSAGE_TIMEOUT)
    }

    /// Time until the current message expires.
    pub fn message_remaining(&self, now: Instant) -> Option<Duration> {
        self.message_time
            .map(|t| MESSAGE_TIMEOUT.saturating_sub(now.saturating_duration_since(t)))
    }

    pub fn open_window(&mut self, window_type: WindowType) {
        self.active_window = window_type;
        self.show_help = false;
        self.help_scroll_offset = 0;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.help_scroll_offset = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Warning,
    Error,
}
