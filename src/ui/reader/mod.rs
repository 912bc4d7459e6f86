mod state;

pub use state::{ApplicationState, MessageType, UiState, ViewState};

use arboard::Clipboard;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::config::Config;
use crate::ingest::{FileReadResult, expand_path, spawn_file_read};
use crate::models::{Direction, WindowType};
use crate::ui::ScreenLayout;
use crate::ui::board::Board;
use crate::ui::controls::{ControlAction, ControlBar, HeaderBar};
use crate::ui::theme::Theme;
use crate::ui::windows::{
    WindowAction, direct_input::DirectInputWindow, file_input::FileInputWindow, help::HelpWindow,
    home::HomeWindow,
};

const PENDING_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_secs(60);

/// Main reader application struct
pub struct Reader {
    state: Rc<RefCell<ApplicationState>>,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    clipboard: Option<Clipboard>,
    file_read_rx: Option<Receiver<FileReadResult>>,
}

impl Reader {
    /// Create a new Reader instance
    pub fn new(config: Config) -> eyre::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        // Paste still works through bracketed paste without a clipboard.
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                log::warn!("Clipboard unavailable: {}", err);
                None
            }
        };

        Ok(Self {
            state: Rc::new(RefCell::new(ApplicationState::new(config))),
            terminal,
            clipboard,
            file_read_rx: None,
        })
    }

    pub fn set_font_size(&mut self, size: i32) {
        self.state.borrow_mut().set_font_size(size);
    }

    /// Opens the reader on `text`, skipping the home screen.
    pub fn load_text(&mut self, text: &str) {
        self.state.borrow_mut().load_text(text);
    }

    /// Run the main application loop
    pub fn run(&mut self) -> eyre::Result<()> {
        let mouse_support = self.state.borrow().config.settings.mouse_support;

        // Initialize terminal
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableBracketedPaste
        )?;
        if mouse_support {
            crossterm::execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;
        }

        self.terminal.clear()?;
        self.terminal.hide_cursor()?;
        log::info!("Reader started");

        let result = self.event_loop();

        // Cleanup terminal
        self.terminal.clear()?;
        self.terminal.show_cursor()?;
        if mouse_support {
            crossterm::execute!(io::stdout(), crossterm::event::DisableMouseCapture)?;
        }
        crossterm::execute!(
            io::stdout(),
            crossterm::event::DisableBracketedPaste,
            crossterm::terminal::LeaveAlternateScreen
        )?;
        crossterm::terminal::disable_raw_mode()?;
        log::info!("Reader stopped");

        result
    }

    fn event_loop(&mut self) -> eyre::Result<()> {
        loop {
            if self.state.borrow().should_quit {
                break;
            }

            self.state.borrow_mut().tick(Instant::now());
            self.poll_file_read();

            // Pagination follows the content area of the current terminal size.
            {
                let (width, height) = crossterm::terminal::size()?;
                let mut state = self.state.borrow_mut();
                let layout = ScreenLayout::new(
                    Rect::new(0, 0, width, height),
                    state.config.settings.max_text_width,
                );
                state.set_viewport(layout.viewport());
            }

            // Render UI
            {
                let state = self.state.clone();
                self.terminal.draw(|f| {
                    let state_ref = state.borrow();
                    Self::render_static(f, &state_ref);
                })?;
            }

            if !crossterm::event::poll(self.poll_timeout())? {
                continue;
            }

            // Handle events
            if let Ok(event) = crossterm::event::read() {
                match event {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key_event(key)?;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse)?,
                    Event::Paste(text) => self.state.borrow_mut().paste_input(&text),
                    Event::Resize(width, height) => {
                        log::debug!("Terminal resized to {}x{}", width, height);
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Sleep until the next timer fires: control bar auto-hide, message expiry,
    /// or a pending file read.
    fn poll_timeout(&self) -> Duration {
        let state = self.state.borrow();
        let now = Instant::now();
        let mut timeout = IDLE_POLL;
        if let Some(remaining) = state.idle.remaining(now) {
            timeout = timeout.min(remaining);
        }
        if let Some(remaining) = state.ui_state.message_remaining(now) {
            timeout = timeout.min(remaining);
        }
        if self.file_read_rx.is_some() {
            timeout = timeout.min(PENDING_POLL);
        }
        timeout
    }

    fn poll_file_read(&mut self) {
        let Some(rx) = &self.file_read_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.file_read_rx = None;
                self.state.borrow_mut().finish_file_read(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.file_read_rx = None;
                let mut state = self.state.borrow_mut();
                state.ui_state.file_read_pending = false;
                state
                    .ui_state
                    .set_message("File read was interrupted".to_string(), MessageType::Error);
            }
        }
    }

    fn submit_file_path(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.ui_state.file_read_pending {
            return;
        }
        let input = state.ui_state.file_path_input.trim().to_string();
        if input.is_empty() {
            state
                .ui_state
                .set_message("Enter a file path first".to_string(), MessageType::Warning);
            return;
        }
        let path = expand_path(&input);
        log::info!("Reading {}", path.display());
        state.begin_file_read();
        self.file_read_rx = Some(spawn_file_read(path));
    }

    fn paste_from_clipboard(&mut self) {
        let text = match self.clipboard.as_mut().map(|c| c.get_text()) {
            Some(Ok(text)) => text,
            Some(Err(err)) => {
                log::warn!("Clipboard read failed: {}", err);
                self.state
                    .borrow_mut()
                    .ui_state
                    .set_message("Nothing to paste".to_string(), MessageType::Warning);
                return;
            }
            None => {
                self.state
                    .borrow_mut()
                    .ui_state
                    .set_message("Clipboard unavailable".to_string(), MessageType::Warning);
                return;
            }
        };
        self.state.borrow_mut().paste_input(&text);
    }

    /// Handle keyboard input events
    fn handle_key_event(&mut self, key: KeyEvent) -> eyre::Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.borrow_mut().should_quit = true;
            return Ok(());
        }

        if self.state.borrow().ui_state.show_help {
            return self.handle_help_mode_keys(key);
        }

        let active_window = self.state.borrow().active_window();
        match active_window {
            WindowType::Home => self.handle_home_keys(key),
            WindowType::FileInput => self.handle_file_input_keys(key),
            WindowType::DirectInput => self.handle_direct_input_keys(key),
            WindowType::Reader => self.handle_reader_keys(key),
        }
        Ok(())
    }

    fn handle_help_mode_keys(&mut self, key: KeyEvent) -> eyre::Result<()> {
        let (term_width, term_height) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut state = self.state.borrow_mut();
        let keymap = state.config.keymap;
        let max_offset =
            HelpWindow::max_scroll_offset(Rect::new(0, 0, term_width, term_height), &keymap);

        match key.code {
            KeyCode::Esc | KeyCode::Enter => state.ui_state.toggle_help(),
            KeyCode::Char(c) if c == keymap.quit || c == keymap.help => {
                state.ui_state.toggle_help()
            }
            KeyCode::Down => {
                state.ui_state.help_scroll_offset =
                    state.ui_state.help_scroll_offset.saturating_add(1).min(max_offset);
            }
            KeyCode::Char(c) if c == keymap.next_sentence => {
                state.ui_state.help_scroll_offset =
                    state.ui_state.help_scroll_offset.saturating_add(1).min(max_offset);
            }
            KeyCode::Up => {
                state.ui_state.help_scroll_offset =
                    state.ui_state.help_scroll_offset.saturating_sub(1);
            }
            KeyCode::Char(c) if c == keymap.prev_sentence => {
                state.ui_state.help_scroll_offset =
                    state.ui_state.help_scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_home_keys(&mut self, key: KeyEvent) {
        let mut state = self.state.borrow_mut();
        let keymap = state.config.keymap;
        match key.code {
            KeyCode::Char(c) if c == keymap.quit => state.should_quit = true,
            KeyCode::Char(c) if c == keymap.open_file => state.choose_file_input(),
            KeyCode::Char(c) if c == keymap.direct_input => state.choose_direct_input(),
            KeyCode::Char(c) if c == keymap.switch_color => state.toggle_dark_mode(),
            KeyCode::Char(c) if c == keymap.help => state.ui_state.toggle_help(),
            _ => {}
        }
    }

    fn handle_file_input_keys(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.state.borrow_mut().back(),
            KeyCode::Enter => self.submit_file_path(),
            KeyCode::Char('v') if ctrl => self.paste_from_clipboard(),
            KeyCode::Backspace => self.state.borrow_mut().pop_input_char(),
            KeyCode::Char(c) if !ctrl => self.state.borrow_mut().push_input_char(c),
            _ => {}
        }
    }

    fn handle_direct_input_keys(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.state.borrow_mut().back(),
            KeyCode::Char('s') if ctrl => {
                let mut state = self.state.borrow_mut();
                if !state.submit_direct_input() {
                    state
                        .ui_state
                        .set_message("Type some text first".to_string(), MessageType::Warning);
                }
            }
            KeyCode::Char('v') if ctrl => self.paste_from_clipboard(),
            KeyCode::Enter => self.state.borrow_mut().push_input_char('\n'),
            KeyCode::Backspace => self.state.borrow_mut().pop_input_char(),
            KeyCode::Char(c) if !ctrl => self.state.borrow_mut().push_input_char(c),
            _ => {}
        }
    }

    /// Handle keys in normal reading mode
    fn handle_reader_keys(&mut self, key: KeyEvent) {
        let mut state = self.state.borrow_mut();
        let keymap = state.config.keymap;
        match key.code {
            KeyCode::Esc => state.back(),
            KeyCode::Left | KeyCode::PageUp => {
                state.previous_page();
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') => {
                state.next_page();
            }
            KeyCode::Down => state.move_cursor(Direction::Forward),
            KeyCode::Up => state.move_cursor(Direction::Backward),
            KeyCode::Enter => state.toggle_cursor_annotation(),
            KeyCode::Char(c) => {
                if c == keymap.quit {
                    state.should_quit = true;
                } else if c == keymap.back {
                    state.back();
                } else if c == keymap.page_up {
                    state.previous_page();
                } else if c == keymap.page_down {
                    state.next_page();
                } else if c == keymap.enlarge || c == '=' {
                    state.increase_font_size();
                } else if c == keymap.shrink {
                    state.decrease_font_size();
                } else if c == keymap.switch_color {
                    state.toggle_dark_mode();
                } else if c == keymap.next_sentence {
                    state.move_cursor(Direction::Forward);
                } else if c == keymap.prev_sentence {
                    state.move_cursor(Direction::Backward);
                } else if c == keymap.annotate {
                    state.toggle_cursor_annotation();
                } else if c == keymap.show_controls {
                    state.pointer_moved(Instant::now());
                } else if c == keymap.help {
                    state.ui_state.toggle_help();
                }
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> eyre::Result<()> {
        let now = Instant::now();
        match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) => {
                self.state.borrow_mut().pointer_moved(now);
                self.handle_drag(mouse.column, mouse.row)?;
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.state.borrow_mut().pointer_moved(now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.state.borrow_mut().pointer_moved(now);
                self.handle_click(mouse.column, mouse.row)?;
            }
            MouseEventKind::ScrollDown => {
                let mut state = self.state.borrow_mut();
                if state.active_window() == WindowType::Reader && !state.ui_state.show_help {
                    state.next_page();
                }
            }
            MouseEventKind::ScrollUp => {
                let mut state = self.state.borrow_mut();
                if state.active_window() == WindowType::Reader && !state.ui_state.show_help {
                    state.previous_page();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_click(&mut self, x: u16, y: u16) -> eyre::Result<()> {
        let (width, height) = crossterm::terminal::size()?;
        let area = Rect::new(0, 0, width, height);
        let active_window = {
            let mut state = self.state.borrow_mut();
            if state.ui_state.show_help {
                state.ui_state.toggle_help();
                return Ok(());
            }
            state.active_window()
        };
        let layout = ScreenLayout::new(area, self.state.borrow().config.settings.max_text_width);
        let body = Self::body_area(area);

        let header = {
            let state = self.state.borrow();
            HeaderBar {
                show_back: active_window == WindowType::Reader,
                dark_mode: state.view.dark_mode,
            }
        };
        if let Some(action) = header.hit_test(layout.header, x, y) {
            self.apply_control(action);
            return Ok(());
        }

        match active_window {
            WindowType::Home => match HomeWindow::hit_test(body, x, y) {
                Some(WindowAction::OpenFileInput) => self.state.borrow_mut().choose_file_input(),
                Some(WindowAction::OpenDirectInput) => {
                    self.state.borrow_mut().choose_direct_input()
                }
                _ => {}
            },
            WindowType::FileInput => match FileInputWindow::hit_test(body, x, y) {
                Some(WindowAction::Submit) => self.submit_file_path(),
                Some(WindowAction::Back) => self.state.borrow_mut().back(),
                _ => {}
            },
            WindowType::DirectInput => {
                let can_submit = self.state.borrow().can_submit_direct_input();
                match DirectInputWindow::hit_test(body, x, y, can_submit) {
                    Some(WindowAction::Submit) => {
                        self.state.borrow_mut().submit_direct_input();
                    }
                    Some(WindowAction::Back) => self.state.borrow_mut().back(),
                    _ => {}
                }
            }
            WindowType::Reader => {
                let mut state = self.state.borrow_mut();
                let controls = Self::control_bar(&state);
                if state.idle.is_visible() && layout.controls.contains((x, y).into()) {
                    if let Some(action) = controls.hit_test(layout.controls, x, y) {
                        drop(state);
                        self.apply_control(action);
                    }
                    return Ok(());
                }

                let target = state.document.as_ref().and_then(|document| {
                    Board::new(document, state.view.font_size)
                        .with_page(state.current_page())
                        .with_annotations(&state.annotations)
                        .hit_test(layout.content, x, y)
                });
                if let Some(target) = target {
                    log::debug!("Clicked {:?}", target);
                    state.handle_click(target);
                }
            }
        }
        Ok(())
    }

    fn handle_drag(&mut self, x: u16, y: u16) -> eyre::Result<()> {
        let (width, height) = crossterm::terminal::size()?;
        let area = Rect::new(0, 0, width, height);
        let action = Self::drag_action(&self.state.borrow(), area, x, y);
        if let Some(action) = action {
            self.apply_control(action);
        }
        Ok(())
    }

    /// Slider action for a drag in the reader while the control bar shows.
    fn drag_action(
        state: &ApplicationState,
        area: Rect,
        x: u16,
        y: u16,
    ) -> Option<ControlAction> {
        if state.active_window() != WindowType::Reader
            || state.ui_state.show_help
            || !state.idle.is_visible()
        {
            return None;
        }
        let layout = ScreenLayout::new(area, state.config.settings.max_text_width);
        Self::control_bar(state).drag(layout.controls, x, y)
    }

    fn apply_control(&mut self, action: ControlAction) {
        let mut state = self.state.borrow_mut();
        match action {
            ControlAction::Back => state.back(),
            ControlAction::ToggleTheme => state.toggle_dark_mode(),
            ControlAction::DecreaseFont => {
                state.decrease_font_size();
            }
            ControlAction::IncreaseFont => {
                state.increase_font_size();
            }
            ControlAction::SetFont(size) => {
                state.set_font_size(size as i32);
            }
            ControlAction::PreviousPage => {
                state.previous_page();
            }
            ControlAction::NextPage => {
                state.next_page();
            }
        }
    }

    fn control_bar(state: &ApplicationState) -> ControlBar {
        ControlBar {
            font_size: state.view.font_size,
            page_index: state.view.page_index,
            page_count: state.page_count(),
        }
    }

    /// Everything below the header row.
    fn body_area(area: Rect) -> Rect {
        let top = area.height.min(1);
        Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        }
    }

    fn render_static(frame: &mut Frame, state: &ApplicationState) {
        let area = frame.area();
        let theme = Theme::from_settings(&state.config.settings, state.view.dark_mode);
        frame.render_widget(Block::default().style(theme.base), area);

        let layout = ScreenLayout::new(area, state.config.settings.max_text_width);
        let active_window = state.active_window();
        HeaderBar {
            show_back: active_window == WindowType::Reader,
            dark_mode: state.view.dark_mode,
        }
        .render(frame, layout.header, &theme);

        let body = Self::body_area(area);
        match active_window {
            WindowType::Home => HomeWindow::render(frame, body, &state.config.keymap, &theme),
            WindowType::FileInput => FileInputWindow::render(
                frame,
                body,
                &state.ui_state.file_path_input,
                state.ui_state.file_read_pending,
                &theme,
            ),
            WindowType::DirectInput => DirectInputWindow::render(
                frame,
                body,
                &state.ui_state.direct_input,
                state.can_submit_direct_input(),
                &theme,
            ),
            WindowType::Reader => Self::render_reader_static(frame, state, &layout, &theme),
        }

        if state.ui_state.show_help {
            HelpWindow::render(
                frame,
                area,
                &state.config.keymap,
                state.ui_state.help_scroll_offset,
            );
        }

        // Render message if present
        if let Some(ref message) = state.ui_state.message {
            Self::render_message_static(frame, message, &state.ui_state.message_type);
        }
    }

    fn render_reader_static(
        frame: &mut Frame,
        state: &ApplicationState,
        layout: &ScreenLayout,
        theme: &Theme,
    ) {
        if let Some(document) = &state.document {
            Board::new(document, state.view.font_size)
                .with_page(state.current_page())
                .with_annotations(&state.annotations)
                .with_cursor(state.ui_state.cursor)
                .render(frame, layout.content, theme);
        }

        if state.idle.is_visible() {
            Self::control_bar(state).render(frame, layout.controls, theme);
        }
    }

    fn render_message_static(frame: &mut Frame, message: &str, message_type: &MessageType) {
        let color = match message_type {
            MessageType::Info => Color::Blue,
            MessageType::Warning => Color::Yellow,
            MessageType::Error => Color::Red,
        };

        let message_paragraph = Paragraph::new(message)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });

        let frame_area = frame.area();
        let area = Rect {
            x: frame_area.x + 2u16.min(frame_area.width),
            y: frame_area.y + 2u16.min(frame_area.height),
            width: frame_area.width.saturating_sub(4),
            height: 3u16.min(frame_area.height.saturating_sub(2)),
        };

        frame.render_widget(Clear, area);
        frame.render_widget(message_paragraph, area);
    }
}
