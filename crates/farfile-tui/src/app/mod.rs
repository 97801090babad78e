//! Main application state and logic.

mod constants;
mod editor;
pub mod input;
mod render;

pub use self::constants::MENU_FOOTPRINT;

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::layout::{Position, Rect};
use ratatui::{DefaultTerminal, Frame};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{debug, info};

use farfile_controller::connection::{self, Connection};
use farfile_controller::{
    ChannelState, ChannelTransport, Controller, ListingBody, MenuAction, Point, StartOutcome,
    Viewport,
};
use farfile_proto::metrics::MetricsEvent;
use farfile_proto::{Demultiplexer, Interest, Request, SharedFrame};

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ui::{AppLayout, EditorPane, menu_rect, scroll_offset};

use self::constants::{DOUBLE_CLICK_MS, GLYPH_COLUMN};
use self::editor::{EditorResult, EditorState};
use self::input::{InputResult, InputState};
use self::render::{RenderContext, listing_block, render_app};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Running,
    Quit,
}

/// Main application state.
pub struct App {
    controller: Controller<ChannelTransport>,
    /// Socket task feeding the transport; absent when driven directly.
    connection: Option<Connection>,
    frames: mpsc::Receiver<SharedFrame>,
    metrics: mpsc::Receiver<SharedFrame>,
    channel: ChannelState,

    /// Latest CPU reading from the metrics stream.
    cpu: Option<String>,
    metrics_error: Option<String>,
    monitoring: bool,

    /// Text field for a pending rename/create prompt.
    input: Option<InputState>,
    editor: EditorState,
    menu_cursor: usize,

    // Layout from the last frame, for mouse hit testing
    list_offset: usize,
    rows_area: Rect,
    menu_area: Option<Rect>,
    screen: Rect,

    last_click: Option<(usize, Instant)>,
    startup_retry: Option<Instant>,

    theme: Theme,
    mode: AppMode,
    needs_redraw: bool,
}

impl App {
    /// Start connecting to the server and build the application.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(config: TuiConfig) -> Self {
        let mut demux = Demultiplexer::new();
        let frames = demux.subscribe("browser", Interest::Browser);
        let metrics = demux.subscribe("metrics", Interest::Untagged);

        info!(url = %config.url, "Connecting");
        let connection = connection::spawn(config.url.clone(), demux);
        let mut app = Self::with_transport(config, connection.transport(), frames, metrics);
        app.connection = Some(connection);
        app
    }

    /// Build the application around an existing transport and the
    /// receivers it is demultiplexed into.
    fn with_transport(
        config: TuiConfig,
        transport: ChannelTransport,
        frames: mpsc::Receiver<SharedFrame>,
        metrics: mpsc::Receiver<SharedFrame>,
    ) -> Self {
        let channel = transport.state();
        let controller = Controller::new(transport, config.credential, config.controller);

        Self {
            controller,
            connection: None,
            frames,
            metrics,
            channel,
            cpu: None,
            metrics_error: None,
            monitoring: false,
            input: None,
            editor: EditorState::default(),
            menu_cursor: 0,
            list_offset: 0,
            rows_area: Rect::default(),
            menu_area: None,
            screen: Rect::default(),
            last_click: None,
            startup_retry: None,
            theme: Theme::from_name(&config.theme),
            mode: AppMode::Running,
            needs_redraw: true,
        }
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        if self.controller.start() == StartOutcome::Deferred {
            self.startup_retry = Some(Instant::now() + self.controller.config().startup_retry());
        }
        self.on_channel_state(self.controller.transport().state());

        let mut events = EventStream::new();
        let mut channel_rx = self.controller.transport().watch_state();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            let startup_retry = self.startup_retry;
            let notice_deadline = self.controller.next_deadline();

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    self.handle_event(event);
                    self.needs_redraw = true;
                }

                Some(frame) = self.frames.recv() => {
                    if self.controller.handle_frame(&frame) {
                        self.sync_prompt_input();
                        self.needs_redraw = true;
                    }
                }

                Some(frame) = self.metrics.recv() => {
                    if let Some(event) = MetricsEvent::from_frame(&frame) {
                        self.on_metrics(event);
                        self.needs_redraw = true;
                    }
                }

                Ok(()) = channel_rx.changed() => {
                    let state = *channel_rx.borrow_and_update();
                    self.on_channel_state(state);
                    self.needs_redraw = true;
                }

                _ = sleep_until(startup_retry) => {
                    self.startup_retry = None;
                    self.controller.retry_start();
                    self.needs_redraw = true;
                }

                _ = sleep_until(notice_deadline) => {
                    if self.controller.tick(Instant::now()) {
                        self.needs_redraw = true;
                    }
                }
            }
        }

        if let Some(connection) = self.connection.take() {
            connection.close().await;
        }
        Ok(())
    }

    fn on_channel_state(&mut self, state: ChannelState) {
        debug!(?state, "Channel state changed");
        self.channel = state;
        if state == ChannelState::Open && !self.monitoring {
            self.monitoring = self.controller.send(Request::StartMonitoring);
        }
    }

    fn on_metrics(&mut self, event: MetricsEvent) {
        match event {
            MetricsEvent::Cpu(cpu) => {
                self.cpu = Some(cpu);
                self.metrics_error = None;
            }
            MetricsEvent::Error(message) => {
                self.metrics_error = Some(message);
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
        self.sync_prompt_input();
    }

    /// Route a key press to whatever currently has focus.
    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(prompt) = self.controller.prompt() {
            if prompt.is_confirmation() {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        self.controller.submit_prompt("");
                    }
                    KeyCode::Char('n') | KeyCode::Esc => self.controller.cancel_prompt(),
                    _ => {}
                }
                return;
            }
            self.handle_input_key(key);
            return;
        }

        if self.controller.editor().is_some() {
            self.handle_editor_key(key);
            return;
        }

        if self.controller.state().menu.is_some() {
            self.handle_menu_key(key);
            return;
        }

        let action = KeyAction::from_key_event(key);
        self.handle_action(action);
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let input = self.input.get_or_insert_with(InputState::new);
        match input.handle_key(key) {
            InputResult::Continue => {}
            InputResult::Cancel => {
                self.input = None;
                self.controller.cancel_prompt();
            }
            InputResult::Submit(answer) => {
                self.input = None;
                self.controller.submit_prompt(answer.trim());
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(session) = self.controller.editor_mut() else {
            return;
        };
        self.editor.sync(session.path(), session.buffer());

        match self.editor.handle_key(session.buffer_mut(), key) {
            EditorResult::Continue | EditorResult::Changed => {}
            EditorResult::Save => {
                self.controller.save();
            }
            EditorResult::Close => {
                self.controller.close_editor();
                self.editor.clear();
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let count = MenuAction::iter().count();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.menu_cursor = (self.menu_cursor + 1).min(count - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(action) = MenuAction::iter().nth(self.menu_cursor) {
                    self.controller.menu_action(action);
                }
            }
            _ => self.controller.dismiss_menu(),
        }
    }

    /// Handle a key action in the listing.
    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveDown => {
                self.controller.select_next();
            }
            KeyAction::MoveUp => {
                self.controller.select_previous();
            }
            KeyAction::JumpToTop => {
                self.controller.select(0);
            }
            KeyAction::JumpToBottom => {
                let count = self.controller.state().listing.entries().len();
                if count > 0 {
                    self.controller.select(count - 1);
                }
            }
            KeyAction::Activate => {
                if let Some(index) = self.selected_index() {
                    self.controller.activate(index);
                }
            }
            KeyAction::NavigateBack => {
                self.controller.go_back();
            }
            KeyAction::GoHome => {
                self.controller.go_home();
            }
            KeyAction::Refresh => {
                self.controller.refresh();
            }
            KeyAction::CreateFile => self.controller.begin_create_file(),
            KeyAction::CreateDirectory => self.controller.begin_create_folder(),
            KeyAction::Edit => {
                self.controller.menu_action(MenuAction::Edit);
            }
            KeyAction::Rename => {
                self.controller.menu_action(MenuAction::Rename);
            }
            KeyAction::Delete => {
                self.controller.menu_action(MenuAction::Delete);
            }
            KeyAction::ContextMenu => self.open_menu_at_selection(),
            KeyAction::Cancel => self.controller.clear_selection(),
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        // Clicks inside an open menu pick an item; anything else closes it.
        if self.controller.state().menu.is_some() {
            if let MouseEventKind::Down(_) = mouse.kind {
                let picked = self
                    .menu_area
                    .filter(|area| area.contains(position))
                    .and_then(|area| {
                        let row = mouse.row.checked_sub(area.y + 1)? as usize;
                        MenuAction::iter().nth(row)
                    });
                match picked {
                    Some(action) => {
                        self.controller.menu_action(action);
                    }
                    None => self.controller.dismiss_menu(),
                }
                return;
            }
        }

        if self.controller.prompt().is_some() || self.controller.editor().is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.row_at(position) else {
                    return;
                };
                let now = Instant::now();
                let double = matches!(
                    self.last_click,
                    Some((last, at)) if last == index
                        && now.duration_since(at) <= Duration::from_millis(DOUBLE_CLICK_MS)
                );
                if double {
                    self.last_click = None;
                    self.controller.activate(index);
                } else {
                    self.last_click = Some((index, now));
                    self.controller.select(index);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(index) = self.row_at(position) {
                    self.menu_cursor = 0;
                    self.controller.open_context_menu(
                        index,
                        Point::new(u32::from(mouse.column), u32::from(mouse.row)),
                        self.viewport(),
                    );
                }
            }
            MouseEventKind::ScrollDown => {
                self.controller.select_next();
            }
            MouseEventKind::ScrollUp => {
                self.controller.select_previous();
            }
            _ => {}
        }
    }

    /// Keyboard equivalent of a right click on the selected row.
    fn open_menu_at_selection(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        let visible_row = index.saturating_sub(self.list_offset);
        let row = usize::from(self.rows_area.y) + visible_row + 1;
        let column = self.rows_area.x.saturating_add(GLYPH_COLUMN);
        self.menu_cursor = 0;
        self.controller.open_context_menu(
            index,
            Point::new(u32::from(column), u32::try_from(row).unwrap_or(u32::MAX)),
            self.viewport(),
        );
    }

    /// Listing index under a screen position.
    fn row_at(&self, position: Position) -> Option<usize> {
        if !self.rows_area.contains(position) {
            return None;
        }
        let index = self.list_offset + usize::from(position.y - self.rows_area.y);
        (index < self.controller.state().listing.entries().len()).then_some(index)
    }

    fn selected_index(&self) -> Option<usize> {
        self.controller.state().selection.as_ref().map(|s| s.index)
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(u32::from(self.screen.width), u32::from(self.screen.height))
    }

    /// Keep the text field in step with the controller's prompt.
    fn sync_prompt_input(&mut self) {
        match self.controller.prompt() {
            Some(prompt) if !prompt.is_confirmation() => {
                if self.input.is_none() {
                    self.input = Some(match prompt.initial_text() {
                        Some(initial) => InputState::with_initial(initial),
                        None => InputState::new(),
                    });
                }
            }
            _ => self.input = None,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.screen = area;

        let view = self.controller.view();
        let layout = AppLayout::new(area, view.notices.len());

        self.rows_area = listing_block(&self.theme).inner(layout.main);
        let total = match &view.body {
            ListingBody::Rows(rows) => rows.len(),
            ListingBody::Loading | ListingBody::Empty => 0,
        };
        self.list_offset = scroll_offset(
            self.list_offset,
            self.selected_index(),
            usize::from(self.rows_area.height),
            total,
        );

        let (editor_cursor, editor_scroll) = match self.controller.editor() {
            Some(session) => {
                self.editor.sync(session.path(), session.buffer());
                let height = usize::from(EditorPane::inner(layout.main).height);
                let scroll = self.editor.scroll_for(session.buffer(), height);
                (self.editor.position(session.buffer()), scroll)
            }
            None => {
                self.editor.clear();
                ((0, 0), 0)
            }
        };

        self.menu_area = view
            .menu
            .as_ref()
            .map(|menu| menu_rect(menu, MENU_FOOTPRINT, area));
        if let Some(menu) = &view.menu {
            self.menu_cursor = self.menu_cursor.min(menu.items.len().saturating_sub(1));
        }

        let ctx = RenderContext {
            theme: &self.theme,
            view: &view,
            layout,
            channel: self.channel,
            cpu: self.cpu.as_deref(),
            metrics_error: self.metrics_error.as_deref(),
            list_offset: self.list_offset,
            editor_cursor,
            editor_scroll,
            menu_area: self.menu_area,
            menu_cursor: self.menu_cursor,
            input: self.input.as_ref(),
        };
        render_app(&ctx, area, frame.buffer_mut());
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use farfile_controller::ChannelEnd;
    use farfile_core::Credential;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::{Value, json};

    use super::*;

    fn app_with(items: Value) -> (App, ChannelEnd) {
        let credential = Credential::from_value(json!({"host": "example.org", "user": "me"}));
        let mut config = TuiConfig::new("ws://localhost:8000/ws/cpu/", credential);
        config.controller.menu = MENU_FOOTPRINT;

        let (transport, mut end) = ChannelTransport::new(ChannelState::Open);
        let (_, frames) = mpsc::channel(1);
        let (_, metrics) = mpsc::channel(1);
        let mut app = App::with_transport(config, transport, frames, metrics);

        let listing = json!({
            "action": "directory_list",
            "status": "success",
            "path": "~",
            "items": items
        });
        let frame = farfile_proto::Frame::decode(&listing.to_string()).unwrap();
        assert!(app.controller.handle_frame(&frame));
        draw(&mut app);
        end.drain();
        (app, end)
    }

    fn sample_items() -> Value {
        json!([
            {"name": "projects", "type": "directory", "size": "-", "permissions": "drwxr-xr-x"},
            {"name": "notes.txt", "type": "file", "size": 2048, "permissions": "-rw-r--r--"},
            {"name": "todo.md", "type": "file", "size": 512, "permissions": "-rw-r--r--"}
        ])
    }

    fn many_items(count: usize) -> Value {
        (0..count)
            .map(|i| {
                json!({
                    "name": format!("file-{i:02}"),
                    "type": "file",
                    "size": i,
                    "permissions": "-rw-r--r--"
                })
            })
            .collect()
    }

    /// Render one 80x24 frame so the hit-test areas are current.
    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn left(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn sent(end: &mut ChannelEnd) -> Vec<Value> {
        end.drain()
            .iter()
            .map(|text| serde_json::from_str(text).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_rows_start_inside_listing_border() {
        let (app, _end) = app_with(sample_items());
        assert_eq!(app.rows_area, Rect::new(1, 2, 78, 20));
        assert_eq!(app.row_at(Position::new(10, 2)), Some(0));
        assert_eq!(app.row_at(Position::new(10, 4)), Some(2));
        assert_eq!(app.row_at(Position::new(10, 5)), None);
        assert_eq!(app.row_at(Position::new(0, 3)), None);
    }

    #[tokio::test]
    async fn test_single_click_only_selects() {
        let (mut app, mut end) = app_with(sample_items());

        app.handle_event(left(10, 3));
        assert_eq!(app.selected_index(), Some(1));

        app.handle_event(left(10, 4));
        assert_eq!(app.selected_index(), Some(2));
        assert!(end.drain().is_empty());
    }

    #[tokio::test]
    async fn test_double_click_opens_directory() {
        let (mut app, mut end) = app_with(sample_items());

        app.handle_event(left(10, 2));
        app.handle_event(left(10, 2));

        let frames = sent(&mut end);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["action"], "list_directory");
        assert_eq!(frames[0]["path"], "~/projects");
    }

    #[tokio::test]
    async fn test_slow_second_click_does_not_activate() {
        let (mut app, mut end) = app_with(sample_items());

        let stale = Instant::now()
            .checked_sub(Duration::from_millis(DOUBLE_CLICK_MS + 100))
            .unwrap();
        app.last_click = Some((1, stale));
        app.handle_event(left(10, 3));

        assert_eq!(app.selected_index(), Some(1));
        assert!(app.controller.editor().is_none());
        assert!(end.drain().is_empty());
    }

    #[tokio::test]
    async fn test_right_click_opens_clamped_menu() {
        let (mut app, mut end) = app_with(many_items(20));

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Right), 75, 20));

        let menu = app.controller.state().menu.clone().unwrap();
        assert_eq!(menu.position, Point::new(63, 17));
        assert_eq!(menu.target.name, "file-18");
        assert_eq!(app.selected_index(), Some(18));
        assert!(end.drain().is_empty());

        draw(&mut app);
        assert_eq!(app.menu_area, Some(Rect::new(63, 17, 16, 6)));
    }

    #[tokio::test]
    async fn test_click_outside_menu_dismisses_it() {
        let (mut app, mut end) = app_with(many_items(20));
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Right), 75, 20));
        draw(&mut app);

        app.handle_event(left(5, 3));

        assert!(app.controller.state().menu.is_none());
        assert_eq!(app.selected_index(), Some(18));
        assert!(end.drain().is_empty());
    }

    #[tokio::test]
    async fn test_menu_click_then_confirm_deletes() {
        let (mut app, mut end) = app_with(many_items(20));
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Right), 75, 20));
        draw(&mut app);

        // Rows inside the border: open, edit, rename, delete.
        app.handle_event(left(65, 21));
        assert!(app.controller.state().menu.is_none());
        assert!(app.controller.prompt().unwrap().is_confirmation());
        assert!(end.drain().is_empty());

        app.handle_event(key(KeyCode::Char('y')));
        let frames = sent(&mut end);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["action"], "delete_file");
        assert_eq!(frames[0]["filepath"], "~/file-18");
    }

    #[tokio::test]
    async fn test_menu_keys_pick_edit() {
        let (mut app, mut end) = app_with(sample_items());
        app.controller.select(1);
        draw(&mut app);

        app.handle_event(key(KeyCode::Char('m')));
        let menu = app.controller.state().menu.clone().unwrap();
        assert_eq!(menu.position, Point::new(4, 4));

        app.handle_event(key(KeyCode::Char('j')));
        assert_eq!(app.menu_cursor, 1);
        app.handle_event(key(KeyCode::Enter));

        let frames = sent(&mut end);
        assert_eq!(frames[0]["action"], "read_file");
        assert_eq!(frames[0]["filepath"], "~/notes.txt");
    }

    #[tokio::test]
    async fn test_other_key_dismisses_menu() {
        let (mut app, mut end) = app_with(sample_items());
        app.controller.select(0);
        draw(&mut app);

        app.handle_event(key(KeyCode::Char('m')));
        assert!(app.controller.state().menu.is_some());
        app.handle_event(key(KeyCode::Esc));

        assert!(app.controller.state().menu.is_none());
        assert_eq!(app.selected_index(), Some(0));
        assert!(end.drain().is_empty());
    }
}
