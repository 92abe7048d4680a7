use std::collections::HashSet;
use std::fmt::Display;
use std::fs;
use std::io;
use std::process::Command;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::{Config, Task};
use crate::store::{StoreError, TaskStore};

use super::blink::{BLINK_INTERVAL, Blink, BlinkTarget};
use super::detail::{DetailFieldKind, DetailState};
use super::field::TextField;
use super::help::help_lines;
use super::input;
use super::regex_cache::RegexCache;
use super::render;
use super::search::{SearchScope, SearchState};
use super::status::{STATUS_TIMEOUT, StatusLine, TimerEvent, TimerQueue};
use super::table::{Table, task_cells};
use super::theme::Theme;

/// Which text attribute a text session edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// `replace` swaps every annotation for the buffer (empty clears)
    Annotate { id: u32, replace: bool },
    Description { id: u32 },
    Tags { id: u32 },
    Recurrence { id: u32 },
    Project { id: u32 },
    Filter,
    AddTask,
    Search(SearchScope),
}

/// A text buffer bound to the attribute it edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSession {
    pub kind: TextKind,
    pub input: TextField,
}

/// Due date being stepped for task `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueSession {
    pub id: u32,
    pub date: NaiveDate,
}

/// Cyclic index into `PRIORITY_OPTIONS` for task `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrioritySession {
    pub id: u32,
    pub index: usize,
}

/// The active input mode. Holding the session inside the variant means at
/// most one edit can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigate,
    Text(TextSession),
    Due(DueSession),
    Priority(PrioritySession),
}

impl Mode {
    pub fn is_editing(&self) -> bool {
        !matches!(self, Mode::Navigate)
    }

    /// Short name for logs and the prompt
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Navigate => "navigate",
            Mode::Text(s) => match s.kind {
                TextKind::Annotate { replace: false, .. } => "annotate",
                TextKind::Annotate { replace: true, .. } => "replace annotations",
                TextKind::Description { .. } => "description",
                TextKind::Tags { .. } => "tags",
                TextKind::Recurrence { .. } => "recurrence",
                TextKind::Project { .. } => "project",
                TextKind::Filter => "filter",
                TextKind::AddTask => "add",
                TextKind::Search(SearchScope::List) => "search",
                TextKind::Search(SearchScope::Help) => "help search",
                TextKind::Search(SearchScope::Detail) => "detail search",
            },
            Mode::Due(_) => "due",
            Mode::Priority(_) => "priority",
        }
    }
}

/// Which top-level view is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Table,
    Detail(DetailState),
}

/// Description handed to the external editor, waiting for the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEdit {
    pub id: u32,
    pub text: String,
}

/// Results delivered back into the app from outside the key path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The external editor exited; `Err` carries why it could not run
    DescriptionEdited { id: u32, result: Result<String, String> },
}

/// Main application state
pub struct App {
    store: Box<dyn TaskStore>,
    /// Snapshot from the last reload, in table order
    pub tasks: Vec<Task>,
    pub filters: Vec<String>,
    pub table: Table,
    pub mode: Mode,
    pub view: View,
    pub show_help: bool,
    /// First visible help line
    pub help_scroll: usize,
    pub should_quit: bool,
    pub theme: Theme,
    pub status: StatusLine,
    pub timers: TimerQueue,
    pub blink: Option<Blink>,
    blink_generation: u64,
    blink_ticks: u8,
    pub regex_cache: RegexCache,
    pub search: SearchState,
    pub help_search: SearchState,
    pub detail_search: SearchState,
    pub help_lines: Vec<String>,
    pub pending_editor: Option<ExternalEdit>,
    /// Terminal rows from the last draw
    pub viewport_height: u16,
}

impl App {
    pub fn new(store: Box<dyn TaskStore>, config: &Config) -> Self {
        let mut app = App {
            store,
            tasks: Vec::new(),
            filters: config.filters.clone(),
            table: Table::new(),
            mode: Mode::Navigate,
            view: View::Table,
            show_help: false,
            help_scroll: 0,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            status: StatusLine::default(),
            timers: TimerQueue::default(),
            blink: None,
            blink_generation: 0,
            blink_ticks: config.ui.blink_ticks,
            regex_cache: RegexCache::new(),
            search: SearchState::default(),
            help_search: SearchState::default(),
            detail_search: SearchState::default(),
            help_lines: help_lines(),
            pending_editor: None,
            viewport_height: 24,
        };
        if let Err(e) = app.reload() {
            app.flash_error(&e);
        }
        app.update_table_height();
        app
    }

    pub fn store_mut(&mut self) -> &mut dyn TaskStore {
        self.store.as_mut()
    }

    /// Replace the task snapshot from the store and rebuild everything
    /// derived from it: table rows, list-search hits, the detail pane.
    /// On failure the previous snapshot stays.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.tasks = self.store.export(&self.filters).inspect_err(|e| {
            tracing::error!(err = %e, "reload failed");
        })?;
        let today = crate::ops::dates::today();
        let rows = self.tasks.iter().map(|t| task_cells(t, today)).collect();
        self.table.set_rows(rows);
        self.search.match_cells(self.table.rows());

        if let View::Detail(ds) = &mut self.view
            && let Some(task) = self.tasks.iter().find(|t| t.uuid == ds.task.uuid)
        {
            ds.refresh(task.clone());
        }
        tracing::debug!(count = self.tasks.len(), filters = ?self.filters, "reloaded");
        Ok(())
    }

    pub fn task_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_ids(&self) -> HashSet<u32> {
        self.tasks.iter().map(|t| t.id).collect()
    }

    /// ID of the task under the table cursor
    pub fn selected_task_id(&self) -> Option<u32> {
        self.table.selected_task_id()
    }

    pub fn detail(&self) -> Option<&DetailState> {
        match &self.view {
            View::Detail(ds) => Some(ds),
            View::Table => None,
        }
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailState> {
        match &mut self.view {
            View::Detail(ds) => Some(ds),
            View::Table => None,
        }
    }

    pub fn open_detail(&mut self, task: Task) {
        self.detail_search.clear();
        self.view = View::Detail(DetailState::new(task));
    }

    pub fn close_detail(&mut self) {
        self.view = View::Table;
    }

    /// Enter `mode`, dropping whatever session was open
    pub fn begin(&mut self, mode: Mode) {
        self.clear_editing_modes();
        tracing::debug!(mode = mode.name(), "enter mode");
        self.mode = mode;
        self.update_table_height();
    }

    /// Close any open session without committing
    pub fn clear_editing_modes(&mut self) {
        if let Mode::Text(session) = &mut self.mode {
            session.input.blur();
        }
        self.mode = Mode::Navigate;
        self.pending_editor = None;
    }

    /// Show a transient message and schedule its removal
    pub fn flash(&mut self, message: impl Into<String>) {
        self.flash_at(message, Instant::now());
    }

    pub fn flash_at(&mut self, message: impl Into<String>, now: Instant) {
        let generation = self.status.set(message);
        self.timers
            .schedule(now + STATUS_TIMEOUT, TimerEvent::ClearStatus { generation });
    }

    pub fn flash_error(&mut self, err: &dyn Display) {
        self.flash(format!("Error: {}", err));
    }

    /// Run every timer due at `now`
    pub fn fire_timers(&mut self, now: Instant) {
        for event in self.timers.take_due(now) {
            match event {
                TimerEvent::ClearStatus { generation } => {
                    self.status.clear_if(generation);
                }
                TimerEvent::BlinkTick { generation } => self.blink_tick(generation, now),
            }
        }
    }

    /// Start the post-edit highlight on `target`, replacing any running one
    pub fn start_blink(&mut self, target: BlinkTarget) {
        self.blink_generation += 1;
        self.blink = Some(Blink::new(target, self.blink_generation, self.blink_ticks));
        self.timers.schedule(
            Instant::now() + BLINK_INTERVAL,
            TimerEvent::BlinkTick {
                generation: self.blink_generation,
            },
        );
    }

    fn blink_tick(&mut self, generation: u64, now: Instant) {
        let Some(blink) = &mut self.blink else {
            return;
        };
        if blink.generation != generation {
            return;
        }
        if blink.tick() {
            self.timers
                .schedule(now + BLINK_INTERVAL, TimerEvent::BlinkTick { generation });
        } else {
            self.blink = None;
        }
    }

    /// Whether `target` should be drawn highlighted right now
    pub fn blink_on(&self, target: BlinkTarget) -> bool {
        self.blink
            .as_ref()
            .is_some_and(|b| b.on && b.target == target)
    }

    pub fn is_blinking_row(&self) -> bool {
        matches!(
            self.blink,
            Some(Blink {
                target: BlinkTarget::Row(_),
                ..
            })
        )
    }

    /// Highlight target for an edit to `id`: the field slot when the detail
    /// view shows that field, otherwise the table row.
    pub fn edit_feedback(&self, id: u32, field: Option<DetailFieldKind>) -> BlinkTarget {
        match (self.detail(), field) {
            (Some(ds), Some(kind)) if ds.task.id == id && ds.index_of(kind).is_some() => {
                BlinkTarget::Field(kind)
            }
            _ => BlinkTarget::Row(id),
        }
    }

    /// Put the table cursor on a cell, scrolling it into view
    pub fn move_cursor(&mut self, row: usize, col: usize) {
        self.table.set_cursor(row);
        self.table.set_column_cursor(col);
    }

    /// Recompute table body height: the edit row takes a line while a
    /// session is open.
    pub fn update_table_height(&mut self) {
        let chrome = 2 + u16::from(self.mode.is_editing());
        let height = self.viewport_height.saturating_sub(chrome);
        self.table.set_height(height as usize);
    }

    pub fn set_viewport_height(&mut self, height: u16) {
        if self.viewport_height != height {
            self.viewport_height = height;
            self.update_table_height();
        }
    }

    pub fn export_error(&self) -> Option<StoreError> {
        self.store.export(&self.filters).err()
    }
}

/// Run the TUI application
pub fn run(store: Box<dyn TaskStore>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, config);
    if let Some(e) = app.export_error() {
        return Err(Box::new(e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.fire_timers(Instant::now());

        if let Some(edit) = app.pending_editor.take() {
            let result = suspend_for_editor(terminal, &edit.text).map_err(|e| e.to_string());
            input::handle_event(
                app,
                AppEvent::DescriptionEdited {
                    id: edit.id,
                    result,
                },
            );
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Leave the alternate screen, edit `text` in `$VISUAL`/`$EDITOR`, and
/// come back. Returns the edited text without its trailing newline.
fn suspend_for_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    text: &str,
) -> io::Result<String> {
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let file = tempfile::Builder::new()
        .prefix("samurai-desc-")
        .suffix(".txt")
        .tempfile()?;
    fs::write(file.path(), text)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let status = Command::new(&editor).arg(file.path()).status();

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    let status = status?;
    if !status.success() {
        return Err(io::Error::other(format!("{} exited with {}", editor, status)));
    }
    let edited = fs::read_to_string(file.path())?;
    Ok(edited.trim_end_matches(['\n', '\r']).to_string())
}
