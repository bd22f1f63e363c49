use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use tracing::{debug, error, info};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::api_client::QplClient;
use crate::config::config::Config;
use crate::data::data_view::{DataView, NO_ITEMS_TEXT};
use crate::data::record::Record;
use crate::data::value_format::ValueFormatter;
use crate::help_text::HelpText;
use crate::logging::get_log_buffer;
use crate::ui::actions::Action;
use crate::ui::key_mapper::{InputMode, KeyMapper};
use crate::ui::table_renderer;

/// Lifecycle of the one fetch the viewer makes
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(DataView),
    Failed(String),
}

/// Where the view should start once records arrive
#[derive(Debug, Clone, Default)]
pub struct StartPosition {
    pub search: Option<String>,
    pub page: Option<usize>,
}

pub struct TuiApp {
    config: Config,
    formatter: ValueFormatter,
    source_url: String,
    start: StartPosition,

    state: LoadState,
    mode: InputMode,
    input: Input,
    key_mapper: KeyMapper,

    show_help: bool,
    show_debug: bool,
    status_message: String,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(config: Config, source_url: impl Into<String>) -> Result<Self> {
        let formatter = config.value_formatter()?;

        Ok(Self {
            config,
            formatter,
            source_url: source_url.into(),
            start: StartPosition::default(),
            state: LoadState::Loading,
            mode: InputMode::Browse,
            input: Input::default(),
            key_mapper: KeyMapper::new(),
            show_help: false,
            show_debug: false,
            status_message: "Loading...".to_string(),
            should_quit: false,
        })
    }

    pub fn with_start(mut self, start: StartPosition) -> Self {
        self.start = start;
        self
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The view, once records have loaded
    pub fn view(&self) -> Option<&DataView> {
        match &self.state {
            LoadState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Install the fetch result. Records become the immutable dataset.
    pub fn load_records(&mut self, result: Result<Vec<Record>>) {
        match result {
            Ok(records) => {
                let mut view = DataView::new(
                    Arc::new(records),
                    &self.config.column_rules(),
                    self.config.table.initial_page_size,
                    self.formatter.clone(),
                );

                if let Some(query) = self.start.search.take() {
                    view.search(&query);
                    self.input = Input::new(query);
                }
                if let Some(page) = self.start.page.take() {
                    view.go_to_page(page);
                }

                info!(
                    target: "tui",
                    "Loaded {} records, {} columns",
                    view.total_count(),
                    view.columns().len()
                );
                self.status_message = format!("Loaded {} records", view.total_count());
                self.state = LoadState::Ready(view);
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!(target: "tui", "Fetch failed: {}", message);
                self.status_message = "Fetch failed".to_string();
                self.state = LoadState::Failed(message);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Overlays swallow Esc before it reaches the table
        if key.code == KeyCode::Esc && (self.show_help || self.show_debug) {
            self.show_help = false;
            self.show_debug = false;
            return;
        }

        if let Some(action) = self.key_mapper.map_key(key, self.mode) {
            debug!(target: "tui", "Key {:?} -> {:?}", key.code, action);
            self.apply_action(action, key);
        }
    }

    fn apply_action(&mut self, action: Action, key: KeyEvent) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::ToggleDebug => self.show_debug = !self.show_debug,
            Action::StartSearch => self.start_search(),
            Action::EditSearch => {
                self.input.handle_event(&Event::Key(key));
            }
            Action::CancelSearch => {
                let applied = self.view().map(|v| v.search_query().to_string());
                self.input = Input::new(applied.unwrap_or_default());
                self.mode = InputMode::Browse;
                self.status_message = "Search cancelled".to_string();
            }
            Action::SubmitSearch => {
                let query = self.input.value().to_string();
                self.mode = InputMode::Browse;
                if let LoadState::Ready(view) = &mut self.state {
                    view.search(&query);
                    self.status_message = if view.search_query().trim().is_empty() {
                        format!("Showing all {} records", view.total_count())
                    } else {
                        format!("{} matches for '{}'", view.row_count(), query)
                    };
                }
            }
            Action::ClearSearch => {
                self.input = Input::default();
                if let LoadState::Ready(view) = &mut self.state {
                    view.clear_search();
                    self.status_message = "Search cleared".to_string();
                }
            }
            Action::NextPage(count) => {
                if let LoadState::Ready(view) = &mut self.state {
                    for _ in 0..count {
                        if !view.next_page() {
                            break;
                        }
                    }
                }
            }
            Action::PreviousPage(count) => {
                if let LoadState::Ready(view) = &mut self.state {
                    for _ in 0..count {
                        if !view.previous_page() {
                            break;
                        }
                    }
                }
            }
            Action::FirstPage => {
                if let LoadState::Ready(view) = &mut self.state {
                    view.first_page();
                }
            }
            Action::LastPage => {
                if let LoadState::Ready(view) = &mut self.state {
                    view.last_page();
                }
            }
            Action::IncreasePageSize => self.change_page_size(true),
            Action::DecreasePageSize => self.change_page_size(false),
        }
    }

    fn start_search(&mut self) {
        if !matches!(self.state, LoadState::Ready(_)) {
            return;
        }
        self.key_mapper.clear_pending();
        let current = self.input.value().to_string();
        let cursor = current.chars().count();
        self.input = Input::new(current).with_cursor(cursor);
        self.mode = InputMode::Search;
        self.status_message = "Type to search, Enter to apply, Esc to cancel".to_string();
    }

    fn change_page_size(&mut self, larger: bool) {
        let LoadState::Ready(view) = &mut self.state else {
            return;
        };

        let current = view.page_size();
        let next = if larger {
            self.config.table.larger_page_size(current)
        } else {
            self.config.table.smaller_page_size(current)
        };

        match next {
            Some(size) => {
                view.set_page_size(size);
                self.status_message = format!("Page size: {}", size);
            }
            None => {
                self.status_message = format!("Page size stays at {}", current);
            }
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Search box
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Pagination footer
                Constraint::Length(1), // Status line
            ])
            .split(f.area());

        let title = Paragraph::new(self.config.display.title.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(title, chunks[0]);

        self.draw_search_box(f, chunks[1]);

        match &self.state {
            LoadState::Loading => table_renderer::render_loading(f, chunks[2], &self.source_url),
            LoadState::Failed(message) => table_renderer::render_error(f, chunks[2], message),
            LoadState::Ready(view) => table_renderer::render_table(f, chunks[2], view),
        }

        f.render_widget(
            Paragraph::new(self.footer_text()).style(Style::default().fg(Color::White)),
            chunks[3],
        );
        self.draw_status_line(f, chunks[4]);

        if self.show_debug {
            self.draw_debug_overlay(f, chunks[2]);
        }
        if self.show_help {
            self.draw_help_overlay(f, f.area());
        }
    }

    fn draw_search_box(&self, f: &mut Frame, area: Rect) {
        let (title, border) = match self.mode {
            InputMode::Search => (
                "Search (Enter to apply, Esc to cancel)",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Browse => ("Search (/ to edit)", Style::default().fg(Color::DarkGray)),
        };

        // Keep the cursor visible in long queries
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(inner_width.max(1));

        let search = Paragraph::new(self.input.value())
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            );
        f.render_widget(search, area);

        if self.mode == InputMode::Search {
            let cursor = self.input.visual_cursor().saturating_sub(scroll);
            f.set_cursor_position((area.x + cursor as u16 + 1, area.y + 1));
        }
    }

    /// "Page p of last │ Showing items a - b │ Page size: s"
    pub fn footer_text(&self) -> String {
        match &self.state {
            LoadState::Loading => "Loading...".to_string(),
            LoadState::Failed(_) => "No data".to_string(),
            LoadState::Ready(view) if view.is_empty() => NO_ITEMS_TEXT.to_string(),
            LoadState::Ready(view) => format!(
                "Page {} of {} │ {} │ Page size: {}",
                view.current_page(),
                view.last_page_number(),
                view.items_shown_text(),
                view.page_size()
            ),
        }
    }

    fn draw_status_line(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.status_message.as_str(),
            Style::default().fg(Color::Green),
        )];

        if self.key_mapper.is_collecting_count() {
            spans.push(Span::styled(
                format!("  count: {}", self.key_mapper.get_count_buffer()),
                Style::default().fg(Color::Magenta),
            ));
        }

        spans.push(Span::styled(
            "  F1 help │ / search │ q quit",
            Style::default().fg(Color::DarkGray),
        ));

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_help_overlay(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 70, area);
        let help = Paragraph::new(HelpText::keys())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(Clear, popup);
        f.render_widget(help, popup);
    }

    fn draw_debug_overlay(&self, f: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = match get_log_buffer() {
            Some(buffer) => buffer
                .get_recent(visible)
                .into_iter()
                .map(|entry| Line::from(entry.format_for_display()))
                .collect(),
            None => vec![Line::from("Logging is not initialized")],
        };

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title("Debug log (F5 to close)"),
        );
        f.render_widget(Clear, area);
        f.render_widget(panel, area);
    }

    /// Render the loading screen, fetch once, then process keys until quit
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>, client: &QplClient) -> Result<()> {
        terminal.draw(|f| self.draw(f))?;

        let records = client.fetch_records(self.config.fetch_range());
        self.load_records(records);

        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                self.handle_key(key);
                if self.should_quit {
                    break;
                }
            }
        }

        Ok(())
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Set up the terminal, run the app, and always restore the terminal
pub fn run_tui(config: Config, client: QplClient, start: StartPosition) -> Result<()> {
    let mut app = TuiApp::new(config, client.list_url())?.with_start(start);

    if let Err(e) = enable_raw_mode() {
        return Err(anyhow::anyhow!(
            "Failed to enable raw mode: {}. Try running with --classic flag.",
            e
        ));
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(anyhow::anyhow!(
            "Failed to setup terminal: {}. Try running with --classic flag.",
            e
        ));
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(anyhow::anyhow!(
                "Failed to create terminal: {}. Try running with --classic flag.",
                e
            ));
        }
    };

    let res = app.run(&mut terminal, &client);

    // Always restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.map_err(|e| anyhow::anyhow!("TUI error: {}", e))
}
