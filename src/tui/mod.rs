//! Ratatui-based terminal UI.
//!
//! The TUI provides a form for the amount, date range, and accrual mode, then
//! renders the adjusted value and a chart of the running balance.
//!
//! Range edits re-fetch the Selic series; amount/mode edits recompute against
//! the already-fetched series.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, RunOutput};
use crate::cli::{CalcArgs, parse_user_amount, parse_user_date};
use crate::data::BcbClient;
use crate::domain::{AccrualMode, AccrualRequest};
use crate::error::AppError;
use crate::report::format_brl;

mod plotters_chart;

use plotters_chart::BalanceChart;

const FIELD_AMOUNT: usize = 0;
const FIELD_START: usize = 1;
const FIELD_END: usize = 2;
const FIELD_MODE: usize = 3;

/// Start the TUI.
pub fn run(args: CalcArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    amount_input: String,
    start_input: String,
    end_input: String,
    mode: AccrualMode,
    selected_field: usize,
    editing: bool,
    edit_buffer: String,
    status: String,
    client: BcbClient,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: CalcArgs) -> Result<Self, AppError> {
        let client = BcbClient::from_env()?;
        let mut app = Self {
            amount_input: args
                .amount
                .map(|a| format!("{a:.2}"))
                .unwrap_or_else(|| "0.00".to_string()),
            start_input: args.resolved_start().to_string(),
            end_input: args.resolved_end().to_string(),
            mode: args.mode,
            selected_field: FIELD_AMOUNT,
            editing: false,
            edit_buffer: String::new(),
            status: "Fetching Selic rates...".to_string(),
            client,
            run: None,
        };
        app.refresh_series();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_MODE {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == FIELD_MODE {
                    self.mode = self.mode.toggle();
                    self.recompute();
                } else {
                    self.edit_buffer = self.current_input().to_string();
                    self.editing = true;
                    self.status = "Editing (Enter to apply, Esc to cancel).".to_string();
                }
            }
            KeyCode::Char('r') => self.refresh_series(),
            KeyCode::Char('d') => match &self.run {
                Some(run) => match crate::debug::write_debug_bundle(run) {
                    Ok(path) => {
                        self.status = format!("Wrote debug bundle: {}", path.display());
                    }
                    Err(err) => {
                        self.status = format!("Debug write failed: {err}");
                    }
                },
                None => {
                    self.status = "No computed result available.".to_string();
                }
            },
            _ => {}
        }

        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = false;
                self.apply_edit();
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                let allowed = if self.selected_field == FIELD_AMOUNT {
                    c.is_ascii_digit() || c == '.' || c == ','
                } else {
                    c.is_ascii_digit() || c == '-' || c == '/'
                };
                if allowed {
                    self.edit_buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_edit(&mut self) {
        match self.selected_field {
            FIELD_AMOUNT => match parse_user_amount(&self.edit_buffer) {
                Ok(value) => {
                    self.amount_input = format!("{value:.2}");
                    self.recompute();
                }
                Err(msg) => self.status = msg,
            },
            FIELD_START | FIELD_END => match parse_user_date(&self.edit_buffer) {
                Ok(date) => {
                    if self.selected_field == FIELD_START {
                        self.start_input = date.to_string();
                    } else {
                        self.end_input = date.to_string();
                    }
                    self.refresh_series();
                }
                Err(msg) => self.status = msg,
            },
            _ => {}
        }
    }

    fn adjust_field(&mut self, delta: i64) {
        match self.selected_field {
            FIELD_AMOUNT => {
                let Ok(value) = parse_user_amount(&self.amount_input) else {
                    self.status = format!("Invalid amount '{}'.", self.amount_input);
                    return;
                };
                let stepped = (value + 100.0 * delta as f64).max(0.0);
                self.amount_input = format!("{stepped:.2}");
                self.recompute();
            }
            FIELD_START | FIELD_END => {
                let input = if self.selected_field == FIELD_START {
                    &self.start_input
                } else {
                    &self.end_input
                };
                let Ok(date) = parse_user_date(input) else {
                    self.status = format!("Invalid date '{input}'.");
                    return;
                };
                let Some(stepped) = date.checked_add_signed(chrono::Duration::days(delta)) else {
                    return;
                };
                if self.selected_field == FIELD_START {
                    self.start_input = stepped.to_string();
                } else {
                    self.end_input = stepped.to_string();
                }
                self.refresh_series();
            }
            FIELD_MODE => {
                self.mode = self.mode.toggle();
                self.recompute();
            }
            _ => {}
        }
    }

    fn current_input(&self) -> &str {
        match self.selected_field {
            FIELD_AMOUNT => &self.amount_input,
            FIELD_START => &self.start_input,
            _ => &self.end_input,
        }
    }

    /// Parse the form into a validated request, or explain what's wrong.
    fn build_request(&self) -> Result<AccrualRequest, String> {
        let principal = parse_user_amount(&self.amount_input)?;
        let start_date = parse_user_date(&self.start_input)?;
        let end_date = parse_user_date(&self.end_input)?;
        let request = AccrualRequest {
            principal,
            start_date,
            end_date,
            mode: self.mode,
        };
        request.validate().map_err(|e| e.to_string())?;
        Ok(request)
    }

    /// Fetch the series for the current range and recompute.
    ///
    /// Invalid input and fetch failures land in the status line; the previous
    /// result (if any) stays on screen.
    fn refresh_series(&mut self) {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };

        match pipeline::run_adjust(&self.client, &request) {
            Ok(run) => {
                self.status = match run.series.span() {
                    Some((first, last)) => format!(
                        "Selic series: {} rate days ({first} → {last}).",
                        run.series.len()
                    ),
                    None => "Selic series: no published rates in this range.".to_string(),
                };
                self.run = Some(run);
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    /// Recompute against the already-fetched series when the range is unchanged.
    fn recompute(&mut self) {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };

        match &self.run {
            Some(run)
                if run.request.start_date == request.start_date
                    && run.request.end_date == request.end_date =>
            {
                let series = run.series.clone();
                let run = pipeline::run_adjust_with_series(&request, series);
                self.status = format!("Adjusted: {}", format_brl(run.outcome.adjusted));
                self.run = Some(run);
            }
            _ => self.refresh_series(),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("selic", Style::default().fg(Color::Cyan)),
            Span::raw(" — Selic monetary adjustment (BCB SGS)"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "amount: R$ {} | range: {} → {} | mode: {}",
                self.amount_input,
                self.start_input,
                self.end_input,
                self.mode.display_name(),
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            lines.push(Line::from(Span::styled(
                format!(
                    "adjusted: {} | interest: {} | rate days: {}/{}",
                    format_brl(run.outcome.adjusted),
                    format_brl(run.outcome.interest),
                    run.outcome.rate_days,
                    run.outcome.calendar_days,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Running balance").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        if run.trajectory.len() < 2 {
            let msg = Paragraph::new("Range too short to chart.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        }

        let (line, rate_days, x_bounds, y_bounds) = chart_series(run);

        let widget = BalanceChart {
            line: &line,
            rate_days: &rate_days,
            x_bounds,
            y_bounds,
            x_label: "day",
            y_label: "balance (R$)",
            fmt_x: fmt_axis_day,
            fmt_y: fmt_axis_brl,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let field = |idx: usize, label: &str, value: &str| -> ListItem<'static> {
            if self.editing && self.selected_field == idx {
                ListItem::new(format!("{label}: {}_", self.edit_buffer))
            } else {
                ListItem::new(format!("{label}: {value}"))
            }
        };

        let items = vec![
            field(FIELD_AMOUNT, "Amount (R$)", &self.amount_input),
            field(FIELD_START, "Start date", &self.start_input),
            field(FIELD_END, "End date", &self.end_input),
            ListItem::new(format!("Mode: {}", self.mode.display_name())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing {
            let hint = Paragraph::new("Editing…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(1),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit/toggle  r refetch  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for Plotters.
fn chart_series(run: &RunOutput) -> (Vec<(f64, f64)>, Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let mut line = Vec::with_capacity(run.trajectory.len());
    let mut rate_days = Vec::new();
    for (i, day) in run.trajectory.iter().enumerate() {
        let point = (i as f64, day.balance);
        line.push(point);
        if day.rate.is_some() {
            rate_days.push(point);
        }
    }

    let x_bounds = [0.0, (line.len() - 1) as f64];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &line {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-9);
    let y_bounds = [y_min - pad, y_max + pad];

    (line, rate_days, x_bounds, y_bounds)
}

fn fmt_axis_day(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_brl(v: f64) -> String {
    format!("{v:.2}")
}
