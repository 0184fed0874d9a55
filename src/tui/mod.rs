//! Ratatui-based terminal UI.
//!
//! A settings panel picks years, preset, mode and seed; generation runs on a
//! worker thread that streams progress over a channel and can be cancelled.
//! The tabs mirror the analysis views: hourly profile for a day, monthly
//! monitor for a year, daily consumption for a month, and monthly consumption
//! over the whole range.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs},
    Terminal,
};

use crate::app::pipeline::{run_pipeline, RunOutput};
use crate::calendar::{MAX_YEAR, MIN_YEAR};
use crate::cli::GenerationArgs;
use crate::data::locale::{day_type_label, month_name, month_short_name};
use crate::domain::{EnrichedLoadTable, GenerationMode, Locale, Preset};
use crate::error::{AppError, GenerateError};
use crate::models::is_peak_hour;
use crate::report;

mod plotters_chart;

use plotters_chart::{ChartLine, LineKind, LoadPlottersChart};

const SETTINGS_FIELDS: usize = 6;

/// Start the TUI.
pub fn run(args: GenerationArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
    app.start_generation();
    let result = app.event_loop(&mut terminal);
    app.shutdown();
    result
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Hourly,
    Monthly,
    Daily,
    Yearly,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Hourly, Tab::Monthly, Tab::Daily, Tab::Yearly];

    fn title(self) -> &'static str {
        match self {
            Tab::Hourly => "Hourly",
            Tab::Monthly => "Monthly",
            Tab::Daily => "Daily",
            Tab::Yearly => "Consumption",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

enum JobMsg {
    Progress(u8, String),
    Finished(Result<RunOutput, GenerateError>),
}

/// A generation running on a worker thread.
struct Job {
    rx: Receiver<JobMsg>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Job {
    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

struct App {
    args: GenerationArgs,
    output_dir: PathBuf,
    selected_field: usize,
    tab: Tab,
    date: Option<NaiveDate>,
    year: Option<i32>,
    month: u32,
    date_input: String,
    editing_date: bool,
    status: String,
    progress: Option<(u8, String)>,
    job: Option<Job>,
    run: Option<Arc<RunOutput>>,
}

impl App {
    fn new(args: GenerationArgs) -> Self {
        let output_dir = std::env::var_os("GRIDLOAD_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("results"));
        Self {
            args,
            output_dir,
            selected_field: 0,
            tab: Tab::Hourly,
            date: None,
            year: None,
            month: 1,
            date_input: String::new(),
            editing_date: false,
            status: String::new(),
            progress: None,
            job: None,
            run: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.poll_job() {
                needs_redraw = true;
            }

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

    /// Returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_date {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.tab = Tab::ALL[idx];
            }
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => {
                if self.selected_field + 1 < SETTINGS_FIELDS {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('[') => self.step_view(-1),
            KeyCode::Char(']') => self.step_view(1),
            KeyCode::Char('e') => {
                self.editing_date = true;
                self.date_input.clear();
                self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('g') | KeyCode::Enter => self.start_generation(),
            KeyCode::Char('c') => self.cancel_generation(),
            KeyCode::Char('x') => self.export(),
            _ => {}
        }
        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => self.date_input.push(c),
            _ => {}
        }
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.date_input.trim();
        let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                self.status = format!("Invalid date '{trimmed}': {e}");
                return;
            }
        };
        let known = self.run.as_ref().is_some_and(|r| r.table.dates().contains(&date));
        if known {
            self.date = Some(date);
            self.tab = Tab::Hourly;
            self.status = format!("date: {date}");
        } else {
            self.status = format!("No data for {date}.");
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        let a = &mut self.args;
        match self.selected_field {
            0 => {
                a.start_year = (a.start_year + delta).clamp(MIN_YEAR, MAX_YEAR);
                a.end_year = a.end_year.max(a.start_year);
            }
            1 => {
                a.end_year = (a.end_year + delta).clamp(MIN_YEAR, MAX_YEAR);
                a.start_year = a.start_year.min(a.end_year);
            }
            2 => {
                a.preset = match a.preset {
                    Preset::Basic => Preset::Extended,
                    Preset::Extended => Preset::Basic,
                };
            }
            3 => {
                a.mode = match a.mode {
                    GenerationMode::Reproducible => GenerationMode::Random,
                    GenerationMode::Random => GenerationMode::Reproducible,
                };
            }
            4 => {
                a.seed = if delta >= 0 { a.seed.wrapping_add(1) } else { a.seed.wrapping_sub(1) };
            }
            5 => {
                a.locale = Some(match a.locale_or_default() {
                    Locale::Uk => Locale::En,
                    Locale::En => Locale::Uk,
                });
            }
            _ => {}
        }
        self.status = "Settings changed; press g to regenerate.".to_string();
    }

    /// `[`/`]`: previous/next day, year or month depending on the tab.
    fn step_view(&mut self, delta: i64) {
        let Some(run) = self.run.clone() else {
            return;
        };
        match self.tab {
            Tab::Hourly => {
                let dates = run.table.dates();
                if dates.is_empty() {
                    return;
                }
                if let Some(cur) = self.date {
                    let idx = dates.iter().position(|d| *d == cur).unwrap_or(0) as i64;
                    let next = (idx + delta).clamp(0, dates.len() as i64 - 1) as usize;
                    self.date = dates.get(next).copied();
                }
            }
            Tab::Monthly => {
                let years = run.table.years();
                if years.is_empty() {
                    return;
                }
                if let Some(cur) = self.year {
                    let idx = years.iter().position(|y| *y == cur).unwrap_or(0) as i64;
                    let next = (idx + delta).clamp(0, years.len() as i64 - 1) as usize;
                    self.year = years.get(next).copied();
                }
            }
            Tab::Daily => {
                let m = self.month as i64 + delta;
                if (1..=12).contains(&m) {
                    self.month = m as u32;
                } else {
                    // Roll into the neighbouring year when it exists.
                    let years = run.table.years();
                    let target = self.year.map(|y| if m < 1 { y - 1 } else { y + 1 });
                    if let Some(y) = target.filter(|y| years.contains(y)) {
                        self.year = Some(y);
                        self.month = if m < 1 { 12 } else { 1 };
                    }
                }
            }
            Tab::Yearly => {}
        }
    }

    fn start_generation(&mut self) {
        if self.job.is_some() {
            self.status = "Generation already running.".to_string();
            return;
        }

        let config = crate::app::run_config_from_args(&self.args);
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        let handle = thread::spawn(move || {
            let progress_tx = tx.clone();
            let mut progress = move |percent: u8, message: &str| {
                let _ = progress_tx.send(JobMsg::Progress(percent, message.to_string()));
            };
            let result = run_pipeline(&config, &mut progress, Some(&*worker_cancel));
            let _ = tx.send(JobMsg::Finished(result));
        });

        self.job = Some(Job {
            rx,
            cancel,
            handle: Some(handle),
        });
        self.progress = Some((0, "Starting...".to_string()));
        self.status = format!("Generating {}..={}...", self.args.start_year, self.args.end_year);
    }

    fn cancel_generation(&mut self) {
        match &self.job {
            Some(job) => {
                job.cancel.store(true, Ordering::Relaxed);
                self.status = "Cancelling...".to_string();
            }
            None => self.status = "Nothing to cancel.".to_string(),
        }
    }

    /// Drain worker messages. Returns `true` when anything changed.
    fn poll_job(&mut self) -> bool {
        let Some(job) = &self.job else {
            return false;
        };

        let mut changed = false;
        let mut finished: Option<Result<RunOutput, String>> = None;
        loop {
            match job.rx.try_recv() {
                Ok(JobMsg::Progress(percent, message)) => {
                    self.progress = Some((percent, message));
                    changed = true;
                }
                Ok(JobMsg::Finished(result)) => {
                    finished = Some(result.map_err(|e| match e {
                        GenerateError::Cancelled => "Generation cancelled; previous data kept.".to_string(),
                        other => format!("Generation failed: {other}"),
                    }));
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished = Some(Err("Generation worker stopped unexpectedly.".to_string()));
                    break;
                }
            }
        }

        let Some(result) = finished else {
            return changed;
        };
        if let Some(mut job) = self.job.take() {
            job.join();
        }
        self.progress = None;
        match result {
            Ok(out) => self.install_run(out),
            Err(msg) => self.status = msg,
        }
        true
    }

    fn install_run(&mut self, out: RunOutput) {
        let table = &out.table;
        let first_date = table.dates().first().copied();
        let first_year = table.years().first().copied();
        // Keep the current view when it is still inside the new range.
        if !self.date.is_some_and(|d| table.dates().contains(&d)) {
            self.date = first_date;
        }
        if !self.year.is_some_and(|y| table.years().contains(&y)) {
            self.year = first_year;
        }
        self.status = format!(
            "Generated {} rows ({} mode).",
            out.stats.n_rows,
            table.meta().mode().display_name()
        );
        self.run = Some(Arc::new(out));
    }

    fn export(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        let summary = run.summary(Local::now().naive_local());
        self.status = match crate::io::export_all(&self.output_dir, &run.table, &run.stats, &summary) {
            Ok(files) => format!("Exported {} files to {}", files.all().len(), self.output_dir.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn shutdown(&mut self) {
        if let Some(mut job) = self.job.take() {
            job.cancel.store(true, Ordering::Relaxed);
            job.join();
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_tabs(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        if let Some((percent, message)) = &self.progress {
            let gauge = Gauge::default()
                .block(Block::default().title("Generating").borders(Borders::ALL))
                .gauge_style(Style::default().fg(Color::Cyan))
                .percent(u16::from(*percent))
                .label(format!("{percent}% {message}"));
            frame.render_widget(gauge, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("gridload", Style::default().fg(Color::Cyan)),
            Span::raw(" synthetic grid load"),
        ]));
        let info = match &self.run {
            Some(run) => {
                let meta = run.table.meta();
                let seed = meta.seed.map(|s| format!(" seed={s}")).unwrap_or_default();
                format!(
                    "years: {}..={} | preset: {} | mode: {}{seed} | rows: {} | mean load: {:.1} MW",
                    meta.start_year,
                    meta.end_year,
                    meta.preset.display_name(),
                    meta.mode().display_name(),
                    run.stats.n_rows,
                    run.stats.load_mean,
                )
            }
            None => "no data yet".to_string(),
        };
        lines.push(Line::from(Span::styled(info, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<String> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{} {}", i + 1, t.title()))
            .collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .select(self.tab.index())
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(tabs, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(area);

        self.draw_settings(frame, chunks[0]);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, chunks[1]);
            return;
        };

        match self.tab {
            Tab::Hourly => self.draw_hourly(frame, chunks[1], &run.table),
            Tab::Monthly => self.draw_monthly(frame, chunks[1], &run.table),
            Tab::Daily => self.draw_daily(frame, chunks[1], &run.table),
            Tab::Yearly => self.draw_yearly(frame, chunks[1], &run.table),
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let a = &self.args;
        let items = vec![
            ListItem::new(format!("Start year: {}", a.start_year)),
            ListItem::new(format!("End year: {}", a.end_year)),
            ListItem::new(format!("Preset: {}", a.preset.display_name())),
            ListItem::new(format!("Mode: {}", a.mode.display_name())),
            ListItem::new(format!("Seed: {}", a.seed)),
            ListItem::new(format!("Locale: {:?}", a.locale_or_default())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_date {
            let hint = Paragraph::new(format!("Date: {}_", self.date_input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_hourly(&self, frame: &mut ratatui::Frame<'_>, area: Rect, table: &EnrichedLoadTable) {
        let Some(date) = self.date else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let profile = report::hourly_profile(table, date);
        let day_type = profile
            .first()
            .map(|p| day_type_label(table.locale(), p.day_type))
            .unwrap_or("-");
        let series = hourly_series(&profile);
        draw_chart(frame, chunks[0], &format!("Load by hour: {date} ({day_type})"), &series);

        let trend = report::day_temperature_trend(table, date);
        let series = temperature_series(&profile, trend.as_ref());
        let title = match trend {
            Some(t) => format!("Load vs temperature (quadratic, c2={:.3})", t.coeffs[2]),
            None => "Load vs temperature".to_string(),
        };
        draw_chart(frame, chunks[1], &title, &series);
    }

    fn draw_monthly(&self, frame: &mut ratatui::Frame<'_>, area: Rect, table: &EnrichedLoadTable) {
        let Some(year) = self.year else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(16)])
            .split(area);

        let stats = report::monthly_monitor(table, year);
        let series = monthly_series(&stats);
        draw_chart(frame, chunks[0], &format!("Monthly monitor {year}: max / mean / min"), &series);

        let text = report::format_monthly_monitor(&stats, year);
        frame.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
    }

    fn draw_daily(&self, frame: &mut ratatui::Frame<'_>, area: Rect, table: &EnrichedLoadTable) {
        let Some(year) = self.year else {
            return;
        };
        let rows: Vec<report::DailyConsumption> = report::daily_consumption(table)
            .into_iter()
            .filter(|r| chrono::Datelike::year(&r.date) == year && chrono::Datelike::month(&r.date) == self.month)
            .collect();
        let series = daily_series(&rows);
        let title = format!("Daily consumption: {} {year}", month_name(table.locale(), self.month));
        draw_chart(frame, area, &title, &series);
    }

    fn draw_yearly(&self, frame: &mut ratatui::Frame<'_>, area: Rect, table: &EnrichedLoadTable) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let rows = report::monthly_consumption(table);
        let series = consumption_series(&rows);
        draw_chart(frame, chunks[0], "Monthly consumption (sum, MW·h)", &series);

        let labels: Vec<String> = rows
            .iter()
            .take(12)
            .map(|r| month_short_name(table.locale(), r.month).to_string())
            .collect();
        frame.render_widget(
            Paragraph::new(labels.join(" ")).block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab/1-4 view  ↑/↓ ←/→ settings  g generate  c cancel  [/] step  e date  x export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Everything a chart panel needs, computed outside the draw call.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    lines: Vec<ChartLine>,
    points: Vec<(f64, f64)>,
    highlights: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &'static str,
    y_label: &'static str,
}

impl ChartSeries {
    fn new(lines: Vec<ChartLine>, points: Vec<(f64, f64)>, highlights: Vec<(f64, f64)>, x_label: &'static str, y_label: &'static str) -> Self {
        let all = lines
            .iter()
            .flat_map(|l| l.points.iter())
            .chain(points.iter())
            .chain(highlights.iter());
        let (x_bounds, y_bounds) = bounds(all);
        Self {
            lines,
            points,
            highlights,
            x_bounds,
            y_bounds,
            x_label,
            y_label,
        }
    }
}

fn bounds<'a>(pts: impl Iterator<Item = &'a (f64, f64)>) -> ([f64; 2], [f64; 2]) {
    let (mut x0, mut x1, mut y0, mut y1) = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in pts {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y0 = y0.min(y);
        y1 = y1.max(y);
    }
    if !x0.is_finite() || !x1.is_finite() || x1 <= x0 {
        x0 = 0.0;
        x1 = 1.0;
    }
    if !y0.is_finite() || !y1.is_finite() || y1 <= y0 {
        y0 = 0.0;
        y1 = 1.0;
    }
    let pad = ((y1 - y0).abs() * 0.05).max(1e-12);
    ([x0, x1], [y0 - pad, y1 + pad])
}

fn hourly_series(profile: &[report::HourlyPoint]) -> ChartSeries {
    let load: Vec<(f64, f64)> = profile.iter().map(|p| (p.hour as f64, p.load_mw)).collect();
    let capacity: Vec<(f64, f64)> = profile.iter().map(|p| (p.hour as f64, p.capacity_mw)).collect();
    let peaks = profile
        .iter()
        .filter(|p| is_peak_hour(p.hour))
        .map(|p| (p.hour as f64, p.load_mw))
        .collect();
    ChartSeries::new(
        vec![
            ChartLine { points: load, kind: LineKind::Primary },
            ChartLine { points: capacity, kind: LineKind::Secondary },
        ],
        Vec::new(),
        peaks,
        "hour",
        "MW",
    )
}

fn temperature_series(profile: &[report::HourlyPoint], trend: Option<&report::TemperatureTrend>) -> ChartSeries {
    let points: Vec<(f64, f64)> = profile.iter().map(|p| (p.temperature_c, p.load_mw)).collect();
    let mut lines = Vec::new();
    if let Some(trend) = trend {
        let (t0, t1) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(a, b), &(t, _)| (a.min(t), b.max(t)));
        if t1 > t0 {
            let n = 60;
            let curve = (0..n)
                .map(|i| {
                    let t = t0 + (t1 - t0) * i as f64 / (n - 1) as f64;
                    (t, trend.predict(t))
                })
                .collect();
            lines.push(ChartLine { points: curve, kind: LineKind::Secondary });
        }
    }
    ChartSeries::new(lines, points, Vec::new(), "temperature (C)", "MW")
}

fn monthly_series(stats: &[report::MonthStats]) -> ChartSeries {
    let line = |f: fn(&report::MonthStats) -> f64| -> Vec<(f64, f64)> {
        stats.iter().map(|s| (s.month as f64, f(s))).collect()
    };
    ChartSeries::new(
        vec![
            ChartLine { points: line(|s| s.max_mw), kind: LineKind::Secondary },
            ChartLine { points: line(|s| s.mean_mw), kind: LineKind::Primary },
            ChartLine { points: line(|s| s.min_mw), kind: LineKind::Tertiary },
        ],
        Vec::new(),
        Vec::new(),
        "month",
        "MW",
    )
}

fn daily_series(rows: &[report::DailyConsumption]) -> ChartSeries {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (chrono::Datelike::day(&r.date) as f64, r.sum_mw))
        .collect();
    let holidays = rows
        .iter()
        .filter(|r| r.day_type == crate::domain::DayType::Holiday)
        .map(|r| (chrono::Datelike::day(&r.date) as f64, r.sum_mw))
        .collect();
    ChartSeries::new(
        vec![ChartLine { points: points.clone(), kind: LineKind::Primary }],
        points,
        holidays,
        "day",
        "MW·h",
    )
}

fn consumption_series(rows: &[report::MonthlyConsumption]) -> ChartSeries {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64 + 1.0, r.sum_mw))
        .collect();
    ChartSeries::new(
        vec![ChartLine { points: points.clone(), kind: LineKind::Primary }],
        points,
        Vec::new(),
        "month #",
        "MW·h",
    )
}

fn draw_chart(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, series: &ChartSeries) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let (chart_rect, insets) = chart_layout(inner);
    let widget = LoadPlottersChart {
        lines: &series.lines,
        points: &series.points,
        highlights: &series.highlights,
        x_bounds: series.x_bounds,
        y_bounds: series.y_bounds,
        x_label: series.x_label,
        y_label: series.y_label,
        fmt_x: fmt_axis_x,
        fmt_y: fmt_axis_y,
    };
    frame.render_widget(widget, chart_rect);
    if let Some(insets) = insets {
        draw_axis_ticks(frame, inner, chart_rect, insets, series);
    }
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(frame: &mut ratatui::Frame<'_>, inner: Rect, chart: Rect, insets: AxisInsets, series: &ChartSeries) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);
    let [x_lo, x_hi] = series.x_bounds;
    let [y_lo, y_hi] = series.y_bounds;

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_x(x_lo + u * (x_hi - x_lo));
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_y(y_lo + u * (y_hi - y_lo));
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(series.x_label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(series.y_label)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
