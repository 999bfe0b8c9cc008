use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::api::JobSearch;
use crate::filters::{FilterDraft, FilterTag};
use crate::models::{Benefit, EmploymentType, ExperienceLevel, FilterValue, JobRecord};
use crate::present::{self, COMPANY_PALETTE, ERROR_MESSAGE, NO_JOBS_MESSAGE, NO_PROVIDERS};
use crate::session::{dispatch, LoadState, SearchRequest, Session};

/// Upper bound on how long the loop blocks waiting for a key, so finished
/// searches show up without user input.
const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    None,
    Detail(String),
    Filters,
}

/// One line of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelRow {
    Employment(EmploymentType),
    RemoteAny,
    RemoteOnly,
    AutoTranslate,
    Experience(ExperienceLevel),
    MinSalary,
    MaxSalary,
    Benefit(Benefit),
    Apply,
    Reset,
}

fn panel_rows() -> Vec<PanelRow> {
    let mut rows = Vec::new();
    rows.extend(EmploymentType::ALL.iter().map(|t| PanelRow::Employment(*t)));
    rows.push(PanelRow::RemoteAny);
    rows.push(PanelRow::RemoteOnly);
    rows.push(PanelRow::AutoTranslate);
    rows.extend(ExperienceLevel::ALL.iter().map(|l| PanelRow::Experience(*l)));
    rows.push(PanelRow::MinSalary);
    rows.push(PanelRow::MaxSalary);
    rows.extend(Benefit::ALL.iter().map(|b| PanelRow::Benefit(*b)));
    rows.push(PanelRow::Apply);
    rows.push(PanelRow::Reset);
    rows
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    Search(SearchRequest),
}

struct AppState {
    session: Session,
    locations: Vec<String>,
    location_idx: usize,
    query_input: String,
    focus: Focus,
    overlay: Overlay,
    selected: usize,
    scroll_offset: u16,
    panel_rows: Vec<PanelRow>,
    panel_cursor: usize,
    tag_cursor: Option<usize>,
}

impl AppState {
    fn new(session: Session, mut locations: Vec<String>) -> Self {
        let current = session.context().location.clone();
        let location_idx = if current.is_empty() {
            0
        } else if let Some(idx) = locations.iter().position(|l| *l == current) {
            idx
        } else {
            locations.push(current);
            locations.len() - 1
        };
        let query_input = session.context().query.clone();

        Self {
            session,
            locations,
            location_idx,
            query_input,
            focus: Focus::List,
            overlay: Overlay::None,
            selected: 0,
            scroll_offset: 0,
            panel_rows: panel_rows(),
            panel_cursor: 0,
            tag_cursor: None,
        }
    }

    fn current_job(&self) -> Option<&JobRecord> {
        self.session.jobs().get(self.selected)
    }

    fn current_location(&self) -> &str {
        self.locations
            .get(self.location_idx)
            .map(String::as_str)
            .unwrap_or(crate::query::ANYWHERE)
    }

    /// Keeps the cursors inside the current batch and tag strip.
    fn clamp(&mut self) {
        let len = self.session.jobs().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        let tags = self.session.filter_tags().len();
        self.tag_cursor = match self.tag_cursor {
            Some(_) if tags == 0 => None,
            Some(i) if i >= tags => Some(tags - 1),
            other => other,
        };
        if let Overlay::Detail(id) = &self.overlay {
            if self.session.job(id).is_none() {
                self.overlay = Overlay::None;
            }
        }
    }

    fn next(&mut self) {
        let len = self.session.jobs().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }

    fn cycle_location(&mut self, forward: bool) -> Action {
        if self.locations.is_empty() {
            return Action::None;
        }
        let len = self.locations.len();
        self.location_idx = if forward {
            (self.location_idx + 1) % len
        } else {
            (self.location_idx + len - 1) % len
        };
        let location = self.current_location().to_string();
        self.selected = 0;
        Action::Search(self.session.set_location(location))
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        let action = match self.overlay.clone() {
            Overlay::Filters => self.handle_panel_key(key),
            Overlay::Detail(_) => self.handle_detail_key(key),
            Overlay::None => match self.focus {
                Focus::Search => self.handle_search_key(key, now),
                Focus::List => self.handle_list_key(key),
            },
        };
        self.clamp();
        action
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::List;
                Action::None
            }
            KeyCode::Enter => {
                self.focus = Focus::List;
                self.selected = 0;
                Action::Search(self.session.issue_search())
            }
            KeyCode::Backspace => {
                self.query_input.pop();
                self.session.set_query(self.query_input.clone(), now);
                Action::None
            }
            KeyCode::Char(c) => {
                self.query_input.push(c);
                self.session.set_query(self.query_input.clone(), now);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => {
                if self.tag_cursor.is_some() {
                    self.tag_cursor = None;
                    Action::None
                } else {
                    Action::Quit
                }
            }
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.prev();
                Action::None
            }
            KeyCode::Enter => {
                if let Some(job) = self.current_job() {
                    self.overlay = Overlay::Detail(job.id.clone());
                    self.scroll_offset = 0;
                }
                Action::None
            }
            KeyCode::Char('l') => self.cycle_location(true),
            KeyCode::Char('L') => self.cycle_location(false),
            KeyCode::Char('s') => {
                let mode = self.session.sort().next();
                self.session.set_sort(mode);
                self.selected = 0;
                Action::None
            }
            KeyCode::Char('f') => {
                self.session.open_filters();
                self.overlay = Overlay::Filters;
                self.panel_cursor = 0;
                Action::None
            }
            KeyCode::Char('t') => {
                let tags = self.session.filter_tags().len();
                self.tag_cursor = match self.tag_cursor {
                    _ if tags == 0 => None,
                    None => Some(0),
                    Some(i) if i + 1 < tags => Some(i + 1),
                    Some(_) => None,
                };
                Action::None
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                let tags = self.session.filter_tags();
                match self.tag_cursor.and_then(|i| tags.get(i)) {
                    Some(tag) => {
                        let dimension = tag.dimension;
                        self.selected = 0;
                        Action::Search(self.session.remove_filter(dimension))
                    }
                    None => Action::None,
                }
            }
            KeyCode::Char('C') => {
                self.tag_cursor = None;
                self.selected = 0;
                Action::Search(self.session.clear_all_filters())
            }
            KeyCode::Char('r') => Action::Search(self.session.issue_search()),
            _ => Action::None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.overlay = Overlay::None,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown => self.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => self.scroll_up(),
            _ => {}
        }
        Action::None
    }

    fn handle_panel_key(&mut self, key: KeyEvent) -> Action {
        let row = self.panel_rows[self.panel_cursor];
        match key.code {
            KeyCode::Esc => {
                self.session.cancel_filters();
                self.overlay = Overlay::None;
                Action::None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.panel_cursor = (self.panel_cursor + 1) % self.panel_rows.len();
                Action::None
            }
            KeyCode::Up | KeyCode::BackTab => {
                let len = self.panel_rows.len();
                self.panel_cursor = (self.panel_cursor + len - 1) % len;
                Action::None
            }
            KeyCode::Char('a') => self.apply_panel(),
            KeyCode::Char('R') => {
                if let Some(draft) = self.session.draft_mut() {
                    draft.reset();
                }
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match row {
                PanelRow::Apply => self.apply_panel(),
                PanelRow::Reset => {
                    if let Some(draft) = self.session.draft_mut() {
                        draft.reset();
                    }
                    Action::None
                }
                _ => {
                    if let Some(draft) = self.session.draft_mut() {
                        toggle_row(draft, row);
                    }
                    Action::None
                }
            },
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(draft) = self.session.draft_mut() {
                    edit_salary(draft, row, |input| input.push(c));
                }
                Action::None
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.session.draft_mut() {
                    edit_salary(draft, row, |input| {
                        input.pop();
                    });
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn apply_panel(&mut self) -> Action {
        self.overlay = Overlay::None;
        self.selected = 0;
        match self.session.apply_filters() {
            Some(request) => Action::Search(request),
            None => Action::None,
        }
    }
}

fn toggle_row(draft: &mut FilterDraft, row: PanelRow) {
    let state = &mut draft.state;
    match row {
        PanelRow::Employment(t) => state.employment_types.toggle(t),
        PanelRow::RemoteAny => state.set_remote_only(false),
        PanelRow::RemoteOnly => state.set_remote_only(true),
        PanelRow::AutoTranslate => {
            let enabled = state.auto_translate_location;
            state.set_auto_translate_location(!enabled);
        }
        PanelRow::Experience(l) => state.experience_levels.toggle(l),
        PanelRow::Benefit(b) => state.benefits.toggle(b),
        PanelRow::MinSalary | PanelRow::MaxSalary | PanelRow::Apply | PanelRow::Reset => {}
    }
}

fn edit_salary(draft: &mut FilterDraft, row: PanelRow, edit: impl FnOnce(&mut String)) {
    match row {
        PanelRow::MinSalary => {
            let mut input = draft.min_salary_input.clone();
            edit(&mut input);
            draft.set_min_salary_input(input);
        }
        PanelRow::MaxSalary => {
            let mut input = draft.max_salary_input.clone();
            edit(&mut input);
            draft.set_max_salary_input(input);
        }
        _ => {}
    }
}

pub fn run_browse<S: JobSearch>(
    handle: &Handle,
    searcher: Arc<S>,
    session: Session,
    locations: Vec<String>,
) -> Result<()> {
    let mut state = AppState::new(session, locations);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, handle, searcher);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop<S: JobSearch>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    handle: &Handle,
    searcher: Arc<S>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut list_state = ListState::default();

    let initial = state.session.issue_search();
    dispatch(handle, searcher.clone(), initial, tx.clone());

    loop {
        while let Ok(completion) = rx.try_recv() {
            if state.session.complete(completion) {
                state.clamp();
            }
        }
        if let Some(request) = state.session.poll_debounce(Instant::now()) {
            state.selected = 0;
            dispatch(handle, searcher.clone(), request, tx.clone());
        }

        list_state.select(if state.session.jobs().is_empty() {
            None
        } else {
            Some(state.selected)
        });
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        let timeout = state
            .session
            .debounce_time_left(Instant::now())
            .map(|left| left.min(TICK))
            .unwrap_or(TICK);
        if !event::poll(timeout)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match state.handle_key(key, Instant::now()) {
                Action::Quit => break,
                Action::Search(request) => {
                    dispatch(handle, searcher.clone(), request, tx.clone())
                }
                Action::None => {}
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState) {
    let tags = state.session.filter_tags();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, state, chunks[0]);
    draw_tags(frame, state, &tags, chunks[1]);
    draw_list(frame, state, list_state, chunks[2]);

    let help = match (&state.overlay, state.focus) {
        (Overlay::Filters, _) => {
            " j/k:move  space:toggle  0-9:salary  a:apply  R:reset  esc:cancel"
        }
        (Overlay::Detail(_), _) => " j/k:scroll  esc:close",
        (Overlay::None, Focus::Search) => " type to search  enter:search now  esc:done",
        (Overlay::None, Focus::List) => {
            " /:search  j/k:navigate  enter:details  l/L:location  f:filters  s:sort  t/x:remove tag  C:clear all  r:retry  q:quit"
        }
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    match &state.overlay {
        Overlay::Detail(id) => {
            if let Some(job) = state.session.job(id) {
                draw_detail(frame, state, job);
            }
        }
        Overlay::Filters => {
            if let Some(draft) = state.session.draft() {
                draw_panel(frame, state, draft);
            }
        }
        Overlay::None => {}
    }
}

fn draw_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let search_style = if state.focus == Focus::Search && state.overlay == Overlay::None {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let query = if state.query_input.is_empty() && state.focus != Focus::Search {
        Span::styled("Search jobs...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.query_input.as_str())
    };
    frame.render_widget(
        Paragraph::new(Line::from(query)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        ),
        cols[0],
    );

    frame.render_widget(
        Paragraph::new(format!("< {} >", state.current_location()))
            .block(Block::default().borders(Borders::ALL).title(" Location ")),
        cols[1],
    );

    let count = state.session.filter_count();
    let filters = if count > 0 {
        format!("Filters ({})  Sort: {}", count, state.session.sort().label())
    } else {
        format!("Filters  Sort: {}", state.session.sort().label())
    };
    frame.render_widget(
        Paragraph::new(filters).block(Block::default().borders(Borders::ALL)),
        cols[2],
    );
}

fn draw_tags(frame: &mut Frame, state: &AppState, tags: &[FilterTag], area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, tag) in tags.iter().enumerate() {
        let style = if state.tag_cursor == Some(i) {
            Style::default().bg(Color::Red).fg(Color::White)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} x ", tag.label), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("Clear All (C)", Style::default().fg(Color::Cyan)));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Active filters ")),
        area,
    );
}

fn company_color(company: &str) -> Color {
    COMPANY_PALETTE[present::company_color(company)]
        .parse()
        .unwrap_or(Color::Cyan)
}

fn draw_list(frame: &mut Frame, state: &AppState, list_state: &mut ListState, area: Rect) {
    let jobs = state.session.jobs();
    let updated = state
        .session
        .last_updated()
        .map(|t| format!(" updated {} ", t.format("%H:%M:%S")))
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Jobs ({}) ", jobs.len()))
        .title_bottom(Line::from(updated).right_aligned());

    let message = match state.session.load_state() {
        LoadState::Loading => Some(("Loading jobs...", Color::Yellow)),
        LoadState::Failed => Some((ERROR_MESSAGE, Color::Red)),
        LoadState::Ready if jobs.is_empty() => Some((NO_JOBS_MESSAGE, Color::DarkGray)),
        LoadState::Ready => None,
    };
    if let Some((text, color)) = message {
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(color))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(40).max(20) as usize;
    let items: Vec<ListItem> = jobs
        .iter()
        .map(|job| {
            let mut spans = vec![
                Span::styled(
                    format!(" {} ", present::company_initial(&job.company)),
                    Style::default()
                        .bg(company_color(&job.company))
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    present::truncate(&job.title, width),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            let badge = present::employment_badge(&job.employment_type);
            if !badge.is_empty() {
                spans.push(Span::styled(
                    format!(" [{}]", badge),
                    Style::default().fg(Color::Green),
                ));
            }
            for skill in present::skill_tags(&job.title) {
                spans.push(Span::styled(
                    format!(" [{}]", skill),
                    Style::default().fg(Color::Magenta),
                ));
            }
            let detail = Line::from(vec![
                Span::raw("     "),
                Span::raw(format!("{} - {}", job.company, job.location)),
                Span::styled(
                    format!("  {}", present::list_salary(job)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("  {}", job.time_ago_posted),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(vec![Line::from(spans), detail])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, list_state);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (area.width as u32 * percent_x as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y as u32 / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_detail(frame: &mut Frame, state: &AppState, job: &JobRecord) {
    let area = centered(frame.area(), 80, 80);
    frame.render_widget(Clear, area);

    let detail = build_detail(job, area.width.saturating_sub(4) as usize);
    frame.render_widget(
        Paragraph::new(detail)
            .block(Block::default().borders(Borders::ALL).title(" Job details "))
            .wrap(Wrap { trim: false })
            .scroll((state.scroll_offset, 0)),
        area,
    );
}

fn build_detail(job: &JobRecord, width: usize) -> Text<'_> {
    let mut lines: Vec<Line> = Vec::new();
    let heading = Style::default().add_modifier(Modifier::BOLD);

    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", present::company_initial(&job.company)),
            Style::default()
                .bg(company_color(&job.company))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(job.title.as_str(), heading),
    ]));
    lines.push(Line::from(Span::styled(
        job.company.as_str(),
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(format!("Location: {}", job.location)));
    lines.push(Line::from(format!("Posted: {}", job.time_ago_posted)));
    lines.push(Line::from(format!("Type: {}", job.employment_type)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Job Description", heading)));
    for line in textwrap::fill(present::detail_description(job), width.max(20)).lines() {
        lines.push(Line::from(line.to_string()));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Salary Range", heading)));
    lines.push(Line::from(present::detail_salary(job)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Apply Now", heading)));
    if job.job_providers.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_PROVIDERS,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for provider in &job.job_providers {
            lines.push(Line::from(format!(
                "Apply on {}: {}",
                provider.job_provider, provider.url
            )));
        }
    }

    Text::from(lines)
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn radio(selected: bool) -> &'static str {
    if selected { "(*)" } else { "( )" }
}

fn panel_row_text(draft: &FilterDraft, row: PanelRow) -> String {
    let state = &draft.state;
    match row {
        PanelRow::Employment(t) => {
            format!("{} {}", checkbox(state.employment_types.contains(t)), t.label())
        }
        PanelRow::RemoteAny => format!("{} Any location", radio(!state.remote_only)),
        PanelRow::RemoteOnly => format!("{} Remote only", radio(state.remote_only)),
        PanelRow::AutoTranslate => format!(
            "{} Auto-translate location",
            checkbox(state.auto_translate_location)
        ),
        PanelRow::Experience(l) => {
            format!("{} {}", checkbox(state.experience_levels.contains(l)), l.label())
        }
        PanelRow::MinSalary => format!("Min salary: {}_", draft.min_salary_input),
        PanelRow::MaxSalary => format!("Max salary: {}_", draft.max_salary_input),
        PanelRow::Benefit(b) => format!("{} {}", checkbox(state.benefits.contains(b)), b.label()),
        PanelRow::Apply => "[ Apply filters ]".to_string(),
        PanelRow::Reset => "[ Reset ]".to_string(),
    }
}

fn panel_section(row: PanelRow) -> Option<&'static str> {
    match row {
        PanelRow::Employment(EmploymentType::FullTime) => Some("EMPLOYMENT TYPE"),
        PanelRow::RemoteAny => Some("REMOTE"),
        PanelRow::AutoTranslate => Some("LOCATION"),
        PanelRow::Experience(ExperienceLevel::Entry) => Some("EXPERIENCE LEVEL"),
        PanelRow::MinSalary => Some("SALARY RANGE"),
        PanelRow::Benefit(Benefit::HealthInsurance) => Some("BENEFITS"),
        PanelRow::Apply => Some(""),
        _ => None,
    }
}

fn draw_panel(frame: &mut Frame, state: &AppState, draft: &FilterDraft) {
    let full = frame.area();
    let width = (full.width / 3).max(36).min(full.width);
    let area = Rect {
        x: full.x + full.width - width,
        y: full.y,
        width,
        height: full.height,
    };
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in state.panel_rows.iter().enumerate() {
        if let Some(section) = panel_section(*row) {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            if !section.is_empty() {
                lines.push(Line::from(Span::styled(
                    section,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        let text = panel_row_text(draft, *row);
        let style = if i == state.panel_cursor {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {}", text), style)));
    }

    let count = draft.state.active_filter_count();
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Filters ({}) ", count)),
        ),
        area,
    );
}
