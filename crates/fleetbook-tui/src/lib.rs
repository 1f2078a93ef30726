// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use fleetbook_app::{
    DraftField, INVALID_LOGIN_MESSAGE, PendingDelete, Record, RecordDraft, SortDirection, SortKey,
    TableCommand, TableEngine, TableEvent, Variation,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const SORT_MARK_ASC: &str = "▲";
const SORT_MARK_DESC: &str = "▼";
const CHECK_ON: &str = "[x]";
const CHECK_OFF: &str = "[ ]";

/// What the runtime handed back on load. `recovered` means the stored rows
/// were unreadable and the table starts empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowsSnapshot {
    pub records: Vec<Record>,
    pub recovered: bool,
}

/// Storage and credential seam between the TUI and whatever backs it. The
/// binary wires this to the on-disk store; tests use an in-memory fake.
pub trait AppRuntime {
    fn load_rows(&mut self) -> Result<RowsSnapshot>;
    fn save_rows(&mut self, records: &[Record]) -> Result<()>;
    fn login_flag(&mut self) -> Result<bool>;
    fn set_login_flag(&mut self, logged_in: bool) -> Result<()>;
    fn check_credentials(&mut self, username: &str, password: &str) -> bool;
    fn search_debounce(&self) -> Duration {
        Duration::from_millis(300)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    SearchElapsed { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Screen {
    #[default]
    Login,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Nav,
    Search,
    AddForm,
    EditForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LoginUiState {
    username: String,
    password: String,
    field: LoginField,
    error: Option<String>,
}

/// Form cursor positions, in display order. Variation sits between phone
/// and plate because that is the on-screen column order.
const FORM_SLOTS: usize = 6;
const FORM_VARIATION_SLOT: usize = 3;

fn form_field_at(slot: usize) -> Option<DraftField> {
    match slot {
        0 => Some(DraftField::Name),
        1 => Some(DraftField::Email),
        2 => Some(DraftField::Phone),
        4 => Some(DraftField::PlateNo),
        5 => Some(DraftField::Color),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    screen: Screen,
    mode: InputMode,
    login: LoginUiState,
    cursor_row: usize,
    selected_col: usize,
    form_slot: usize,
    status: Option<String>,
    status_token: u64,
    help_visible: bool,
}

pub fn run_app<R: AppRuntime>(engine: &mut TableEngine, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    match runtime.login_flag() {
        Ok(true) => {
            view_data.screen = Screen::Table;
            if let Err(error) = hydrate_from_runtime(engine, runtime, &mut view_data, &internal_tx)
            {
                emit_status(&mut view_data, &internal_tx, format!("load failed: {error:#}"));
            }
        }
        Ok(false) => {}
        Err(error) => {
            emit_status(&mut view_data, &internal_tx, format!("load failed: {error:#}"));
        }
    }

    let mut result = Ok(());
    loop {
        process_internal_events(engine, runtime, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, engine, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(engine, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn hydrate_from_runtime<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) -> Result<()> {
    let snapshot = runtime.load_rows()?;
    engine.dispatch(TableCommand::Hydrate(snapshot.records));
    if snapshot.recovered {
        emit_status(
            view_data,
            internal_tx,
            "stored data was unreadable; starting with an empty table",
        );
    }
    Ok(())
}

fn process_internal_events<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status = None;
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::SearchElapsed { token } => {
                let events = engine.dispatch(TableCommand::ApplyDebouncedSearch { token });
                apply_engine_events(engine, runtime, view_data, tx, events);
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn schedule_search_apply(internal_tx: &Sender<InternalEvent>, token: u64, delay: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(InternalEvent::SearchElapsed { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Routes engine events back into the UI: persistence on row changes, the
/// debounce timer on search keystrokes, and mode transitions on form
/// outcomes. A failed save is surfaced on the status line and the session
/// keeps going with the in-memory rows.
fn apply_engine_events<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: Vec<TableEvent>,
) {
    for event in events {
        match event {
            TableEvent::RowsChanged => {
                if let Err(error) = runtime.save_rows(engine.records()) {
                    emit_status(view_data, internal_tx, format!("save failed: {error:#}"));
                }
            }
            TableEvent::SearchScheduled { token } => {
                schedule_search_apply(internal_tx, token, runtime.search_debounce());
            }
            TableEvent::DraftRejected(message) => {
                emit_status(view_data, internal_tx, message);
            }
            TableEvent::DraftCommitted(id) => {
                view_data.mode = InputMode::Nav;
                view_data.form_slot = 0;
                emit_status(view_data, internal_tx, format!("added record {}", id.get()));
            }
            TableEvent::EditOpened(_) => {
                view_data.mode = InputMode::EditForm;
                view_data.form_slot = 0;
            }
            TableEvent::EditCommitted(id) => {
                view_data.mode = InputMode::Nav;
                view_data.form_slot = 0;
                emit_status(view_data, internal_tx, format!("updated record {}", id.get()));
            }
            TableEvent::Hydrated
            | TableEvent::SelectionChanged
            | TableEvent::ViewChanged
            | TableEvent::PendingDeleteChanged(_) => {}
        }
    }
    clamp_cursor(engine, view_data);
}

fn clamp_cursor(engine: &TableEngine, view_data: &mut ViewData) {
    let visible = engine.visible_rows().len();
    if visible == 0 {
        view_data.cursor_row = 0;
    } else if view_data.cursor_row >= visible {
        view_data.cursor_row = visible - 1;
    }
}

fn cursor_record_id(engine: &TableEngine, view_data: &ViewData) -> Option<fleetbook_app::RecordId> {
    engine
        .visible_rows()
        .get(view_data.cursor_row)
        .map(|record| record.id)
}

fn handle_key_event<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    match view_data.screen {
        Screen::Login => handle_login_key(engine, runtime, view_data, internal_tx, key),
        Screen::Table => handle_table_key(engine, runtime, view_data, internal_tx, key),
    }
}

fn handle_login_key<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            view_data.login.field = match view_data.login.field {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
        }
        KeyCode::Backspace => {
            let field = active_login_field(view_data);
            field.pop();
        }
        KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            active_login_field(view_data).push(character);
        }
        KeyCode::Enter => {
            let username = view_data.login.username.clone();
            let password = view_data.login.password.clone();
            if runtime.check_credentials(&username, &password) {
                view_data.login.error = None;
                if let Err(error) = runtime.set_login_flag(true) {
                    emit_status(view_data, internal_tx, format!("save failed: {error:#}"));
                }
                view_data.screen = Screen::Table;
                if !engine.is_hydrated()
                    && let Err(error) =
                        hydrate_from_runtime(engine, runtime, view_data, internal_tx)
                {
                    emit_status(view_data, internal_tx, format!("load failed: {error:#}"));
                }
            } else {
                view_data.login.error = Some(INVALID_LOGIN_MESSAGE.to_owned());
            }
        }
        _ => {}
    }
    false
}

fn active_login_field(view_data: &mut ViewData) -> &mut String {
    match view_data.login.field {
        LoginField::Username => &mut view_data.login.username,
        LoginField::Password => &mut view_data.login.password,
    }
}

fn handle_table_key<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    // The confirmation gate swallows every key until resolved.
    if engine.pending_delete() != PendingDelete::Idle {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let events = engine.dispatch(TableCommand::ConfirmPending);
                // A failed save overwrites this with its own status below.
                emit_status(view_data, internal_tx, "deleted");
                apply_engine_events(engine, runtime, view_data, internal_tx, events);
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                let events = engine.dispatch(TableCommand::CancelPending);
                apply_engine_events(engine, runtime, view_data, internal_tx, events);
            }
            _ => {}
        }
        return false;
    }

    match view_data.mode {
        InputMode::Nav => handle_nav_key(engine, runtime, view_data, internal_tx, key),
        InputMode::Search => handle_search_key(engine, runtime, view_data, internal_tx, key),
        InputMode::AddForm | InputMode::EditForm => {
            handle_form_key(engine, runtime, view_data, internal_tx, key)
        }
    }
}

fn handle_nav_key<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('x') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if let Err(error) = runtime.set_login_flag(false) {
            emit_status(view_data, internal_tx, format!("save failed: {error:#}"));
        }
        view_data.screen = Screen::Login;
        view_data.login = LoginUiState::default();
        view_data.mode = InputMode::Nav;
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.cursor_row = view_data.cursor_row.saturating_add(1);
            clamp_cursor(engine, view_data);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.cursor_row = view_data.cursor_row.saturating_sub(1);
        }
        KeyCode::Left | KeyCode::Char('h') => {
            view_data.selected_col =
                (view_data.selected_col + SortKey::ALL.len() - 1) % SortKey::ALL.len();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            view_data.selected_col = (view_data.selected_col + 1) % SortKey::ALL.len();
        }
        KeyCode::Char('s') => {
            let key = SortKey::ALL[view_data.selected_col];
            let events = engine.dispatch(TableCommand::ToggleSort(key));
            apply_engine_events(engine, runtime, view_data, internal_tx, events);
        }
        KeyCode::Char('/') => view_data.mode = InputMode::Search,
        KeyCode::Char('v') => {
            let next = engine.filter_variation().next();
            let events = engine.dispatch(TableCommand::SetVariationFilter(next));
            apply_engine_events(engine, runtime, view_data, internal_tx, events);
        }
        KeyCode::Char(' ') => {
            if let Some(id) = cursor_record_id(engine, view_data) {
                let events = engine.dispatch(TableCommand::ToggleSelect(id));
                apply_engine_events(engine, runtime, view_data, internal_tx, events);
            }
        }
        KeyCode::Char('a') => {
            let events = engine.dispatch(TableCommand::ToggleSelectAll);
            apply_engine_events(engine, runtime, view_data, internal_tx, events);
        }
        KeyCode::Char('n') => {
            view_data.mode = InputMode::AddForm;
            view_data.form_slot = 0;
        }
        KeyCode::Char('e') => {
            if let Some(id) = cursor_record_id(engine, view_data) {
                let events = engine.dispatch(TableCommand::OpenEdit(id));
                apply_engine_events(engine, runtime, view_data, internal_tx, events);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = cursor_record_id(engine, view_data) {
                let events = engine.dispatch(TableCommand::RequestDelete(id));
                apply_engine_events(engine, runtime, view_data, internal_tx, events);
            }
        }
        KeyCode::Char('D') => {
            let events = engine.dispatch(TableCommand::RequestBulkDelete);
            if events.is_empty() {
                emit_status(view_data, internal_tx, "no rows selected");
            } else {
                apply_engine_events(engine, runtime, view_data, internal_tx, events);
            }
        }
        _ => {}
    }
    false
}

fn handle_search_key<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => view_data.mode = InputMode::Nav,
        KeyCode::Backspace => {
            let mut term = engine.search_term().to_owned();
            term.pop();
            let events = engine.dispatch(TableCommand::SetSearchTerm(term));
            apply_engine_events(engine, runtime, view_data, internal_tx, events);
        }
        KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut term = engine.search_term().to_owned();
            term.push(character);
            let events = engine.dispatch(TableCommand::SetSearchTerm(term));
            apply_engine_events(engine, runtime, view_data, internal_tx, events);
        }
        _ => {}
    }
    false
}

fn handle_form_key<R: AppRuntime>(
    engine: &mut TableEngine,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let editing = view_data.mode == InputMode::EditForm;

    match key.code {
        KeyCode::Esc => {
            if editing {
                engine.dispatch(TableCommand::CancelEdit);
            }
            view_data.mode = InputMode::Nav;
            view_data.form_slot = 0;
        }
        KeyCode::Tab | KeyCode::Down => {
            view_data.form_slot = (view_data.form_slot + 1) % FORM_SLOTS;
        }
        KeyCode::BackTab | KeyCode::Up => {
            view_data.form_slot = (view_data.form_slot + FORM_SLOTS - 1) % FORM_SLOTS;
        }
        KeyCode::Enter => {
            let command = if editing {
                TableCommand::SubmitEdit
            } else {
                TableCommand::SubmitDraft
            };
            let events = engine.dispatch(command);
            if editing && events.is_empty() {
                view_data.mode = InputMode::Nav;
            }
            apply_engine_events(engine, runtime, view_data, internal_tx, events);
        }
        KeyCode::Left | KeyCode::Right if view_data.form_slot == FORM_VARIATION_SLOT => {
            let step = if key.code == KeyCode::Right { 1 } else { Variation::ALL.len() - 1 };
            if let Some(draft) = active_draft_mut(engine, editing) {
                let position = Variation::ALL
                    .iter()
                    .position(|variation| *variation == draft.variation)
                    .unwrap_or(0);
                draft.variation = Variation::ALL[(position + step) % Variation::ALL.len()];
            }
        }
        KeyCode::Char(digit @ '1'..='8') if view_data.form_slot == FORM_VARIATION_SLOT => {
            let index = digit as usize - '1' as usize;
            if let (Some(variation), Some(draft)) =
                (Variation::ALL.get(index).copied(), active_draft_mut(engine, editing))
            {
                draft.variation = variation;
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = form_field_at(view_data.form_slot)
                && let Some(draft) = active_draft_mut(engine, editing)
            {
                draft.field_mut(field).pop();
            }
        }
        KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(field) = form_field_at(view_data.form_slot)
                && let Some(draft) = active_draft_mut(engine, editing)
            {
                draft.field_mut(field).push(character);
            }
        }
        _ => {}
    }
    false
}

fn active_draft_mut(engine: &mut TableEngine, editing: bool) -> Option<&mut RecordDraft> {
    if editing {
        engine.editing_draft_mut()
    } else {
        Some(engine.draft_mut())
    }
}

fn render(frame: &mut ratatui::Frame<'_>, engine: &TableEngine, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(engine, view_data))
        .block(Block::default().title("fleetbook").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    match view_data.screen {
        Screen::Login => render_login(frame, layout[1], view_data),
        Screen::Table => render_table(frame, layout[1], engine, view_data),
    }

    let status = Paragraph::new(status_text(engine, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if view_data.screen == Screen::Table {
        if engine.pending_delete() != PendingDelete::Idle {
            let area = centered_rect(48, 22, frame.area());
            frame.render_widget(Clear, area);
            let confirm = Paragraph::new(confirm_overlay_text(engine)).block(
                Block::default()
                    .title("confirm")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Red)),
            );
            frame.render_widget(confirm, area);
        }

        if matches!(view_data.mode, InputMode::AddForm | InputMode::EditForm) {
            let area = centered_rect(60, 58, frame.area());
            frame.render_widget(Clear, area);
            let (title, draft) = match engine.editing() {
                Some((id, draft)) if view_data.mode == InputMode::EditForm => {
                    (format!("edit record {}", id.get()), draft.clone())
                }
                _ => ("add record".to_owned(), engine.draft().clone()),
            };
            let form = Paragraph::new(form_overlay_text(&draft, view_data.form_slot))
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(form, area);
        }
    }

    if view_data.help_visible {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_login(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let login_area = centered_rect(50, 40, area);
    let masked: String = "*".repeat(view_data.login.password.chars().count());
    let mark = |field: LoginField| {
        if view_data.login.field == field {
            "> "
        } else {
            "  "
        }
    };

    let mut lines = vec![
        format!("{}username: {}", mark(LoginField::Username), view_data.login.username),
        format!("{}password: {}", mark(LoginField::Password), masked),
        String::new(),
        "enter to sign in".to_owned(),
    ];
    if let Some(error) = &view_data.login.error {
        lines.push(String::new());
        lines.push(error.clone());
    }

    let login = Paragraph::new(lines.join("\n")).block(
        Block::default()
            .title("sign in")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(login, login_area);
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    engine: &TableEngine,
    view_data: &ViewData,
) {
    let visible = engine.visible_rows();

    let select_all_mark = if engine.all_visible_selected() {
        CHECK_ON
    } else {
        CHECK_OFF
    };
    let mut header_cells = vec![Cell::from(select_all_mark)];
    for (index, key) in SortKey::ALL.iter().enumerate() {
        let mut label = key.label().to_owned();
        if engine.sort_by() == Some(*key) {
            label.push(' ');
            label.push_str(match engine.sort_dir() {
                SortDirection::Asc => SORT_MARK_ASC,
                SortDirection::Desc => SORT_MARK_DESC,
            });
        }
        let mut style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if index == view_data.selected_col {
            style = style.fg(Color::Cyan);
        }
        header_cells.push(Cell::from(label).style(style));
    }
    let header = Row::new(header_cells);

    let rows = visible.iter().enumerate().map(|(row_index, record)| {
        let selected_row = row_index == view_data.cursor_row;
        let check = if engine.is_selected(record.id) {
            CHECK_ON
        } else {
            CHECK_OFF
        };

        let mut cells = vec![check.to_owned()];
        cells.extend(SortKey::ALL.iter().map(|key| record.field_text(*key)));

        let style = if selected_row {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(cells.into_iter().map(Cell::from)).style(style)
    });

    let mut widths = vec![Constraint::Length(3)];
    widths.extend(std::iter::repeat_n(Constraint::Min(8), SortKey::ALL.len()));

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title("owners").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn header_text(engine: &TableEngine, view_data: &ViewData) -> String {
    if view_data.screen == Screen::Login {
        return "vehicle owner records".to_owned();
    }

    let search = if view_data.mode == InputMode::Search {
        format!("search: {}_", engine.search_term())
    } else if engine.debounced_search().is_empty() {
        "search: (none)".to_owned()
    } else {
        format!("search: {}", engine.debounced_search())
    };
    format!(
        "{search} | variation: {} | ? for help",
        engine.filter_variation().label()
    )
}

fn status_text(engine: &TableEngine, view_data: &ViewData) -> String {
    if let Some(status) = &view_data.status {
        return status.clone();
    }
    if view_data.screen == Screen::Login {
        return String::new();
    }

    let visible = engine.visible_rows().len();
    let total = engine.records().len();
    let selected = engine.selected().len();
    let sort = match engine.sort_by() {
        Some(key) => format!(
            "{} {}",
            key.label(),
            match engine.sort_dir() {
                SortDirection::Asc => SORT_MARK_ASC,
                SortDirection::Desc => SORT_MARK_DESC,
            }
        ),
        None => "none".to_owned(),
    };
    format!("{visible} of {total} rows | selected: {selected} | sort: {sort}")
}

fn confirm_overlay_text(engine: &TableEngine) -> String {
    let question = match engine.pending_delete() {
        PendingDelete::Single(id) => format!("delete record {}?", id.get()),
        PendingDelete::Bulk => format!("delete {} selected records?", engine.selected().len()),
        PendingDelete::Idle => String::new(),
    };
    format!("{question}\n\ny = delete, n = keep")
}

fn form_overlay_text(draft: &RecordDraft, form_slot: usize) -> String {
    let mark = |slot: usize| if slot == form_slot { "> " } else { "  " };
    [
        format!("{}name: {}", mark(0), draft.name),
        format!("{}email: {}", mark(1), draft.email),
        format!("{}phone: {}", mark(2), draft.phone),
        format!(
            "{}variation: {} (left/right or 1-7)",
            mark(FORM_VARIATION_SLOT),
            draft.variation.as_str()
        ),
        format!("{}plate no: {}", mark(4), draft.plate_no),
        format!("{}color: {}", mark(5), draft.color),
        String::new(),
        "enter to save, esc to close".to_owned(),
    ]
    .join("\n")
}

fn help_overlay_text() -> String {
    [
        "arrows/hjkl  move cursor and column",
        "s            sort by the highlighted column",
        "/            search (esc or enter to leave)",
        "v            cycle the variation filter",
        "space        select row",
        "a            select/clear every visible row",
        "n            add a record",
        "e            edit the highlighted record",
        "d            delete the highlighted record",
        "D            delete all selected records",
        "ctrl-x       log out",
        "q / ctrl-q   quit",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
