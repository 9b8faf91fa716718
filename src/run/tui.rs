use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::form::Field;
use crate::ledger::SortKey;
use crate::models::Transaction;
use crate::ui::app::{App, InputMode};
use crate::ui::commands;
use crate::ui::panels::credit_card;
use crate::ui::render;

/// Upper bound on how long the loop waits for input before advancing timers.
const TICK_RATE: Duration = Duration::from_millis(50);

pub(crate) fn as_tui(config: &Config, transactions: Vec<Transaction>) -> Result<()> {
    let mut app = App::new(config, transactions);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "dashboard exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let areas = render::layout(f.area(), app);
            app.visible_rows = areas.list_rows();
            app.card_area = credit_card::card_rect(areas.card, app.card.offset);
            render::render(f, app);
        })?;

        if event::poll(TICK_RATE)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(key, app, Instant::now());
                }
                Event::Mouse(mouse) => handle_mouse(mouse, app, Instant::now()),
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        app.running = false;
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, now),
        InputMode::Command => handle_command_input(key, app),
        InputMode::Search => handle_search_input(key, app),
        InputMode::Form => handle_form_input(key, app, now),
    }
}

pub(crate) fn handle_mouse(mouse: MouseEvent, app: &mut App, now: Instant) {
    if app.form.is_some() || app.show_help {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(now),
        _ => {}
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, now: Instant) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.goto_top(),
        KeyCode::Char('G') | KeyCode::End => app.goto_bottom(),
        KeyCode::Char('a') => app.open_form(),
        KeyCode::Char('t') => app.cycle_type_filter(),
        KeyCode::Char('1') => app.sort_by(SortKey::Date),
        KeyCode::Char('2') => app.sort_by(SortKey::Amount),
        KeyCode::Char('3') => app.sort_by(SortKey::Category),
        KeyCode::Char('c') => {
            app.set_chart(app.chart.toggled());
            app.set_status(format!("{} chart", app.chart));
        }
        KeyCode::Char('f') => app.flip_card(now),
        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Char('[') => app.step_menu(-1),
        KeyCode::Char(']') => app.step_menu(1),
        KeyCode::Esc => {
            if !app.query.search.is_empty() {
                app.set_search("");
                app.set_status("Search cleared");
            } else {
                app.set_status("");
            }
        }
        _ => {}
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            if let Err(e) = commands::handle_command(&input, app) {
                tracing::warn!(command = %input, error = %e, "command failed");
                app.set_status(format!("Error: {e:#}"));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_search_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_search("");
        }
        KeyCode::Backspace => {
            // Live search: filter as you type
            let mut search = app.query.search.clone();
            search.pop();
            app.set_search(&search);
        }
        KeyCode::Char(c) => {
            let search = format!("{}{c}", app.query.search);
            app.set_search(&search);
        }
        _ => {}
    }
}

fn handle_form_input(key: KeyEvent, app: &mut App, now: Instant) {
    let Some(form) = app.form.as_mut() else {
        app.input_mode = InputMode::Normal;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.close_form();
            return;
        }
        _ if !form.is_editing() => return,
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Enter => match form.focus {
            Field::Cancel => app.close_form(),
            _ => app.submit_form(now),
        },
        KeyCode::Left | KeyCode::Right => {
            let delta = if key.code == KeyCode::Left { -1 } else { 1 };
            match form.focus {
                Field::Type => form.set_type(form.draft.kind.toggled()),
                Field::Category => form.cycle_category(delta),
                _ => {}
            }
        }
        KeyCode::Char(' ') => match form.focus {
            Field::Type => form.set_type(form.draft.kind.toggled()),
            Field::Category => form.cycle_category(1),
            Field::Cancel => app.close_form(),
            Field::Submit => app.submit_form(now),
            Field::Amount | Field::Description => form.push_char(' '),
        },
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
