#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use crossterm::event::KeyEventState;
use ratatui::layout::Rect;
use rust_decimal_macros::dec;

use super::*;
use crate::config::CardProfile;
use crate::form::{CLOSE_DELAY, SUBMIT_DELAY};
use crate::ledger::{SortOrder, TypeFilter};
use crate::models::TransactionType;
use crate::ui::app::ChartKind;

fn test_app() -> App {
    let config = Config {
        user: "Santhosh".into(),
        card: CardProfile::for_holder("Santhosh"),
        data: None,
        log_file: PathBuf::from("expensetui.log"),
    };
    App::new(&config, crate::seed::mock_transactions())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(key(code), app, Instant::now());
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

// ── Normal mode ───────────────────────────────────────────────

#[test]
fn test_ctrl_q_and_ctrl_c_quit() {
    for c in ['q', 'c'] {
        let mut app = test_app();
        let ev = KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        handle_key(ev, &mut app, Instant::now());
        assert!(!app.running);
    }
}

#[test]
fn test_help_closes_on_any_key() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);
    press(&mut app, KeyCode::Char('j'));
    assert!(!app.show_help);
    assert_eq!(app.transaction_index, 0, "the closing key is swallowed");
}

#[test]
fn test_sort_keys_toggle() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.query.sort_key, SortKey::Amount);
    assert_eq!(app.query.order, SortOrder::Desc);
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.query.order, SortOrder::Asc);
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.query.sort_key, SortKey::Category);
    assert_eq!(app.query.order, SortOrder::Desc);
}

#[test]
fn test_widget_toggles() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.chart, ChartKind::Bar);
    press(&mut app, KeyCode::Char('f'));
    assert!(app.card.flipped);
    press(&mut app, KeyCode::Char('b'));
    assert!(app.sidebar.collapsed);
    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.query.type_filter, TypeFilter::Income);
}

#[test]
fn test_navigation_keys() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('G'));
    assert_eq!(app.transaction_index, 3);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.transaction_index, 2);
    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.transaction_index, 0);
}

// ── Search & command modes ────────────────────────────────────

#[test]
fn test_live_search_and_escape() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode, InputMode::Search);
    type_str(&mut app, "sal");
    assert_eq!(app.transactions.len(), 1);
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.query.search, "sa");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.query.search.is_empty());
    assert_eq!(app.transactions.len(), 4);
}

#[test]
fn test_search_enter_keeps_filter() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "gas");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.transactions.len(), 1);
}

#[test]
fn test_command_mode_runs_command() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char(':'));
    type_str(&mut app, "filter income");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.query.type_filter, TypeFilter::Income);
}

#[test]
fn test_failed_command_reports_in_status() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char(':'));
    type_str(&mut app, "export /nonexistent-dir/x/out.csv");
    press(&mut app, KeyCode::Enter);
    assert!(app.running);
    assert!(app.status_message.starts_with("Error:"));
}

// ── Form mode ─────────────────────────────────────────────────

#[test]
fn test_form_keyboard_flow() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.input_mode, InputMode::Form);

    // Type: switch to income.
    press(&mut app, KeyCode::Right);
    // Amount
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "300");
    // Category: first preset for income.
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right);
    // Description
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "Side project");

    {
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.draft.kind, TransactionType::Income);
        assert_eq!(form.draft.amount, "300");
        assert_eq!(form.draft.category, TransactionType::Income.categories()[0]);
        assert_eq!(form.draft.description, "Side project");
    }

    let t0 = Instant::now();
    handle_key(key(KeyCode::Enter), &mut app, t0);
    assert!(!app.form.as_ref().unwrap().is_editing());

    // Esc is ignored while submitting.
    press(&mut app, KeyCode::Esc);
    assert!(app.form.is_some());

    app.tick(t0 + SUBMIT_DELAY);
    assert_eq!(app.ledger.len(), 5);
    assert_eq!(app.ledger.transactions()[0].amount, dec!(300));
    app.tick(t0 + SUBMIT_DELAY + CLOSE_DELAY);
    assert!(app.form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_form_letters_do_not_trigger_shortcuts() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "c");
    assert_eq!(app.chart, ChartKind::Pie);
    assert_eq!(app.form.as_ref().unwrap().draft.amount, "c");
}

#[test]
fn test_form_cancel_button() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::BackTab); // Submit
    press(&mut app, KeyCode::BackTab); // Cancel
    press(&mut app, KeyCode::Enter);
    assert!(app.form.is_none());
    assert_eq!(app.ledger.len(), 4);
}

#[test]
fn test_form_invalid_submit_shows_errors() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Enter);
    let form = app.form.as_ref().unwrap();
    assert!(form.is_editing());
    assert!(!form.errors.is_empty());
}

// ── Mouse ─────────────────────────────────────────────────────

#[test]
fn test_mouse_click_flips_and_drag_moves() {
    let mut app = test_app();
    app.card_area = Rect::new(30, 10, 40, 9);
    let now = Instant::now();

    handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 40, 12), &mut app, now);
    handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40, 12), &mut app, now);
    assert!(app.card.flipped);

    handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 40, 12), &mut app, now);
    handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 43, 13), &mut app, now);
    handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 43, 13), &mut app, now);
    assert_eq!(app.card.offset, (3, 1));
    assert!(app.card.flipped, "dragging does not flip");
}

#[test]
fn test_mouse_ignored_while_form_open() {
    let mut app = test_app();
    app.card_area = Rect::new(30, 10, 40, 9);
    app.open_form();
    let now = Instant::now();
    handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 40, 12), &mut app, now);
    handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40, 12), &mut app, now);
    assert!(!app.card.flipped);
}
