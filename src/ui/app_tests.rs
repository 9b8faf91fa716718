#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use rust_decimal_macros::dec;

use super::*;
use crate::form::{Field, CLOSE_DELAY, SUBMIT_DELAY};
use crate::models::TransactionType;
use crate::seed::mock_transactions;

fn test_app() -> App {
    let config = Config {
        user: "Santhosh".into(),
        card: CardProfile::for_holder("Santhosh"),
        data: None,
        log_file: PathBuf::from("expensetui.log"),
    };
    App::new(&config, mock_transactions())
}

fn ids(app: &App) -> Vec<u64> {
    app.transactions.iter().map(|t| t.id).collect()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn test_new_app_computes_dashboard() {
    let app = test_app();
    assert!(app.running);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.totals.balance, dec!(2249.20));
    assert_eq!(app.breakdown.categories.len(), 3);
    // Default query: date, newest first.
    assert_eq!(ids(&app), vec![1, 4, 3, 2]);
}

// ── List controls ─────────────────────────────────────────────

#[test]
fn test_sort_by_same_key_flips_direction() {
    let mut app = test_app();
    app.sort_by(SortKey::Date);
    assert_eq!(app.query.order, SortOrder::Asc);
    assert_eq!(ids(&app), vec![2, 3, 4, 1]);
}

#[test]
fn test_sort_by_new_key_starts_descending() {
    let mut app = test_app();
    app.sort_by(SortKey::Date); // now ascending
    app.sort_by(SortKey::Amount);
    assert_eq!(app.query.sort_key, SortKey::Amount);
    assert_eq!(app.query.order, SortOrder::Desc);
    assert_eq!(ids(&app), vec![2, 3, 4, 1]);
    assert!(app.status_message.contains("Amount"));
}

#[test]
fn test_search_resets_cursor_and_filters() {
    let mut app = test_app();
    app.move_down();
    app.move_down();
    app.set_search("FOOD");
    assert_eq!(ids(&app), vec![1]);
    assert_eq!(app.transaction_index, 0);
}

#[test]
fn test_cycle_type_filter() {
    let mut app = test_app();
    app.cycle_type_filter();
    assert_eq!(app.query.type_filter, TypeFilter::Income);
    assert_eq!(ids(&app), vec![2]);
    app.cycle_type_filter();
    assert_eq!(ids(&app), vec![1, 4, 3]);
    app.cycle_type_filter();
    assert_eq!(app.transactions.len(), 4);
}

#[test]
fn test_filter_to_nothing_clamps_cursor() {
    let mut app = test_app();
    app.goto_bottom();
    app.set_search("no such thing");
    assert!(app.transactions.is_empty());
    assert_eq!(app.transaction_index, 0);
    app.move_down();
    assert_eq!(app.transaction_index, 0);
}

// ── Sidebar ───────────────────────────────────────────────────

#[test]
fn test_menu_wraps() {
    let mut app = test_app();
    app.step_menu(-1);
    assert_eq!(app.sidebar.active, MenuItem::Settings);
    app.step_menu(1);
    assert_eq!(app.sidebar.active, MenuItem::Dashboard);
}

#[test]
fn test_toggle_sidebar() {
    let mut app = test_app();
    app.toggle_sidebar();
    assert!(app.sidebar.collapsed);
    app.toggle_sidebar();
    assert!(!app.sidebar.collapsed);
}

// ── Card ──────────────────────────────────────────────────────

#[test]
fn test_flip_animation_runs_then_settles() {
    let mut app = test_app();
    let t0 = Instant::now();
    app.flip_card(t0);
    assert!(app.card.flipped);
    assert_eq!(app.card.flip_progress, Some(0.0));

    app.tick(t0 + FLIP_DURATION / 2);
    let p = app.card.flip_progress.unwrap();
    assert!((p - 0.5).abs() < 0.01);

    app.tick(t0 + FLIP_DURATION);
    assert!(app.card.flip_progress.is_none());
    assert!(app.card.flipped);
}

#[test]
fn test_flip_frame_swaps_face_halfway() {
    let (w, back) = flip_frame(0.0, true);
    assert!((w - 1.0).abs() < 1e-9);
    assert!(!back);

    let (w, _) = flip_frame(0.5, true);
    assert!(w < 1e-9);

    let (w, back) = flip_frame(0.75, true);
    assert!(w > 0.0 && w < 1.0);
    assert!(back);

    let (_, back) = flip_frame(0.75, false);
    assert!(!back);
}

#[test]
fn test_drag_is_clamped() {
    let mut app = test_app();
    app.card_area = Rect::new(10, 5, 40, 10);
    app.mouse_down(20, 8);
    app.mouse_drag(40, 20);
    assert!(app.card.is_dragging());
    assert_eq!(app.card.offset, (DRAG_LIMIT_X, DRAG_LIMIT_Y));
    app.mouse_drag(0, 0);
    assert_eq!(app.card.offset, (-DRAG_LIMIT_X, -DRAG_LIMIT_Y));

    let now = Instant::now();
    app.mouse_up(now);
    assert!(!app.card.flipped, "a drag should not flip the card");
}

#[test]
fn test_click_on_card_flips() {
    let mut app = test_app();
    app.card_area = Rect::new(10, 5, 40, 10);
    app.mouse_down(20, 8);
    app.mouse_up(Instant::now());
    assert!(app.card.flipped);
}

#[test]
fn test_press_outside_card_is_ignored() {
    let mut app = test_app();
    app.card_area = Rect::new(10, 5, 40, 10);
    app.mouse_down(0, 0);
    app.mouse_drag(3, 3);
    assert_eq!(app.card.offset, (0, 0));
    app.mouse_up(Instant::now());
    assert!(!app.card.flipped);
}

// ── Add-transaction flow ──────────────────────────────────────

fn fill_form(app: &mut App, amount: &str, category: &str, description: &str) {
    let form = app.form.as_mut().unwrap();
    form.draft.amount = amount.into();
    form.draft.category = category.into();
    form.draft.description = description.into();
}

#[test]
fn test_add_flow_prepends_and_closes() {
    let mut app = test_app();
    app.open_form();
    assert_eq!(app.input_mode, InputMode::Form);
    fill_form(&mut app, "10.00", "Food", "Coffee beans");

    let t0 = Instant::now();
    app.submit_form(t0);
    app.tick(t0 + Duration::from_millis(10));
    assert_eq!(app.ledger.len(), 4, "nothing is added before the delay");

    let t1 = t0 + SUBMIT_DELAY;
    app.tick(t1);
    assert_eq!(app.ledger.len(), 5);
    let added = &app.ledger.transactions()[0];
    assert_eq!(added.id, 5);
    assert_eq!(added.amount, dec!(-10.00));
    assert_eq!(added.kind, TransactionType::Expense);
    assert_eq!(app.totals.expenses, dec!(260.80));
    assert!(app.form.is_some(), "success state stays visible");

    app.tick(t1 + CLOSE_DELAY);
    assert!(app.form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_invalid_submit_keeps_form_open() {
    let mut app = test_app();
    app.open_form();
    let t0 = Instant::now();
    app.submit_form(t0);
    app.tick(t0 + SUBMIT_DELAY);
    let form = app.form.as_ref().unwrap();
    assert!(form.is_editing());
    assert!(form.errors.amount.is_some());
    assert_eq!(app.ledger.len(), 4);
}

#[test]
fn test_close_form_ignored_while_submitting() {
    let mut app = test_app();
    app.open_form();
    fill_form(&mut app, "2500", "Salary", "Bonus pay");
    app.form.as_mut().unwrap().draft.kind = TransactionType::Income;
    app.submit_form(Instant::now());
    app.close_form();
    assert!(app.form.is_some());
}

#[test]
fn test_cancel_form() {
    let mut app = test_app();
    app.open_form();
    app.form.as_mut().unwrap().focus = Field::Cancel;
    app.close_form();
    assert!(app.form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_writes_all_transactions() {
    let mut app = test_app();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    assert_eq!(app.export(&path).unwrap(), 4);
    assert!(path.exists());
}
