#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::time::Instant;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use super::*;
use crate::config::{CardProfile, Config};
use crate::form::SUBMIT_DELAY;
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

fn draw(app: &App, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| render(f, app)).unwrap();
    terminal.backend().buffer().clone()
}

fn screen_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// ── Layout ────────────────────────────────────────────────────

#[test]
fn test_layout_regions_fit_and_stack() {
    let app = test_app();
    let area = Rect::new(0, 0, 140, 45);
    let areas = layout(area, &app);
    assert_eq!(areas.top_bar.height, 3);
    assert_eq!(areas.status_bar.y, 43);
    assert_eq!(areas.command_bar.y, 44);
    assert_eq!(areas.sidebar.width, 24);
    assert_eq!(areas.card.y, areas.chart.y);
    assert!(areas.transactions.y > areas.card.y);
    assert_eq!(areas.list_rows(), areas.transactions.height as usize - 3);
}

#[test]
fn test_collapsed_sidebar_is_narrow() {
    let mut app = test_app();
    app.toggle_sidebar();
    let areas = layout(Rect::new(0, 0, 140, 45), &app);
    assert_eq!(areas.sidebar.width, 7);
}

#[test]
fn test_centered_rect() {
    let r = centered_rect(Rect::new(0, 0, 100, 40), 20, 10);
    assert_eq!(r, Rect::new(40, 15, 20, 10));
    let r = centered_rect(Rect::new(0, 0, 10, 5), 20, 10);
    assert_eq!(r, Rect::new(0, 0, 10, 5));
}

// ── Full frames ───────────────────────────────────────────────

#[test]
fn test_dashboard_renders_core_text() {
    let app = test_app();
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("Welcome back, Santhosh!"));
    assert!(text.contains("ExpenseTracker"));
    assert!(text.contains("+$2,500.00"));
    assert!(text.contains("$250.80"));
    assert!(text.contains("+$2,249.20"));
    assert!(text.contains("Recent Transactions (4)"));
    assert!(text.contains("Lunch at restaurant"));
    assert!(text.contains("Jan 20, 2025"));
    assert!(text.contains("Expense Breakdown"));
}

#[test]
fn test_empty_list_message() {
    let mut app = test_app();
    app.set_search("zzz");
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("No transactions found"));
    assert!(text.contains("Try adjusting your search or filter criteria"));
}

#[test]
fn test_bar_chart_renders() {
    let mut app = test_app();
    app.set_chart(ChartKind::Bar);
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("Expense Breakdown"));
    assert!(text.contains("Shopping"));
}

#[test]
fn test_form_modal_and_success_state() {
    let mut app = test_app();
    app.open_form();
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("Add Transaction"));
    assert!(text.contains("0/100"));

    {
        let form = app.form.as_mut().unwrap();
        form.draft.amount = "12".into();
        form.draft.category = "Food".into();
        form.draft.description = "Snacks".into();
    }
    let t0 = Instant::now();
    app.submit_form(t0);
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("Adding..."));

    app.tick(t0 + SUBMIT_DELAY);
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("Transaction Added!"));
}

#[test]
fn test_validation_errors_render() {
    let mut app = test_app();
    app.open_form();
    app.submit_form(Instant::now());
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("Amount is required"));
    assert!(text.contains("Please select a category"));
    assert!(text.contains("Description is required"));
}

#[test]
fn test_help_overlay_lists_commands() {
    let mut app = test_app();
    app.show_help = true;
    let text = screen_text(&draw(&app, 150, 50));
    assert!(text.contains("ExpenseTUI Help"));
    assert!(text.contains(":export"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = test_app();
    app.open_form();
    draw(&app, 20, 8);
    app.flip_card(Instant::now());
    draw(&app, 1, 1);
}
