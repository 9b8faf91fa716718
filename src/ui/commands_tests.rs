#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use super::*;
use crate::config::{CardProfile, Config};
use crate::ui::app::InputMode;

fn test_app() -> App {
    let config = Config {
        user: "Santhosh".into(),
        card: CardProfile::for_holder("Santhosh"),
        data: None,
        log_file: PathBuf::from("expensetui.log"),
    };
    App::new(&config, crate::seed::mock_transactions())
}

#[test]
fn test_quit() {
    let mut app = test_app();
    handle_command("q", &mut app).unwrap();
    assert!(!app.running);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let mut app = test_app();
    handle_command("exprot out.csv", &mut app).unwrap();
    assert!(app.running);
    assert!(
        app.status_message.contains(":export"),
        "got: {}",
        app.status_message
    );
}

#[test]
fn test_add_opens_form() {
    let mut app = test_app();
    handle_command("add", &mut app).unwrap();
    assert_eq!(app.input_mode, InputMode::Form);
    assert!(app.form.is_some());
}

#[test]
fn test_search_and_clear() {
    let mut app = test_app();
    handle_command("search gas", &mut app).unwrap();
    assert_eq!(app.transactions.len(), 1);
    assert!(app.status_message.contains("1 matches"));
    handle_command("s", &mut app).unwrap();
    assert_eq!(app.transactions.len(), 4);
}

#[test]
fn test_filter_by_name_and_cycle() {
    let mut app = test_app();
    handle_command("filter expenses", &mut app).unwrap();
    assert_eq!(app.query.type_filter, TypeFilter::Expense);
    handle_command("filter", &mut app).unwrap();
    assert_eq!(app.query.type_filter, TypeFilter::All);
    handle_command("filter bogus", &mut app).unwrap();
    assert!(app.status_message.contains("Unknown type"));
}

#[test]
fn test_sort_with_and_without_order() {
    let mut app = test_app();
    handle_command("sort amount asc", &mut app).unwrap();
    assert_eq!(app.query.sort_key, SortKey::Amount);
    assert_eq!(app.query.order, SortOrder::Asc);
    assert_eq!(app.transactions[0].id, 1);

    handle_command("sort amount", &mut app).unwrap();
    assert_eq!(app.query.order, SortOrder::Desc);

    handle_command("sort", &mut app).unwrap();
    assert!(app.status_message.starts_with("Usage"));
}

#[test]
fn test_chart_toggle_and_explicit() {
    let mut app = test_app();
    handle_command("chart", &mut app).unwrap();
    assert_eq!(app.chart, ChartKind::Bar);
    handle_command("chart pie", &mut app).unwrap();
    assert_eq!(app.chart, ChartKind::Pie);
    handle_command("chart donut", &mut app).unwrap();
    assert_eq!(app.chart, ChartKind::Pie);
}

#[test]
fn test_flip_and_sidebar() {
    let mut app = test_app();
    handle_command("flip", &mut app).unwrap();
    assert!(app.card.flipped);
    handle_command("sidebar", &mut app).unwrap();
    assert!(app.sidebar.collapsed);
}

#[test]
fn test_export_to_path() {
    let mut app = test_app();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    handle_command(&format!("export {}", path.display()), &mut app).unwrap();
    assert!(path.exists());
    assert!(app.status_message.contains("Exported 4"));
}

#[test]
fn test_help() {
    let mut app = test_app();
    handle_command("h", &mut app).unwrap();
    assert!(app.show_help);
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("sort", "sort"), 0);
    assert_eq!(levenshtein("srot", "sort"), 2);
    assert_eq!(levenshtein("", "flip"), 4);
}
