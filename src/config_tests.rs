#![allow(clippy::unwrap_used)]

use clap::Parser;
use rust_decimal_macros::dec;

use super::*;

#[test]
fn test_no_args_launches_tui() {
    let cli = Cli::try_parse_from(["expensetui"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.user, "Santhosh");
    assert!(cli.data.is_none());
}

#[test]
fn test_global_options_after_subcommand() {
    let cli =
        Cli::try_parse_from(["expensetui", "summary", "--user", "Asha", "--data", "x.csv"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Summary)));
    assert_eq!(cli.user, "Asha");
    assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
}

#[test]
fn test_list_defaults() {
    let cli = Cli::try_parse_from(["expensetui", "list"]).unwrap();
    let Some(Command::List {
        search,
        type_filter,
        sort,
        order,
    }) = cli.command
    else {
        panic!("expected list command");
    };
    assert_eq!(search, "");
    assert_eq!(type_filter, TypeFilter::All);
    assert_eq!(sort, SortKey::Date);
    assert_eq!(order, SortOrder::Desc);
}

#[test]
fn test_list_options() {
    let cli = Cli::try_parse_from([
        "expensetui",
        "list",
        "--search",
        "food",
        "--type",
        "expense",
        "--sort",
        "amount",
        "--order",
        "asc",
    ])
    .unwrap();
    let Some(Command::List {
        search,
        type_filter,
        sort,
        order,
    }) = cli.command
    else {
        panic!("expected list command");
    };
    assert_eq!(search, "food");
    assert_eq!(type_filter, TypeFilter::Expense);
    assert_eq!(sort, SortKey::Amount);
    assert_eq!(order, SortOrder::Asc);
}

#[test]
fn test_list_rejects_bad_sort() {
    assert!(Cli::try_parse_from(["expensetui", "list", "--sort", "size"]).is_err());
}

#[test]
fn test_export_requires_path() {
    assert!(Cli::try_parse_from(["expensetui", "export"]).is_err());
    let cli = Cli::try_parse_from(["expensetui", "export", "out.csv"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Export { .. })));
}

#[test]
fn test_config_uses_explicit_log_file() {
    let cli = Cli::try_parse_from(["expensetui", "--log-file", "/tmp/x.log", "--user", "Asha"])
        .unwrap();
    let config = Config::from_cli(&cli).unwrap();
    assert_eq!(config.log_file, PathBuf::from("/tmp/x.log"));
    assert_eq!(config.card.holder, "Asha");
}

#[test]
fn test_card_profile_defaults() {
    let card = CardProfile::for_holder("Santhosh");
    assert_eq!(card.last_four, "1234");
    assert_eq!(card.expires, "12/27");
    assert_eq!(card.available_credit, dec!(8750));
    assert_eq!(card.cashback, dec!(127.50));
}
