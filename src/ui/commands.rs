use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Instant;

use super::app::{App, ChartKind};
use crate::ledger::{SortKey, SortOrder, TypeFilter};
use crate::run::shellexpand;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("add", "Open the add-transaction form", cmd_add, r);
    register_command!("a", "Open the add-transaction form", cmd_add, r);
    register_command!(
        "search",
        "Search transactions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "filter",
        "Filter by type (e.g. :filter income)",
        cmd_filter,
        r
    );
    register_command!(
        "sort",
        "Sort list (e.g. :sort amount asc)",
        cmd_sort,
        r
    );
    register_command!(
        "chart",
        "Switch expense chart (e.g. :chart bar)",
        cmd_chart,
        r
    );
    register_command!("flip", "Flip the credit card", cmd_flip, r);
    register_command!("sidebar", "Collapse or expand the sidebar", cmd_sidebar, r);
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.open_form();
    Ok(())
}

fn cmd_search(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.set_search(args);
    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!(
            "Search '{args}': {} matches",
            app.transactions.len()
        ));
    }
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.cycle_type_filter();
        return Ok(());
    }
    match TypeFilter::parse(args) {
        Some(filter) => app.set_type_filter(filter),
        None => app.set_status(format!(
            "Unknown type '{args}'. Use all, income or expense"
        )),
    }
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let Some(key_arg) = parts.next() else {
        app.set_status("Usage: :sort <date|amount|category> [asc|desc]");
        return Ok(());
    };
    let Some(key) = SortKey::parse(key_arg) else {
        app.set_status(format!(
            "Unknown sort key '{key_arg}'. Use date, amount or category"
        ));
        return Ok(());
    };

    match parts.next() {
        None => app.sort_by(key),
        Some(order_arg) => match SortOrder::parse(order_arg) {
            Some(order) => app.set_sort(key, order),
            None => app.set_status(format!("Unknown order '{order_arg}'. Use asc or desc")),
        },
    }
    Ok(())
}

fn cmd_chart(args: &str, app: &mut App) -> anyhow::Result<()> {
    let chart = if args.is_empty() {
        app.chart.toggled()
    } else {
        match ChartKind::parse(args) {
            Some(chart) => chart,
            None => {
                app.set_status(format!("Unknown chart '{args}'. Use pie or bar"));
                return Ok(());
            }
        }
    };
    app.set_chart(chart);
    app.set_status(format!("{chart} chart"));
    Ok(())
}

fn cmd_flip(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.flip_card(Instant::now());
    Ok(())
}

fn cmd_sidebar(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.toggle_sidebar();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        shellexpand("~/expensetui-export.csv")
    } else {
        shellexpand(args)
    };

    let count = app.export(&path)?;
    if count == 0 {
        app.set_status("No transactions to export");
    } else {
        app.set_status(format!(
            "Exported {count} transactions to {}",
            path.display()
        ));
    }
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
