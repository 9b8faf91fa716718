use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode, MenuItem};
use super::commands;
use super::panels;
use super::theme;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Areas {
    pub(crate) top_bar: Rect,
    pub(crate) sidebar: Rect,
    pub(crate) overview: Rect,
    pub(crate) card: Rect,
    pub(crate) chart: Rect,
    pub(crate) transactions: Rect,
    pub(crate) status_bar: Rect,
    pub(crate) command_bar: Rect,
}

impl Areas {
    /// Rows available for transaction rows (borders and header excluded).
    pub(crate) fn list_rows(&self) -> usize {
        (self.transactions.height.saturating_sub(3) as usize).max(1)
    }
}

pub(crate) fn layout(area: Rect, app: &App) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Top bar
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(area);

    let sidebar_width = if app.sidebar.collapsed { 7 } else { 24 };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(rows[1]);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Overview cards
            Constraint::Length(16), // Card | chart
            Constraint::Min(5),     // Transaction list
        ])
        .split(body[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content[1]);

    Areas {
        top_bar: rows[0],
        sidebar: body[0],
        overview: content[0],
        card: middle[0],
        chart: middle[1],
        transactions: content[2],
        status_bar: rows[2],
        command_bar: rows[3],
    }
}

pub(crate) fn render(f: &mut Frame, app: &App) {
    let areas = layout(f.area(), app);

    panels::top_bar::render(f, areas.top_bar, app);
    panels::sidebar::render(f, areas.sidebar, app);
    panels::overview::render(f, areas.overview, app);
    panels::credit_card::render(
        f,
        areas.card,
        app,
        app.sidebar.active == MenuItem::Cards,
    );
    panels::expense_chart::render(
        f,
        areas.chart,
        app,
        app.sidebar.active == MenuItem::Analytics,
    );
    panels::transactions::render(
        f,
        areas.transactions,
        app,
        app.sidebar.active == MenuItem::Transactions,
    );
    render_status_bar(f, areas.status_bar, app);
    render_command_bar(f, areas.command_bar, app);

    if let Some(form) = &app.form {
        panels::add_transaction::render(f, f.area(), form);
    }

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Search => theme::YELLOW,
        InputMode::Form => theme::GREEN,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} txns | {} | {} {}",
        app.sidebar.active,
        app.ledger.len(),
        app.query.type_filter,
        app.query.sort_key,
        app.query.order.arrow()
    );

    let right = match app.input_mode {
        InputMode::Form => " Tab next | ←/→ change | Enter add | Esc cancel ",
        _ => " a add | / search | c chart | f flip | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Search => {
            let match_info = if !app.query.search.is_empty() {
                format!("  ({} matches)", app.transactions.len())
            } else {
                String::new()
            };
            (
                Line::from(vec![
                    Span::styled("/", Style::default().fg(theme::YELLOW)),
                    Span::styled(&app.query.search, theme::command_bar_style()),
                    Span::styled(match_info, theme::dim_style()),
                ]),
                Some(1 + app.query.search.chars().count() as u16),
            )
        }
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, / to search, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Key bindings shown in the help overlay, grouped by heading.
const KEY_HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k, Up/Down", "Move cursor"),
            ("g/G", "Top/Bottom"),
            ("[ / ]", "Previous/Next menu item"),
            ("b", "Collapse sidebar"),
            ("Ctrl-q, Ctrl-c", "Quit"),
            ("?", "This help"),
        ],
    ),
    (
        "Actions",
        &[
            ("a", "Add transaction"),
            ("/", "Search (live)"),
            ("t", "Cycle type filter"),
            ("1/2/3", "Sort date/amount/category"),
            ("c", "Pie/Bar chart"),
            ("f, click", "Flip card"),
            ("drag", "Move card"),
            (":", "Command mode"),
        ],
    ),
];

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(theme::YELLOW)
        .add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            " ExpenseTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    // Key bindings two to a row.
    for (title, bindings) in KEY_HELP {
        lines.push(Line::from(Span::styled(format!(" {title}"), heading)));
        for pair in bindings.chunks(2) {
            let row: String = pair
                .iter()
                .map(|(keys, what)| format!("  {keys:<15}{what:<22}"))
                .collect();
            lines.push(Line::from(Span::styled(
                row.trim_end().to_string(),
                theme::normal_style(),
            )));
        }
        lines.push(Line::from(""));
    }

    // One line per command, aliases folded into their long name.
    lines.push(Line::from(Span::styled(" Commands", heading)));
    let mut names: Vec<&str> = commands::COMMANDS
        .keys()
        .copied()
        .filter(|name| name.len() > 1)
        .collect();
    names.sort_unstable();
    names.dedup_by_key(|name| commands::COMMANDS.get(*name).map(|c| c.description));
    for name in names {
        if let Some(cmd) = commands::COMMANDS.get(name) {
            lines.push(Line::from(Span::styled(
                format!("  :{name:<14} {}", cmd.description),
                theme::normal_style(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));
    lines
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let lines = help_lines();
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 76.min(area.width.saturating_sub(4));
    let popup = centered_rect(area, width, height);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}

/// A `width` x `height` rect centred in `area`.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
