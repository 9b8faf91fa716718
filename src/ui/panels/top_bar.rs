use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, InputMode};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme::OVERLAY))
        .style(Style::default().bg(theme::HEADER_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(52)])
        .split(inner);

    let greeting = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Welcome back, {}!", app.user),
            Style::default()
                .fg(theme::HEADER_FG)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Here's what's happening with your money today.",
            theme::dim_style(),
        )),
    ]);
    f.render_widget(greeting, cols[0]);

    let searching = app.input_mode == InputMode::Search;
    let search = if app.query.search.is_empty() {
        Span::styled("/ Search transactions...", theme::dim_style())
    } else {
        Span::styled(
            format!("/ {}", truncate(&app.query.search, 22)),
            if searching {
                Style::default().fg(theme::YELLOW)
            } else {
                theme::normal_style()
            },
        )
    };

    let actions = Paragraph::new(Line::from(vec![
        search,
        Span::raw("  "),
        Span::styled("●", Style::default().fg(theme::RED)),
        Span::raw("  "),
        Span::styled(
            "[a] Add Transaction",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .right_aligned();
    f.render_widget(actions, cols[1]);
}
