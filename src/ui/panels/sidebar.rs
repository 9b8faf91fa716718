use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, MenuItem};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let collapsed = app.sidebar.collapsed;

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme::OVERLAY))
        .style(Style::default().bg(theme::HEADER_BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Brand
            Constraint::Min(6),    // Menu
            Constraint::Length(3), // User
        ])
        .split(inner);

    let brand = if collapsed {
        Line::from(Span::styled(" $ ", brand_style()))
    } else {
        Line::from(vec![
            Span::styled(" $ ", brand_style()),
            Span::styled(
                "ExpenseTracker",
                Style::default()
                    .fg(theme::HEADER_FG)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    };
    f.render_widget(Paragraph::new(brand), chunks[0]);

    let menu: Vec<Line> = MenuItem::all()
        .iter()
        .map(|item| {
            let label = if collapsed {
                format!("  {}", item.icon())
            } else {
                format!("  {}  {item}", item.icon())
            };
            if *item == app.sidebar.active {
                let width = chunks[1].width as usize;
                Line::from(Span::styled(
                    format!("{label:<width$}"),
                    theme::selected_style().add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(label, theme::normal_style()))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(menu), chunks[1]);

    let user = if collapsed {
        vec![Line::from(Span::styled("  ☺", theme::normal_style()))]
    } else {
        let name_width = (chunks[2].width as usize).saturating_sub(5);
        vec![
            Line::from(vec![
                Span::styled("  ☺  ", theme::normal_style()),
                Span::styled(
                    truncate(&app.user, name_width),
                    Style::default()
                        .fg(theme::HEADER_FG)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled("     Premium User", theme::dim_style())),
            Line::from(Span::styled("  b collapse", theme::dim_style())),
        ]
    };
    f.render_widget(Paragraph::new(user), chunks[2]);
}

fn brand_style() -> Style {
    Style::default()
        .fg(theme::HEADER_BG)
        .bg(theme::ACCENT)
        .add_modifier(Modifier::BOLD)
}
