pub(crate) mod add_transaction;
pub(crate) mod credit_card;
pub(crate) mod expense_chart;
pub(crate) mod overview;
pub(crate) mod sidebar;
pub(crate) mod top_bar;
pub(crate) mod transactions;

use ratatui::{
    style::Modifier,
    text::Span,
    widgets::{Block, Borders},
};

use crate::ui::theme;

/// Bordered panel with the usual dim title; `highlighted` panels get the accent border.
pub(crate) fn panel_block(title: &str, highlighted: bool) -> Block<'static> {
    let title_style = if highlighted {
        theme::title_style().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
    } else {
        theme::title_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(highlighted))
        .title(Span::styled(format!(" {title} "), title_style))
}
