use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::panels::panel_block;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_signed};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = &app.totals;
    let income_count = app.ledger.transactions().iter().filter(|t| t.is_income()).count();
    let expense_count = app.ledger.transactions().len() - income_count;

    render_card(
        f,
        cards[0],
        "Total Income",
        format_signed(totals.income, true),
        theme::GREEN,
        totals.income_share(),
        format!("{income_count} txns · share of flow"),
    );
    render_card(
        f,
        cards[1],
        "Total Expenses",
        format_amount(totals.expenses),
        theme::RED,
        totals.expense_share(),
        format!("{expense_count} txns · share of flow"),
    );

    let positive = totals.balance >= Decimal::ZERO;
    render_card(
        f,
        cards[2],
        "Balance",
        format_signed(totals.balance, positive),
        if positive { theme::ACCENT } else { theme::RED },
        totals.savings_rate(),
        "savings rate".to_string(),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: Color,
    ratio: f64,
    caption: String,
) {
    let block = panel_block(title, false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Caption
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let amount = Paragraph::new(Line::from(Span::styled(
        display,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .centered();
    f.render_widget(amount, rows[0]);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(caption, theme::dim_style()))).centered(),
        rows[1],
    );

    let ratio = ratio.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(theme::SURFACE))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, rows[2]);
}
