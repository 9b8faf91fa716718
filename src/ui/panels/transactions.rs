use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ledger::{SortKey, TypeFilter};
use crate::ui::app::App;
use crate::ui::panels::panel_block;
use crate::ui::theme;
use crate::ui::util::{category_icon, format_date, format_signed, truncate};

fn title(app: &App) -> String {
    let mut title = format!("Recent Transactions ({})", app.transactions.len());
    if app.query.type_filter != TypeFilter::All {
        title.push_str(&format!(" [{}]", app.query.type_filter));
    }
    if !app.query.search.is_empty() {
        title.push_str(&format!(" search: '{}'", app.query.search));
    }
    title
}

/// Sort controls, with an arrow on the active key.
fn sort_indicator(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(" t: ", theme::dim_style())];
    spans.push(Span::styled(
        format!("{} ", app.query.type_filter),
        Style::default().fg(theme::YELLOW),
    ));
    for (i, key) in SortKey::all().iter().enumerate() {
        let label = if *key == app.query.sort_key {
            Span::styled(
                format!(" {}:{key}{} ", i + 1, app.query.order.arrow()),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {}:{key} ", i + 1), theme::dim_style())
        };
        spans.push(label);
    }
    Line::from(spans).right_aligned()
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, highlighted: bool) {
    let block = panel_block(&title(app), highlighted).title_top(sort_indicator(app));

    if app.transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions found",
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try adjusting your search or filter criteria",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["", "Description", "Category", "Date", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_cursor = i == app.transaction_index;

            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };

            let style = if is_cursor && highlighted {
                theme::selected_style()
            } else if is_cursor {
                Style::default()
                    .fg(theme::TEXT)
                    .bg(theme::OVERLAY)
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!(" {}", category_icon(&txn.category))),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 16)),
                Cell::from(format_date(txn.date)),
                Cell::from(Span::styled(
                    format_signed(txn.amount, txn.is_income()),
                    amount_style,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(13),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
