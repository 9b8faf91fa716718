use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::form::{Field, FieldError, FormPhase, TransactionForm, DESCRIPTION_MAX};
use crate::models::TransactionType;
use crate::ui::render::centered_rect;
use crate::ui::theme;
use crate::ui::util::truncate;

const MODAL_WIDTH: u16 = 58;
const MODAL_HEIGHT: u16 = 19;

pub(crate) fn render(f: &mut Frame, area: Rect, form: &TransactionForm) {
    let popup = centered_rect(area, MODAL_WIDTH, MODAL_HEIGHT);
    f.render_widget(Clear, popup);

    let border = if form.errors.is_empty() {
        theme::ACCENT
    } else {
        theme::RED
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::HEADER_BG))
        .title(Span::styled(
            " Add Transaction ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(Span::styled(" Esc close ", theme::dim_style())).right_aligned(),
        );
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if matches!(form.phase, FormPhase::Submitted { .. }) {
        render_success(f, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Type
            Constraint::Length(3), // Amount
            Constraint::Length(3), // Category
            Constraint::Length(3), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let submitting = matches!(form.phase, FormPhase::Submitting { .. });

    render_type(f, rows[1], form);
    render_text_field(
        f,
        rows[2],
        form,
        Field::Amount,
        "Amount",
        &format!("$ {}", form.draft.amount),
        form.errors.amount,
        None,
    );

    let category = if form.draft.category.is_empty() {
        "< Select a category >".to_string()
    } else {
        format!("< {} >", form.draft.category)
    };
    render_text_field(
        f,
        rows[3],
        form,
        Field::Category,
        "Category",
        &category,
        form.errors.category,
        None,
    );

    let counter = format!(
        "{}/{DESCRIPTION_MAX}",
        form.draft.description.chars().count()
    );
    let width = rows[4].width.saturating_sub(2) as usize;
    render_text_field(
        f,
        rows[4],
        form,
        Field::Description,
        "Description",
        &tail(&form.draft.description, width),
        form.errors.description,
        Some(counter),
    );

    render_buttons(f, rows[6], form, submitting);
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    }
}

/// The last `width` characters of `s`, so the cursor end stays visible.
fn tail(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        s.to_string()
    } else {
        s.chars().skip(count - width).collect()
    }
}

fn render_type(f: &mut Frame, area: Rect, form: &TransactionForm) {
    let focused = form.focus == Field::Type;
    let option = |kind: TransactionType| {
        let selected = form.draft.kind == kind;
        let color = match kind {
            TransactionType::Expense => theme::RED,
            TransactionType::Income => theme::GREEN,
        };
        if selected {
            Span::styled(
                format!(" {kind} "),
                Style::default()
                    .fg(theme::HEADER_BG)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {kind} "), theme::dim_style())
        }
    };

    let lines = vec![
        Line::from(Span::styled(" Type", label_style(focused))),
        Line::from(vec![
            Span::raw(" "),
            option(TransactionType::Expense),
            Span::raw("  "),
            option(TransactionType::Income),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

#[allow(clippy::too_many_arguments)]
fn render_text_field(
    f: &mut Frame,
    area: Rect,
    form: &TransactionForm,
    field: Field,
    label: &str,
    value: &str,
    error: Option<FieldError>,
    counter: Option<String>,
) {
    let focused = form.focus == field;
    let mut label_line = vec![Span::styled(format!(" {label}"), label_style(focused))];
    if let Some(counter) = counter {
        let pad = (area.width as usize).saturating_sub(label.len() + 1 + counter.len() + 1);
        label_line.push(Span::raw(" ".repeat(pad)));
        label_line.push(Span::styled(counter, theme::dim_style()));
    }

    let value_style = if focused {
        Style::default().fg(theme::TEXT).bg(theme::SURFACE)
    } else {
        theme::normal_style()
    };
    let width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(label_line),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("{value:<width$}"), value_style),
        ]),
        match error {
            Some(err) => Line::from(Span::styled(format!(" {err}"), theme::error_style())),
            None => Line::from(""),
        },
    ];
    f.render_widget(Paragraph::new(lines), area);

    let typed = matches!(field, Field::Amount | Field::Description);
    if focused && typed && form.is_editing() {
        let x = area.x + 1 + value.chars().count().min(width) as u16;
        f.set_cursor_position((x, area.y + 1));
    }
}

fn render_buttons(f: &mut Frame, area: Rect, form: &TransactionForm, submitting: bool) {
    let button = |label: &str, field: Field| {
        let style = if form.focus == field {
            theme::selected_style().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT).bg(theme::OVERLAY)
        };
        Span::styled(format!(" {label} "), style)
    };

    let submit_label = if submitting {
        "Adding..."
    } else {
        "Add Transaction"
    };
    let line = Line::from(vec![
        button("Cancel", Field::Cancel),
        Span::raw("   "),
        button(submit_label, Field::Submit),
    ])
    .centered();
    f.render_widget(Paragraph::new(line), area);
}

fn render_success(f: &mut Frame, area: Rect) {
    let top = area.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        "✓",
        Style::default()
            .fg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Transaction Added!",
        Style::default()
            .fg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        truncate("Your dashboard has been updated", area.width as usize),
        theme::dim_style(),
    )));
    f.render_widget(Paragraph::new(lines).centered(), area);
}
