use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Bar, BarChart, BarGroup, Paragraph, Wrap,
    },
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::ledger::ExpenseBreakdown;
use crate::ui::app::{App, ChartKind};
use crate::ui::panels::panel_block;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

/// Slices smaller than this fraction get no label.
const LABEL_MIN_FRACTION: f64 = 0.05;
const LEGEND_WIDTH: u16 = 30;
/// Pie samples per axis when filling the disc.
const PIE_RESOLUTION: usize = 160;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, highlighted: bool) {
    let breakdown = &app.breakdown;
    let block = panel_block("Expense Breakdown", highlighted).title_top(
        Line::from(Span::styled(
            format!(" c: {} ", app.chart.toggled()),
            Style::default().fg(theme::ACCENT),
        ))
        .right_aligned(),
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    if breakdown.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add a transaction",
                theme::dim_style(),
            )),
        ])
        .centered();
        f.render_widget(msg, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Total
            Constraint::Min(4),    // Chart + legend
            Constraint::Length(2), // Insight
        ])
        .split(inner);

    let total = Paragraph::new(Line::from(vec![
        Span::styled("Total: ", theme::dim_style()),
        Span::styled(
            format_amount(breakdown.total),
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(total, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(LEGEND_WIDTH)])
        .split(rows[1]);

    match app.chart {
        ChartKind::Pie => render_pie(f, body[0], breakdown),
        ChartKind::Bar => render_bars(f, body[0], breakdown),
    }
    render_legend(f, body[1], breakdown);

    if let Some(insight) = breakdown.insight() {
        let insight = Paragraph::new(Line::from(vec![
            Span::styled("↗ ", Style::default().fg(theme::ACCENT)),
            Span::styled(insight, Style::default().fg(theme::ACCENT)),
        ]))
        .wrap(Wrap { trim: true });
        f.render_widget(insight, rows[2]);
    }
}

// ── Pie ──────────────────────────────────────────────────────

/// Filled disc split into clockwise slices starting at twelve o'clock.
struct PieChart {
    /// Cumulative end fraction and colour of each slice.
    slices: Vec<(f64, Color)>,
}

impl PieChart {
    fn new(fractions: &[f64]) -> Self {
        let mut end = 0.0;
        let slices = fractions
            .iter()
            .enumerate()
            .map(|(i, frac)| {
                end += frac;
                (end, theme::chart_color(i))
            })
            .collect();
        Self { slices }
    }
}

impl Shape for PieChart {
    fn draw(&self, painter: &mut Painter) {
        let step = 2.0 / PIE_RESOLUTION as f64;
        for i in 0..=PIE_RESOLUTION {
            for j in 0..=PIE_RESOLUTION {
                let x = -1.0 + i as f64 * step;
                let y = -1.0 + j as f64 * step;
                if x * x + y * y > 1.0 {
                    continue;
                }
                let Some(slice) = slice_at(&self.slices, angle_fraction(x, y)) else {
                    continue;
                };
                if let Some((px, py)) = painter.get_point(x, y) {
                    painter.paint(px, py, self.slices[slice].1);
                }
            }
        }
    }
}

/// Clockwise angle from twelve o'clock as a fraction of a turn, in `[0, 1)`.
pub(crate) fn angle_fraction(x: f64, y: f64) -> f64 {
    let theta = x.atan2(y);
    let theta = if theta < 0.0 { theta + TAU } else { theta };
    (theta / TAU).min(1.0 - f64::EPSILON)
}

/// Index of the slice covering `fraction`, given cumulative end fractions.
pub(crate) fn slice_at(slices: &[(f64, Color)], fraction: f64) -> Option<usize> {
    slices.iter().position(|(end, _)| fraction < *end).or_else(|| {
        // Rounding can leave the cumulative total a hair under 1. An empty
        // disc (all-zero shares) has no slice to fall back to.
        match slices.last() {
            Some((end, _)) if *end > 0.0 => Some(slices.len() - 1),
            _ => None,
        }
    })
}

/// Label anchor for each slice of at least [`LABEL_MIN_FRACTION`].
pub(crate) fn slice_labels(fractions: &[f64]) -> Vec<(f64, f64, String)> {
    let mut start = 0.0;
    let mut labels = Vec::new();
    for frac in fractions {
        if *frac >= LABEL_MIN_FRACTION {
            let mid = (start + frac / 2.0) * TAU;
            labels.push((0.55 * mid.sin(), 0.55 * mid.cos(), format!("{:.0}%", frac * 100.0)));
        }
        start += frac;
    }
    labels
}

fn fractions(breakdown: &ExpenseBreakdown) -> Vec<f64> {
    breakdown
        .categories
        .iter()
        .map(|c| breakdown.fraction_of(c.value))
        .collect()
}

fn render_pie(f: &mut Frame, area: Rect, breakdown: &ExpenseBreakdown) {
    // Cells are about twice as tall as wide; keep the disc round.
    let side = area.height.min(area.width / 2).max(2);
    let pie_area = Rect::new(
        area.x + area.width.saturating_sub(side * 2) / 2,
        area.y + area.height.saturating_sub(side) / 2,
        (side * 2).min(area.width),
        side.min(area.height),
    );

    if breakdown.total.is_zero() {
        return;
    }

    let fractions = fractions(breakdown);
    let pie = PieChart::new(&fractions);
    let labels = slice_labels(&fractions);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            ctx.draw(&pie);
            ctx.layer();
            for (x, y, text) in &labels {
                ctx.print(
                    *x,
                    *y,
                    Line::from(Span::styled(
                        text.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
                );
            }
        });
    f.render_widget(canvas, pie_area);
}

// ── Bars ─────────────────────────────────────────────────────

fn render_bars(f: &mut Frame, area: Rect, breakdown: &ExpenseBreakdown) {
    let count = breakdown.categories.len().max(1) as u16;
    let bar_width = (area.width / count).saturating_sub(1).clamp(3, 10);

    let bars: Vec<Bar> = breakdown
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let color = theme::chart_color(i);
            Bar::default()
                .value(c.value.round().to_u64().unwrap_or(0))
                .text_value(format!("${:.0}", c.value))
                .label(Line::from(truncate(&c.name, bar_width as usize)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .label_style(theme::dim_style());
    f.render_widget(chart, area);
}

// ── Legend ───────────────────────────────────────────────────

fn render_legend(f: &mut Frame, area: Rect, breakdown: &ExpenseBreakdown) {
    let lines: Vec<Line> = breakdown
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme::chart_color(i))),
                Span::styled(format!("{:<10}", truncate(&c.name, 10)), theme::normal_style()),
                Span::styled(format!("{:>10}", format_amount(c.value)), theme::normal_style()),
                Span::styled(
                    format!(" {:>5.1}%", breakdown.percent_of(c.value)),
                    theme::dim_style(),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
