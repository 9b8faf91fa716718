use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::CardProfile;
use crate::ui::app::{flip_frame, App, DRAG_LIMIT_X, DRAG_LIMIT_Y};
use crate::ui::panels::panel_block;
use crate::ui::theme;
use crate::ui::util::format_amount;

const CARD_HEIGHT: u16 = 9;
const CARD_MAX_WIDTH: u16 = 46;
const STAGE_HEIGHT: u16 = CARD_HEIGHT + 2 * DRAG_LIMIT_Y as u16;

/// Where the card sits inside the panel at `area`, after the drag offset.
pub(crate) fn card_rect(area: Rect, offset: (i16, i16)) -> Rect {
    let inner = panel_block("", false).inner(area);
    let width = inner
        .width
        .saturating_sub(2 * DRAG_LIMIT_X as u16)
        .min(CARD_MAX_WIDTH);
    let height = CARD_HEIGHT.min(inner.height);

    let rest_x = inner.x as i32 + (inner.width.saturating_sub(width) / 2) as i32;
    let rest_y = inner.y as i32 + DRAG_LIMIT_Y as i32;
    let max_x = (inner.x + inner.width).saturating_sub(width) as i32;
    let max_y = (inner.y + inner.height).saturating_sub(height) as i32;

    let x = (rest_x + offset.0 as i32).clamp(inner.x as i32, max_x.max(inner.x as i32));
    let y = (rest_y + offset.1 as i32).clamp(inner.y as i32, max_y.max(inner.y as i32));
    Rect::new(x as u16, y as u16, width, height)
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, highlighted: bool) {
    let toggle_label = if app.card.flipped {
        " f: Show Front "
    } else {
        " f: Show Back "
    };
    let block = panel_block("Credit Cards", highlighted).title_top(
        Line::from(Span::styled(toggle_label, Style::default().fg(theme::ACCENT)))
            .right_aligned(),
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STAGE_HEIGHT),
            Constraint::Length(2), // Stats
            Constraint::Length(1), // Hint
            Constraint::Min(0),
        ])
        .split(inner);

    render_card(f, area, app);
    render_stats(f, rows[1], &app.card_profile);

    if !app.card.is_dragging() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Drag the card around or click to flip",
            theme::dim_style(),
        )))
        .centered();
        f.render_widget(hint, rows[2]);
    }
}

fn render_card(f: &mut Frame, panel: Rect, app: &App) {
    let full = card_rect(panel, app.card.offset);
    let (width_ratio, showing_back) = match app.card.flip_progress {
        Some(p) => flip_frame(p, app.card.flipped),
        None => (1.0, app.card.flipped),
    };

    let width = (f64::from(full.width) * width_ratio).round() as u16;
    if width < 2 || full.height < 3 {
        return;
    }
    let rect = Rect::new(full.x + (full.width - width) / 2, full.y, width, full.height);

    let bg = if showing_back {
        theme::CARD_BACK
    } else {
        theme::CARD_FRONT
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::White).bg(bg))
        .style(Style::default().fg(Color::White).bg(bg));
    let content_width = block.inner(rect).width as usize;

    let lines = if showing_back {
        back_lines(&app.card_profile, content_width)
    } else {
        front_lines(&app.card_profile, content_width)
    };

    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}

fn strong_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Two spans pushed to opposite edges of a `width`-wide line.
fn spread<'a>(left: Span<'a>, right: Span<'a>, width: usize) -> Line<'a> {
    let used = left.width() + right.width();
    let pad = width.saturating_sub(used);
    Line::from(vec![left, Span::raw(" ".repeat(pad)), right])
}

fn front_lines(card: &CardProfile, width: usize) -> Vec<Line<'static>> {
    vec![
        spread(
            Span::styled("▆▆▆", Style::default().fg(theme::GOLD)),
            Span::styled("))) ▭", label_style()),
            width,
        ),
        Line::from(""),
        Line::from(Span::styled("Card Number", label_style())),
        Line::from(Span::styled(
            format!("**** **** **** {}", card.last_four),
            strong_style(),
        )),
        Line::from(""),
        spread(
            Span::styled("Card Holder", label_style()),
            Span::styled("Expires", label_style()),
            width,
        ),
        spread(
            Span::styled(card.holder.clone(), strong_style()),
            Span::styled(card.expires.clone(), strong_style()),
            width,
        ),
    ]
}

fn back_lines(card: &CardProfile, width: usize) -> Vec<Line<'static>> {
    let stripe = Style::default().fg(Color::Black).bg(Color::Black);
    let cvv = Style::default().fg(Color::Black).bg(Color::White);
    let cvv_pad = width.saturating_sub(2 + "CVV".len() + "***".len() + 1);

    vec![
        Line::from(Span::styled(" ".repeat(width), stripe)),
        Line::from(""),
        Line::from(Span::styled(
            format!(" CVV{}*** ", " ".repeat(cvv_pad)),
            cvv,
        )),
        Line::from(Span::styled(
            format!("This card is property of {}", card.issuer),
            label_style(),
        )),
        Line::from(Span::styled(
            "If found, please return to nearest branch",
            label_style(),
        )),
        Line::from(Span::styled(
            format!("Customer Service: {}", card.service_line),
            label_style(),
        )),
        spread(
            Span::raw(""),
            Span::styled("[ Signature ]", label_style()),
            width,
        ),
    ]
}

fn render_stats(f: &mut Frame, area: Rect, card: &CardProfile) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let stat = |label: &'static str, value: String, color: Color| {
        Paragraph::new(vec![
            Line::from(Span::styled(label, theme::dim_style())),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .centered()
    };

    f.render_widget(
        stat(
            "Available Credit",
            format_amount(card.available_credit),
            theme::ACCENT,
        ),
        cols[0],
    );
    f.render_widget(
        stat("Cashback Earned", format_amount(card.cashback), theme::GREEN),
        cols[1],
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_card_rect_rests_centred() {
        let panel = Rect::new(0, 0, 60, 16);
        let rect = card_rect(panel, (0, 0));
        assert_eq!(rect.width, 46);
        assert_eq!(rect.height, CARD_HEIGHT);
        // Inner area is 58 wide starting at x=1.
        assert_eq!(rect.x, 1 + (58 - 46) / 2);
        assert_eq!(rect.y, 1 + DRAG_LIMIT_Y as u16);
    }

    #[test]
    fn test_card_rect_follows_offset() {
        let panel = Rect::new(0, 0, 60, 16);
        let rest = card_rect(panel, (0, 0));
        let moved = card_rect(panel, (DRAG_LIMIT_X, -DRAG_LIMIT_Y));
        assert_eq!(moved.x, rest.x + DRAG_LIMIT_X as u16);
        assert_eq!(moved.y, rest.y - DRAG_LIMIT_Y as u16);
    }

    #[test]
    fn test_card_rect_stays_inside_tiny_panel() {
        let panel = Rect::new(0, 0, 8, 5);
        let rect = card_rect(panel, (-DRAG_LIMIT_X, -DRAG_LIMIT_Y));
        assert!(rect.x >= 1 && rect.y >= 1);
        assert!(rect.height <= 3);
    }

    #[test]
    fn test_front_shows_masked_number() {
        let card = CardProfile::for_holder("Santhosh");
        let text: String = front_lines(&card, 30)
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("**** **** **** 1234"));
        assert!(text.contains("Santhosh"));
        assert!(text.contains("12/27"));
    }
}
