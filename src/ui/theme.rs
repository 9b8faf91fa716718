use ratatui::style::{Color, Modifier, Style};

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);
pub(crate) const CARD_FRONT: Color = Color::Rgb(37, 99, 235);
pub(crate) const CARD_BACK: Color = Color::Rgb(55, 65, 81);
pub(crate) const GOLD: Color = Color::Rgb(234, 179, 8);

/// Chart palette, cycled per category.
pub(crate) const CHART_COLORS: [Color; 7] = [
    Color::Rgb(0x3B, 0x82, 0xF6),
    Color::Rgb(0x10, 0xB9, 0x81),
    Color::Rgb(0xF5, 0x9E, 0x0B),
    Color::Rgb(0xEF, 0x44, 0x44),
    Color::Rgb(0x8B, 0x5C, 0xF6),
    Color::Rgb(0x06, 0xB6, 0xD4),
    Color::Rgb(0xF9, 0x73, 0x16),
];

pub(crate) fn chart_color(index: usize) -> Color {
    CHART_COLORS[index % CHART_COLORS.len()]
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn error_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

pub(crate) fn title_style() -> Style {
    Style::default()
        .fg(TEXT_DIM)
        .add_modifier(Modifier::BOLD)
}

/// Border for a panel; highlighted panels use the accent colour.
pub(crate) fn border_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(OVERLAY)
    }
}
