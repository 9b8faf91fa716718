use anyhow::Result;
use chrono::{Local, NaiveDate};
use ratatui::layout::{Position, Rect};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::{CardProfile, Config};
use crate::form::{FormEvent, TransactionForm};
use crate::ledger::{
    ExpenseBreakdown, Ledger, SortKey, SortOrder, Totals, TransactionQuery, TypeFilter,
};
use crate::models::Transaction;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Form,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Form => write!(f, "ADD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ChartKind {
    #[default]
    Pie,
    Bar,
}

impl ChartKind {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pie" => Some(Self::Pie),
            "bar" => Some(Self::Bar),
            _ => None,
        }
    }

    pub(crate) fn toggled(&self) -> Self {
        match self {
            Self::Pie => Self::Bar,
            Self::Bar => Self::Pie,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pie => write!(f, "Pie"),
            Self::Bar => write!(f, "Bar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum MenuItem {
    #[default]
    Dashboard,
    Cards,
    Analytics,
    Transactions,
    Profile,
    Settings,
}

impl MenuItem {
    pub(crate) fn all() -> &'static [MenuItem] {
        &[
            Self::Dashboard,
            Self::Cards,
            Self::Analytics,
            Self::Transactions,
            Self::Profile,
            Self::Settings,
        ]
    }

    pub(crate) fn icon(&self) -> &'static str {
        match self {
            Self::Dashboard => "⌂",
            Self::Cards => "▭",
            Self::Analytics => "◔",
            Self::Transactions => "≡",
            Self::Profile => "☺",
            Self::Settings => "⚙",
        }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Cards => write!(f, "Cards"),
            Self::Analytics => write!(f, "Analytics"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Profile => write!(f, "Profile"),
            Self::Settings => write!(f, "Settings"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SidebarState {
    pub(crate) collapsed: bool,
    pub(crate) active: MenuItem,
}

impl SidebarState {
    pub(crate) fn step(&mut self, delta: isize) {
        let items = MenuItem::all();
        let idx = items.iter().position(|i| *i == self.active).unwrap_or(0) as isize;
        let next = (idx + delta).rem_euclid(items.len() as isize);
        self.active = items[next as usize];
    }
}

pub(crate) const FLIP_DURATION: Duration = Duration::from_millis(600);
/// How far the card can be dragged from its resting place, in cells.
pub(crate) const DRAG_LIMIT_X: i16 = 5;
pub(crate) const DRAG_LIMIT_Y: i16 = 1;

#[derive(Debug, Clone, Copy)]
struct Drag {
    origin: (u16, u16),
    start_offset: (i16, i16),
    moved: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CardState {
    /// The face the card is showing, or turning towards.
    pub(crate) flipped: bool,
    flip_started: Option<Instant>,
    /// Animation progress in `[0, 1)` while a flip is running.
    pub(crate) flip_progress: Option<f64>,
    pub(crate) offset: (i16, i16),
    drag: Option<Drag>,
}

impl CardState {
    pub(crate) fn flip(&mut self, now: Instant) {
        self.flipped = !self.flipped;
        self.flip_started = Some(now);
        self.flip_progress = Some(0.0);
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        if let Some(started) = self.flip_started {
            let elapsed = now.saturating_duration_since(started).as_secs_f64();
            let progress = elapsed / FLIP_DURATION.as_secs_f64();
            if progress >= 1.0 {
                self.flip_started = None;
                self.flip_progress = None;
            } else {
                self.flip_progress = Some(progress);
            }
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.drag.is_some_and(|d| d.moved)
    }

    pub(crate) fn press(&mut self, column: u16, row: u16) {
        self.drag = Some(Drag {
            origin: (column, row),
            start_offset: self.offset,
            moved: false,
        });
    }

    pub(crate) fn drag_to(&mut self, column: u16, row: u16) {
        if let Some(drag) = self.drag.as_mut() {
            let dx = column as i16 - drag.origin.0 as i16;
            let dy = row as i16 - drag.origin.1 as i16;
            self.offset = (
                (drag.start_offset.0 + dx).clamp(-DRAG_LIMIT_X, DRAG_LIMIT_X),
                (drag.start_offset.1 + dy).clamp(-DRAG_LIMIT_Y, DRAG_LIMIT_Y),
            );
            drag.moved |= dx != 0 || dy != 0;
        }
    }

    /// End a press. Returns true when it was a click rather than a drag.
    pub(crate) fn release(&mut self) -> bool {
        self.drag.take().is_some_and(|d| !d.moved)
    }
}

/// Width ratio and visible face at `progress` through a flip towards
/// `to_back`. The card narrows to nothing, swaps face, then widens again.
pub(crate) fn flip_frame(progress: f64, to_back: bool) -> (f64, bool) {
    let p = progress.clamp(0.0, 1.0);
    let width = (p * std::f64::consts::PI).cos().abs();
    let showing_back = if p < 0.5 { !to_back } else { to_back };
    (width, showing_back)
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) user: String,
    pub(crate) card_profile: CardProfile,

    pub(crate) ledger: Ledger,

    // Dashboard
    pub(crate) totals: Totals,
    pub(crate) breakdown: ExpenseBreakdown,
    pub(crate) chart: ChartKind,
    pub(crate) card: CardState,
    pub(crate) sidebar: SidebarState,

    // Transactions
    pub(crate) query: TransactionQuery,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Add-transaction modal
    pub(crate) form: Option<TransactionForm>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
    pub(crate) card_area: Rect,
}

impl App {
    pub(crate) fn new(config: &Config, transactions: Vec<Transaction>) -> Self {
        let mut app = Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            user: config.user.clone(),
            card_profile: config.card.clone(),

            ledger: Ledger::new(transactions),

            totals: Totals::default(),
            breakdown: ExpenseBreakdown::default(),
            chart: ChartKind::default(),
            card: CardState::default(),
            sidebar: SidebarState::default(),

            query: TransactionQuery::default(),
            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            form: None,

            visible_rows: 10,
            card_area: Rect::default(),
        };
        app.refresh_all();
        app
    }

    pub(crate) fn refresh_dashboard(&mut self) {
        self.totals = self.ledger.totals();
        self.breakdown = self.ledger.expense_breakdown();
    }

    pub(crate) fn refresh_transactions(&mut self) {
        self.transactions = self
            .query
            .apply(self.ledger.transactions())
            .into_iter()
            .cloned()
            .collect();
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    pub(crate) fn refresh_all(&mut self) {
        self.refresh_dashboard();
        self.refresh_transactions();
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── List controls ─────────────────────────────────────────

    pub(crate) fn set_search(&mut self, search: &str) {
        self.query.search = search.to_string();
        scroll_to_top(&mut self.transaction_index, &mut self.transaction_scroll);
        self.refresh_transactions();
    }

    pub(crate) fn set_type_filter(&mut self, filter: TypeFilter) {
        self.query.type_filter = filter;
        scroll_to_top(&mut self.transaction_index, &mut self.transaction_scroll);
        self.refresh_transactions();
        tracing::debug!(filter = %filter, "type filter changed");
        self.set_status(format!("Showing: {filter}"));
    }

    pub(crate) fn cycle_type_filter(&mut self) {
        self.set_type_filter(self.query.type_filter.next());
    }

    /// Sort-button behaviour: same key flips direction, a new key starts descending.
    pub(crate) fn sort_by(&mut self, key: SortKey) {
        self.query.toggle_sort(key);
        self.after_sort_change();
    }

    pub(crate) fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.query.sort_key = key;
        self.query.order = order;
        self.after_sort_change();
    }

    fn after_sort_change(&mut self) {
        self.refresh_transactions();
        let (key, order) = (self.query.sort_key, self.query.order);
        tracing::debug!(key = %key, order = ?order, "sort changed");
        self.set_status(format!("Sorted by {key} {}", order.arrow()));
    }

    pub(crate) fn move_down(&mut self) {
        scroll_down(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
            self.visible_rows,
        );
    }

    pub(crate) fn move_up(&mut self) {
        scroll_up(&mut self.transaction_index, &mut self.transaction_scroll);
    }

    pub(crate) fn goto_top(&mut self) {
        scroll_to_top(&mut self.transaction_index, &mut self.transaction_scroll);
    }

    pub(crate) fn goto_bottom(&mut self) {
        scroll_to_bottom(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
            self.visible_rows,
        );
    }

    // ── Dashboard widgets ─────────────────────────────────────

    pub(crate) fn set_chart(&mut self, chart: ChartKind) {
        self.chart = chart;
        tracing::debug!(chart = %chart, "chart changed");
    }

    pub(crate) fn flip_card(&mut self, now: Instant) {
        self.card.flip(now);
    }

    /// Mouse press at a screen position; only presses on the card start a drag.
    pub(crate) fn mouse_down(&mut self, column: u16, row: u16) {
        if self.card_area.contains(Position::new(column, row)) {
            self.card.press(column, row);
        }
    }

    pub(crate) fn mouse_drag(&mut self, column: u16, row: u16) {
        self.card.drag_to(column, row);
    }

    pub(crate) fn mouse_up(&mut self, now: Instant) {
        if self.card.release() {
            self.flip_card(now);
        }
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        self.sidebar.collapsed = !self.sidebar.collapsed;
    }

    pub(crate) fn step_menu(&mut self, delta: isize) {
        self.sidebar.step(delta);
        let item = self.sidebar.active;
        self.set_status(format!("{item}"));
    }

    // ── Add-transaction flow ──────────────────────────────────

    pub(crate) fn open_form(&mut self) {
        self.form = Some(TransactionForm::new());
        self.input_mode = InputMode::Form;
    }

    /// Close the modal. Ignored while a submission is in flight.
    pub(crate) fn close_form(&mut self) {
        if self.form.as_ref().is_some_and(|f| !f.is_editing()) {
            return;
        }
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn submit_form(&mut self, now: Instant) {
        if let Some(form) = self.form.as_mut() {
            form.submit(now);
        }
    }

    /// Advance timers: the form's submission delay and the card flip.
    pub(crate) fn tick(&mut self, now: Instant) {
        self.card.tick(now);

        let event = self.form.as_mut().and_then(|f| f.tick(now));
        match event {
            Some(FormEvent::Created(request)) => {
                let description = request.description.clone();
                self.ledger.add(request, today());
                self.refresh_all();
                self.set_status(format!("Added: {description}"));
            }
            Some(FormEvent::Closed) => {
                self.form = None;
                self.input_mode = InputMode::Normal;
            }
            None => {}
        }
    }

    pub(crate) fn export(&mut self, path: &Path) -> Result<usize> {
        crate::seed::export_csv(path, self.ledger.transactions())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
