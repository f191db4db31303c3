use localmarket_types::CardAction;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Rows taken by one card including its border.
pub const CARD_HEIGHT: u16 = 12;
/// Minimum width of one card column.
pub const CARD_MIN_WIDTH: u16 = 40;
/// Upper bound on the number of card columns.
pub const MAX_CARD_COLUMNS: usize = 3;

/// Card columns for a grid `width` cells wide: one per 40 cells, 1 to 3.
pub fn card_columns(width: u16) -> usize {
    usize::from(width / CARD_MIN_WIDTH).clamp(1, MAX_CARD_COLUMNS)
}

/// Rendered geometry of one card, kept for mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardHitArea {
    /// Position of the card within the visible subset.
    pub position: usize,
    pub card: Rect,
    pub book_now: Rect,
    pub details: Rect,
}

impl CardHitArea {
    pub fn button_at(&self, x: u16, y: u16) -> Option<CardAction> {
        let point = (x, y).into();
        if self.book_now.contains(point) {
            Some(CardAction::BookNow)
        } else if self.details.contains(point) {
            Some(CardAction::Details)
        } else {
            None
        }
    }
}

/// Selection and scroll state of the results grid.
///
/// `selected` indexes the visible subset, not the store, so it is clamped
/// every time the subset changes.
#[derive(Debug, Clone)]
pub struct ResultsState {
    pub selected: usize,
    /// Button that Enter activates on the selected card.
    pub button: CardAction,
    /// First card row drawn.
    pub scroll_row: usize,
    /// Column count of the last render; drives Up/Down movement.
    pub columns: usize,
    pub container_focus: FocusFlag,
    pub last_area: Rect,
    pub card_areas: Vec<CardHitArea>,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self {
            selected: 0,
            button: CardAction::BookNow,
            scroll_row: 0,
            columns: 1,
            container_focus: FocusFlag::named("results"),
            last_area: Rect::default(),
            card_areas: Vec::new(),
        }
    }
}

impl ResultsState {
    /// Clamps the selection into a subset of `len` cards.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        let row = self.selected / self.columns.max(1);
        self.scroll_row = self.scroll_row.min(row);
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_row = 0;
        self.button = CardAction::BookNow;
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves one grid row down; stays put on the last row.
    pub fn select_below(&mut self, len: usize) {
        let target = self.selected + self.columns.max(1);
        if target < len {
            self.selected = target;
        } else if self.selected / self.columns.max(1) < len.saturating_sub(1) / self.columns.max(1) {
            self.selected = len - 1;
        }
    }

    /// Moves one grid row up. Returns `false` when already on the first row.
    pub fn select_above(&mut self) -> bool {
        let columns = self.columns.max(1);
        if self.selected < columns {
            return false;
        }
        self.selected -= columns;
        true
    }

    pub fn toggle_button(&mut self) {
        self.button = match self.button {
            CardAction::BookNow => CardAction::Details,
            CardAction::Details => CardAction::BookNow,
        };
    }

    /// Adjusts `scroll_row` so the selected card's row is within `visible_rows`.
    pub fn ensure_visible(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let row = self.selected / self.columns.max(1);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<&CardHitArea> {
        self.card_areas.iter().find(|area| area.card.contains((x, y).into()))
    }
}

impl HasFocus for ResultsState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
