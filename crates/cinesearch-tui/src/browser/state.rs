//! Browser view state: input buffer, grid cursor and hit areas.

use ratatui::layout::{Position, Rect};

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Grid navigation.
    Browse,
    /// Typing into the search box.
    Search,
}

/// View-only state; domain state lives in the controller.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search box contents.
    pub input: String,
    /// Selected card index.
    cursor: usize,
    /// First visible grid row.
    scroll_row: usize,
    /// Cards per grid row, as laid out by the last draw.
    columns: usize,
    /// Card hit areas from the last draw.
    card_areas: Vec<(usize, Rect)>,
    /// Modal area from the last draw.
    modal_area: Option<Rect>,
    /// Whether the "load more" row has focus instead of a card.
    load_more_focused: bool,
    /// "Load more" row area from the last draw.
    load_more_area: Option<Rect>,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    /// Creates a state focused on the search box.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input_mode: InputMode::Search,
            input: String::new(),
            cursor: 0,
            scroll_row: 0,
            columns: 1,
            card_areas: Vec::new(),
            modal_area: None,
            load_more_focused: false,
            load_more_area: None,
        }
    }

    /// Creates a state with a pre-filled query, focused on the grid.
    #[must_use]
    pub fn with_query(query: &str) -> Self {
        Self {
            input_mode: InputMode::Browse,
            input: String::from(query),
            ..Self::new()
        }
    }

    /// Returns the selected card index.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the first visible grid row.
    #[must_use]
    pub const fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// Returns the cards per row used for navigation.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Appends a character to the search box.
    pub fn input_push(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Removes the last character from the search box.
    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    /// Moves back to the first card (after a fresh search).
    pub const fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.scroll_row = 0;
        self.load_more_focused = false;
    }

    /// Returns whether the "load more" row has focus.
    #[must_use]
    pub const fn is_load_more_focused(&self) -> bool {
        self.load_more_focused
    }

    /// Moves focus from the grid to the "load more" row.
    pub const fn focus_load_more(&mut self) {
        self.load_more_focused = true;
    }

    /// Returns focus to the grid.
    pub const fn blur_load_more(&mut self) {
        self.load_more_focused = false;
    }

    /// Returns whether the cursor sits on the last grid row.
    #[must_use]
    pub fn is_on_last_row(&self, len: usize) -> bool {
        len == 0 || self.row_of(self.cursor) == self.row_of(len.saturating_sub(1))
    }

    /// Keeps the cursor inside a collection of `len` cards.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Moves one card left.
    pub const fn move_left(&mut self) {
        self.load_more_focused = false;
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves one card right.
    pub fn move_right(&mut self, len: usize) {
        self.load_more_focused = false;
        if self.cursor.saturating_add(1) < len {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Moves one row up.
    pub const fn move_up(&mut self) {
        if self.load_more_focused {
            self.load_more_focused = false;
        } else if self.cursor >= self.columns {
            self.cursor = self.cursor.saturating_sub(self.columns);
        }
    }

    /// Moves one row down, landing on the last card of a short final row.
    pub fn move_down(&mut self, len: usize) {
        let target = self.cursor.saturating_add(self.columns);
        if target < len {
            self.cursor = target;
        } else if self.row_of(len.saturating_sub(1)) > self.row_of(self.cursor) {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Grid row of a card index.
    fn row_of(&self, index: usize) -> usize {
        index.checked_div(self.columns).unwrap_or(0)
    }

    /// Records the grid geometry and scrolls the cursor row into view.
    pub fn set_layout(&mut self, columns: usize, visible_rows: usize) {
        self.columns = columns.max(1);
        let visible_rows = visible_rows.max(1);
        let row = self.row_of(self.cursor);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row.saturating_add(visible_rows) {
            self.scroll_row = row.saturating_sub(visible_rows.saturating_sub(1));
        }
    }

    /// Replaces the recorded card hit areas.
    pub fn set_card_areas(&mut self, areas: Vec<(usize, Rect)>) {
        self.card_areas = areas;
    }

    /// Records the modal area (`None` when no modal is drawn).
    pub const fn set_modal_area(&mut self, area: Option<Rect>) {
        self.modal_area = area;
    }

    /// Records the "load more" row area (`None` when the row is hidden).
    pub const fn set_load_more_area(&mut self, area: Option<Rect>) {
        self.load_more_area = area;
    }

    /// Returns whether a terminal cell lies on the "load more" row.
    #[must_use]
    pub fn is_on_load_more(&self, column: u16, row: u16) -> bool {
        self.load_more_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Returns the card under a terminal cell, if any.
    #[must_use]
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.card_areas
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(index, _)| *index)
    }

    /// Returns whether a terminal cell lies outside the drawn modal.
    #[must_use]
    pub fn is_outside_modal(&self, column: u16, row: u16) -> bool {
        self.modal_area
            .is_some_and(|area| !area.contains(Position::new(column, row)))
    }

    /// Selects a card directly (mouse click).
    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.cursor = index;
        }
    }
}
