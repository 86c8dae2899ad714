//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by the
//! renderer. They hold display-ready data only: truncated strings, highlight ranges,
//! enabled flags. Nothing in here reads application state.
//!
//! # Screen Layout
//!
//! ```text
//! row 1      blank
//! row 2      header (title, brand)
//! rows 3-5   search box
//! row 6      border
//! rows 7..   body: loading indicator, card grid, or "no results"
//! rows-2     border
//! rows-1     pagination bar
//! rows       footer (keybindings)
//! ```
//!
//! The overlay, when present, is drawn last on top of the body.

use crate::domain::PaginationControls;

/// Width of one card including its border.
pub const CARD_WIDTH: usize = 30;

/// Height of one card including its border.
pub const CARD_HEIGHT: usize = 5;

/// Upper bound on grid columns, however wide the pane.
pub const MAX_COLUMNS: usize = 3;

/// Rows taken by everything except the body.
pub const CHROME_ROWS: usize = 9;

/// First row of the body area.
pub const BODY_START_ROW: usize = 7;

/// Number of card columns that fit in `cols` terminal columns (at least one).
///
/// # Example
///
/// ```
/// use mortydex::ui::viewmodel::grid_columns;
///
/// assert_eq!(grid_columns(20), 1);
/// assert_eq!(grid_columns(64), 2);
/// assert_eq!(grid_columns(200), 3);
/// ```
#[must_use]
pub fn grid_columns(cols: usize) -> usize {
    (cols / CARD_WIDTH).clamp(1, MAX_COLUMNS)
}

/// Number of card rows that fit in a pane `rows` tall (at least one).
#[must_use]
pub fn visible_card_rows(rows: usize) -> usize {
    (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1)
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub body: BodyView,
    pub pagination: PaginationInfo,
    pub footer: FooterInfo,

    /// Present while the easter-egg overlay is visible.
    pub overlay: Option<OverlayInfo>,
}

/// What the body area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// A fetch is in flight; the grid is suppressed.
    Loading,
    /// The current page of characters.
    Grid(GridView),
    /// The fetch finished with no characters (including failures).
    Empty(EmptyState),
}

/// Card grid for the visible window of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    /// Cards in row-major order.
    pub cards: Vec<CardView>,
    /// Cards per row.
    pub columns: usize,
}

/// One character card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Name, truncated to the card's inner width.
    pub name: String,
    /// `species · status` line, possibly empty.
    pub subtitle: String,
    /// Image address without scheme, truncated from the left.
    pub image: String,
    pub is_selected: bool,
    /// Activating this card shows the overlay.
    pub is_easter_egg: bool,
    /// Character ranges of `name` matching the committed query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub brand: String,
}

/// Search box display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text currently in the field.
    pub query: String,
    /// Whether keystrokes go to the field.
    pub is_focused: bool,
}

/// Pagination bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// `Page X of Y`.
    pub label: String,
    pub controls: PaginationControls,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown when a fetch produced no characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Overlay panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayInfo {
    pub title: String,
    pub url: String,
    pub hint: String,
}
