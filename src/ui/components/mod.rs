//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with branding
//! - [`search`]: Search input box
//! - [`grid`]: Character card grid
//! - [`empty`]: Loading indicator and "no results" message
//! - [`pagination`]: First/prev/next/last buttons and page label
//! - [`overlay`]: Easter-egg video panel
//! - [`footer`]: Keybinding hints
//!
//! [`render_layout`] composes them into the screen layout described in
//! [`crate::ui::viewmodel`].

pub mod empty;
pub mod footer;
pub mod grid;
pub mod header;
pub mod overlay;
pub mod pagination;
pub mod search;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel, BODY_START_ROW};

/// Renders a horizontal border line at `row`.
///
/// Returns the next available row.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.move_to(row, 1);
    frame.fg(color);
    frame.push(&"─".repeat(cols));
    frame.reset();
    row + 1
}

/// Renders the full screen for `vm` into `frame`.
pub fn render_layout(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = header::render_header(frame, current_row, &vm.header, theme, cols);
    current_row = search::render_search_bar(frame, current_row, &vm.search_bar, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    debug_assert_eq!(current_row, BODY_START_ROW);

    match &vm.body {
        BodyView::Loading => empty::render_loading(frame, current_row, theme, cols),
        BodyView::Empty(state) => empty::render_empty_state(frame, current_row, state, theme, cols),
        BodyView::Grid(grid) => {
            grid::render_grid(frame, current_row, grid, theme, cols);
        }
    }

    let footer_row = rows;
    let pagination_row = rows.saturating_sub(1);
    let border_row = rows.saturating_sub(2);

    render_border(frame, border_row, &theme.colors.border, cols);
    pagination::render_pagination(frame, pagination_row, &vm.pagination, theme, cols);
    footer::render_footer(frame, footer_row, &vm.footer, theme, cols);

    if let Some(overlay) = &vm.overlay {
        overlay::render_overlay(frame, BODY_START_ROW, border_row.saturating_sub(1), overlay, theme, cols);
    }
}
