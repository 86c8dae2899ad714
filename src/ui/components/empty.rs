//! Loading and empty state renderers for the body area.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

const LOADING_TEXT: &str = "Loading characters...";

/// Renders the loading indicator one row into the body.
pub fn render_loading(frame: &mut Frame, body_row: usize, theme: &Theme, cols: usize) {
    frame.move_to(body_row + 1, 1);
    frame.push(Theme::bold());
    frame.fg(&theme.colors.loading_fg);
    frame.centered(LOADING_TEXT, cols);
    frame.reset();
}

/// Renders the "no results" message and its subtitle, centered.
pub fn render_empty_state(frame: &mut Frame, body_row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    frame.move_to(body_row + 1, 1);
    frame.fg(&theme.colors.empty_state_fg);
    frame.centered(&empty.message, cols);
    frame.reset();

    frame.move_to(body_row + 2, 1);
    frame.push(Theme::dim());
    frame.fg(&theme.colors.text_dim);
    frame.centered(&empty.subtitle, cols);
    frame.reset();
}
