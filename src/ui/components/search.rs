//! Search bar component renderer.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the three-line search box starting at `row`.
///
/// ```text
/// [margin] ┌──────────────────────┐ [margin]
/// [margin] │ Search: rick▏        │ [margin]
/// [margin] └──────────────────────┘ [margin]
/// ```
///
/// A focused box uses the `search_bar_focused` border and shows a cursor. The
/// query keeps its tail visible when it is wider than the box.
///
/// Returns the next available row (`row + 3`).
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2).max(2);
    let inner_width = box_width - 2;
    let border = if search.is_focused {
        &theme.colors.search_bar_focused
    } else {
        &theme.colors.search_bar_border
    };

    frame.move_to(row, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push(&format!("┌{}┐", "─".repeat(inner_width)));
    frame.reset();

    let cursor = if search.is_focused { "▏" } else { "" };
    let label = " Search: ";
    let room = inner_width.saturating_sub(label.chars().count() + cursor.chars().count());
    let query_len = search.query.chars().count();
    let visible: String = search.query.chars().skip(query_len.saturating_sub(room)).collect();
    let text_len = label.chars().count() + visible.chars().count() + cursor.chars().count();

    frame.move_to(row + 1, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push("│");
    frame.fg(&theme.colors.text_dim);
    frame.push(label);
    frame.fg(&theme.colors.text_normal);
    frame.push(&visible);
    frame.push(cursor);
    frame.pad(inner_width.saturating_sub(text_len));
    frame.fg(border);
    frame.push("│");
    frame.reset();

    frame.move_to(row + 2, 1);
    frame.pad(SEARCH_BOX_MARGIN);
    frame.fg(border);
    frame.push(&format!("└{}┘", "─".repeat(inner_width)));
    frame.reset();

    row + 3
}
