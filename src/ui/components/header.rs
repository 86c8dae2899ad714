//! Header component renderer.

use crate::ui::helpers::{fit, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title on the left and the brand on the right of `row`.
///
/// The brand is dropped when the pane is too narrow for both.
///
/// Returns the next available row.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = fit(&format!(" {}", header.title), cols);
    let title_len = title.chars().count();
    let brand = format!("{} ", header.brand);
    let brand_len = brand.chars().count();
    let show_brand = title_len + brand_len < cols;

    frame.move_to(row, 1);
    frame.push(Theme::bold());
    frame.fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        frame.bg(bg);
    }
    frame.push(&title);

    if show_brand {
        frame.pad(cols - title_len - brand_len);
        frame.fg(&theme.colors.brand_fg);
        frame.push(&brand);
    } else {
        frame.pad(cols.saturating_sub(title_len));
    }

    frame.reset();
    row + 1
}
