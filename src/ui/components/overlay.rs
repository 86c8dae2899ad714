//! Easter-egg overlay renderer.
//!
//! Drawn last, on top of the body, as a framed panel:
//!
//! ```text
//! ┌─ Pickle Rick ──────────────────────────┐
//! │                                        │
//! │  ▶ https://www.youtube.com/watch?v=... │
//! │                                        │
//! │  o: open video  Esc: close             │
//! └────────────────────────────────────────┘
//! ```

use crate::ui::helpers::{fit, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OverlayInfo;

const PANEL_MAX_WIDTH: usize = 60;
const PANEL_HEIGHT: usize = 6;

/// Renders the overlay panel centered in the area between `top` and `bottom` rows.
pub fn render_overlay(frame: &mut Frame, top: usize, bottom: usize, overlay: &OverlayInfo, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(4).clamp(12, PANEL_MAX_WIDTH);
    let inner = width - 2;
    let left = cols.saturating_sub(width) / 2 + 1;
    let height = bottom.saturating_sub(top) + 1;
    let row = top + height.saturating_sub(PANEL_HEIGHT) / 2;

    let title = fit(&format!("─ {} ", overlay.title), inner);
    frame.move_to(row, left);
    frame.bg(&theme.colors.overlay_bg);
    frame.fg(&theme.colors.overlay_border);
    frame.push(&format!("┌{title}{}┐", "─".repeat(inner - title.chars().count())));

    let body = [
        String::new(),
        format!("  ▶ {}", overlay.url),
        String::new(),
        format!("  {}", overlay.hint),
    ];
    for (offset, line) in body.iter().enumerate() {
        let line = fit(line, inner);
        frame.move_to(row + 1 + offset, left);
        frame.fg(&theme.colors.overlay_border);
        frame.push("│");
        frame.fg(&theme.colors.overlay_fg);
        frame.push(&line);
        frame.pad(inner - line.chars().count());
        frame.fg(&theme.colors.overlay_border);
        frame.push("│");
    }

    frame.move_to(row + PANEL_HEIGHT - 1, left);
    frame.push(&format!("└{}┘", "─".repeat(inner)));
    frame.reset();
}
