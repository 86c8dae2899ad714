//! Shared rendering utilities.
//!
//! Components draw into a [`Frame`], a plain string of text and ANSI escape
//! sequences, which the renderer prints in one go. This keeps every component
//! testable without a terminal.
//!
//! All widths here are counted in characters, never bytes.

use crate::ui::theme::Theme;

/// Buffered screen output.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions the cursor at `row`, `col` (both 1-indexed).
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    /// Appends raw text or escape sequences.
    pub fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Appends `n` spaces.
    pub fn pad(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat(' ').take(n));
    }

    pub fn fg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::fg(hex));
    }

    pub fn bg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::bg(hex));
    }

    pub fn reset(&mut self) {
        self.buf.push_str(Theme::reset());
    }

    /// Writes `text` centered in `width` columns, padding both sides.
    pub fn centered(&mut self, text: &str, width: usize) {
        let text = fit(text, width);
        let len = text.chars().count();
        let left = width.saturating_sub(len) / 2;
        self.pad(left);
        self.push(&text);
        self.pad(width.saturating_sub(left + len));
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Writes `text` with the character ranges in `ranges` highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlighting is
/// skipped on selected cards so it does not fight the selection colors.
pub fn render_highlighted_text(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal: String = chars[current_pos..start].iter().collect();
        frame.push(&normal);

        frame.fg(&theme.colors.match_highlight_fg);
        frame.bg(&theme.colors.match_highlight_bg);
        let highlighted: String = chars[start..end].iter().collect();
        frame.push(&highlighted);
        frame.reset();
        frame.fg(&theme.colors.text_normal);

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    frame.push(&remaining);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn centered_text_fills_width() {
        let mut frame = Frame::new();
        frame.centered("Wubba", 11);
        assert_eq!(frame.as_str(), "   Wubba   ");

        let mut frame = Frame::new();
        frame.centered("Wubba lubba dub dub", 5);
        assert_eq!(frame.as_str(), "Wubba");
    }

    #[test]
    fn highlighting_keeps_text_intact() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "Señor Rick", &[(0, 2), (6, 10)], &theme, false);

        assert_eq!(strip_ansi(frame.as_str()), "Señor Rick");
        assert!(frame.as_str().contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn highlighting_ignores_out_of_range_spans() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "Rick", &[(2, 40), (50, 60)], &theme, false);
        assert_eq!(strip_ansi(frame.as_str()), "Rick");
    }

    #[test]
    fn selected_text_is_not_highlighted() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "Rick", &[(0, 4)], &theme, true);
        assert_eq!(frame.as_str(), "Rick");
    }
}
