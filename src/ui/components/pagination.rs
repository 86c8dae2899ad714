//! Pagination bar renderer.
//!
//! ```text
//!      « First   ‹ Prev    Page 3 of 42    Next ›   Last »
//! ```
//!
//! Disabled buttons stay in place in the `button_disabled_fg` color so the bar
//! never shifts while paging.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

const SEPARATOR: &str = "   ";

/// Renders the pagination bar centered on `row`.
///
/// Returns the next available row.
pub fn render_pagination(frame: &mut Frame, row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let controls = pagination.controls;
    let label = format!(" {} ", pagination.label);
    let segments: [(&str, Option<bool>); 5] = [
        ("« First", Some(controls.first)),
        ("‹ Prev", Some(controls.prev)),
        (&label, None),
        ("Next ›", Some(controls.next)),
        ("Last »", Some(controls.last)),
    ];

    let width: usize = segments.iter().map(|(text, _)| text.chars().count()).sum::<usize>()
        + SEPARATOR.len() * (segments.len() - 1);

    frame.move_to(row, 1);
    if width > cols {
        frame.fg(&theme.colors.text_normal);
        frame.centered(&pagination.label, cols);
        frame.reset();
        return row + 1;
    }

    let left = (cols - width) / 2;
    frame.pad(left);
    for (i, (text, enabled)) in segments.iter().enumerate() {
        if i > 0 {
            frame.push(SEPARATOR);
        }
        match enabled {
            Some(true) => {
                frame.push(Theme::bold());
                frame.fg(&theme.colors.button_enabled_fg);
            }
            Some(false) => frame.fg(&theme.colors.button_disabled_fg),
            None => frame.fg(&theme.colors.text_normal),
        }
        frame.push(text);
        frame.reset();
    }
    frame.pad(cols - left - width);

    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaginationControls;

    fn info(first: bool, next: bool) -> PaginationInfo {
        PaginationInfo {
            label: "Page 1 of 42".to_string(),
            controls: PaginationControls {
                first,
                prev: first,
                next,
                last: next,
            },
        }
    }

    #[test]
    fn disabled_buttons_are_dimmed_in_place() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_pagination(&mut frame, 23, &info(false, true), &theme, 80);

        let out = frame.as_str();
        let disabled = Theme::fg(&theme.colors.button_disabled_fg);
        let enabled = Theme::fg(&theme.colors.button_enabled_fg);
        assert!(out.contains(&format!("{disabled}« First")));
        assert!(out.contains(&format!("{enabled}Next ›")));
        assert!(out.contains("Page 1 of 42"));
    }

    #[test]
    fn narrow_panes_show_only_the_label() {
        let mut frame = Frame::new();
        render_pagination(&mut frame, 10, &info(true, true), &Theme::default(), 20);
        assert!(!frame.as_str().contains("First"));
        assert!(frame.as_str().contains("Page 1 of 42"));
    }
}
