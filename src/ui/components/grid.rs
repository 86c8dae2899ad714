//! Character card grid renderer.
//!
//! Each card is `CARD_WIDTH` x `CARD_HEIGHT`:
//!
//! ```text
//! ┌────────────────────────────┐
//! │ Rick Sanchez               │
//! │ Human · Alive              │
//! │ ...api/character/avatar/1… │
//! └────────────────────────────┘
//! ```
//!
//! The grid is centered horizontally. Cards whose image opens the overlay get
//! the `easter_egg_fg` border and a watch hint in the bottom edge; the selected
//! card is filled with selection colors.

use crate::ui::helpers::{self, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardView, GridView, CARD_HEIGHT, CARD_WIDTH};

const WATCH_HINT: &str = " ▶ watch ";

/// Renders all cards of `grid` starting at `row`.
///
/// Returns the row after the last card row.
pub fn render_grid(frame: &mut Frame, row: usize, grid: &GridView, theme: &Theme, cols: usize) -> usize {
    let columns = grid.columns.max(1);
    let left = cols.saturating_sub(columns * CARD_WIDTH) / 2 + 1;

    let mut current_row = row;
    for card_row in grid.cards.chunks(columns) {
        for (i, card) in card_row.iter().enumerate() {
            render_card(frame, current_row, left + i * CARD_WIDTH, card, theme);
        }
        current_row += CARD_HEIGHT;
    }
    current_row
}

fn render_card(frame: &mut Frame, row: usize, col: usize, card: &CardView, theme: &Theme) {
    let inner = CARD_WIDTH - 2;
    let content = inner - 2;
    let border = if card.is_easter_egg {
        &theme.colors.easter_egg_fg
    } else {
        &theme.colors.card_border
    };

    frame.move_to(row, col);
    frame.fg(border);
    frame.push(&format!("┌{}┐", "─".repeat(inner)));
    frame.reset();

    let lines: [(&str, &str, bool); 3] = [
        (&card.name, &theme.colors.text_normal, true),
        (&card.subtitle, &theme.colors.text_dim, false),
        (&card.image, &theme.colors.text_dim, false),
    ];

    for (offset, (text, color, is_name)) in lines.into_iter().enumerate() {
        frame.move_to(row + 1 + offset, col);
        frame.fg(border);
        frame.push("│");

        if card.is_selected {
            frame.fg(&theme.colors.selection_fg);
            frame.bg(&theme.colors.selection_bg);
        } else {
            frame.fg(color);
        }
        if is_name {
            frame.push(Theme::bold());
        }

        frame.pad(1);
        let text = helpers::fit(text, content);
        if is_name {
            helpers::render_highlighted_text(frame, &text, &card.highlight_ranges, theme, card.is_selected);
        } else {
            frame.push(&text);
        }
        frame.pad(content - text.chars().count() + 1);

        frame.reset();
        frame.fg(border);
        frame.push("│");
        frame.reset();
    }

    frame.move_to(row + CARD_HEIGHT - 1, col);
    frame.fg(border);
    if card.is_easter_egg {
        let hint_len = WATCH_HINT.chars().count();
        frame.push(&format!("└{}{WATCH_HINT}─┘", "─".repeat(inner - hint_len - 1)));
    } else {
        frame.push(&format!("└{}┘", "─".repeat(inner)));
    }
    frame.reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> CardView {
        CardView {
            name: name.to_string(),
            subtitle: "Human · Alive".to_string(),
            image: "rickandmortyapi.com/1.jpeg".to_string(),
            is_selected: false,
            is_easter_egg: false,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn grid_advances_one_card_height_per_row() {
        let grid = GridView {
            cards: vec![card("Rick"), card("Morty"), card("Summer")],
            columns: 2,
        };
        let mut frame = Frame::new();
        let next = render_grid(&mut frame, 7, &grid, &Theme::default(), 60);

        assert_eq!(next, 7 + 2 * CARD_HEIGHT);
        assert!(frame.as_str().contains("Summer"));
        assert!(frame.as_str().contains("\u{1b}[12;1H"));
    }

    #[test]
    fn easter_egg_cards_use_their_own_border() {
        let theme = Theme::default();
        let mut pickle = card("Pickle Rick");
        pickle.is_easter_egg = true;
        let grid = GridView { cards: vec![pickle], columns: 1 };

        let mut frame = Frame::new();
        render_grid(&mut frame, 7, &grid, &theme, 30);
        assert!(frame.as_str().contains(&Theme::fg(&theme.colors.easter_egg_fg)));
        assert!(frame.as_str().contains("▶ watch"));
    }
}
