//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_layout → Frame → stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the plugin UI for a pane of `rows` x `cols` to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the plugin UI into a string of text and ANSI escape sequences.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = Frame::new();
    components::render_layout(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BrowserSettings;
    use crate::domain::{Character, CharacterPage};
    use crate::ui::Theme;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(Theme::default(), BrowserSettings::default());
        let request = state.start();
        state.apply_fetch_result(
            &request,
            CharacterPage {
                characters: vec![
                    Character::new(1, "Rick Sanchez", "https://img/1.jpeg"),
                    Character::new(265, "Pickle Rick", "https://img/265.jpeg"),
                ],
                total_pages: 42,
            },
        );
        state
    }

    #[test]
    fn loading_screen_hides_cards() {
        let state = AppState::new(Theme::default(), BrowserSettings::default());
        let out = render_to_string(&state, 30, 100);
        assert!(out.contains("Loading characters..."));
        assert!(out.contains("Page 1 of 0"));
    }

    #[test]
    fn loaded_screen_shows_cards_and_pagination() {
        let out = render_to_string(&loaded_state(), 30, 100);
        assert!(out.contains("Rick Sanchez"));
        assert!(out.contains("Pickle Rick"));
        assert!(out.contains("Page 1 of 42"));
        assert!(!out.contains("Loading"));
    }

    #[test]
    fn overlay_is_drawn_over_the_grid() {
        let mut state = loaded_state();
        state.activate_image("Pickle Rick");
        let out = render_to_string(&state, 30, 100);
        assert!(out.contains("youtube.com"));
    }
}
