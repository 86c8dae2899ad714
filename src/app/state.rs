//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the browser: the current page of
//! characters, pagination, the search field, the loading flag, and the overlay.
//! Operations that change the page or the committed search term return the
//! [`FetchRequest`] that must be issued for the new `(page, term)` pair. Nothing
//! else triggers a fetch.
//!
//! # Out-of-order responses
//!
//! Requests carry a generation number. With `discard_stale_responses` enabled, a
//! completed fetch is applied only if it is the most recently issued one. With it
//! disabled, whichever response arrives last wins, even if it belongs to an older
//! request.
//!
//! # Example
//!
//! ```
//! use mortydex::app::{AppState, BrowserSettings};
//! use mortydex::domain::{Character, CharacterPage};
//! use mortydex::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), BrowserSettings::default());
//! let request = state.submit_search();
//! assert!(state.loading);
//!
//! let page = CharacterPage {
//!     characters: vec![Character::new(1, "Rick Sanchez", "https://img/1.jpeg")],
//!     total_pages: 3,
//! };
//! assert!(state.apply_fetch_result(&request, page));
//! assert!(!state.loading);
//! assert_eq!(state.page_info.total_pages, 3);
//! ```

use super::modes::{InputMode, Overlay, VideoEmbed};
use crate::client::FetchRequest;
use crate::domain::{Character, CharacterPage, PageInfo};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    self, BodyView, CardView, EmptyState, FooterInfo, GridView, HeaderInfo, OverlayInfo,
    PaginationInfo, SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Default address of the easter-egg video.
pub const DEFAULT_VIDEO_URL: &str = "https://www.youtube.com/watch?v=_TsgWjaBvbc";

const TITLE: &str = "Rick & Morty Characters";
const BRAND: &str = "Mortydex";
const NO_RESULTS: &str = "No characters found";

/// Behavioural settings taken from plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Apply only the latest request's response.
    pub discard_stale_responses: bool,
    /// Video shown by the easter-egg overlay.
    pub video_url: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            discard_stale_responses: true,
            video_url: DEFAULT_VIDEO_URL.to_string(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Characters of the current page, in API order.
    pub characters: Vec<Character>,

    /// Current and total page numbers.
    pub page_info: PageInfo,

    /// Text in the search field. Editing it does not fetch.
    pub search_input: String,

    /// Last submitted search term. Pagination fetches with this term.
    pub active_query: String,

    /// A fetch is outstanding whose result will be applied.
    pub loading: bool,

    /// Easter-egg overlay state.
    pub overlay: Overlay,

    /// Whether keys go to the grid or to the search field.
    pub input_mode: InputMode,

    /// Index of the selected card within `characters`.
    pub selected_index: usize,

    /// Card columns in the last rendered layout, used for vertical movement.
    pub grid_columns: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    settings: BrowserSettings,

    /// Generation number of the most recently issued request.
    latest_request_id: u64,
}

impl AppState {
    /// Creates the initial state: page 1 of an unknown total, nothing loaded.
    ///
    /// `loading` starts `true` because the first fetch is issued as soon as the
    /// plugin is allowed to reach the network.
    #[must_use]
    pub fn new(theme: Theme, settings: BrowserSettings) -> Self {
        Self {
            characters: vec![],
            page_info: PageInfo::default(),
            search_input: String::new(),
            active_query: String::new(),
            loading: true,
            overlay: Overlay::Hidden,
            input_mode: InputMode::Normal,
            selected_index: 0,
            grid_columns: 1,
            theme,
            settings,
            latest_request_id: 0,
        }
    }

    /// Behavioural settings the state was created with.
    #[must_use]
    pub const fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Generation number of the most recently issued request (0 before any).
    #[must_use]
    pub const fn latest_request_id(&self) -> u64 {
        self.latest_request_id
    }

    /// Replaces the search field text. Does not fetch.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_input = term.into();
        tracing::trace!(search_input = %self.search_input, "search field updated");
    }

    /// Appends a typed character to the search field.
    pub fn push_search_char(&mut self, c: char) {
        let mut term = std::mem::take(&mut self.search_input);
        term.push(c);
        self.set_search_term(term);
    }

    /// Deletes the last character of the search field.
    pub fn pop_search_char(&mut self) {
        let mut term = std::mem::take(&mut self.search_input);
        term.pop();
        self.set_search_term(term);
    }

    /// Commits the search field and fetches its first page.
    ///
    /// Always returns a request, even when the term and page are unchanged.
    pub fn submit_search(&mut self) -> FetchRequest {
        self.active_query = self.search_input.trim().to_string();
        self.page_info.current_page = 1;
        tracing::debug!(query = %self.active_query, "search submitted");
        self.begin_fetch()
    }

    /// Issues the initial fetch: page 1 of the committed term.
    pub fn start(&mut self) -> FetchRequest {
        self.page_info.current_page = 1;
        self.begin_fetch()
    }

    /// Moves to page `n` and fetches it.
    ///
    /// Returns `None` without fetching when `n` is the current page or lies
    /// outside `1..=max(total_pages, 1)`.
    pub fn go_to_page(&mut self, n: u32) -> Option<FetchRequest> {
        if n == self.page_info.current_page {
            tracing::debug!(page = n, "already on requested page");
            return None;
        }
        if !self.page_info.contains(n) {
            tracing::debug!(
                page = n,
                total_pages = self.page_info.total_pages,
                "page out of range"
            );
            return None;
        }

        self.page_info.current_page = n;
        Some(self.begin_fetch())
    }

    /// Fetches page 1. `None` while the "first" button is disabled.
    pub fn first_page(&mut self) -> Option<FetchRequest> {
        self.go_to_page(self.page_info.first_target()?)
    }

    /// Fetches the previous page, clamped to the last page of the current
    /// listing. `None` while the "prev" button is disabled.
    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        self.go_to_page(self.page_info.prev_target()?)
    }

    /// Fetches the next page. `None` while the "next" button is disabled.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.go_to_page(self.page_info.next_target()?)
    }

    /// Fetches the last page. `None` while the "last" button is disabled.
    pub fn last_page(&mut self) -> Option<FetchRequest> {
        self.go_to_page(self.page_info.last_target()?)
    }

    /// Starts a fetch for the current page and committed term.
    ///
    /// Clears the previous results and raises the loading flag.
    fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_request_id += 1;
        self.loading = true;
        self.characters.clear();
        self.selected_index = 0;

        let request = FetchRequest::new(
            self.latest_request_id,
            self.page_info.current_page,
            self.active_query.clone(),
        );
        tracing::debug!(
            request_id = request.id,
            page = request.page,
            name = %request.name,
            "fetch started"
        );
        request
    }

    /// Applies a completed fetch.
    ///
    /// Returns `false` if the result was discarded because a newer request has
    /// been issued since (only when `discard_stale_responses` is set).
    pub fn apply_fetch_result(&mut self, request: &FetchRequest, page: CharacterPage) -> bool {
        let is_latest = request.id == self.latest_request_id;

        if !is_latest && self.settings.discard_stale_responses {
            tracing::debug!(
                request_id = request.id,
                latest_request_id = self.latest_request_id,
                "discarding stale response"
            );
            return false;
        }

        if !is_latest {
            tracing::debug!(
                request_id = request.id,
                latest_request_id = self.latest_request_id,
                "applying out-of-order response"
            );
        }

        self.characters = page.characters;
        self.page_info = PageInfo {
            current_page: request.page,
            total_pages: page.total_pages,
        };
        self.loading = false;
        self.selected_index = 0;

        tracing::debug!(
            request_id = request.id,
            character_count = self.characters.len(),
            current_page = self.page_info.current_page,
            total_pages = self.page_info.total_pages,
            "fetch applied"
        );
        true
    }

    /// Resolves request `request_id` as "no results" when its context could
    /// not be fully decoded.
    ///
    /// Follows the same staleness rule as [`apply_fetch_result`](Self::apply_fetch_result)
    /// and keeps the current page.
    pub fn fail_fetch(&mut self, request_id: u64) -> bool {
        if request_id != self.latest_request_id && self.settings.discard_stale_responses {
            tracing::debug!(request_id, latest_request_id = self.latest_request_id, "discarding stale failure");
            return false;
        }

        self.characters.clear();
        self.page_info.total_pages = 0;
        self.loading = false;
        self.selected_index = 0;
        true
    }

    /// Shows the overlay if `character_name` contains "pickle rick" in any case.
    ///
    /// Returns whether the overlay became visible. Never fetches.
    pub fn activate_image(&mut self, character_name: &str) -> bool {
        if self.overlay.is_visible() || !crate::domain::character::is_easter_egg_name(character_name) {
            return false;
        }

        tracing::debug!(character = %character_name, "easter egg activated");
        self.overlay = Overlay::Visible(VideoEmbed::prepare(&self.settings.video_url));
        true
    }

    /// Activates the selected card's image.
    pub fn activate_selected(&mut self) -> bool {
        let Some(name) = self.selected_character().map(|c| c.name.clone()) else {
            return false;
        };
        self.activate_image(&name)
    }

    /// Hides the overlay, releasing the prepared video.
    pub fn close_overlay(&mut self) {
        if self.overlay.is_visible() {
            tracing::debug!("overlay closed");
        }
        self.overlay = Overlay::Hidden;
    }

    #[must_use]
    pub fn selected_character(&self) -> Option<&Character> {
        self.characters.get(self.selected_index)
    }

    /// Records the grid width of the pane so vertical moves skip whole rows.
    pub fn set_viewport(&mut self, _rows: usize, cols: usize) {
        self.grid_columns = viewmodel::grid_columns(cols);
    }

    pub fn move_selection_left(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_right(&mut self) {
        if self.selected_index + 1 < self.characters.len() {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(self.grid_columns.max(1));
    }

    pub fn move_selection_down(&mut self) {
        let target = self.selected_index + self.grid_columns.max(1);
        if target < self.characters.len() {
            self.selected_index = target;
        }
    }

    /// Computes the view model for a pane of `rows` x `cols`.
    ///
    /// Pure projection of the state:
    /// - `loading` suppresses the grid in favour of a loading indicator
    /// - otherwise a non-empty page is a card grid, an empty one "No characters found"
    /// - the pagination bar is always present
    /// - the overlay is included whenever it is visible
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = if self.loading {
            BodyView::Loading
        } else if self.characters.is_empty() {
            BodyView::Empty(self.compute_empty_state())
        } else {
            BodyView::Grid(self.compute_grid(rows, cols))
        };

        UIViewModel {
            header: HeaderInfo {
                title: TITLE.to_string(),
                brand: BRAND.to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                is_focused: self.input_mode == InputMode::Search,
            },
            body,
            pagination: PaginationInfo {
                label: format!(
                    "Page {} of {}",
                    self.page_info.current_page, self.page_info.total_pages
                ),
                controls: self.page_info.controls(),
            },
            footer: self.compute_footer(),
            overlay: self.overlay.video().map(|video| OverlayInfo {
                title: video.title.clone(),
                url: video.url.clone(),
                hint: "o: open video  Esc: close".to_string(),
            }),
        }
    }

    /// Builds the window of card rows around the selection.
    fn compute_grid(&self, rows: usize, cols: usize) -> GridView {
        let columns = viewmodel::grid_columns(cols);
        let visible_rows = viewmodel::visible_card_rows(rows);
        let total_rows = self.characters.len().div_ceil(columns);

        let selected_row = self.selected_index / columns;
        let start_row = selected_row
            .saturating_sub(visible_rows / 2)
            .min(total_rows.saturating_sub(visible_rows));

        let start = start_row * columns;
        let end = ((start_row + visible_rows) * columns).min(self.characters.len());

        let matcher = if self.active_query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let cards = self.characters[start..end]
            .iter()
            .enumerate()
            .map(|(offset, character)| {
                self.compute_card(character, start + offset == self.selected_index, matcher.as_ref())
            })
            .collect();

        GridView { cards, columns }
    }

    fn compute_card(&self, character: &Character, is_selected: bool, matcher: Option<&SkimMatcherV2>) -> CardView {
        let inner_width = viewmodel::CARD_WIDTH - 4;

        let name = truncate_end(&character.name, inner_width);
        let mut name_len = name.chars().count();
        if name_len < character.name.chars().count() {
            // the trailing "..." is not part of the name
            name_len -= 3;
        }
        let highlight_ranges = matcher
            .map(|m| self.compute_highlight_ranges(&character.name, m))
            .unwrap_or_default()
            .into_iter()
            .filter(|&(start, _)| start < name_len)
            .map(|(start, end)| (start, end.min(name_len)))
            .collect();

        let image = character
            .image
            .split_once("://")
            .map_or(character.image.as_str(), |(_, rest)| rest);

        CardView {
            name,
            subtitle: truncate_end(&character.subtitle(), inner_width),
            image: truncate_start(image, inner_width),
            is_selected,
            is_easter_egg: character.is_easter_egg(),
            highlight_ranges,
        }
    }

    /// Coalesces fuzzy match indices of the committed query into ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.active_query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_empty_state(&self) -> EmptyState {
        let subtitle = if self.active_query.is_empty() {
            "The character API returned nothing for this page".to_string()
        } else {
            format!("Nothing matches \"{}\"", self.active_query)
        };
        EmptyState {
            message: NO_RESULTS.to_string(),
            subtitle,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.overlay.is_visible() {
            "o: open video  Esc/x: close"
        } else {
            match self.input_mode {
                InputMode::Search => "Type to search  Enter: submit  Esc: back to grid",
                InputMode::Normal => {
                    "hjkl: move  Enter: view  /: search  g/[/]/G: first/prev/next/last  q: quit"
                }
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Truncates to `max` characters, ending with `...` when shortened.
fn truncate_end(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Truncates to `max` characters, starting with `...` when shortened.
fn truncate_start(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    let kept: String = text.chars().skip(len - max.saturating_sub(3)).collect();
    format!("...{kept}")
}
