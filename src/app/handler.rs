//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where events from the plugin shim turn into
//! state mutations and [`Action`]s. It returns whether a re-render is needed
//! alongside the actions, so the shim can skip redundant frames.
//!
//! # Event Types
//!
//! - **Grid**: `MoveLeft`, `MoveRight`, `MoveUp`, `MoveDown`, `ActivateSelected`
//! - **Pagination**: `FirstPage`, `PrevPage`, `NextPage`, `LastPage`
//! - **Search**: `SearchMode`, `ExitSearch`, `Char`, `Backspace`, `SubmitSearch`
//! - **Overlay**: `CloseOverlay`, `OpenVideo`
//! - **Network**: `Initialize`, `WebResponse`, `FetchCompleted`
//!
//! # Example
//!
//! ```
//! use mortydex::app::{handle_event, Action, AppState, BrowserSettings, Event};
//! use mortydex::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), BrowserSettings::default());
//! let (render, actions) = handle_event(&mut state, &Event::Initialize)?;
//! assert!(render);
//! assert!(matches!(actions[..], [Action::Fetch(_)]));
//! # Ok::<(), mortydex::BrowserError>(())
//! ```

use crate::app::{Action, AppState, InputMode};
use crate::client::{self, FetchRequest};
use crate::domain::error::Result;
use crate::domain::CharacterPage;
use std::collections::BTreeMap;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Network access was granted: load page 1 of the unfiltered listing.
    Initialize,

    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    FirstPage,
    PrevPage,
    NextPage,
    LastPage,

    /// Focuses the search field.
    SearchMode,
    /// Returns focus to the grid, keeping the field text.
    ExitSearch,
    /// Appends a character to the search field.
    Char(char),
    /// Removes the last character from the search field.
    Backspace,
    /// Commits the search field and fetches its first page.
    SubmitSearch,

    /// Activates the selected card's image.
    ActivateSelected,
    CloseOverlay,
    /// Opens the overlay's video with the external open command.
    OpenVideo,

    /// Hides the plugin pane.
    CloseFocus,

    /// Raw web request result as delivered by the host.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },

    /// A fetch resolved to a page, either decoded from a response or
    /// degraded to empty before it could be sent.
    FetchCompleted {
        request: FetchRequest,
        page: CharacterPage,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the state changed in a way that must be rendered.
///
/// # Errors
///
/// Returns [`BrowserError::Context`](crate::domain::BrowserError::Context) when a web response carries a context map
/// that claims to be ours but cannot be decoded.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Initialize => Ok((true, vec![Action::Fetch(state.start())])),
        Event::MoveLeft => {
            state.move_selection_left();
            Ok((true, vec![]))
        }
        Event::MoveRight => {
            state.move_selection_right();
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::MoveDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::FirstPage => Ok(fetch_or_skip(state.first_page())),
        Event::PrevPage => Ok(fetch_or_skip(state.prev_page())),
        Event::NextPage => Ok(fetch_or_skip(state.next_page())),
        Event::LastPage => Ok(fetch_or_skip(state.last_page())),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(search_input = %state.search_input, "leaving search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.push_search_char(*c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.pop_search_char();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![Action::Fetch(state.submit_search())]))
        }
        Event::ActivateSelected => Ok((state.activate_selected(), vec![])),
        Event::CloseOverlay => {
            let was_visible = state.overlay.is_visible();
            state.close_overlay();
            Ok((was_visible, vec![]))
        }
        Event::OpenVideo => {
            let Some(video) = state.overlay.video() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(url = %video.url, "opening overlay video");
            Ok((false, vec![Action::OpenUrl { url: video.url.clone() }]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::WebResponse { status, body, context } => {
            if !FetchRequest::is_own_context(context) {
                tracing::debug!(status, "ignoring foreign web request result");
                return Ok((false, vec![]));
            }
            let request = match FetchRequest::from_context(context) {
                Ok(request) => request,
                Err(e) => {
                    let Some(request_id) = FetchRequest::request_id(context) else {
                        return Err(e);
                    };
                    tracing::warn!(request_id, error = %e, "undecodable request context, showing no results");
                    return Ok((state.fail_fetch(request_id), vec![]));
                }
            };
            let page = client::resolve(*status, body);
            Ok(complete_fetch(state, &request, page))
        }
        Event::FetchCompleted { request, page } => Ok(complete_fetch(state, request, page.clone())),
    }
}

fn fetch_or_skip(request: Option<FetchRequest>) -> (bool, Vec<Action>) {
    request.map_or((false, vec![]), |request| (true, vec![Action::Fetch(request)]))
}

/// Applies a resolved fetch inside the span context of the request that issued it.
fn complete_fetch(state: &mut AppState, request: &FetchRequest, page: CharacterPage) -> (bool, Vec<Action>) {
    let span = tracing::debug_span!(
        "fetch_completed",
        request_id = request.id,
        page = request.page,
        latency_ms = request.elapsed_ms()
    );
    if let Some(trace) = &request.trace_context {
        trace.adopt(&span);
    }
    let _span = span.entered();

    let character_count = page.characters.len();
    let applied = state.apply_fetch_result(request, page);
    if applied {
        tracing::info!(
            request_id = request.id,
            page = request.page,
            name = %request.name,
            character_count,
            "page loaded"
        );
    }
    (applied, vec![])
}

impl Event {
    /// Short, payload-free name for span fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "Initialize",
            Self::MoveLeft => "MoveLeft",
            Self::MoveRight => "MoveRight",
            Self::MoveUp => "MoveUp",
            Self::MoveDown => "MoveDown",
            Self::FirstPage => "FirstPage",
            Self::PrevPage => "PrevPage",
            Self::NextPage => "NextPage",
            Self::LastPage => "LastPage",
            Self::SearchMode => "SearchMode",
            Self::ExitSearch => "ExitSearch",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::SubmitSearch => "SubmitSearch",
            Self::ActivateSelected => "ActivateSelected",
            Self::CloseOverlay => "CloseOverlay",
            Self::OpenVideo => "OpenVideo",
            Self::CloseFocus => "CloseFocus",
            Self::WebResponse { .. } => "WebResponse",
            Self::FetchCompleted { .. } => "FetchCompleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BrowserSettings;
    use crate::domain::{BrowserError, Character};
    use crate::ui::theme::Theme;
    use rstest::{fixture, rstest};

    const LISTING: &str = r#"{
        "info": { "count": 2, "pages": 3, "next": null, "prev": null },
        "results": [
            { "id": 1, "name": "Rick Sanchez", "image": "https://img/1.jpeg", "status": "Alive", "species": "Human" },
            { "id": 265, "name": "Pickle Rick", "image": "https://img/265.jpeg" }
        ]
    }"#;

    #[fixture]
    fn state() -> AppState {
        AppState::new(Theme::default(), BrowserSettings::default())
    }

    fn fetched(actions: &[Action]) -> &FetchRequest {
        match actions {
            [Action::Fetch(request)] => request,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, request: &FetchRequest, status: u16, body: &str) -> bool {
        let event = Event::WebResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: request.to_context(),
        };
        handle_event(state, &event).unwrap().0
    }

    #[rstest]
    fn initialize_fetches_first_unfiltered_page(mut state: AppState) {
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        let request = fetched(&actions);
        assert_eq!(request.page, 1);
        assert_eq!(request.name, "");
    }

    #[rstest]
    fn web_response_populates_grid(mut state: AppState) {
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        let request = fetched(&actions).clone();

        assert!(respond(&mut state, &request, 200, LISTING));
        assert!(!state.loading);
        assert_eq!(state.page_info.total_pages, 3);
        assert_eq!(state.characters[1].name, "Pickle Rick");
    }

    #[rstest]
    #[case(404, r#"{"error":"There is nothing here"}"#)]
    #[case(500, "")]
    #[case(200, "<html>")]
    fn failed_fetch_shows_no_results(mut state: AppState, #[case] status: u16, #[case] body: &str) {
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        let request = fetched(&actions).clone();

        assert!(respond(&mut state, &request, status, body));
        assert!(!state.loading);
        assert!(state.characters.is_empty());
        assert_eq!(state.page_info.total_pages, 0);
    }

    #[rstest]
    fn foreign_results_are_ignored(mut state: AppState) {
        let event = Event::WebResponse {
            status: 200,
            body: vec![],
            context: BTreeMap::from([("other_plugin".to_string(), "1".to_string())]),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        assert!(state.loading);
    }

    #[rstest]
    fn unidentifiable_context_is_an_error(mut state: AppState) {
        let mut context = FetchRequest::new(1, 1, "").to_context();
        context.insert("request_id".to_string(), "many".to_string());
        let event = Event::WebResponse { status: 200, body: vec![], context };

        assert!(matches!(handle_event(&mut state, &event), Err(BrowserError::Context(_))));
        assert!(state.loading);
    }

    #[rstest]
    #[case("page", "many")]
    #[case("issued_at_ms", "x")]
    fn corrupt_context_of_latest_request_stops_loading(
        mut state: AppState,
        #[case] key: &str,
        #[case] value: &str,
    ) {
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        let mut context = fetched(&actions).to_context();
        context.insert(key.to_string(), value.to_string());
        let event = Event::WebResponse { status: 200, body: LISTING.as_bytes().to_vec(), context };

        assert_eq!(handle_event(&mut state, &event).unwrap(), (true, vec![]));
        assert!(!state.loading);
        assert!(state.characters.is_empty());
    }

    #[rstest]
    fn corrupt_context_of_stale_request_is_discarded(mut state: AppState) {
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        let mut context = fetched(&actions).to_context();
        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        context.insert("page".to_string(), "many".to_string());
        let event = Event::WebResponse { status: 200, body: vec![], context };

        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        assert!(state.loading);
    }

    #[rstest]
    fn typing_only_edits_in_search_mode(mut state: AppState) {
        assert_eq!(handle_event(&mut state, &Event::Char('r')).unwrap(), (false, vec![]));
        assert_eq!(state.search_input, "");

        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "ricky".chars() {
            let (render, actions) = handle_event(&mut state, &Event::Char(c)).unwrap();
            assert!(render);
            assert!(actions.is_empty());
        }
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.search_input, "rick");
    }

    #[rstest]
    fn submit_search_fetches_and_returns_to_grid(mut state: AppState) {
        handle_event(&mut state, &Event::SearchMode).unwrap();
        state.set_search_term("morty");

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        let request = fetched(&actions);
        assert_eq!(request.name, "morty");
        assert_eq!(request.page, 1);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[rstest]
    fn disabled_pagination_produces_nothing(mut state: AppState) {
        let (_, actions) = handle_event(&mut state, &Event::Initialize).unwrap();
        let request = fetched(&actions).clone();
        respond(&mut state, &request, 200, LISTING);

        assert_eq!(handle_event(&mut state, &Event::PrevPage).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::FirstPage).unwrap(), (false, vec![]));

        let (_, actions) = handle_event(&mut state, &Event::LastPage).unwrap();
        assert_eq!(fetched(&actions).page, 3);
    }

    #[rstest]
    fn overlay_opens_and_closes_through_events(mut state: AppState) {
        let request = state.start();
        state.apply_fetch_result(
            &request,
            CharacterPage {
                characters: vec![Character::new(265, "Pickle Rick", "https://img/265.jpeg")],
                total_pages: 1,
            },
        );

        assert_eq!(handle_event(&mut state, &Event::OpenVideo).unwrap(), (false, vec![]));

        let (render, actions) = handle_event(&mut state, &Event::ActivateSelected).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.overlay.is_visible());

        let (_, actions) = handle_event(&mut state, &Event::OpenVideo).unwrap();
        assert!(matches!(&actions[..], [Action::OpenUrl { url }] if url.contains("youtube")));

        assert!(handle_event(&mut state, &Event::CloseOverlay).unwrap().0);
        assert!(!handle_event(&mut state, &Event::CloseOverlay).unwrap().0);
    }

    #[rstest]
    fn fetch_completed_applies_without_decoding(mut state: AppState) {
        let request = state.start();
        let event = Event::FetchCompleted {
            request,
            page: CharacterPage::empty(),
        };
        assert!(handle_event(&mut state, &event).unwrap().0);
        assert!(!state.loading);
    }

    #[rstest]
    fn close_focus_hides_plugin(mut state: AppState) {
        assert_eq!(
            handle_event(&mut state, &Event::CloseFocus).unwrap(),
            (false, vec![Action::CloseFocus])
        );
    }
}
