//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Mortydex library and the Zellij plugin
//! system: it maps host events to library events, executes the returned actions
//! with host calls, and forwards `render`.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`, request
//!    `WebAccess` and `RunCommands`
//! 2. **Permissions granted**: Fetch page 1 of the unfiltered listing
//! 3. **Update**: Keys and `WebRequestResult`s go through `handle_event`
//! 4. **Render**: Record the pane size and draw the view model
//!
//! # Keybindings
//!
//! Normal mode:
//! - `h`/`j`/`k`/`l`, arrows: Move selection
//! - `Enter`: Activate the selected card's image
//! - `/`: Focus search
//! - `g`: First page, `[`/`PageUp`: previous, `]`/`PageDown`: next, `G`: last
//! - `q`: Close plugin
//!
//! Search mode:
//! - Any character: Type, `Backspace`: delete
//! - `Enter`: Search, `Esc`: back to the grid
//!
//! Overlay:
//! - `o`: Open the video, `Esc`/`x`/`q`: close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use mortydex::domain::CharacterPage;
use mortydex::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: mortydex::AppState,

    config: Config,

    /// Whether the first page has been requested.
    started: bool,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: mortydex::initialize(&config),
            config,
            started: false,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        mortydex::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = mortydex::initialize(&config);
        self.config = config;

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        );
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::WebResponse { status, body, context }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted if !self.started => {
                    tracing::debug!("permissions granted - loading first page");
                    self.started = true;
                    Event::Initialize
                }
                PermissionStatus::Granted => return false,
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - character listing unavailable");
                    return false;
                }
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        mortydex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` through the handler and executes the resulting actions.
    ///
    /// Returns whether the UI should re-render.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                actions
                    .iter()
                    .fold(should_render, |render, action| self.execute_action(action) || render)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.overlay.is_visible() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Char('x' | 'q') => Some(Event::CloseOverlay),
                BareKey::Char('o') => Some(Event::OpenVideo),
                _ => None,
            };
        }

        if key.has_modifiers(&[KeyModifier::Ctrl]) || key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }

        match self.app.input_mode {
            InputMode::Search => Some(match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::MoveLeft,
                BareKey::Right | BareKey::Char('l') => Event::MoveRight,
                BareKey::Up | BareKey::Char('k') => Event::MoveUp,
                BareKey::Down | BareKey::Char('j') => Event::MoveDown,
                BareKey::Enter => Event::ActivateSelected,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('g') => Event::FirstPage,
                BareKey::PageUp | BareKey::Char('[') => Event::PrevPage,
                BareKey::PageDown | BareKey::Char(']') => Event::NextPage,
                BareKey::Char('G') => Event::LastPage,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns whether executing it changed what should be shown.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) -> bool {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                false
            }
            Action::Fetch(request) => match request.url(&self.config.api_url) {
                Ok(url) => {
                    tracing::debug!(url = %url, request_id = request.id, "issuing web request");
                    web_request(
                        url.as_str(),
                        HttpVerb::Get,
                        BTreeMap::new(),
                        vec![],
                        request.to_context(),
                    );
                    false
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cannot build request URL, showing no results");
                    self.dispatch(&Event::FetchCompleted {
                        request: request.clone(),
                        page: CharacterPage::empty(),
                    })
                }
            },
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, command = %self.config.open_command, "opening url");
                run_command(&[self.config.open_command.as_str(), url.as_str()], BTreeMap::new());
                false
            }
        }
    }
}
