//! Mortydex: a Zellij plugin for browsing Rick and Morty characters.
//!
//! The plugin shows one page of characters from the public character API as a
//! grid of cards, with a name search box and first/prev/next/last pagination.
//! Activating the card of any character whose name contains "pickle rick" opens
//! an overlay offering the Pickle Rick video.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web_request, render
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Pagination, search and overlay state             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                  │
//! ┌───────────────────────┐        ┌───────────────────────┐
//! │ Client (client/)      │        │ UI Layer (ui/)        │
//! │ - Request URLs        │        │ - Card grid           │
//! │ - Response decoding   │        │ - Theming             │
//! │ - Trace propagation   │        │ - Components          │
//! └───────────────────────┘        └───────────────────────┘
//!         │                                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and sandbox paths (infrastructure/)│
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans to a rotating JSON file      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/mortydex.wasm" {
//!         theme "citadel"
//!         trace_level "mortydex=debug"
//!         discard_stale_responses "true"
//!         open_command "open"
//!     }
//! }
//! ```
//!
//! # Fetch Flow
//!
//! 1. A state operation changes the page or committed search term and returns a
//!    [`client::FetchRequest`].
//! 2. The shim issues it with `web_request`, storing the request in the context map.
//! 3. The host delivers `WebRequestResult`; the handler decodes the context, folds
//!    any failure into an empty page, and applies the result if it is still current.
//!
//! # Example
//!
//! ```
//! use mortydex::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Initialize)?;
//!
//! let Action::Fetch(request) = &actions[0] else { unreachable!() };
//! let url = request.url(&Config::default().api_url)?;
//! assert_eq!(url.as_str(), "https://rickandmortyapi.com/api/character?page=1&name=");
//! # Ok::<(), mortydex::BrowserError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, BrowserSettings, Event, InputMode};
pub use domain::{BrowserError, Character, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default command used to open the overlay video outside the terminal.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Character listing endpoint. Default: [`client::DEFAULT_API_URL`]
    pub api_url: String,

    /// Built-in theme name (`portal`, `citadel`). Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to the sandbox's `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: String,

    /// Apply only the most recent fetch's result. Default: `true`
    ///
    /// With `false`, whichever response arrives last is shown, even if it
    /// belongs to an older request.
    pub discard_stale_responses: bool,

    /// Video offered by the easter-egg overlay.
    pub video_url: String,

    /// Executable used to open the video.
    pub open_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: client::DEFAULT_API_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
            discard_stale_responses: true,
            video_url: app::state::DEFAULT_VIDEO_URL.to_string(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, empty or unparseable values fall back to their defaults. An
    /// `api_url` that is not an absolute URL is treated as missing.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use mortydex::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("theme".to_string(), "citadel".to_string()),
    ///     ("discard_stale_responses".to_string(), "false".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("citadel"));
    /// assert!(!config.discard_stale_responses);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let api_url = get("api_url")
            .filter(|url| url::Url::parse(url).is_ok())
            .unwrap_or(defaults.api_url);

        let discard_stale_responses = get("discard_stale_responses")
            .and_then(|s| s.parse::<bool>().ok())
            .unwrap_or(defaults.discard_stale_responses);

        Self {
            api_url,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level").unwrap_or(defaults.trace_level),
            discard_stale_responses,
            video_url: get("video_url").unwrap_or(defaults.video_url),
            open_command: get("open_command").unwrap_or(defaults.open_command),
        }
    }

    /// Behavioural settings handed to [`AppState`].
    #[must_use]
    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            discard_stale_responses: self.discard_stale_responses,
            video_url: self.video_url.clone(),
        }
    }
}

/// Builds the initial [`AppState`] for `config`.
///
/// The theme comes from `theme_file`, else `theme`, else the default; a theme
/// that fails to load is logged and replaced by the default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing mortydex plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, config.browser_settings())
}
