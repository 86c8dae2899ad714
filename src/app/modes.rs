//! Input mode and overlay state types.
//!
//! [`InputMode`] decides how key presses are interpreted. [`Overlay`] is the
//! two-state machine for the easter-egg video panel:
//!
//! ```text
//! Hidden ──qualifying image activation──▶ Visible(VideoEmbed)
//!   ▲                                         │
//!   └──────────────── close ──────────────────┘
//! ```
//!
//! The [`VideoEmbed`] only exists while the overlay is visible. It is built on the
//! `Hidden -> Visible` transition and dropped on close.

/// Title shown on the overlay panel.
pub const OVERLAY_TITLE: &str = "Pickle Rick";

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Grid navigation and pagination keys are active.
    Normal,

    /// Keys edit the search field. Enter submits, Esc returns to `Normal`.
    Search,
}

/// Media prepared for the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEmbed {
    /// Panel title.
    pub title: String,
    /// Address opened by the "open video" action.
    pub url: String,
}

impl VideoEmbed {
    /// Prepares the easter-egg video.
    #[must_use]
    pub fn prepare(url: &str) -> Self {
        tracing::debug!(url = %url, "preparing overlay video");
        Self {
            title: OVERLAY_TITLE.to_string(),
            url: url.to_string(),
        }
    }
}

/// Easter-egg overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    Visible(VideoEmbed),
}

impl Overlay {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    /// The prepared video, if the overlay is showing.
    #[must_use]
    pub const fn video(&self) -> Option<&VideoEmbed> {
        match self {
            Self::Visible(video) => Some(video),
            Self::Hidden => None,
        }
    }
}
