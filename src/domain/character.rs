//! Character domain model and page types.
//!
//! A [`Character`] is one entry of the external character listing. Characters are
//! immutable once received and are replaced wholesale on every fetch, so identity
//! is simply the API's `id` field.

use serde::{Deserialize, Serialize};

/// Case-folded marker that makes a character's image trigger the video overlay.
const EASTER_EGG_MARKER: &str = "pickle rick";

/// A single character returned by the listing endpoint.
///
/// Only `id`, `name` and `image` are required. `status` and `species` are
/// shown as a card subtitle when the API provides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
}

impl Character {
    /// Creates a character with only the required fields.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            status: String::new(),
            species: String::new(),
        }
    }

    /// Returns whether activating this character's image shows the overlay.
    #[must_use]
    pub fn is_easter_egg(&self) -> bool {
        is_easter_egg_name(&self.name)
    }

    /// Returns the `species · status` subtitle, skipping empty parts.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match (self.species.is_empty(), self.status.is_empty()) {
            (false, false) => format!("{} · {}", self.species, self.status),
            (false, true) => self.species.clone(),
            (true, false) => self.status.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Checks a character name for the easter-egg marker, ignoring case.
///
/// # Examples
///
/// ```
/// use mortydex::domain::character::is_easter_egg_name;
///
/// assert!(is_easter_egg_name("PICKLE RICK sanchez"));
/// assert!(!is_easter_egg_name("Rick Sanchez"));
/// ```
#[must_use]
pub fn is_easter_egg_name(name: &str) -> bool {
    name.to_lowercase().contains(EASTER_EGG_MARKER)
}

/// Current position within the paginated listing.
///
/// `current_page` can exceed `last_page()` when a jump made against an older
/// total resolves to a shorter listing. The backward targets clamp into range
/// so the enabled buttons still lead somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
        }
    }
}

impl PageInfo {
    /// Highest page number navigation may target.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// Whether `page` lies inside `1..=last_page()`.
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.last_page()).contains(&page)
    }

    /// Enabled state of the four pagination buttons.
    ///
    /// First/prev are disabled on page 1. Next/last are disabled once the
    /// current page reaches the total, which includes `total_pages == 0`.
    #[must_use]
    pub const fn controls(&self) -> PaginationControls {
        let backward = self.current_page > 1;
        let forward = self.current_page < self.total_pages;
        PaginationControls {
            first: backward,
            prev: backward,
            next: forward,
            last: forward,
        }
    }

    /// Page the "prev" button fetches, or `None` while it is disabled.
    #[must_use]
    pub fn prev_target(&self) -> Option<u32> {
        self.controls()
            .prev
            .then(|| (self.current_page - 1).min(self.last_page()))
    }

    /// Page the "first" button fetches, or `None` while it is disabled.
    #[must_use]
    pub fn first_target(&self) -> Option<u32> {
        self.controls().first.then_some(1)
    }

    #[must_use]
    pub fn next_target(&self) -> Option<u32> {
        self.controls().next.then(|| self.current_page + 1)
    }

    #[must_use]
    pub fn last_target(&self) -> Option<u32> {
        self.controls().last.then_some(self.total_pages)
    }
}

/// Which pagination buttons can be pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub first: bool,
    pub prev: bool,
    pub next: bool,
    pub last: bool,
}

/// One decoded page of results: the characters plus the total page count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPage {
    pub characters: Vec<Character>,
    pub total_pages: u32,
}

impl CharacterPage {
    /// The "no results" page every fetch failure degrades to.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
