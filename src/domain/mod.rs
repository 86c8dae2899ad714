//! Domain layer for the Mortydex plugin.
//!
//! Core types independent of Zellij APIs and of the transport used to reach the
//! character API.
//!
//! - [`error`]: Error types and result aliases
//! - [`character`]: Character model, page info and decoded pages

pub mod character;
pub mod error;

pub use character::{Character, CharacterPage, PageInfo, PaginationControls};
pub use error::{BrowserError, Result};
