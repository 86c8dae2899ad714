//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain and client layers.
//!
//! ```text
//! Key / web result → Event → handle_event → AppState mutation → Actions → host calls
//!                                                                  │
//!            WebRequestResult ◀──────────── web_request ◀──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode and overlay state machine
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Overlay, VideoEmbed};
pub use state::{AppState, BrowserSettings};
