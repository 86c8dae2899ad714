//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host directly. It returns a list of
//! [`Action`]s which the plugin shim executes in order after the state change.
//!
//! # Example
//!
//! ```
//! use mortydex::app::Action;
//! use mortydex::client::FetchRequest;
//!
//! let actions = vec![Action::Fetch(FetchRequest::new(1, 1, ""))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::client::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one GET request to the character listing.
    ///
    /// The response comes back later as a web request result event.
    Fetch(FetchRequest),

    /// Opens a URL outside the terminal with the configured open command.
    OpenUrl {
        url: String,
    },
}
