//! Sandbox filesystem helpers.
//!
//! Zellij mounts the host filesystem under `/host`, so user-facing paths from
//! configuration have to be translated before the plugin can open them.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
