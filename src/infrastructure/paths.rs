//! Path helpers for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Directory holding the plugin's trace files.
///
/// `/host` is the cwd of the last focused terminal, usually the home directory,
/// so this normally resolves to `~/.local/share/zellij/mortydex`.
///
/// ```
/// use mortydex::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/mortydex"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("mortydex")
}

/// Maps a `~`-prefixed path onto the sandbox's `/host` mount.
///
/// ```
/// use mortydex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/squanch.toml"), "/host/themes/squanch.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/mortydex.toml"), "/etc/mortydex.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_users_homes_are_left_alone() {
        assert_eq!(expand_tilde("~morty/themes"), "~morty/themes");
    }
}
